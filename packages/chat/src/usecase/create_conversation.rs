//! UseCase: 会話作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateConversationUseCase::execute() メソッド
//! - プライベート会話とグループ会話の作成ルール
//!
//! ### なぜこのテストが必要か
//! - プライベート会話は「2 人だけ」という前提で表示名が決まるため、
//!   作成時にその前提を守る必要がある
//! - 同じ 2 人のプライベート会話を重複して作らせない
//!
//! ### どのような状況を想定しているか
//! - 正常系：プライベート会話・グループ会話の作成
//! - 異常系：作成者が含まれない、未登録ユーザー、名前なしのグループ、重複したプライベート会話

use std::{collections::BTreeSet, sync::Arc};

use crate::domain::{
    ChatEvent, Conversation, ConversationChange, ConversationError, ConversationName,
    ConversationRepository, IdentityRepository, UserId,
};

use super::error::CreateConversationError;

/// 会話作成の入力
#[derive(Debug, Clone)]
pub struct CreateConversationInput {
    /// 明示的な名前（プライベート会話では無視される）
    pub name: ConversationName,
    pub is_private: bool,
    /// メンバー（作成者を含む）
    pub members: Vec<UserId>,
    /// クライアントが指定したイベント（省略時は new_chat）
    pub event: Option<ChatEvent>,
}

/// 会話作成のユースケース
pub struct CreateConversationUseCase {
    identities: Arc<dyn IdentityRepository>,
    conversations: Arc<dyn ConversationRepository>,
}

impl CreateConversationUseCase {
    /// 新しい CreateConversationUseCase を作成
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            identities,
            conversations,
        }
    }

    /// 会話作成を実行
    ///
    /// # Arguments
    ///
    /// * `creator` - 作成者のユーザー ID
    /// * `input` - 会話の設定
    ///
    /// # Returns
    ///
    /// * `Ok(ConversationChange)` - 作成された会話とイベント
    /// * `Err(CreateConversationError)` - 作成失敗
    pub async fn execute(
        &self,
        creator: UserId,
        input: CreateConversationInput,
    ) -> Result<ConversationChange, CreateConversationError> {
        let members: BTreeSet<UserId> = input.members.into_iter().collect();

        // 1. 作成者がメンバーに含まれているか
        if !members.contains(&creator) {
            return Err(CreateConversationError::CreatorNotIncluded);
        }

        // 2. 全メンバーが登録済みか
        let ids: Vec<UserId> = members.iter().copied().collect();
        let known: BTreeSet<UserId> = self
            .identities
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|identity| identity.id)
            .collect();
        if let Some(unknown) = ids.iter().find(|id| !known.contains(id)) {
            return Err(CreateConversationError::UnknownUser(*unknown));
        }

        // 3. 会話を組み立てる
        let conversation = if input.is_private {
            let other = match (members.len(), members.iter().find(|id| **id != creator)) {
                (2, Some(other)) => *other,
                (actual, _) => {
                    return Err(ConversationError::PrivateRequiresTwoMembers { actual }.into());
                }
            };
            let id = self.conversations.next_id().await?;
            let conversation = Conversation::private(id, creator, other)?;

            // 4. 保存（同じ 2 人の会話が既にあれば保存しない）
            if let Some(existing) = self
                .conversations
                .insert_private(conversation.clone())
                .await?
            {
                return Err(CreateConversationError::PrivateConversationExists(
                    existing,
                ));
            }
            conversation
        } else {
            if input.name.is_empty() {
                return Err(ConversationError::GroupNameRequired.into());
            }
            let id = self.conversations.next_id().await?;
            let conversation = Conversation::group(id, input.name, members)?;

            // 4. 保存
            self.conversations.save(conversation.clone()).await?;
            conversation
        };

        tracing::info!(
            conversation_id = %conversation.id,
            private = conversation.is_private,
            members = conversation.members.len(),
            "Conversation created"
        );

        Ok(ConversationChange {
            event: input.event.unwrap_or(ChatEvent::NewChat),
            conversation,
        })
    }
}
