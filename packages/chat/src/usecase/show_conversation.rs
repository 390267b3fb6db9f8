//! UseCase: 会話詳細の取得
//!
//! 会話の表示名・メンバー・メッセージ履歴をまとめて返します。
//! 閲覧者がいない場合、表示名は明示的な名前（なければ chat_<id>）になります。

use std::{collections::BTreeMap, sync::Arc};

use crate::{
    domain::{
        ConversationId, ConversationNamer, ConversationRepository, IdentityRepository,
        MessageRepository, RepositoryError, UserId,
    },
    infrastructure::{
        dto::ChatDisplayPayload,
        presenter::{to_message_nested_payload, to_nested_display_payload},
    },
};

use super::error::ViewConversationError;

/// 会話詳細のユースケース
pub struct ShowConversationUseCase {
    identities: Arc<dyn IdentityRepository>,
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
    namer: ConversationNamer,
}

impl ShowConversationUseCase {
    /// 新しい ShowConversationUseCase を作成
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
        namer: ConversationNamer,
    ) -> Self {
        Self {
            identities,
            conversations,
            messages,
            namer,
        }
    }

    /// 会話詳細を取得
    ///
    /// # Arguments
    ///
    /// * `viewer` - 閲覧者（いない場合は None）
    /// * `conversation_id` - 対象の会話
    pub async fn execute(
        &self,
        viewer: Option<&UserId>,
        conversation_id: &ConversationId,
    ) -> Result<ChatDisplayPayload, ViewConversationError> {
        let conversation = self
            .conversations
            .find_by_id(conversation_id)
            .await?
            .ok_or(ViewConversationError::NotFound(*conversation_id))?;

        let chat_name = self
            .namer
            .resolve_display_name(&conversation, viewer)
            .await?;

        let member_ids: Vec<UserId> = conversation.members.iter().copied().collect();
        let members = self.identities.find_many(&member_ids).await?;

        let history = self.messages.list_for_conversation(&conversation.id).await?;
        let mut author_ids: Vec<UserId> = history.iter().map(|message| message.author).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors: BTreeMap<UserId, _> = self
            .identities
            .find_many(&author_ids)
            .await?
            .into_iter()
            .map(|identity| (identity.id, identity))
            .collect();

        let messages = history
            .iter()
            .map(|message| {
                authors
                    .get(&message.author)
                    .map(|author| to_message_nested_payload(message, author))
                    .ok_or_else(|| {
                        RepositoryError::NotFound(format!("user {}", message.author))
                    })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(to_nested_display_payload(
            &conversation,
            chat_name,
            &members,
            messages,
        ))
    }
}
