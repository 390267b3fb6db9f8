//! UseCase: 会話一覧の取得
//!
//! 閲覧者が参加している会話を、閲覧者から見た表示名付きで返します。
//! プライベート会話の表示名が解決できない場合は一覧全体をエラーにします
//! （不正なデータを黙って隠さないため）。

use std::sync::Arc;

use crate::{
    domain::{ConversationNamer, ConversationRepository, UserId},
    infrastructure::{dto::ChatPayload, presenter::to_display_payload},
};

use super::error::ViewConversationError;

/// 会話一覧のユースケース
pub struct ListConversationsUseCase {
    conversations: Arc<dyn ConversationRepository>,
    namer: ConversationNamer,
}

impl ListConversationsUseCase {
    /// 新しい ListConversationsUseCase を作成
    pub fn new(conversations: Arc<dyn ConversationRepository>, namer: ConversationNamer) -> Self {
        Self {
            conversations,
            namer,
        }
    }

    /// 会話一覧を取得
    ///
    /// # Returns
    ///
    /// 閲覧者が参加している会話（ID 順）
    pub async fn execute(&self, viewer: &UserId) -> Result<Vec<ChatPayload>, ViewConversationError> {
        let conversations = self.conversations.list_for_member(viewer).await?;

        let mut payloads = Vec::with_capacity(conversations.len());
        for conversation in &conversations {
            let chat_name = self
                .namer
                .resolve_display_name(conversation, Some(viewer))
                .await?;
            payloads.push(to_display_payload(conversation, chat_name));
        }

        Ok(payloads)
    }
}
