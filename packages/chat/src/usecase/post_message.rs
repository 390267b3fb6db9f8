//! UseCase: メッセージ投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - 会話のメンバーだけがメッセージを投稿できること
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーによる投稿
//! - 異常系：存在しない会話、メンバー以外による投稿

use std::sync::Arc;

use kaiwa_shared::time::now_millis;

use crate::domain::{
    ChatMessage, ConversationId, ConversationRepository, MessageRepository, MessageText,
    Timestamp, UserId,
};

use super::error::PostMessageError;

/// メッセージ投稿の入力
#[derive(Debug, Clone)]
pub struct PostMessageInput {
    pub conversation: ConversationId,
    pub text: MessageText,
}

/// メッセージ投稿のユースケース
pub struct PostMessageUseCase {
    conversations: Arc<dyn ConversationRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl PostMessageUseCase {
    /// 新しい PostMessageUseCase を作成
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    /// メッセージ投稿を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 保存されたメッセージ
    /// * `Err(PostMessageError)` - 投稿失敗
    pub async fn execute(
        &self,
        author: UserId,
        input: PostMessageInput,
    ) -> Result<ChatMessage, PostMessageError> {
        let conversation = self
            .conversations
            .find_by_id(&input.conversation)
            .await?
            .ok_or(PostMessageError::NotFound(input.conversation))?;

        if !conversation.has_member(&author) {
            return Err(PostMessageError::NotAMember(author));
        }

        let id = self.messages.next_id().await?;
        let message = ChatMessage::new(
            id,
            Timestamp::new(now_millis()),
            conversation.id,
            author,
            input.text,
        );
        self.messages.save(message.clone()).await?;
        tracing::debug!(
            message_id = %message.id,
            conversation_id = %message.conversation,
            author = %author,
            "Message posted"
        );

        Ok(message)
    }
}
