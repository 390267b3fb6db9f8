//! UseCase: 会話へのメンバー追加処理
//!
//! ### どのような状況を想定しているか
//! - 正常系：グループ会話へのメンバー追加（イベントは new_user_added）
//! - 異常系：存在しない会話、メンバー以外による操作、プライベート会話への追加、重複追加

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConversationChange, ConversationId, ConversationRepository, IdentityRepository,
    UserId,
};

use super::error::AddMemberError;

/// メンバー追加のユースケース
pub struct AddMemberUseCase {
    identities: Arc<dyn IdentityRepository>,
    conversations: Arc<dyn ConversationRepository>,
}

impl AddMemberUseCase {
    /// 新しい AddMemberUseCase を作成
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        conversations: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            identities,
            conversations,
        }
    }

    /// メンバー追加を実行
    ///
    /// # Arguments
    ///
    /// * `actor` - 操作するユーザー（会話のメンバーである必要がある）
    /// * `conversation_id` - 対象の会話
    /// * `user` - 追加するユーザー
    pub async fn execute(
        &self,
        actor: &UserId,
        conversation_id: &ConversationId,
        user: UserId,
    ) -> Result<ConversationChange, AddMemberError> {
        let mut conversation = self
            .conversations
            .find_by_id(conversation_id)
            .await?
            .ok_or(AddMemberError::NotFound(*conversation_id))?;

        if !conversation.has_member(actor) {
            return Err(AddMemberError::NotAMember(*actor));
        }
        if self.identities.find_by_id(&user).await?.is_none() {
            return Err(AddMemberError::UnknownUser(user));
        }

        conversation.add_member(user)?;
        self.conversations.save(conversation.clone()).await?;
        tracing::info!(
            conversation_id = %conversation.id,
            user_id = %user,
            added_by = %actor,
            "Member added to conversation"
        );

        Ok(ConversationChange {
            event: ChatEvent::NewUserAdded,
            conversation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Conversation, ConversationError, ConversationName, Email, Identity, Username,
        },
        infrastructure::repository::InMemoryStore,
    };

    fn identity(id: i64, name: &str) -> Identity {
        Identity::new(
            UserId::new(id),
            Username::new(name.to_string()).unwrap(),
            Email::new(format!("{}@example.com", name)).unwrap(),
        )
    }

    fn create_test_store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_data(
            vec![identity(1, "alice"), identity(2, "bob"), identity(3, "carol")],
            vec![
                Conversation::private(ConversationId::new(42), UserId::new(1), UserId::new(2))
                    .unwrap(),
                Conversation::group(
                    ConversationId::new(9),
                    ConversationName::new("Team Standup".to_string()).unwrap(),
                    [UserId::new(1), UserId::new(2)],
                )
                .unwrap(),
            ],
            Vec::new(),
        ))
    }

    fn create_usecase(store: &Arc<InMemoryStore>) -> AddMemberUseCase {
        AddMemberUseCase::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_add_member_success() {
        // テスト項目: グループ会話にメンバーを追加できる
        // given (前提条件):
        let store = create_test_store();
        let usecase = create_usecase(&store);

        // when (操作):
        let result = usecase
            .execute(&UserId::new(1), &ConversationId::new(9), UserId::new(3))
            .await;

        // then (期待する結果):
        let change = result.unwrap();
        assert_eq!(change.event, ChatEvent::NewUserAdded);
        assert!(change.conversation.has_member(&UserId::new(3)));
        let saved = ConversationRepository::find_by_id(store.as_ref(), &ConversationId::new(9))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.members.len(), 3);
    }

    #[tokio::test]
    async fn test_add_member_to_private_conversation_fails() {
        // テスト項目: プライベート会話にはメンバーを追加できない
        // given (前提条件):
        let store = create_test_store();
        let usecase = create_usecase(&store);

        // when (操作):
        let result = usecase
            .execute(&UserId::new(1), &ConversationId::new(42), UserId::new(3))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(AddMemberError::Rejected(
                ConversationError::PrivateMembershipFixed(ConversationId::new(42))
            ))
        );
    }

    #[tokio::test]
    async fn test_add_member_by_non_member_fails() {
        // テスト項目: メンバー以外はメンバーを追加できない
        // given (前提条件):
        let store = create_test_store();
        let usecase = create_usecase(&store);

        // when (操作):
        let result = usecase
            .execute(&UserId::new(3), &ConversationId::new(9), UserId::new(3))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(AddMemberError::NotAMember(UserId::new(3))));
    }

    #[tokio::test]
    async fn test_add_member_errors() {
        // テスト項目: 存在しない会話・未登録ユーザー・既存メンバーはエラーになる
        // given (前提条件):
        let store = create_test_store();
        let usecase = create_usecase(&store);
        let alice = UserId::new(1);

        // when (操作):
        let missing_conversation = usecase
            .execute(&alice, &ConversationId::new(404), UserId::new(3))
            .await;
        let unknown_user = usecase
            .execute(&alice, &ConversationId::new(9), UserId::new(99))
            .await;
        let already_member = usecase
            .execute(&alice, &ConversationId::new(9), UserId::new(2))
            .await;

        // then (期待する結果):
        assert_eq!(
            missing_conversation,
            Err(AddMemberError::NotFound(ConversationId::new(404)))
        );
        assert_eq!(
            unknown_user,
            Err(AddMemberError::UnknownUser(UserId::new(99)))
        );
        assert_eq!(
            already_member,
            Err(AddMemberError::Rejected(ConversationError::AlreadyMember(
                UserId::new(2)
            )))
        );
    }
}
