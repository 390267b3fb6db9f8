//! Domain services.

use std::sync::Arc;

use super::{
    entity::Conversation, error::NamingError, repository::MembershipLookup, value_object::UserId,
};

/// Derives the name a viewer sees for a conversation.
///
/// A private conversation is named after the other participant; any other
/// conversation, or any conversation without a viewer, uses its explicit name
/// or `chat_<id>` when that is empty.
pub struct ConversationNamer {
    membership: Arc<dyn MembershipLookup>,
}

impl ConversationNamer {
    pub fn new(membership: Arc<dyn MembershipLookup>) -> Self {
        Self { membership }
    }

    /// Resolve the display name of `conversation` for `viewer`.
    ///
    /// # Errors
    ///
    /// * `NamingError::MembershipLookup` - the membership lookup failed
    /// * `NamingError::MalformedConversation` - a private conversation has zero or
    ///   several members besides the viewer
    pub async fn resolve_display_name(
        &self,
        conversation: &Conversation,
        viewer: Option<&UserId>,
    ) -> Result<String, NamingError> {
        let Some(viewer) = viewer.filter(|_| conversation.is_private) else {
            return Ok(conversation.explicit_or_fallback_name());
        };

        let mut others = self
            .membership
            .members_excluding(&conversation.id, viewer)
            .await?;

        if others.len() != 1 {
            tracing::warn!(
                conversation_id = %conversation.id,
                viewer = %viewer,
                other_members = others.len(),
                "Private conversation does not resolve to a single counterpart"
            );
            return Err(NamingError::MalformedConversation {
                conversation_id: conversation.id,
                other_members: others.len(),
            });
        }

        let other = others.remove(0);
        tracing::debug!(
            conversation_id = %conversation.id,
            viewer = %viewer,
            counterpart = %other.id,
            "Resolved private conversation name"
        );
        Ok(other.username.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConversationId, ConversationName, Email, Identity, RepositoryError, Username,
        repository::MockMembershipLookup,
    };

    fn identity(id: i64, name: &str) -> Identity {
        Identity::new(
            UserId::new(id),
            Username::new(name.to_string()).unwrap(),
            Email::new(format!("{}@example.com", name)).unwrap(),
        )
    }

    fn conversation(id: i64, name: &str, is_private: bool, members: &[i64]) -> Conversation {
        Conversation::restore(
            ConversationId::new(id),
            ConversationName::new(name.to_string()).unwrap(),
            is_private,
            members.iter().copied().map(UserId::new),
        )
    }

    fn namer_without_lookup() -> ConversationNamer {
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding().never();
        ConversationNamer::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_private_conversation_named_after_other_member() {
        // テスト項目: プライベート会話は閲覧者から見た相手のユーザー名になる
        // given (前提条件): id=42, members=[alice(1), bob(2)], viewer=alice
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding()
            .withf(|conversation_id, excluded| {
                conversation_id.value() == 42 && excluded.value() == 1
            })
            .times(1)
            .returning(|_, _| Ok(vec![identity(2, "bob")]));
        let namer = ConversationNamer::new(Arc::new(mock));
        let chat = conversation(42, "", true, &[1, 2]);

        // when (操作):
        let result = namer
            .resolve_display_name(&chat, Some(&UserId::new(1)))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok("bob".to_string()));
    }

    #[tokio::test]
    async fn test_private_conversation_name_is_viewer_relative() {
        // テスト項目: 閲覧者が bob の場合は alice が返される
        // given (前提条件):
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding()
            .withf(|_, excluded| excluded.value() == 2)
            .returning(|_, _| Ok(vec![identity(1, "alice")]));
        let namer = ConversationNamer::new(Arc::new(mock));
        let chat = conversation(42, "", true, &[1, 2]);

        // when (操作):
        let result = namer
            .resolve_display_name(&chat, Some(&UserId::new(2)))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok("alice".to_string()));
    }

    #[tokio::test]
    async fn test_group_conversation_uses_explicit_name_for_any_viewer() {
        // テスト項目: グループ会話は閲覧者に関係なく明示的な名前になる
        // given (前提条件): id=9, name="Team Standup"
        let namer = namer_without_lookup();
        let chat = conversation(9, "Team Standup", false, &[1, 2, 3]);

        // when (操作):
        let with_viewer = namer
            .resolve_display_name(&chat, Some(&UserId::new(1)))
            .await;
        let without_viewer = namer.resolve_display_name(&chat, None).await;

        // then (期待する結果):
        assert_eq!(with_viewer, Ok("Team Standup".to_string()));
        assert_eq!(without_viewer, Ok("Team Standup".to_string()));
    }

    #[tokio::test]
    async fn test_unnamed_group_conversation_uses_fallback_name() {
        // テスト項目: 名前のないグループ会話は chat_<id> になる
        // given (前提条件): id=7, name=""
        let namer = namer_without_lookup();
        let chat = conversation(7, "", false, &[1, 2, 3]);

        // when (操作):
        let result = namer
            .resolve_display_name(&chat, Some(&UserId::new(99)))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok("chat_7".to_string()));
    }

    #[tokio::test]
    async fn test_private_conversation_without_viewer_never_queries_members() {
        // テスト項目: 閲覧者がいない場合、プライベート会話でもメンバー検索を行わない
        // given (前提条件):
        let namer = namer_without_lookup();
        let chat = conversation(42, "", true, &[1, 2]);
        let named_chat = conversation(43, "Secret", true, &[1, 2]);

        // when (操作):
        let unnamed = namer.resolve_display_name(&chat, None).await;
        let named = namer.resolve_display_name(&named_chat, None).await;

        // then (期待する結果):
        assert_eq!(unnamed, Ok("chat_42".to_string()));
        assert_eq!(named, Ok("Secret".to_string()));
    }

    #[tokio::test]
    async fn test_private_conversation_without_other_member_is_malformed() {
        // テスト項目: 相手がいないプライベート会話はエラーになる
        // given (前提条件): id=5, members=[1], viewer=1
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding()
            .returning(|_, _| Ok(Vec::new()));
        let namer = ConversationNamer::new(Arc::new(mock));
        let chat = conversation(5, "", true, &[1]);

        // when (操作):
        let result = namer
            .resolve_display_name(&chat, Some(&UserId::new(1)))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(NamingError::MalformedConversation {
                conversation_id: ConversationId::new(5),
                other_members: 0,
            })
        );
    }

    #[tokio::test]
    async fn test_private_conversation_with_several_other_members_is_malformed() {
        // テスト項目: 相手が複数いるプライベート会話はエラーになる
        // given (前提条件):
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding()
            .returning(|_, _| Ok(vec![identity(2, "bob"), identity(3, "carol")]));
        let namer = ConversationNamer::new(Arc::new(mock));
        let chat = conversation(6, "", true, &[1, 2, 3]);

        // when (操作):
        let result = namer
            .resolve_display_name(&chat, Some(&UserId::new(1)))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(NamingError::MalformedConversation {
                conversation_id: ConversationId::new(6),
                other_members: 2,
            })
        );
    }

    #[tokio::test]
    async fn test_membership_lookup_failure_is_propagated() {
        // テスト項目: メンバー検索の失敗はリトライせずにそのまま返される
        // given (前提条件):
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding()
            .times(1)
            .returning(|_, _| Err(RepositoryError::Unavailable("connection refused".into())));
        let namer = ConversationNamer::new(Arc::new(mock));
        let chat = conversation(42, "", true, &[1, 2]);

        // when (操作):
        let result = namer
            .resolve_display_name(&chat, Some(&UserId::new(1)))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(NamingError::MembershipLookup(RepositoryError::Unavailable(
                "connection refused".into()
            )))
        );
    }

    #[tokio::test]
    async fn test_resolve_display_name_is_idempotent() {
        // テスト項目: 同じ入力に対して同じ結果が返される
        // given (前提条件):
        let mut mock = MockMembershipLookup::new();
        mock.expect_members_excluding()
            .times(2)
            .returning(|_, _| Ok(vec![identity(2, "bob")]));
        let namer = ConversationNamer::new(Arc::new(mock));
        let chat = conversation(42, "", true, &[1, 2]);
        let viewer = UserId::new(1);

        // when (操作):
        let first = namer.resolve_display_name(&chat, Some(&viewer)).await;
        let second = namer.resolve_display_name(&chat, Some(&viewer)).await;

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(first, Ok("bob".to_string()));
    }
}
