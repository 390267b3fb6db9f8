//! Repository traits.
//!
//! The domain declares what it needs from storage; the infrastructure layer
//! provides the implementations (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Conversation, Identity},
    error::RepositoryError,
    value_object::{ConversationId, Email, MessageId, Password, UserId, Username},
};

/// Read-only membership queries used for viewer-relative naming
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    /// All members of the conversation except `excluded`.
    ///
    /// Returns `RepositoryError::NotFound` if the conversation does not exist.
    async fn members_excluding(
        &self,
        conversation_id: &ConversationId,
        excluded: &UserId,
    ) -> Result<Vec<Identity>, RepositoryError>;
}

/// Identity store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Register a new identity. What happens to the password is up to the store.
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    async fn register(
        &self,
        username: Username,
        email: Email,
        password: Password,
    ) -> Result<Identity, RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, RepositoryError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, RepositoryError>;

    /// Identities for the given ids, ordered by id. Unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Identity>, RepositoryError>;
}

/// Conversation store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Allocate a fresh conversation identifier
    async fn next_id(&self) -> Result<ConversationId, RepositoryError>;

    /// Insert or replace a conversation
    async fn save(&self, conversation: Conversation) -> Result<(), RepositoryError>;

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    /// Conversations the user belongs to, ordered by id
    async fn list_for_member(&self, user: &UserId) -> Result<Vec<Conversation>, RepositoryError>;

    /// Insert a private conversation unless one already exists between the
    /// same two members. The check and the insert are atomic.
    ///
    /// Returns the id of the existing conversation when nothing was inserted.
    async fn insert_private(
        &self,
        conversation: Conversation,
    ) -> Result<Option<ConversationId>, RepositoryError>;
}

/// Message store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Allocate a fresh message identifier
    async fn next_id(&self) -> Result<MessageId, RepositoryError>;

    async fn save(&self, message: ChatMessage) -> Result<(), RepositoryError>;

    /// Messages of a conversation, oldest first
    async fn list_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ChatMessage>, RepositoryError>;
}
