//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConversationId, UserId};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// Email format error
    #[error("Email address is not valid (got: {0})")]
    EmailInvalid(String),

    /// Password validation error
    #[error("Password cannot be empty")]
    PasswordEmpty,

    /// ConversationName too long error
    #[error("Conversation name cannot exceed {max} characters (got {actual})")]
    ConversationNameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("Message text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("Message text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Errors related to Conversation domain rules
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// A private conversation is always between two distinct users
    #[error("A private conversation needs exactly 2 distinct members (got {actual})")]
    PrivateRequiresTwoMembers { actual: usize },

    /// Group conversations must be named
    #[error("A group conversation must have a name")]
    GroupNameRequired,

    #[error("A conversation needs at least one member")]
    NoMembers,

    /// Members of a private conversation cannot change
    #[error("Conversation {0} is private; its members cannot change")]
    PrivateMembershipFixed(ConversationId),

    #[error("User {0} is already a member of the conversation")]
    AlreadyMember(UserId),
}

/// Errors reported by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached
    #[error("Repository unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors raised while deriving a conversation's display name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamingError {
    /// The membership lookup failed; never retried here
    #[error("Membership lookup failed: {0}")]
    MembershipLookup(#[from] RepositoryError),

    /// A private conversation did not resolve to exactly one other member
    #[error(
        "Private conversation {conversation_id} has {other_members} members besides the viewer (expected 1)"
    )]
    MalformedConversation {
        conversation_id: ConversationId,
        other_members: usize,
    },
}
