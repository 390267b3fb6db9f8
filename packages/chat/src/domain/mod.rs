//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod repository;
pub mod service;
pub mod value_object;

pub use entity::{ChatMessage, Conversation, FALLBACK_NAME_PREFIX, Identity};
pub use error::{ConversationError, NamingError, RepositoryError, ValueObjectError};
pub use event::{ChatEvent, ConversationChange};
pub use repository::{
    ConversationRepository, IdentityRepository, MembershipLookup, MessageRepository,
};
pub use service::ConversationNamer;
pub use value_object::{
    ConversationId, ConversationName, Email, MessageId, MessageText, Password, Timestamp, UserId,
    Username,
};
