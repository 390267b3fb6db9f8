//! Data transfer objects exchanged with the presentation layer.

pub mod chat;
pub mod message;
pub mod user;

pub use chat::{ChatCreatePayload, ChatCreateRequest, ChatDisplayPayload, ChatPayload};
pub use message::{
    ChatMessageDisplayPayload, ChatMessageNestedPayload, ChatMessagePayload, ChatMessageRequest,
};
pub use user::{RegistrationRequest, UserPayload};
