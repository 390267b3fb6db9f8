//! Conversation (chat) DTOs.
//!
//! Each payload selects its own fields; they share no base shape.

use serde::{Deserialize, Serialize};

use super::{message::ChatMessageNestedPayload, user::UserPayload};
use crate::{
    domain::{ChatEvent, ConversationName, UserId, ValueObjectError},
    usecase::CreateConversationInput,
};

/// Request body to create a chat
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCreateRequest {
    #[serde(default)]
    pub chat_name: String,
    #[serde(default)]
    pub private: bool,
    pub users: Vec<i64>,
    #[serde(default)]
    pub event: Option<ChatEvent>,
}

/// Chat as created or edited, with the raw stored name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCreatePayload {
    pub id: i64,
    pub chat_name: String,
    pub private: bool,
    pub users: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<ChatEvent>,
}

/// Chat summary; `chat_name` is the viewer-relative display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub id: i64,
    pub chat_name: String,
    pub private: bool,
    pub users: Vec<i64>,
}

/// Chat detail with member objects and message history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatDisplayPayload {
    pub id: i64,
    pub chat_name: String,
    pub private: bool,
    pub users: Vec<UserPayload>,
    pub chat_messages: Vec<ChatMessageNestedPayload>,
}

impl TryFrom<ChatCreateRequest> for CreateConversationInput {
    type Error = ValueObjectError;

    fn try_from(request: ChatCreateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: ConversationName::new(request.chat_name)?,
            is_private: request.private,
            members: request.users.into_iter().map(UserId::new).collect(),
            event: request.event,
        })
    }
}
