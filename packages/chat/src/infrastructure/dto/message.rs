//! Chat message DTOs.

use serde::{Deserialize, Serialize};

use super::user::UserPayload;
use crate::{
    domain::{ConversationId, MessageText, ValueObjectError},
    usecase::PostMessageInput,
};

/// Request body to post a message
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessageRequest {
    pub chat: i64,
    pub text: String,
}

/// Message as created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    pub id: i64,
    pub created: String, // RFC 3339
    pub chat: i64,
    pub text: String,
}

/// Message with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDisplayPayload {
    pub id: i64,
    pub created: String, // RFC 3339
    pub chat: i64,
    pub user: UserPayload,
    pub text: String,
}

/// Message nested inside a chat detail; the chat is implied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageNestedPayload {
    pub id: i64,
    pub created: String, // RFC 3339
    pub user: UserPayload,
    pub text: String,
}

impl TryFrom<ChatMessageRequest> for PostMessageInput {
    type Error = ValueObjectError;

    fn try_from(request: ChatMessageRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            conversation: ConversationId::new(request.chat),
            text: MessageText::new(request.text)?,
        })
    }
}
