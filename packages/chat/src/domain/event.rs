//! Conversation change events.
//!
//! Events only tag payloads; delivering them to clients happens elsewhere.

use serde::{Deserialize, Serialize};

use super::entity::Conversation;

/// Which client action produced a conversation payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatEvent {
    NewChat,
    NewUserAdded,
    NewMessage,
}

/// A conversation after a state change, tagged with the event that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationChange {
    pub event: ChatEvent,
    pub conversation: Conversation,
}
