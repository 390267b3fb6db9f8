//! JSON snapshot of users, conversations and messages.
//!
//! Snapshots are exported by the persistence layer and loaded into an
//! `InMemoryStore`. Private conversations are loaded as-is, even when they do
//! not have exactly two members.

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    ChatMessage, Conversation, ConversationId, ConversationName, Email, Identity, MessageId,
    MessageText, Timestamp, UserId, Username, ValueObjectError,
};

use super::repository::InMemoryStore;

/// Errors raised while loading a snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Invalid value in {context}: {source}")]
    InvalidValue {
        context: String,
        #[source]
        source: ValueObjectError,
    },

    #[error("{context} references unknown user {user}")]
    UnknownUser { context: String, user: i64 },

    #[error("{context} references unknown conversation {conversation}")]
    UnknownConversation { context: String, conversation: i64 },

    #[error("Duplicate {context} id {id}")]
    DuplicateId { context: &'static str, id: i64 },

    /// The store could never allocate an id after this one
    #[error("{context} id {id} is out of range")]
    IdOutOfRange { context: &'static str, id: i64 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConversation {
    pub id: i64,
    #[serde(default)]
    pub chat_name: String,
    #[serde(default)]
    pub private: bool,
    pub users: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotMessage {
    pub id: i64,
    /// Unix timestamp in milliseconds
    pub created: i64,
    pub chat: i64,
    pub user: i64,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<SnapshotUser>,
    #[serde(default)]
    pub conversations: Vec<SnapshotConversation>,
    #[serde(default)]
    pub messages: Vec<SnapshotMessage>,
}

impl Snapshot {
    /// Validate the snapshot and build a store from it.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` on invalid values, duplicate or out-of-range
    /// ids and dangling references.
    pub fn into_store(self) -> Result<InMemoryStore, SnapshotError> {
        let mut known_users = BTreeSet::new();
        let users = self
            .users
            .into_iter()
            .map(|user| -> Result<Identity, SnapshotError> {
                claim_id(&mut known_users, "user", user.id)?;
                let context = format!("user {}", user.id);
                Ok(Identity::new(
                    UserId::new(user.id),
                    Username::new(user.username).map_err(invalid(&context))?,
                    Email::new(user.email).map_err(invalid(&context))?,
                ))
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        let mut known_conversations = BTreeSet::new();
        let conversations = self
            .conversations
            .into_iter()
            .map(|conversation| -> Result<Conversation, SnapshotError> {
                claim_id(&mut known_conversations, "conversation", conversation.id)?;
                let context = format!("conversation {}", conversation.id);
                if let Some(user) = conversation
                    .users
                    .iter()
                    .copied()
                    .find(|user| !known_users.contains(user))
                {
                    return Err(SnapshotError::UnknownUser { context, user });
                }
                Ok(Conversation::restore(
                    ConversationId::new(conversation.id),
                    ConversationName::new(conversation.chat_name).map_err(invalid(&context))?,
                    conversation.private,
                    conversation.users.into_iter().map(UserId::new),
                ))
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        let mut known_messages = BTreeSet::new();
        let messages = self
            .messages
            .into_iter()
            .map(|message| -> Result<ChatMessage, SnapshotError> {
                claim_id(&mut known_messages, "message", message.id)?;
                let context = format!("message {}", message.id);
                if !known_conversations.contains(&message.chat) {
                    return Err(SnapshotError::UnknownConversation {
                        context,
                        conversation: message.chat,
                    });
                }
                if !known_users.contains(&message.user) {
                    return Err(SnapshotError::UnknownUser {
                        context,
                        user: message.user,
                    });
                }
                Ok(ChatMessage::new(
                    MessageId::new(message.id),
                    Timestamp::new(message.created),
                    ConversationId::new(message.chat),
                    UserId::new(message.user),
                    MessageText::new(message.text).map_err(invalid(&context))?,
                ))
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        tracing::debug!(
            users = users.len(),
            conversations = conversations.len(),
            messages = messages.len(),
            "Loaded snapshot"
        );
        Ok(InMemoryStore::with_data(users, conversations, messages))
    }
}

/// Record `id` as taken, rejecting repeats and ids past which none can be allocated.
fn claim_id(
    seen: &mut BTreeSet<i64>,
    context: &'static str,
    id: i64,
) -> Result<(), SnapshotError> {
    if id == i64::MAX {
        return Err(SnapshotError::IdOutOfRange { context, id });
    }
    if !seen.insert(id) {
        return Err(SnapshotError::DuplicateId { context, id });
    }
    Ok(())
}

fn invalid(context: &str) -> impl Fn(ValueObjectError) -> SnapshotError + '_ {
    move |source| SnapshotError::InvalidValue {
        context: context.to_string(),
        source,
    }
}
