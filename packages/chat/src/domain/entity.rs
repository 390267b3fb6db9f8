//! Core domain models for the chat application.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    error::ConversationError,
    value_object::{
        ConversationId, ConversationName, Email, MessageId, MessageText, Timestamp, UserId,
        Username,
    },
};

/// Prefix of the name synthesized for unnamed conversations
pub const FALLBACK_NAME_PREFIX: &str = "chat_";

/// A registered user as seen by the chat domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User identifier
    pub id: UserId,
    /// Human-readable label
    pub username: Username,
    pub email: Email,
}

impl Identity {
    /// Create a new identity
    pub fn new(id: UserId, username: Username, email: Email) -> Self {
        Self {
            id,
            username,
            email,
        }
    }
}

/// Represents a conversation (chat) between its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier
    pub id: ConversationId,
    /// Explicit name; empty for private conversations
    pub name: ConversationName,
    /// Whether the display name is relative to the viewer
    pub is_private: bool,
    /// Member identities
    pub members: BTreeSet<UserId>,
}

impl Conversation {
    /// Create a private conversation between two distinct users
    ///
    /// # Errors
    ///
    /// Returns `ConversationError::PrivateRequiresTwoMembers` if both users are the same
    pub fn private(id: ConversationId, a: UserId, b: UserId) -> Result<Self, ConversationError> {
        if a == b {
            return Err(ConversationError::PrivateRequiresTwoMembers { actual: 1 });
        }
        Ok(Self {
            id,
            name: ConversationName::empty(),
            is_private: true,
            members: BTreeSet::from([a, b]),
        })
    }

    /// Create a named group conversation
    ///
    /// # Errors
    ///
    /// Returns `ConversationError::GroupNameRequired` if the name is empty and
    /// `ConversationError::NoMembers` if no member is given
    pub fn group(
        id: ConversationId,
        name: ConversationName,
        members: impl IntoIterator<Item = UserId>,
    ) -> Result<Self, ConversationError> {
        if name.is_empty() {
            return Err(ConversationError::GroupNameRequired);
        }
        let members: BTreeSet<UserId> = members.into_iter().collect();
        if members.is_empty() {
            return Err(ConversationError::NoMembers);
        }
        Ok(Self {
            id,
            name,
            is_private: false,
            members,
        })
    }

    /// Rebuild a conversation from stored data without checking its invariants.
    ///
    /// Stored private conversations may not have exactly two members.
    pub fn restore(
        id: ConversationId,
        name: ConversationName,
        is_private: bool,
        members: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            id,
            name,
            is_private,
            members: members.into_iter().collect(),
        }
    }

    /// Check whether a user belongs to the conversation
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Add a member to a group conversation
    ///
    /// # Errors
    ///
    /// Returns `ConversationError::PrivateMembershipFixed` for private conversations
    /// and `ConversationError::AlreadyMember` if the user is already in
    pub fn add_member(&mut self, user: UserId) -> Result<(), ConversationError> {
        if self.is_private {
            return Err(ConversationError::PrivateMembershipFixed(self.id));
        }
        if !self.members.insert(user) {
            return Err(ConversationError::AlreadyMember(user));
        }
        Ok(())
    }

    /// Name synthesized from the identifier, e.g. `chat_42`
    pub fn fallback_name(&self) -> String {
        format!("{}{}", FALLBACK_NAME_PREFIX, self.id)
    }

    /// The explicit name when set, the fallback name otherwise
    pub fn explicit_or_fallback_name(&self) -> String {
        if self.name.is_empty() {
            self.fallback_name()
        } else {
            self.name.as_str().to_string()
        }
    }
}

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    /// Timestamp when the message was created
    pub created: Timestamp,
    /// Conversation the message was posted to
    pub conversation: ConversationId,
    /// Author of the message
    pub author: UserId,
    pub text: MessageText,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(
        id: MessageId,
        created: Timestamp,
        conversation: ConversationId,
        author: UserId,
        text: MessageText,
    ) -> Self {
        Self {
            id,
            created,
            conversation,
            author,
            text,
        }
    }
}
