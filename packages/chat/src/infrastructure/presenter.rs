//! Domain model → DTO conversion.
//!
//! Every function picks its fields explicitly. Display names are resolved
//! beforehand by `ConversationNamer` and passed in.

use kaiwa_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatEvent, ChatMessage, Conversation, Identity, UserId};

use super::dto::{
    ChatCreatePayload, ChatDisplayPayload, ChatMessageDisplayPayload, ChatMessageNestedPayload,
    ChatMessagePayload, ChatPayload, UserPayload,
};

pub fn to_user_payload(identity: &Identity) -> UserPayload {
    UserPayload {
        id: identity.id.value(),
        username: identity.username.as_str().to_string(),
        email: identity.email.as_str().to_string(),
    }
}

/// Chat as created or edited; `chat_name` is the stored explicit name.
pub fn to_create_payload(conversation: &Conversation, event: Option<ChatEvent>) -> ChatCreatePayload {
    ChatCreatePayload {
        id: conversation.id.value(),
        chat_name: conversation.name.as_str().to_string(),
        private: conversation.is_private,
        users: member_ids(conversation),
        event,
    }
}

/// Chat summary under its display name.
pub fn to_display_payload(conversation: &Conversation, chat_name: String) -> ChatPayload {
    ChatPayload {
        id: conversation.id.value(),
        chat_name,
        private: conversation.is_private,
        users: member_ids(conversation),
    }
}

/// Chat detail under its display name, with member objects and messages.
///
/// `members` and `messages` are emitted in the order given.
pub fn to_nested_display_payload(
    conversation: &Conversation,
    chat_name: String,
    members: &[Identity],
    messages: Vec<ChatMessageNestedPayload>,
) -> ChatDisplayPayload {
    ChatDisplayPayload {
        id: conversation.id.value(),
        chat_name,
        private: conversation.is_private,
        users: members.iter().map(to_user_payload).collect(),
        chat_messages: messages,
    }
}

pub fn to_message_payload(message: &ChatMessage) -> ChatMessagePayload {
    ChatMessagePayload {
        id: message.id.value(),
        created: timestamp_to_rfc3339(message.created.value()),
        chat: message.conversation.value(),
        text: message.text.as_str().to_string(),
    }
}

pub fn to_message_display_payload(
    message: &ChatMessage,
    author: &Identity,
) -> ChatMessageDisplayPayload {
    ChatMessageDisplayPayload {
        id: message.id.value(),
        created: timestamp_to_rfc3339(message.created.value()),
        chat: message.conversation.value(),
        user: to_user_payload(author),
        text: message.text.as_str().to_string(),
    }
}

pub fn to_message_nested_payload(
    message: &ChatMessage,
    author: &Identity,
) -> ChatMessageNestedPayload {
    ChatMessageNestedPayload {
        id: message.id.value(),
        created: timestamp_to_rfc3339(message.created.value()),
        user: to_user_payload(author),
        text: message.text.as_str().to_string(),
    }
}

fn member_ids(conversation: &Conversation) -> Vec<i64> {
    conversation.members.iter().map(UserId::value).collect()
}
