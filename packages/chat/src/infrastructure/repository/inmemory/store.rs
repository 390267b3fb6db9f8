//! InMemory Store 実装
//!
//! ドメイン層が定義する Repository trait（IdentityRepository / ConversationRepository /
//! MessageRepository / MembershipLookup）の具体的な実装。
//! BTreeMap をインメモリ DB として使用します（ID 順で走査できるため）。
//!
//! パスワードの保存はこのストアの責務外のため、登録時に受け取ったパスワードは保持しません。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, Conversation, ConversationId, ConversationRepository, Email, Identity,
    IdentityRepository, MembershipLookup, MessageId, MessageRepository, Password,
    RepositoryError, UserId, Username,
};

/// ストアの中身
#[derive(Debug)]
struct State {
    users: BTreeMap<UserId, Identity>,
    conversations: BTreeMap<ConversationId, Conversation>,
    messages: BTreeMap<MessageId, ChatMessage>,
    /// 次に払い出す ID（i64 を使い切ると None）
    next_user_id: Option<i64>,
    next_conversation_id: Option<i64>,
    next_message_id: Option<i64>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            conversations: BTreeMap::new(),
            messages: BTreeMap::new(),
            next_user_id: Some(1),
            next_conversation_id: Some(1),
            next_message_id: Some(1),
        }
    }
}

/// インメモリストア実装
///
/// ユーザー・会話・メッセージを 1 つのロックで保持します。
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// 空の InMemoryStore を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存データ（ID 付き）を取り込んだ InMemoryStore を作成
    ///
    /// 次に払い出す ID は、取り込んだ ID の最大値 + 1 になります。
    /// ID は一意である前提です（重複はスナップショット読み込み時に弾かれる）。
    /// i64::MAX を取り込んだ場合、以降の払い出しはエラーになります。
    pub fn with_data(
        users: Vec<Identity>,
        conversations: Vec<Conversation>,
        messages: Vec<ChatMessage>,
    ) -> Self {
        let mut state = State::default();
        for user in users {
            advance_past(&mut state.next_user_id, user.id.value());
            state.users.insert(user.id, user);
        }
        for conversation in conversations {
            advance_past(&mut state.next_conversation_id, conversation.id.value());
            state.conversations.insert(conversation.id, conversation);
        }
        for message in messages {
            advance_past(&mut state.next_message_id, message.id.value());
            state.messages.insert(message.id, message);
        }
        Self {
            state: Mutex::new(state),
        }
    }
}

/// 取り込んだ ID より後ろまで次の ID を進める
fn advance_past(next: &mut Option<i64>, id: i64) {
    *next = match (*next, id.checked_add(1)) {
        (Some(current), Some(after)) => Some(current.max(after)),
        _ => None,
    };
}

/// 次の ID を払い出す
///
/// i64 の範囲を使い切った場合は既存の ID と衝突させずにエラーを返します。
fn allocate(next: &mut Option<i64>, kind: &str) -> Result<i64, RepositoryError> {
    let id = next
        .ok_or_else(|| RepositoryError::Unavailable(format!("{} ids exhausted", kind)))?;
    *next = id.checked_add(1);
    Ok(id)
}

#[async_trait]
impl MembershipLookup for InMemoryStore {
    async fn members_excluding(
        &self,
        conversation_id: &ConversationId,
        excluded: &UserId,
    ) -> Result<Vec<Identity>, RepositoryError> {
        let state = self.state.lock().await;
        let conversation = state
            .conversations
            .get(conversation_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("conversation {}", conversation_id)))?;

        conversation
            .members
            .iter()
            .filter(|member| *member != excluded)
            .map(|member| {
                state
                    .users
                    .get(member)
                    .cloned()
                    .ok_or_else(|| RepositoryError::NotFound(format!("user {}", member)))
            })
            .collect()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryStore {
    async fn register(
        &self,
        username: Username,
        email: Email,
        _password: Password,
    ) -> Result<Identity, RepositoryError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|user| user.username == username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' is taken",
                username
            )));
        }

        let id = UserId::new(allocate(&mut state.next_user_id, "user")?);
        let identity = Identity::new(id, username, email);
        state.users.insert(id, identity.clone());
        Ok(identity)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Identity>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<Identity>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ConversationRepository for InMemoryStore {
    async fn next_id(&self) -> Result<ConversationId, RepositoryError> {
        let mut state = self.state.lock().await;
        let id = ConversationId::new(allocate(&mut state.next_conversation_id, "conversation")?);
        Ok(id)
    }

    async fn save(&self, conversation: Conversation) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        state.conversations.insert(conversation.id, conversation);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.conversations.get(id).cloned())
    }

    async fn list_for_member(&self, user: &UserId) -> Result<Vec<Conversation>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .conversations
            .values()
            .filter(|conversation| conversation.has_member(user))
            .cloned()
            .collect())
    }

    async fn insert_private(
        &self,
        conversation: Conversation,
    ) -> Result<Option<ConversationId>, RepositoryError> {
        // 重複チェックと保存を同じロックの中で行う
        let mut state = self.state.lock().await;
        if let Some(existing) = state.conversations.values().find(|existing| {
            existing.is_private && existing.members == conversation.members
        }) {
            return Ok(Some(existing.id));
        }
        state.conversations.insert(conversation.id, conversation);
        Ok(None)
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn next_id(&self) -> Result<MessageId, RepositoryError> {
        let mut state = self.state.lock().await;
        let id = MessageId::new(allocate(&mut state.next_message_id, "message")?);
        Ok(id)
    }

    async fn save(&self, message: ChatMessage) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().await;
        if !state.conversations.contains_key(&message.conversation) {
            return Err(RepositoryError::NotFound(format!(
                "conversation {}",
                message.conversation
            )));
        }
        state.messages.insert(message.id, message);
        Ok(())
    }

    async fn list_for_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.lock().await;
        let mut messages: Vec<ChatMessage> = state
            .messages
            .values()
            .filter(|message| &message.conversation == conversation_id)
            .cloned()
            .collect();
        messages.sort_by_key(|message| (message.created, message.id));
        Ok(messages)
    }
}
