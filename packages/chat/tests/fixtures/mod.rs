//! Shared fixtures for integration tests.
//!
//! `TestApp` wires every use case to a single in-memory store and speaks in
//! request/response DTOs, the way a presentation layer would.

#![allow(dead_code)]

use std::sync::Arc;

use kaiwa_chat::{
    domain::{ChatEvent, ConversationId, ConversationNamer, UserId},
    infrastructure::{
        dto::{
            ChatCreatePayload, ChatCreateRequest, ChatDisplayPayload, ChatMessagePayload,
            ChatMessageRequest, ChatPayload, RegistrationRequest, UserPayload,
        },
        presenter::{to_create_payload, to_message_payload, to_user_payload},
        repository::InMemoryStore,
    },
    usecase::{
        AddMemberError, AddMemberUseCase, CreateConversationError, CreateConversationUseCase,
        ListConversationsUseCase, PostMessageError, PostMessageUseCase, RegisterError,
        RegisterUserUseCase, ShowConversationUseCase, ViewConversationError,
    },
};

pub struct TestApp {
    store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
        }
    }

    fn namer(&self) -> ConversationNamer {
        ConversationNamer::new(self.store.clone())
    }

    pub async fn register(&self, json: serde_json::Value) -> Result<UserPayload, RegisterError> {
        let request: RegistrationRequest = serde_json::from_value(json).unwrap();
        let input = request.try_into()?;
        let identity = RegisterUserUseCase::new(self.store.clone())
            .execute(input)
            .await?;
        Ok(to_user_payload(&identity))
    }

    /// Register `name` with matching passwords
    pub async fn register_user(&self, name: &str) -> UserPayload {
        self.register(serde_json::json!({
            "username": name,
            "email": format!("{}@example.com", name),
            "password": "correct horse",
            "password2": "correct horse",
        }))
        .await
        .unwrap()
    }

    pub async fn create_chat(
        &self,
        creator: i64,
        json: serde_json::Value,
    ) -> Result<ChatCreatePayload, CreateConversationError> {
        let request: ChatCreateRequest = serde_json::from_value(json).unwrap();
        let input = request.try_into()?;
        let change = CreateConversationUseCase::new(self.store.clone(), self.store.clone())
            .execute(UserId::new(creator), input)
            .await?;
        Ok(to_create_payload(&change.conversation, Some(change.event)))
    }

    pub async fn add_user(
        &self,
        actor: i64,
        chat: i64,
        user: i64,
    ) -> Result<ChatCreatePayload, AddMemberError> {
        let change = AddMemberUseCase::new(self.store.clone(), self.store.clone())
            .execute(&UserId::new(actor), &ConversationId::new(chat), UserId::new(user))
            .await?;
        assert_eq!(change.event, ChatEvent::NewUserAdded);
        Ok(to_create_payload(&change.conversation, Some(change.event)))
    }

    pub async fn post(
        &self,
        author: i64,
        json: serde_json::Value,
    ) -> Result<ChatMessagePayload, PostMessageError> {
        let request: ChatMessageRequest = serde_json::from_value(json).unwrap();
        let input = request.try_into()?;
        let message = PostMessageUseCase::new(self.store.clone(), self.store.clone())
            .execute(UserId::new(author), input)
            .await?;
        Ok(to_message_payload(&message))
    }

    pub async fn list(&self, viewer: i64) -> Result<Vec<ChatPayload>, ViewConversationError> {
        ListConversationsUseCase::new(self.store.clone(), self.namer())
            .execute(&UserId::new(viewer))
            .await
    }

    pub async fn show(
        &self,
        viewer: Option<i64>,
        chat: i64,
    ) -> Result<ChatDisplayPayload, ViewConversationError> {
        let viewer = viewer.map(UserId::new);
        ShowConversationUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.namer(),
        )
        .execute(viewer.as_ref(), &ConversationId::new(chat))
        .await
    }
}
