//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{
    ConversationError, ConversationId, NamingError, RepositoryError, UserId, ValueObjectError,
};

/// ユーザー登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("Invalid registration: {0}")]
    InvalidInput(#[from] ValueObjectError),

    /// パスワードと確認用パスワードが一致しない
    #[error("Passwords must match")]
    PasswordMismatch,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 会話作成のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateConversationError {
    #[error("Invalid conversation: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("Invalid conversation: {0}")]
    Rejected(#[from] ConversationError),

    /// 作成者自身がメンバーに含まれていない
    #[error("The creator must be a member of the conversation")]
    CreatorNotIncluded,

    #[error("Unknown user {0}")]
    UnknownUser(UserId),

    /// 同じ 2 人のプライベート会話が既に存在する（既存の会話へ誘導する）
    #[error("A private conversation between these users already exists: {0}")]
    PrivateConversationExists(ConversationId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// メンバー追加のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddMemberError {
    #[error("Conversation {0} not found")]
    NotFound(ConversationId),

    #[error("User {0} is not a member of the conversation")]
    NotAMember(UserId),

    #[error("Unknown user {0}")]
    UnknownUser(UserId),

    #[error("Cannot add member: {0}")]
    Rejected(#[from] ConversationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// メッセージ投稿のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostMessageError {
    #[error("Invalid message: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("Conversation {0} not found")]
    NotFound(ConversationId),

    #[error("User {0} is not a member of the conversation")]
    NotAMember(UserId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 会話の一覧・詳細表示のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewConversationError {
    #[error("Conversation {0} not found")]
    NotFound(ConversationId),

    #[error("Cannot name conversation: {0}")]
    Naming(#[from] NamingError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
