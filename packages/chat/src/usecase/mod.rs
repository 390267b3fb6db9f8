//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod add_member;
pub mod create_conversation;
pub mod error;
pub mod list_conversations;
pub mod post_message;
pub mod register_user;
pub mod show_conversation;

pub use add_member::AddMemberUseCase;
pub use create_conversation::{CreateConversationInput, CreateConversationUseCase};
pub use error::{
    AddMemberError, CreateConversationError, PostMessageError, RegisterError,
    ViewConversationError,
};
pub use list_conversations::ListConversationsUseCase;
pub use post_message::{PostMessageInput, PostMessageUseCase};
pub use register_user::{RegisterUserInput, RegisterUserUseCase};
pub use show_conversation::ShowConversationUseCase;
