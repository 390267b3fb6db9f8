//! Chat domain library for Kaiwa.
//!
//! Users, conversations and messages, with conversation names derived per
//! viewer: a private conversation is shown under the other member's username.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use domain::ConversationNamer;
pub use ui::run;
