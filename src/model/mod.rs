//! Domain model: messages, conversations, and the store error taxonomy.

pub mod conversation;
pub mod error;
pub mod message;

pub use conversation::{Conversation, FILE_EXTENSION};
pub use error::StoreError;
pub use message::{Message, Role};
