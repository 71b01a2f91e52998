//! Concrete resource stores built on the generic factory.

pub mod conversations;

pub use conversations::{Conversation, ConversationStore, MarkAsRead, RESOURCE};
