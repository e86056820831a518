pub mod loader;
pub mod feedback;
pub mod conversation;

pub use loader::load_corpus;
pub use feedback::{FeedbackEntry, FeedbackLog};
pub use conversation::{ConversationEntry, ConversationLog, DEFAULT_CONVERSATION_CAPACITY};
