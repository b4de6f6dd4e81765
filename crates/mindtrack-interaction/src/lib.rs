pub mod assistant;
pub mod canned;
pub mod openai_client;
pub mod prompts;

pub use crate::assistant::{ChatAssistant, ReplyOutcome, SendOutcome};
pub use crate::canned::CannedResponder;
pub use crate::openai_client::OpenAIChatClient;
