//! LLM-facing layer: chat protocol wrapper, reply parsing, paraphrasing.

pub mod chat_client;
pub mod paraphraser;
pub mod phrasing;

pub use chat_client::ChatClient;
pub use paraphraser::{Paraphraser, REPHRASE_SYSTEM_PROMPT};
pub use phrasing::parse_phrasings;
