pub mod client;
pub mod gemini_llm;
pub mod interface;
pub mod prompts;

pub use client::GenerationClient;
pub use gemini_llm::GeminiLLM;
pub use interface::*;
