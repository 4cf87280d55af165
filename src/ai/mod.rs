//! AI provider gateway over the Gemini, OpenAI, and Ollama backends.

pub mod backend;
pub mod gateway;
pub mod gemini;
pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod translate;

pub use backend::{TextBackend, backend_for};
pub use gateway::AiGateway;
pub use prompt::PromptStore;
pub use translate::Translator;
