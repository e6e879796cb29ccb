/// Ollama integration module - Gateway
mod client;
mod guide;
mod reasoning;
mod stream;
mod types;

pub use client::{GenerateReply, OllamaApi, OllamaClient};
pub use guide::print_install_guide;
pub use reasoning::{strip_reasoning, ReasoningFilter};
pub use stream::{FragmentStream, NdjsonDecoder};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, GenerateChunk, GenerateRequest, ModelInfo,
    VersionResponse,
};

#[cfg(test)]
pub use client::MockOllamaApi;
