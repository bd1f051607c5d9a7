//! Text-generation backend client.

pub mod client;

pub use client::{
    API_VERSION, AnthropicClient, DEFAULT_BASE_URL, GenerationResult, MAX_TOKENS, MODEL,
    MessageGenerator, parse_response,
};
