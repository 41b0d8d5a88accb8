//! Language model provider clients and abstractions.
//!
//! A unified interface for answer generation across providers. The core
//! trait is [`LLMClient`]; [`Provider`] selects and constructs the concrete
//! implementation at startup based on configuration. There is no silent
//! fallback between providers: a misconfigured or failing provider surfaces
//! as an error.

/// Core LLM client trait and provider selection.
pub mod client;
/// Ollama local inference client.
pub mod ollama;
/// OpenAI chat completion client.
pub mod openai;

pub use client::{LLMClient, Provider};

/// Split a base URL like `http://localhost:11434` into a scheme-qualified
/// host and a port for the Ollama client constructor. The constructor
/// requires a full URL for the host part, so a missing scheme gets `http`
/// and a missing port the Ollama default.
pub(crate) fn parse_base_url(base_url: &str) -> (String, u16) {
    let (scheme, rest) = match base_url.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", base_url),
    };
    let (host, port) = match rest.split_once(':') {
        Some((host, port)) => (host, port.parse().unwrap_or(11434)),
        None => (rest, 11434),
    };
    (format!("{}://{}", scheme, host), port)
}
