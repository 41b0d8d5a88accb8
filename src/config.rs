use crate::llm::Provider;
use crate::rag::embeddings::EmbeddingProvider;
use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub rag: RAGConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on the multipart upload body, in bytes.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    /// "openai" or "ollama", for both chat and embeddings.
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_chat_model: String,
    pub openai_embedding_model: String,
    pub ollama_url: String,
    pub ollama_chat_model: String,
    pub ollama_embedding_model: String,
    /// Sampling temperature for chat completions. `None` leaves the
    /// provider's default in place.
    pub temperature: Option<f32>,
    /// Per-call deadline for remote provider requests, in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RAGConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub chunk_separator: String,
    pub top_k: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", "3000")?,
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", "26214400")?,
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                openai_chat_model: env::var("OPENAI_CHAT_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                openai_embedding_model: env::var("OPENAI_EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                ollama_chat_model: env::var("OLLAMA_CHAT_MODEL")
                    .unwrap_or_else(|_| "llama3.2".to_string()),
                ollama_embedding_model: env::var("OLLAMA_EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "nomic-embed-text".to_string()),
                temperature: match env::var("LLM_TEMPERATURE") {
                    Ok(raw) => Some(raw.parse().map_err(|e| {
                        AppError::Configuration(format!("Invalid LLM_TEMPERATURE: {}", e))
                    })?),
                    Err(_) => None,
                },
                timeout_secs: parse_var("PROVIDER_TIMEOUT_SECS", "60")?,
            },
            rag: RAGConfig {
                chunk_size: parse_var("CHUNK_SIZE", "1000")?,
                chunk_overlap: parse_var("CHUNK_OVERLAP", "200")?,
                chunk_separator: env::var("CHUNK_SEPARATOR").unwrap_or_else(|_| "\n".to_string()),
                top_k: parse_var("TOP_K", "4")?,
            },
        })
    }

    /// Fail fast on settings that would only surface mid-request otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.rag.chunk_size == 0 {
            return Err(AppError::Configuration(
                "CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        if self.rag.chunk_overlap >= self.rag.chunk_size {
            return Err(AppError::Configuration(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.rag.chunk_overlap, self.rag.chunk_size
            )));
        }
        if self.rag.top_k == 0 {
            return Err(AppError::Configuration(
                "TOP_K must be greater than zero".to_string(),
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "PROVIDER_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        match self.llm.provider.as_str() {
            "openai" => {
                if self.llm.openai_api_key.is_none() {
                    return Err(AppError::Configuration(
                        "OPENAI_API_KEY is required when LLM_PROVIDER=openai".to_string(),
                    ));
                }
            }
            "ollama" => {}
            other => {
                return Err(AppError::Configuration(format!(
                    "Unknown LLM_PROVIDER '{}' (expected 'openai' or 'ollama')",
                    other
                )));
            }
        }

        Ok(())
    }

    pub fn chat_provider(&self) -> Result<Provider> {
        match self.llm.provider.as_str() {
            "openai" => Ok(Provider::OpenAI {
                api_key: self.llm.openai_api_key.clone().ok_or_else(|| {
                    AppError::Configuration("OPENAI_API_KEY is required".to_string())
                })?,
                api_base: self.llm.openai_api_base.clone(),
                model: self.llm.openai_chat_model.clone(),
                temperature: self.llm.temperature,
            }),
            "ollama" => Ok(Provider::Ollama {
                base_url: self.llm.ollama_url.clone(),
                model: self.llm.ollama_chat_model.clone(),
            }),
            other => Err(AppError::Configuration(format!(
                "Unknown LLM_PROVIDER '{}'",
                other
            ))),
        }
    }

    pub fn embedding_provider(&self) -> Result<EmbeddingProvider> {
        match self.llm.provider.as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAI {
                api_key: self.llm.openai_api_key.clone().ok_or_else(|| {
                    AppError::Configuration("OPENAI_API_KEY is required".to_string())
                })?,
                api_base: self.llm.openai_api_base.clone(),
                model: self.llm.openai_embedding_model.clone(),
            }),
            "ollama" => Ok(EmbeddingProvider::Ollama {
                base_url: self.llm.ollama_url.clone(),
                model: self.llm.ollama_embedding_model.clone(),
            }),
            other => Err(AppError::Configuration(format!(
                "Unknown LLM_PROVIDER '{}'",
                other
            ))),
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_secs)
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                max_upload_bytes: 1024 * 1024,
            },
            llm: LLMConfig {
                provider: "ollama".to_string(),
                openai_api_key: None,
                openai_api_base: "https://api.openai.com/v1".to_string(),
                openai_chat_model: "gpt-4o-mini".to_string(),
                openai_embedding_model: "text-embedding-3-small".to_string(),
                ollama_url: "http://localhost:11434".to_string(),
                ollama_chat_model: "llama3.2".to_string(),
                ollama_embedding_model: "nomic-embed-text".to_string(),
                temperature: None,
                timeout_secs: 60,
            },
            rag: RAGConfig {
                chunk_size: 1000,
                chunk_overlap: 200,
                chunk_separator: "\n".to_string(),
                top_k: 4,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let mut config = test_config();
        config.rag.chunk_overlap = 1000;
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration(_))
        ));

        config.rag.chunk_overlap = 1200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_openai_requires_api_key() {
        let mut config = test_config();
        config.llm.provider = "openai".to_string();
        assert!(config.validate().is_err());

        config.llm.openai_api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut config = test_config();
        config.llm.provider = "bedrock".to_string();
        assert!(config.validate().is_err());
        assert!(config.chat_provider().is_err());
        assert!(config.embedding_provider().is_err());
    }

    #[test]
    fn test_provider_selection() {
        let config = test_config();
        let chat = config.chat_provider().unwrap();
        assert_eq!(chat.name(), "Ollama");

        let embedding = config.embedding_provider().unwrap();
        assert_eq!(embedding.name(), "Ollama");
    }
}
