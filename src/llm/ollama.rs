use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
};
use std::time::Duration;

pub struct OllamaClient {
    client: Ollama,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        let (host, port) = super::parse_base_url(&base_url);

        Self {
            client: Ollama::new(host, port),
            model,
            timeout,
        }
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let call = async {
            self.client
                .send_chat_messages(request)
                .await
                .map_err(|e| AppError::Generation(format!("Ollama error: {}", e)))
        };

        let response = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                AppError::ProviderTimeout(format!(
                    "Ollama chat request after {:?}",
                    self.timeout
                ))
            })??;

        Ok(response.message.content)
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(vec![ChatMessage::user(prompt.to_string())])
            .await
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let chat_messages: Vec<ChatMessage> = messages
            .iter()
            .map(|(role, content)| match role.as_str() {
                "system" => ChatMessage::system(content.clone()),
                "assistant" => ChatMessage::assistant(content.clone()),
                _ => ChatMessage::user(content.clone()),
            })
            .collect();

        self.complete(chat_messages).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
