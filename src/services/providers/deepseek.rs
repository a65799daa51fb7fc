//! DeepSeek chat-completions backend (OpenAI-compatible wire format).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionProvider, CompletionRequest, ProviderError, non_empty, read_json};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 800;

pub struct DeepSeekProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl DeepSeekProvider {
    pub fn new(client: Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionProvider for DeepSeekProvider {
    fn name(&self) -> &'static str {
        "DeepSeek"
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = build_request(&self.model, request);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let data: ChatCompletionResponse = read_json(response).await?;
        extract_reply(data).ok_or(ProviderError::MissingReply)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn build_request<'a>(model: &'a str, request: &CompletionRequest<'a>) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: request.system,
            },
            ChatMessage {
                role: "user",
                content: request.user,
            },
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// `choices[0].message.content`
fn extract_reply(response: ChatCompletionResponse) -> Option<String> {
    let choice = response.choices?.into_iter().next()?;
    non_empty(choice.message?.content)
}
