use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ServiceError;

/// Reply used when the completion response is absent, empty or malformed.
pub const FALLBACK_REPLY: &str = "I'm here to help!";

const SYSTEM_PROMPT: &str = "You are a helpful real estate assistant.";

#[derive(Serialize)]
struct InputMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponsesRequestBody {
    model: String,
    input: Vec<InputMessage>,
}

#[derive(Deserialize)]
struct ResponsesResponseBody {
    #[serde(default)]
    output_text: Option<String>,
}

pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(OpenAiClient {
            client,
            api_base: config.openai_api_base.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    /// Sends the customer's text as a single-turn exchange and extracts the
    /// reply. No conversation history is included.
    pub async fn generate_reply(&self, prompt: &str) -> Result<String, ServiceError> {
        let req_body = ResponsesRequestBody {
            model: self.model.clone(),
            input: vec![
                InputMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                InputMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
        };

        let url = format!("{}/v1/responses", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Completion { status, body });
        }

        let body: ResponsesResponseBody = response.json().await?;
        let reply = body
            .output_text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        Ok(reply)
    }
}
