use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ServiceError;

/// Bot session token issued by the platform. Valid for 24h per the API
/// contract, but requested fresh for every inbound webhook and dropped
/// afterwards.
pub struct BotToken(String);

#[derive(Serialize)]
struct IssueBotTokenRequest<'a> {
    bot_id: &'a str,
    client_id: &'a str,
    bot_secret: &'a str,
    organization_id: &'a str,
}

#[derive(Deserialize)]
struct IssueBotTokenResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Serialize)]
struct SendEventRequest<'a> {
    chat_id: &'a str,
    event: MessageEvent<'a>,
}

#[derive(Serialize)]
struct MessageEvent<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    text: &'a str,
}

pub struct LiveChatClient {
    client: Client,
    api_base: String,
    pat: String,
    bot_id: String,
    client_id: String,
    bot_secret: String,
    organization_id: String,
}

impl LiveChatClient {
    pub fn new(config: &Config) -> Self {
        LiveChatClient {
            client: Client::new(),
            api_base: config.livechat_api_base.clone(),
            pat: config.livechat_pat.clone(),
            bot_id: config.livechat_bot_id.clone(),
            client_id: config.livechat_client_id.clone(),
            bot_secret: config.livechat_bot_secret.clone(),
            organization_id: config.livechat_org_id.clone(),
        }
    }

    /// Issues a bot session token, authenticated with the personal access
    /// token held in configuration.
    pub async fn issue_bot_token(&self) -> Result<BotToken, ServiceError> {
        let url = format!(
            "{}/v3.6/configuration/action/issue_bot_token",
            self.api_base
        );
        let request = IssueBotTokenRequest {
            bot_id: &self.bot_id,
            client_id: &self.client_id,
            bot_secret: &self.bot_secret,
            organization_id: &self.organization_id,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.pat)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::TokenIssuance { status, body });
        }

        let body: IssueBotTokenResponse = response.json().await?;
        body.token
            .filter(|token| !token.is_empty())
            .map(BotToken)
            .ok_or(ServiceError::MissingToken)
    }

    /// Posts a message-type event into the given chat, authenticated with
    /// the issued bot token.
    pub async fn send_event(
        &self,
        token: &BotToken,
        chat_id: &str,
        text: &str,
    ) -> Result<(), ServiceError> {
        let url = format!("{}/v3.6/agent/action/send_event", self.api_base);
        let request = SendEventRequest {
            chat_id,
            event: MessageEvent {
                event_type: "message",
                text,
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token.0)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::SendEvent { status, body });
        }

        Ok(())
    }
}
