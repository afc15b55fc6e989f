use std::env;

use crate::error::ServiceError;

/// Runtime configuration, read from the environment once at startup and
/// injected into the handlers through `AppState`.
#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub webhook_secret: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_base: String,
    pub livechat_api_base: String,
    pub livechat_client_id: String,
    pub livechat_org_id: String,
    pub livechat_bot_id: String,
    pub livechat_bot_secret: String,
    pub livechat_pat: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ServiceError> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .unwrap_or(3000),
            webhook_secret: require("WEBHOOK_SECRET")?,
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            livechat_api_base: env::var("LIVECHAT_API_BASE")
                .unwrap_or_else(|_| "https://api.livechatinc.com".to_string()),
            livechat_client_id: require("LIVECHAT_CLIENT_ID")?,
            livechat_org_id: require("LIVECHAT_ORG_ID")?,
            livechat_bot_id: require("LIVECHAT_BOT_ID")?,
            livechat_bot_secret: require("LIVECHAT_BOT_SECRET")?,
            livechat_pat: require("LIVECHAT_PAT")?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ServiceError> {
    env::var(key).map_err(|_| ServiceError::Config(format!("{} is not set", key)))
}
