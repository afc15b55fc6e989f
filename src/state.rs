use crate::config::Config;
use crate::error::ServiceError;
use crate::services::livechat::LiveChatClient;
use crate::services::openai::OpenAiClient;

/// Shared application state: immutable configuration plus the outbound
/// service clients. Requests share nothing mutable.
pub struct AppState {
    pub config: Config,
    pub livechat: LiveChatClient,
    pub openai: OpenAiClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        let livechat = LiveChatClient::new(&config);
        let openai = OpenAiClient::new(&config)?;

        Ok(Self {
            config,
            livechat,
            openai,
        })
    }
}
