use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LiveChat token issuance failed ({status}): {body}")]
    TokenIssuance {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("LiveChat token response did not contain a token")]
    MissingToken,

    #[error("OpenAI completion failed ({status}): {body}")]
    Completion {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("LiveChat send_event failed ({status}): {body}")]
    SendEvent {
        status: reqwest::StatusCode,
        body: String,
    },
}
