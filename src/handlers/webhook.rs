use actix_web::{web, HttpResponse};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::models::{IncomingChatPayload, IncomingEventPayload, WebhookAction, WebhookEvent};
use crate::services::openai::FALLBACK_REPLY;
use crate::state::AppState;

/// Greeting posted into freshly opened chats.
pub const GREETING: &str = "Hi 👋 I'm your AI assistant. How can I help?";

#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    CustomerMessage { chat_id: String, text: String },
    NewChat { chat_id: String },
    Ignore,
}

/// Webhook entry point. The platform sends arbitrary content types, so the
/// body is taken as raw bytes and parsed as JSON here rather than through
/// the JSON extractor.
pub async fn livechat(body: web::Bytes, state: web::Data<AppState>) -> HttpResponse {
    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!("Rejecting webhook with unparseable body: {}", err);
            return HttpResponse::BadRequest().finish();
        }
    };

    if event.secret_key != state.config.webhook_secret {
        warn!("Rejecting webhook with invalid secret key");
        return HttpResponse::Unauthorized().finish();
    }

    match classify(event.action, event.payload) {
        Dispatch::CustomerMessage { chat_id, text } => {
            customer_message_flow(&state, &chat_id, &text).await;
        }
        Dispatch::NewChat { chat_id } => {
            new_chat_flow(&state, &chat_id).await;
        }
        Dispatch::Ignore => {
            debug!("Ignoring webhook event with no matching flow");
        }
    }

    HttpResponse::Ok().body("ok")
}

/// Classifies an inbound event into one of the two flows. Malformed or
/// irrelevant payloads map to `Ignore`: the webhook is still acknowledged,
/// since not reacting to bot/agent events and non-message events is policy.
pub fn classify(action: WebhookAction, payload: Value) -> Dispatch {
    match action {
        WebhookAction::IncomingEvent => {
            match serde_json::from_value::<IncomingEventPayload>(payload) {
                Ok(payload)
                    if payload.event.event_type == "message"
                        && payload.event.author_type == "customer" =>
                {
                    Dispatch::CustomerMessage {
                        chat_id: payload.chat_id,
                        text: payload.event.text,
                    }
                }
                _ => Dispatch::Ignore,
            }
        }
        WebhookAction::IncomingChat => {
            match serde_json::from_value::<IncomingChatPayload>(payload) {
                Ok(payload) => Dispatch::NewChat {
                    chat_id: payload.chat.id,
                },
                Err(_) => Dispatch::Ignore,
            }
        }
        WebhookAction::Unknown => Dispatch::Ignore,
    }
}

/// Customer message: issue a token, generate a reply, deliver it. A failed
/// completion degrades to the canned fallback; a failed token issuance
/// aborts delivery.
async fn customer_message_flow(state: &AppState, chat_id: &str, text: &str) {
    let token = match state.livechat.issue_bot_token().await {
        Ok(token) => token,
        Err(err) => {
            error!(
                "Failed to issue bot token, dropping reply for chat {}: {}",
                chat_id, err
            );
            return;
        }
    };

    let reply = match state.openai.generate_reply(text).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!("Completion request failed, using fallback reply: {}", err);
            FALLBACK_REPLY.to_string()
        }
    };

    if let Err(err) = state.livechat.send_event(&token, chat_id, &reply).await {
        error!("Failed to deliver reply to chat {}: {}", chat_id, err);
    }
}

/// New chat: issue a token and post the fixed greeting.
async fn new_chat_flow(state: &AppState, chat_id: &str) {
    let token = match state.livechat.issue_bot_token().await {
        Ok(token) => token,
        Err(err) => {
            error!(
                "Failed to issue bot token, dropping greeting for chat {}: {}",
                chat_id, err
            );
            return;
        }
    };

    if let Err(err) = state.livechat.send_event(&token, chat_id, GREETING).await {
        error!("Failed to deliver greeting to chat {}: {}", chat_id, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_message_is_dispatched() {
        let payload = json!({
            "chat_id": "c1",
            "event": {"type": "message", "author_type": "customer", "text": "What's the price?"}
        });
        assert_eq!(
            classify(WebhookAction::IncomingEvent, payload),
            Dispatch::CustomerMessage {
                chat_id: "c1".to_string(),
                text: "What's the price?".to_string(),
            }
        );
    }

    #[test]
    fn agent_authored_message_is_ignored() {
        let payload = json!({
            "chat_id": "c1",
            "event": {"type": "message", "author_type": "agent", "text": "hello"}
        });
        assert_eq!(classify(WebhookAction::IncomingEvent, payload), Dispatch::Ignore);
    }

    #[test]
    fn non_message_event_is_ignored() {
        let payload = json!({
            "chat_id": "c1",
            "event": {"type": "file", "author_type": "customer"}
        });
        assert_eq!(classify(WebhookAction::IncomingEvent, payload), Dispatch::Ignore);
    }

    #[test]
    fn incoming_chat_with_id_starts_greeting_flow() {
        let payload = json!({"chat": {"id": "c2"}});
        assert_eq!(
            classify(WebhookAction::IncomingChat, payload),
            Dispatch::NewChat {
                chat_id: "c2".to_string(),
            }
        );
    }

    #[test]
    fn incoming_chat_without_id_is_ignored() {
        assert_eq!(
            classify(WebhookAction::IncomingChat, json!({"chat": {}})),
            Dispatch::Ignore
        );
        assert_eq!(classify(WebhookAction::IncomingChat, json!({})), Dispatch::Ignore);
    }

    #[test]
    fn unknown_action_is_ignored() {
        assert_eq!(
            classify(WebhookAction::Unknown, json!({"chat_id": "c1"})),
            Dispatch::Ignore
        );
    }

    #[test]
    fn malformed_payload_is_ignored() {
        assert_eq!(
            classify(WebhookAction::IncomingEvent, json!("not an object")),
            Dispatch::Ignore
        );
        assert_eq!(
            classify(WebhookAction::IncomingEvent, json!({"event": {"type": "message"}})),
            Dispatch::Ignore
        );
    }
}
