use serde::Deserialize;
use serde_json::Value;

/// Top-level webhook body delivered by the chat platform. The payload shape
/// depends on the action, so it stays untyped here and is parsed per-branch
/// by the dispatcher.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub action: WebhookAction,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookAction {
    IncomingEvent,
    IncomingChat,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Payload for `incoming_event` actions.
#[derive(Debug, Deserialize)]
pub struct IncomingEventPayload {
    pub chat_id: String,
    pub event: ChatEvent,
}

#[derive(Debug, Deserialize)]
pub struct ChatEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub author_type: String,
    #[serde(default)]
    pub text: String,
}

/// Payload for `incoming_chat` actions.
#[derive(Debug, Deserialize)]
pub struct IncomingChatPayload {
    pub chat: ChatRef,
}

#[derive(Debug, Deserialize)]
pub struct ChatRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_incoming_event_body() {
        let body = json!({
            "secret_key": "S",
            "action": "incoming_event",
            "payload": {
                "chat_id": "c1",
                "event": {"type": "message", "author_type": "customer", "text": "hi"}
            }
        });
        let event: WebhookEvent = serde_json::from_value(body).unwrap();
        assert_eq!(event.secret_key, "S");
        assert_eq!(event.action, WebhookAction::IncomingEvent);

        let payload: IncomingEventPayload = serde_json::from_value(event.payload).unwrap();
        assert_eq!(payload.chat_id, "c1");
        assert_eq!(payload.event.event_type, "message");
        assert_eq!(payload.event.author_type, "customer");
        assert_eq!(payload.event.text, "hi");
    }

    #[test]
    fn unknown_action_deserializes_instead_of_erroring() {
        let body = json!({"secret_key": "S", "action": "chat_deactivated", "payload": {}});
        let event: WebhookEvent = serde_json::from_value(body).unwrap();
        assert_eq!(event.action, WebhookAction::Unknown);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let event: WebhookEvent = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.secret_key, "");
        assert_eq!(event.action, WebhookAction::Unknown);
        assert!(event.payload.is_null());
    }

    #[test]
    fn event_without_text_still_parses() {
        let payload: IncomingEventPayload = serde_json::from_value(json!({
            "chat_id": "c1",
            "event": {"type": "file", "author_type": "customer"}
        }))
        .unwrap();
        assert_eq!(payload.event.text, "");
    }
}
