pub mod webhook;

pub use webhook::{
    ChatEvent, ChatRef, IncomingChatPayload, IncomingEventPayload, WebhookAction, WebhookEvent,
};
