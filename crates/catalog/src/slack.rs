//! Chat capability: `slack/message`.

use engine::{Argument, ServiceBinding, TaskDescriptor};

pub const SERVICE: &str = "slack";
pub const VERSION: &str = "0.1.0";
pub const ENDPOINT_MESSAGE: &str = "message";

pub fn binding() -> ServiceBinding {
    ServiceBinding::new(SERVICE, VERSION, SERVICE)
}

pub fn message_arguments(webhook_url: &str, message: &str) -> Vec<Argument> {
    vec![
        Argument::new("Webhook_URL", webhook_url),
        Argument::new("Message", message),
    ]
}

/// Build a task posting `message` to an incoming webhook.
pub fn message_task(name: impl Into<String>, webhook_url: &str, message: &str) -> TaskDescriptor {
    TaskDescriptor::new(name, SERVICE, ENDPOINT_MESSAGE)
        .with_arguments(message_arguments(webhook_url, message))
}
