// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External bus fan-out: durable topic `pipeline-events`, subscription
//! `web-consumer`. The publisher holds an `enabled` flag set at
//! construction from the connection string; when unconfigured, `send`
//! short-circuits after a single startup warning.

use azure_messaging_servicebus::{ServiceBusClient, ServiceBusClientOptions, ServiceBusMessage};
use curate_core::PipelineEvent;

pub const TOPIC: &str = "pipeline-events";

#[derive(Clone)]
pub struct ExternalBus {
    sender: Option<azure_messaging_servicebus::ServiceBusSender>,
}

impl ExternalBus {
    /// Connect to the bus when `connection_string` is present; otherwise
    /// log a single startup warning and return a no-op bus.
    pub async fn connect(connection_string: Option<&str>) -> Self {
        let Some(connection_string) = connection_string.filter(|s| !s.is_empty()) else {
            tracing::warn!("bus_connection_string is unset — external event fan-out disabled");
            return Self { sender: None };
        };

        match ServiceBusClient::new(connection_string, ServiceBusClientOptions::default()).await {
            Ok(client) => match client.create_sender(TOPIC, None).await {
                Ok(sender) => Self {
                    sender: Some(sender),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "failed to create service bus sender — external event fan-out disabled");
                    Self { sender: None }
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to connect to service bus — external event fan-out disabled");
                Self { sender: None }
            }
        }
    }

    /// Disabled bus: every `send` is a no-op. Used in tests and whenever
    /// the external fan-out is intentionally turned off.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Send one event. Failure is logged and swallowed — pipeline events
    /// are ephemeral UI updates, not a durability boundary.
    pub async fn send(&self, event: &PipelineEvent) {
        let Some(sender) = &self.sender else {
            return;
        };

        let mut message = ServiceBusMessage::from(event.to_envelope().to_string());
        message.set_application_property("event_type", event.event_type());

        if let Err(e) = sender.send_message(message).await {
            tracing::warn!(error = %e, event_type = event.event_type(), "failed to publish event to service bus");
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
