// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process fan-out: every subscriber gets its own bounded
//! queue; a slow subscriber drops its own oldest messages instead of
//! blocking the producer or other subscribers.

use crate::bus::ExternalBus;
use curate_core::PipelineEvent;
use tokio::sync::broadcast;

/// Default per-subscriber queue depth.
pub const DEFAULT_QUEUE_CAPACITY: usize = 200;

/// Broadcasts [`PipelineEvent`]s to in-process subscribers and, when
/// configured, an external bus topic.
#[derive(Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PipelineEvent>,
    bus: ExternalBus,
}

impl EventPublisher {
    pub fn new(bus: ExternalBus) -> Self {
        Self::with_capacity(bus, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(bus: ExternalBus, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, bus }
    }

    /// Subscribe to the in-process fan-out. Each receiver has its own
    /// position in the ring buffer, so a slow subscriber only lags its own
    /// view — it never blocks `publish` or other subscribers.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.sender.subscribe()
    }

    /// Post an event to every current subscriber and, if configured, the
    /// external bus. Never blocks: `broadcast::Sender::send` is non-blocking
    /// and drops the oldest buffered item for lagging receivers on overflow.
    pub async fn publish(&self, event: PipelineEvent) {
        // No receivers is not an error — it just means nobody is listening yet.
        let _ = self.sender.send(event.clone());
        self.bus.send(&event).await;
    }
}

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;
