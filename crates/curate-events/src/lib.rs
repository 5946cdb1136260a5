// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! curate-events: event publisher — in-process fan-out via a
//! bounded broadcast channel per subscriber, plus an optional external
//! Azure Service Bus topic.

pub mod bus;
pub mod publisher;

pub use bus::ExternalBus;
pub use publisher::{EventPublisher, DEFAULT_QUEUE_CAPACITY};
