// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with typed fields at its intended level.
//!
//! # Organization
//!
//! * `router` - request lifecycle and routing decisions
//! * `gateway` - engine invocation events
//! * `staging` - artefact staging events
//! * `validation` - configuration validation events

pub mod gateway;
pub mod router;
pub mod staging;
pub mod validation;

use tracing::Span;

/// Emit a message as a structured tracing event, or open a span for it.
pub trait StructuredLog {
    /// Log the message at its documented level.
    fn log(&self);

    /// Span carrying the same fields as the message.
    fn span(&self, name: &str) -> Span;
}
