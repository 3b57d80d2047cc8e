// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for engine invocation events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Engine invocation started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use deploy_invoker::observability::messages::gateway::EngineInvocationStarted;
///
/// let msg = EngineInvocationStarted {
///     engine: "Pipeline compiler",
///     transport: "http",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct EngineInvocationStarted<'a> {
    pub engine: &'a str,
    pub transport: &'a str,
}

impl Display for EngineInvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invoking {} via {}", self.engine.to_lowercase(), self.transport)
    }
}

impl StructuredLog for EngineInvocationStarted<'_> {
    fn log(&self) {
        tracing::info!(engine = self.engine, transport = self.transport, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_invocation",
            span_name = name,
            engine = self.engine,
            transport = self.transport,
        )
    }
}

/// Engine returned a well-formed envelope.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EngineInvocationCompleted<'a> {
    pub engine: &'a str,
    pub duration: std::time::Duration,
}

impl Display for EngineInvocationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} responded in {:?}", self.engine, self.duration)
    }
}

impl StructuredLog for EngineInvocationCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            engine = self.engine,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "engine_completed",
            span_name = name,
            engine = self.engine,
            duration = ?self.duration,
        )
    }
}

/// Engine response lacks the result key.
///
/// # Log Level
/// `warn!` - The router raises the fault; this records what came back
pub struct EngineProtocolViolation<'a> {
    pub engine: &'a str,
    pub expected_key: &'a str,
}

impl Display for EngineProtocolViolation<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} response is missing the '{}' key",
            self.engine, self.expected_key
        )
    }
}

impl StructuredLog for EngineProtocolViolation<'_> {
    fn log(&self) {
        tracing::warn!(engine = self.engine, expected_key = self.expected_key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "engine_protocol",
            span_name = name,
            engine = self.engine,
            expected_key = self.expected_key,
        )
    }
}
