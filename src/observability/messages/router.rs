// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for request lifecycle and routing events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Task accepted and about to be routed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use deploy_invoker::observability::messages::router::TaskReceived;
///
/// let msg = TaskReceived {
///     identity: "prn:portfolio:app:main:1",
///     task_type: "pipeline",
///     task: "compile",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TaskReceived<'a> {
    pub identity: &'a str,
    pub task_type: &'a str,
    pub task: &'a str,
}

impl Display for TaskReceived<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invoker started. Executing task: {}-{}",
            self.task, self.task_type
        )
    }
}

impl StructuredLog for TaskReceived<'_> {
    fn log(&self) {
        tracing::info!(
            identity = self.identity,
            task_type = self.task_type,
            task = self.task,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "task_received",
            span_name = name,
            identity = self.identity,
            task_type = self.task_type,
            task = self.task,
        )
    }
}

/// Caller supplied an execution context.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ContextAttached<'a> {
    pub request_id: Option<&'a str>,
    pub remaining_time: Option<std::time::Duration>,
}

impl Display for ContextAttached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Execution context: request_id={}, remaining_time={:?}",
            self.request_id.unwrap_or("-"),
            self.remaining_time
        )
    }
}

impl StructuredLog for ContextAttached<'_> {
    fn log(&self) {
        tracing::debug!(
            request_id = self.request_id,
            remaining_ms = self.remaining_time.map(|d| d.as_millis() as u64),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("context", span_name = name, request_id = self.request_id)
    }
}

/// A deploy-spec action answered with the not-implemented stub.
///
/// # Log Level
/// `info!` - Expected, but worth seeing in the request log
pub struct ActionNotImplemented<'a> {
    pub task_type: &'a str,
    pub task: &'a str,
}

impl Display for ActionNotImplemented<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' for '{}' is not implemented", self.task, self.task_type)
    }
}

impl StructuredLog for ActionNotImplemented<'_> {
    fn log(&self) {
        tracing::info!(task_type = self.task_type, task = self.task, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "not_implemented",
            span_name = name,
            task_type = self.task_type,
            task = self.task,
        )
    }
}

/// Routing failed with a fault.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use deploy_invoker::observability::messages::router::TaskFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// let msg = TaskFailed {
///     identity: Some("prn:portfolio:app:main:1"),
///     error_kind: "transport",
///     error: &error,
///     propagated: false,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct TaskFailed<'a> {
    /// Correlation identity of the request, if one was set up.
    pub identity: Option<&'a str>,
    pub error_kind: &'a str,
    pub error: &'a dyn std::error::Error,
    pub propagated: bool,
}

impl Display for TaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Error executing task: {}", self.error)
    }
}

impl StructuredLog for TaskFailed<'_> {
    fn log(&self) {
        tracing::error!(
            identity = self.identity,
            error_kind = self.error_kind,
            propagated = self.propagated,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "task_failed",
            span_name = name,
            identity = self.identity,
            error_kind = self.error_kind,
            propagated = self.propagated,
        )
    }
}
