// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Correlation context for the request being handled.
//!
//! One request is handled per process at a time, so the identity is a single
//! process-wide slot. Each request overwrites it; there is no teardown.

use std::sync::RwLock;
use tracing::Span;

static CORRELATION_IDENTITY: RwLock<Option<String>> = RwLock::new(None);

/// Record `identity` as the correlation key for subsequent log events.
pub fn setup(identity: &str) {
    let mut slot = CORRELATION_IDENTITY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(identity.to_string());
}

/// Identity of the most recently set up request.
pub fn current_identity() -> Option<String> {
    CORRELATION_IDENTITY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Span wrapping all work done for one task.
pub fn request_span(identity: &str, task_type: &str, task: &str) -> Span {
    tracing::info_span!("task", identity = identity, task_type = task_type, task = task)
}
