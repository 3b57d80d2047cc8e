// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Duration;

/// Caller metadata accompanying a request.
///
/// The router only logs it; engines always receive a null context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: Option<String>,
    pub remaining_time: Option<Duration>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            remaining_time: None,
        }
    }

    pub fn with_remaining_time(mut self, remaining: Duration) -> Self {
        self.remaining_time = Some(remaining);
        self
    }
}
