// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::InvokerError;
use crate::model::InvocationContext;

/// A downstream engine callable in-process.
///
/// Receives the serialized task description and answers with an envelope that
/// carries a top-level `Response` key.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn handle(
        &self,
        payload: Value,
        context: Option<&InvocationContext>,
    ) -> Result<Value, InvokerError>;

    fn name(&self) -> &'static str;
}
