// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::EngineKind;
use crate::errors::InvokerError;

/// Transport used by the invocation gateway to reach an engine.
///
/// Implementations decide *where* the engine runs (in-process, HTTP, Lambda);
/// they return the engine's raw envelope and leave protocol checks to the
/// gateway.
#[async_trait]
pub trait EngineInvoker: Send + Sync {
    async fn invoke(&self, engine: EngineKind, payload: Value) -> Result<Value, InvokerError>;

    /// Short transport name for logging
    fn transport(&self) -> &'static str;
}
