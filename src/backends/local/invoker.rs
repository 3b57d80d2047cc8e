// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use super::EngineMap;
use crate::engine::EngineKind;
use crate::errors::InvokerError;
use crate::traits::EngineInvoker;

/// Calls engines registered in this process.
#[derive(Debug, Clone)]
pub struct LocalInvoker {
    engines: EngineMap,
}

impl LocalInvoker {
    pub fn new(engines: EngineMap) -> Self {
        Self { engines }
    }

    pub fn engines(&self) -> &EngineMap {
        &self.engines
    }
}

#[async_trait]
impl EngineInvoker for LocalInvoker {
    async fn invoke(&self, engine: EngineKind, payload: Value) -> Result<Value, InvokerError> {
        let handler = self
            .engines
            .get(engine)
            .ok_or(InvokerError::EngineNotRegistered(engine))?;

        handler.handle(payload, None).await
    }

    fn transport(&self) -> &'static str {
        "local"
    }
}
