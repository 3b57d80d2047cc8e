// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Remote engines reached over HTTP.
//!
//! Each engine kind maps to one endpoint. The task payload is POSTed as JSON
//! and the response body is the engine's envelope. There are no retries; the
//! only timeout is the optional one set on the client.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::EnginesConfig;
use crate::engine::EngineKind;
use crate::errors::{ConfigError, InvokerError};
use crate::traits::EngineInvoker;

#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
    endpoints: HashMap<EngineKind, String>,
}

impl HttpInvoker {
    pub fn new(
        endpoints: HashMap<EngineKind, String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Runtime(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, endpoints })
    }

    /// Endpoints taken from the `endpoint` of each configured engine.
    pub fn from_engines(
        engines: &EnginesConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let endpoints = EngineKind::ALL
            .into_iter()
            .filter_map(|kind| {
                engines
                    .get(kind)
                    .endpoint
                    .clone()
                    .map(|endpoint| (kind, endpoint))
            })
            .collect();
        Self::new(endpoints, timeout)
    }

    pub fn endpoint(&self, engine: EngineKind) -> Option<&str> {
        self.endpoints.get(&engine).map(String::as_str)
    }
}

#[async_trait]
impl EngineInvoker for HttpInvoker {
    async fn invoke(&self, engine: EngineKind, payload: Value) -> Result<Value, InvokerError> {
        let endpoint = self
            .endpoint(engine)
            .ok_or_else(|| InvokerError::transport(engine, "no endpoint configured"))?;

        let response = self
            .client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| InvokerError::transport(engine, format!("request to {endpoint} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(InvokerError::transport(
                engine,
                format!("{endpoint} returned {status}: {body}"),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            InvokerError::transport(engine, format!("{endpoint} returned invalid JSON: {e}"))
        })
    }

    fn transport(&self) -> &'static str {
        "http"
    }
}
