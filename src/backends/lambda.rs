// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Remote engines deployed as AWS Lambda functions (feature `aws`).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::EnginesConfig;
use crate::engine::EngineKind;
use crate::errors::InvokerError;
use crate::traits::EngineInvoker;

/// Synchronous (`RequestResponse`) Lambda invocations.
#[derive(Debug, Clone)]
pub struct LambdaInvoker {
    client: Client,
    functions: HashMap<EngineKind, String>,
}

impl LambdaInvoker {
    /// Client for `region` from the default credential chain; function names
    /// or ARNs come from each engine's `endpoint`.
    pub async fn new(region: &str, engines: &EnginesConfig) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let functions = EngineKind::ALL
            .into_iter()
            .filter_map(|kind| {
                engines
                    .get(kind)
                    .endpoint
                    .clone()
                    .map(|function| (kind, function))
            })
            .collect();

        Self::from_client(Client::new(&config), functions)
    }

    pub fn from_client(client: Client, functions: HashMap<EngineKind, String>) -> Self {
        Self { client, functions }
    }
}

#[async_trait]
impl EngineInvoker for LambdaInvoker {
    async fn invoke(&self, engine: EngineKind, payload: Value) -> Result<Value, InvokerError> {
        let function = self
            .functions
            .get(&engine)
            .ok_or_else(|| InvokerError::transport(engine, "no function configured"))?;

        let output = self
            .client
            .invoke()
            .function_name(function)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(serde_json::to_vec(&payload)?))
            .send()
            .await
            .map_err(|e| InvokerError::transport(engine, DisplayErrorContext(&e).to_string()))?;

        let body = output.payload().map(|blob| blob.as_ref()).unwrap_or_default();

        if let Some(function_error) = output.function_error() {
            return Err(InvokerError::transport(
                engine,
                format!(
                    "{function} raised {function_error}: {}",
                    String::from_utf8_lossy(body)
                ),
            ));
        }

        serde_json::from_slice(body).map_err(|e| {
            InvokerError::transport(engine, format!("{function} returned invalid JSON: {e}"))
        })
    }

    fn transport(&self) -> &'static str {
        "lambda"
    }
}
