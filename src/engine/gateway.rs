// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Invocation gateway.
//!
//! Hides whether an engine runs in-process or remotely and enforces the
//! response contract: every engine answers with a top-level `Response` key.
//! Compiler results are unwrapped one level; runner results are returned as
//! they arrived.

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::EngineKind;
use crate::config::consts::RESULT_KEY;
use crate::errors::InvokerError;
use crate::model::TaskDescription;
use crate::observability::messages::gateway::{
    EngineInvocationCompleted, EngineInvocationStarted, EngineProtocolViolation,
};
use crate::observability::messages::StructuredLog;
use crate::traits::EngineInvoker;

pub struct InvocationGateway {
    invoker: Arc<dyn EngineInvoker>,
}

impl InvocationGateway {
    pub fn new(invoker: Arc<dyn EngineInvoker>) -> Self {
        Self { invoker }
    }

    /// Run the pipeline compiler; returns the value of its `Response` key.
    pub async fn execute_pipeline_compiler(
        &self,
        task: &TaskDescription,
    ) -> Result<Value, InvokerError> {
        self.execute(EngineKind::PipelineCompiler, task).await
    }

    /// Run the deploy-spec compiler; returns the value of its `Response` key.
    pub async fn execute_deployspec_compiler(
        &self,
        task: &TaskDescription,
    ) -> Result<Value, InvokerError> {
        self.execute(EngineKind::DeploySpecCompiler, task).await
    }

    /// Run the runner; returns its whole envelope.
    pub async fn execute_runner(&self, task: &TaskDescription) -> Result<Value, InvokerError> {
        self.execute(EngineKind::Runner, task).await
    }

    /// Invoke `engine` and apply the per-engine result shape.
    pub async fn execute(
        &self,
        engine: EngineKind,
        task: &TaskDescription,
    ) -> Result<Value, InvokerError> {
        let response = self.invoke_checked(engine, task).await?;
        if engine.is_compiler() {
            Ok(take_result(response))
        } else {
            Ok(response)
        }
    }

    async fn invoke_checked(
        &self,
        engine: EngineKind,
        task: &TaskDescription,
    ) -> Result<Value, InvokerError> {
        let payload = task.to_payload()?;
        let engine_name = engine.to_string();

        EngineInvocationStarted {
            engine: &engine_name,
            transport: self.invoker.transport(),
        }
        .log();

        let start = Instant::now();
        let response = self.invoker.invoke(engine, payload).await?;

        if response.get(RESULT_KEY).is_none() {
            EngineProtocolViolation {
                engine: &engine_name,
                expected_key: RESULT_KEY,
            }
            .log();
            return Err(InvokerError::EngineProtocol { engine, response });
        }

        EngineInvocationCompleted {
            engine: &engine_name,
            duration: start.elapsed(),
        }
        .log();

        Ok(response)
    }
}

fn take_result(response: Value) -> Value {
    match response {
        Value::Object(mut envelope) => envelope.remove(RESULT_KEY).unwrap_or(Value::Null),
        other => other,
    }
}
