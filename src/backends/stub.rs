// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::engine::EngineKind;
use crate::errors::{InvokerError, StorageError};
use crate::model::{InvocationContext, TaskDescription};
use crate::storage::{CopyAcknowledgement, CopyObjectRequest};
use crate::traits::{Engine, EngineInvoker, ObjectStore};

/// A well-formed pipeline compile request used across tests.
pub fn sample_task_json() -> Value {
    json!({
        "Identity": "prn:test-portfolio:test-app:main:latest",
        "Client": "acme",
        "Type": "pipeline",
        "Task": "compile",
        "Package": {
            "BucketName": "acme-uploads",
            "BucketRegion": "eu-west-1",
            "Key": "packages/test-portfolio/test-app/main/latest/package.zip"
        },
        "DeploymentDetails": {
            "Client": "acme",
            "Portfolio": "test-portfolio",
            "App": "test-app",
            "Branch": "main",
            "Build": "latest"
        }
    })
}

pub fn sample_task() -> TaskDescription {
    TaskDescription::parse(sample_task_json()).unwrap()
}

/// Engine returning a fixed response, or a fixed fault.
pub struct StaticEngine {
    response: Result<Value, String>,
    received: Mutex<Vec<Value>>,
}

impl StaticEngine {
    pub fn new(response: Value) -> Self {
        Self {
            response: Ok(response),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Engine failing with a runner transport fault.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Engine for StaticEngine {
    async fn handle(
        &self,
        payload: Value,
        _context: Option<&InvocationContext>,
    ) -> Result<Value, InvokerError> {
        self.received.lock().unwrap().push(payload);
        self.response
            .clone()
            .map_err(|message| InvokerError::transport(EngineKind::Runner, message))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Invoker with a canned response per engine kind that records every call.
#[derive(Default)]
pub struct RecordingInvoker {
    responses: HashMap<EngineKind, Value>,
    calls: Mutex<Vec<(EngineKind, Value)>>,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, engine: EngineKind, response: Value) -> Self {
        self.responses.insert(engine, response);
        self
    }

    /// Invoker answering every engine with a minimal well-formed envelope.
    pub fn answering_all() -> Self {
        EngineKind::ALL.into_iter().fold(Self::new(), |invoker, kind| {
            invoker.with_response(kind, json!({"Response": {"Status": "ok", "Engine": kind.config_key()}}))
        })
    }

    pub fn calls(&self) -> Vec<(EngineKind, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, engine: EngineKind) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == engine)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl EngineInvoker for RecordingInvoker {
    async fn invoke(&self, engine: EngineKind, payload: Value) -> Result<Value, InvokerError> {
        self.calls.lock().unwrap().push((engine, payload));
        self.responses
            .get(&engine)
            .cloned()
            .ok_or_else(|| InvokerError::transport(engine, "no canned response"))
    }

    fn transport(&self) -> &'static str {
        "recording"
    }
}

/// Object store rejecting every copy.
pub struct FailingObjectStore;

#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn copy_object(
        &self,
        _request: &CopyObjectRequest,
    ) -> Result<CopyAcknowledgement, StorageError> {
        Err(StorageError::Backend("AccessDenied: simulated failure".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Plain-text log output collected by a thread-scoped `tracing` subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route events on the current thread into this buffer until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || logs.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// The first captured line containing `needle`.
    pub fn line_containing(&self, needle: &str) -> Option<String> {
        self.contents()
            .lines()
            .find(|line| line.contains(needle))
            .map(str::to_string)
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
