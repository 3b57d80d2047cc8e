// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine backed by an external executable.
//!
//! The task payload is written to the child's stdin as JSON; the child prints
//! its response envelope to stdout and exits 0. Anything else is a transport
//! fault.

use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::CommandConfig;
use crate::engine::EngineKind;
use crate::errors::InvokerError;
use crate::model::InvocationContext;
use crate::traits::Engine;

#[derive(Debug, Clone)]
pub struct CommandEngine {
    kind: EngineKind,
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(kind: EngineKind, config: &CommandConfig) -> Self {
        Self {
            kind,
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }
}

#[async_trait]
impl Engine for CommandEngine {
    async fn handle(
        &self,
        payload: Value,
        _context: Option<&InvocationContext>,
    ) -> Result<Value, InvokerError> {
        let input = serde_json::to_vec(&payload)?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            InvokerError::transport(self.kind, format!("failed to start '{}': {e}", self.program))
        })?;

        // stdin must be fed while stdout is drained, or both pipes can fill
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&input).await?;
                // Dropping stdin closes the pipe so the child sees EOF
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let output = output.map_err(|e| InvokerError::transport(self.kind, e.to_string()))?;

        if !output.status.success() {
            return Err(InvokerError::transport(
                self.kind,
                format!("'{}' exited with {}", self.program, output.status),
            ));
        }

        fed.map_err(|e| {
            InvokerError::transport(
                self.kind,
                format!("failed to write request to '{}': {e}", self.program),
            )
        })?;

        serde_json::from_slice(&output.stdout).map_err(|e| {
            InvokerError::transport(
                self.kind,
                format!("'{}' did not print a JSON response: {e}", self.program),
            )
        })
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
