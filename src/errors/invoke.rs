// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Faults raised while routing a task to an engine.

use thiserror::Error;

use crate::engine::EngineKind;

/// Every fault the router can raise.
///
/// Business errors reported by an engine are *not* represented here: they are
/// ordinary result payloads and travel back to the caller untouched.
#[derive(Error, Debug)]
pub enum InvokerError {
    /// The raw request could not be parsed into a task description.
    #[error("Invalid task request: {0}")]
    Validation(String),

    /// The (type, task) pair has no transition.
    #[error("Unsupported task '{task}' for task type '{task_type}'")]
    UnsupportedOperation { task_type: String, task: String },

    /// The package lives in a different region than the artefacts bucket.
    #[error("Source bucket must be in region '{expected}', but package is in region '{actual}'")]
    RegionMismatch { expected: String, actual: String },

    /// The package has no object key to copy from.
    #[error("Package key not found in task payload")]
    MissingPackageKey,

    /// The storage system reported an error during the artefact copy.
    #[error("Error copying object to artefacts: {0}")]
    CopyFailed(String),

    /// The engine answered without the expected result key.
    #[error("{engine} response does not contain a response: {response}")]
    EngineProtocol {
        engine: EngineKind,
        response: serde_json::Value,
    },

    /// Local execution was requested for an engine nobody registered.
    #[error("No local engine registered for {0}")]
    EngineNotRegistered(EngineKind),

    /// The remote call failed before the engine produced a response.
    #[error("Failed to invoke {engine}: {message}")]
    Transport { engine: EngineKind, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InvokerError {
    /// Convenience constructor for transport failures.
    pub fn transport(engine: EngineKind, message: impl Into<String>) -> Self {
        Self::Transport {
            engine,
            message: message.into(),
        }
    }

    /// Short, stable name of the error class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::RegionMismatch { .. } | Self::MissingPackageKey => "precondition",
            Self::CopyFailed(_) => "copy_failed",
            Self::EngineProtocol { .. } => "engine_protocol",
            Self::EngineNotRegistered(_) => "engine_not_registered",
            Self::Transport { .. } => "transport",
            Self::Serialization(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_mismatch_names_both_regions() {
        let err = InvokerError::RegionMismatch {
            expected: "eu-west-1".to_string(),
            actual: "us-east-1".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("eu-west-1"));
        assert!(message.contains("us-east-1"));
        assert_eq!(err.kind(), "precondition");
    }

    #[test]
    fn protocol_error_includes_engine_and_response() {
        let err = InvokerError::EngineProtocol {
            engine: EngineKind::Runner,
            response: serde_json::json!({"Status": "ok"}),
        };
        let message = err.to_string();
        assert!(message.starts_with("Runner response does not contain a response"));
        assert!(message.contains("\"Status\""));
    }
}
