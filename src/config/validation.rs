// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Checks are independent and every failure is collected, so a user sees the
//! whole list of problems in one pass rather than fixing them one at a time.
//!
//! # Checks
//!
//! 1. **Artefacts target**: bucket name and region are non-empty
//! 2. **Remote engines**: in remote mode every engine has an `endpoint`
//! 3. **Filesystem store**: `storage.type: filesystem` has a `root`
//! 4. **Feature gates**: `s3` storage and `lambda` transport need the `aws` feature
//!
//! # Example
//! ```rust
//! use deploy_invoker::config::{validate_config, Config};
//!
//! let config: Config = serde_yaml::from_str(
//!     "artefacts: { bucket_name: artefacts, bucket_region: eu-west-1 }\nstorage: { type: memory }",
//! )
//! .unwrap();
//!
//! assert!(validate_config(&config).is_ok());
//! ```

use crate::config::{Config, ExecutionMode, RemoteTransport, StorageType};
use crate::engine::EngineKind;
use crate::observability::messages::validation::{ValidationFailed, ValidationStarted};
use crate::observability::messages::StructuredLog;

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    ValidationStarted {
        execution_mode: config.execution_mode.as_str(),
        engine_count: config.engines.configured_count(),
    }
    .log();

    let mut errors = Vec::new();
    errors.extend(validate_artefacts(config));
    errors.extend(validate_remote_engines(config));
    errors.extend(validate_storage(config));
    errors.extend(validate_feature_gates(config));

    if errors.is_empty() {
        Ok(())
    } else {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn validate_artefacts(config: &Config) -> Vec<String> {
    let mut errors = Vec::new();
    if config.artefacts.bucket_name.trim().is_empty() {
        errors.push("artefacts.bucket_name must not be empty".to_string());
    }
    if config.artefacts.bucket_region.trim().is_empty() {
        errors.push("artefacts.bucket_region must not be empty".to_string());
    }
    errors
}

fn validate_remote_engines(config: &Config) -> Vec<String> {
    if config.execution_mode != ExecutionMode::Remote {
        return Vec::new();
    }

    EngineKind::ALL
        .iter()
        .filter(|kind| {
            config
                .engines
                .get(**kind)
                .endpoint
                .as_deref()
                .map_or(true, |endpoint| endpoint.trim().is_empty())
        })
        .map(|kind| {
            format!(
                "engines.{}.endpoint is required in remote execution mode",
                kind.config_key()
            )
        })
        .collect()
}

fn validate_storage(config: &Config) -> Vec<String> {
    match (config.storage.backend, &config.storage.root) {
        (StorageType::Filesystem, None) => {
            vec!["storage.root is required for filesystem storage".to_string()]
        }
        _ => Vec::new(),
    }
}

fn validate_feature_gates(config: &Config) -> Vec<String> {
    let aws_enabled = cfg!(feature = "aws");
    let mut errors = Vec::new();

    if config.storage.backend == StorageType::S3 && !aws_enabled {
        errors.push("storage.type 's3' requires the 'aws' feature".to_string());
    }
    if config.execution_mode == ExecutionMode::Remote
        && config.remote.transport == RemoteTransport::Lambda
        && !aws_enabled
    {
        errors.push("remote.transport 'lambda' requires the 'aws' feature".to_string());
    }
    errors
}
