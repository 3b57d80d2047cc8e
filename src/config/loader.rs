// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{EngineKind, FailurePolicy, StagingPolicy};
use crate::errors::ConfigError;

/// Main configuration structure for the invoker.
///
/// Loaded from a YAML or TOML file. Everything except the artefacts target has
/// a default, so a minimal local-mode file only names the artefacts bucket.
///
/// # Example
/// ```yaml
/// execution_mode: remote
/// failure_policy: envelope
/// artefacts:
///   bucket_name: core-automation-artefacts
///   bucket_region: eu-west-1
/// staging:
///   pipeline: true
///   deployspec: false
/// storage:
///   type: memory
/// remote:
///   transport: http
///   timeout_seconds: 900
/// engines:
///   pipeline_compiler:
///     endpoint: https://compiler.internal/pipeline
///   deployspec_compiler:
///     endpoint: https://compiler.internal/deployspec
///   runner:
///     endpoint: https://runner.internal/invoke
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    pub artefacts: ArtefactsConfig,
    #[serde(default)]
    pub staging: StagingPolicy,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub engines: EnginesConfig,
}

/// Whether engines run in this process or behind a remote transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Local,
    Remote,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Local => "local",
            ExecutionMode::Remote => "remote",
        }
    }
}

/// Bucket that staged packages are copied into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtefactsConfig {
    pub bucket_name: String,
    pub bucket_region: String,
}

/// Object store used by the artefact stager.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(rename = "type", default)]
    pub backend: StorageType,
    /// Root directory of the filesystem store.
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    Memory,
    #[default]
    Filesystem,
    S3,
}

/// Transport used in remote execution mode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    #[serde(default)]
    pub transport: RemoteTransport,
    /// Client-side timeout; unset means wait for as long as the engine runs.
    pub timeout_seconds: Option<u64>,
    /// Region of the remote functions; defaults to the artefacts region.
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteTransport {
    #[default]
    Http,
    Lambda,
}

/// Per-engine targets.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnginesConfig {
    #[serde(default)]
    pub pipeline_compiler: EngineTargetConfig,
    #[serde(default)]
    pub deployspec_compiler: EngineTargetConfig,
    #[serde(default)]
    pub runner: EngineTargetConfig,
}

impl EnginesConfig {
    pub fn get(&self, kind: EngineKind) -> &EngineTargetConfig {
        match kind {
            EngineKind::PipelineCompiler => &self.pipeline_compiler,
            EngineKind::DeploySpecCompiler => &self.deployspec_compiler,
            EngineKind::Runner => &self.runner,
        }
    }

    /// Number of engines with at least one target configured.
    pub fn configured_count(&self) -> usize {
        EngineKind::ALL
            .iter()
            .filter(|kind| {
                let target = self.get(**kind);
                target.endpoint.is_some() || target.command.is_some()
            })
            .count()
    }
}

/// Where one engine lives.
///
/// * `endpoint` - URL (http transport) or function name/ARN (lambda transport)
/// * `command` - executable run per task in local mode
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineTargetConfig {
    pub endpoint: Option<String>,
    pub command: Option<CommandConfig>,
}

/// Local engine executable. Receives the task on stdin and prints its
/// response envelope on stdout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let content = fs::read_to_string(path)?;
    match extension.as_str() {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "toml" => Ok(toml::from_str(&content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a config and reject it if validation finds any problem.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
