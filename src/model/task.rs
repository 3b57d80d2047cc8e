// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task description consumed by the router.
//!
//! A request arrives as loosely-typed JSON and is parsed in two steps:
//! [`TaskRequest`] captures the wire shape (unknown or missing required fields
//! are rejected by serde), then [`TaskDescription::try_from`] maps the `Type`
//! and `Task` strings onto the closed [`TaskType`] and [`TaskAction`] sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::deployment::{DeploymentDetails, ObjectType};
use crate::config::consts::ARTEFACT_PACKAGE_NAME;
use crate::errors::InvokerError;

/// Which compiler family a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Pipeline,
    #[serde(rename = "deployspec")]
    DeploySpec,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Pipeline => "pipeline",
            TaskType::DeploySpec => "deployspec",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pipeline" => Ok(TaskType::Pipeline),
            "deployspec" => Ok(TaskType::DeploySpec),
            _ => Err(s.to_string()),
        }
    }
}

/// The action requested within a task type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    Compile,
    Plan,
    Apply,
    Deploy,
    Release,
    Teardown,
}

impl TaskAction {
    pub const ALL: [TaskAction; 6] = [
        TaskAction::Compile,
        TaskAction::Plan,
        TaskAction::Apply,
        TaskAction::Deploy,
        TaskAction::Release,
        TaskAction::Teardown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskAction::Compile => "compile",
            TaskAction::Plan => "plan",
            TaskAction::Apply => "apply",
            TaskAction::Deploy => "deploy",
            TaskAction::Release => "release",
            TaskAction::Teardown => "teardown",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        TaskAction::ALL
            .into_iter()
            .find(|action| action.as_str() == lowered)
            .ok_or_else(|| s.to_string())
    }
}

/// Whether a package is a single deployable artifact or a multi-object bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageMode {
    #[default]
    Full,
    Service,
}

impl PackageMode {
    pub fn is_service(&self) -> bool {
        matches!(self, PackageMode::Service)
    }
}

/// Location of the uploaded deployment package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct PackageDetails {
    #[serde(alias = "bucket_name")]
    pub bucket_name: String,
    #[serde(alias = "bucket_region")]
    pub bucket_region: String,
    #[serde(default, alias = "key")]
    pub key: String,
    #[serde(default, alias = "mode")]
    pub mode: PackageMode,
    #[serde(default, alias = "version_id", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Location of an auxiliary file (actions, state) handed through to the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct FileDetails {
    #[serde(alias = "bucket_name")]
    pub bucket_name: String,
    #[serde(alias = "bucket_region")]
    pub bucket_region: String,
    #[serde(alias = "key")]
    pub key: String,
    #[serde(default, alias = "version_id", skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

/// Raw request as it arrives on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct TaskRequest {
    #[serde(alias = "identity")]
    pub identity: String,
    #[serde(default, alias = "client")]
    pub client: String,
    #[serde(rename = "Type", alias = "type")]
    pub task_type: String,
    #[serde(alias = "task")]
    pub task: String,
    #[serde(default, alias = "force")]
    pub force: bool,
    #[serde(default, alias = "dry_run")]
    pub dry_run: bool,
    #[serde(alias = "package")]
    pub package: PackageDetails,
    #[serde(alias = "deployment_details")]
    pub deployment_details: DeploymentDetails,
    #[serde(default, alias = "actions")]
    pub actions: Option<FileDetails>,
    #[serde(default, alias = "state")]
    pub state: Option<FileDetails>,
}

/// A validated unit of work.
///
/// Fields are read-only; [`with_task`](Self::with_task) and
/// [`with_type`](Self::with_type) produce modified copies for replay scenarios.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskDescription {
    identity: String,
    client: String,
    #[serde(rename = "Type")]
    task_type: TaskType,
    task: TaskAction,
    force: bool,
    dry_run: bool,
    package: PackageDetails,
    deployment_details: DeploymentDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    actions: Option<FileDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<FileDetails>,
}

impl TaskDescription {
    /// Parse a raw JSON request into a task description.
    pub fn parse(raw: serde_json::Value) -> Result<Self, InvokerError> {
        let request: TaskRequest =
            serde_json::from_value(raw).map_err(|e| InvokerError::Validation(e.to_string()))?;
        Self::try_from(request)
    }

    /// Build a task description from flat arguments, as a CLI or test harness would.
    pub fn from_arguments(args: TaskArguments) -> Result<Self, InvokerError> {
        let deployment_details = DeploymentDetails {
            client: args.client.clone(),
            portfolio: args.portfolio,
            app: args.app,
            branch: args.branch,
            branch_short_name: None,
            build: args.build,
            component: args.component,
            environment: args.environment,
            data_center: None,
        };

        let key = args.package_key.unwrap_or_else(|| {
            deployment_details.object_key(ObjectType::Packages, ARTEFACT_PACKAGE_NAME, true)
        });

        let request = TaskRequest {
            identity: deployment_details.identity(),
            client: args.client,
            task_type: args.task_type,
            task: args.task,
            force: args.force,
            dry_run: args.dry_run,
            package: PackageDetails {
                bucket_name: args.bucket_name,
                bucket_region: args.bucket_region,
                key,
                mode: args.mode,
                version_id: None,
            },
            deployment_details,
            actions: None,
            state: None,
        };

        Self::try_from(request)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn task(&self) -> TaskAction {
        self.task
    }

    pub fn package(&self) -> &PackageDetails {
        &self.package
    }

    pub fn deployment_details(&self) -> &DeploymentDetails {
        &self.deployment_details
    }

    pub fn actions(&self) -> Option<&FileDetails> {
        self.actions.as_ref()
    }

    pub fn state(&self) -> Option<&FileDetails> {
        self.state.as_ref()
    }

    /// Copy of this description with a different task.
    pub fn with_task(&self, task: TaskAction) -> Self {
        Self {
            task,
            ..self.clone()
        }
    }

    /// Copy of this description with a different task type.
    pub fn with_type(&self, task_type: TaskType) -> Self {
        Self {
            task_type,
            ..self.clone()
        }
    }

    /// Transport-neutral form handed to engines.
    pub fn to_payload(&self) -> Result<serde_json::Value, InvokerError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl TryFrom<TaskRequest> for TaskDescription {
    type Error = InvokerError;

    fn try_from(request: TaskRequest) -> Result<Self, Self::Error> {
        if request.identity.trim().is_empty() {
            return Err(InvokerError::Validation(
                "Identity must not be empty".to_string(),
            ));
        }

        let unsupported = || InvokerError::UnsupportedOperation {
            task_type: request.task_type.clone(),
            task: request.task.clone(),
        };
        let task_type = request.task_type.parse::<TaskType>().map_err(|_| unsupported())?;
        let task = request.task.parse::<TaskAction>().map_err(|_| unsupported())?;

        Ok(Self {
            identity: request.identity,
            client: request.client,
            task_type,
            task,
            force: request.force,
            dry_run: request.dry_run,
            package: request.package,
            deployment_details: request.deployment_details,
            actions: request.actions,
            state: request.state,
        })
    }
}

/// Flat argument set accepted by [`TaskDescription::from_arguments`].
#[derive(Debug, Clone, Default)]
pub struct TaskArguments {
    pub client: String,
    pub task: String,
    pub task_type: String,
    pub portfolio: String,
    pub app: Option<String>,
    pub branch: Option<String>,
    pub build: Option<String>,
    pub component: Option<String>,
    pub environment: Option<String>,
    pub bucket_name: String,
    pub bucket_region: String,
    pub package_key: Option<String>,
    pub mode: PackageMode,
    pub force: bool,
    pub dry_run: bool,
}
