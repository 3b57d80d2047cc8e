// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task router.
//!
//! Dispatch is a total match over `(TaskType, TaskAction)`:
//!
//! | type       | compile                 | plan / apply | deploy | release     | teardown |
//! |------------|-------------------------|--------------|--------|-------------|----------|
//! | pipeline   | stage + pipeline compiler | unsupported | runner | runner      | runner   |
//! | deployspec | stage + deployspec compiler | not implemented | runner | unsupported | runner |
//!
//! Whether the compile rows stage the package first is decided by
//! [`StagingPolicy`]. Faults are either converted into the error envelope or
//! returned to the caller depending on [`FailurePolicy`].

use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;

use super::{ArtefactStager, InvocationGateway};
use crate::errors::InvokerError;
use crate::model::{InvocationContext, TaskAction, TaskDescription, TaskResult, TaskType};
use crate::observability::context;
use crate::observability::messages::router::{
    ActionNotImplemented, ContextAttached, TaskFailed, TaskReceived,
};
use crate::observability::messages::staging::StagingSkipped;
use crate::observability::messages::StructuredLog;

/// What the router does with a fault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Convert into `{"Response": {"Status": "error", "Message": ...}}`.
    #[default]
    Envelope,
    /// Return the fault to the caller.
    Propagate,
}

/// Which compile transitions copy the package to the artefacts bucket first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StagingPolicy {
    pub pipeline: bool,
    pub deployspec: bool,
}

impl Default for StagingPolicy {
    fn default() -> Self {
        Self {
            pipeline: true,
            deployspec: false,
        }
    }
}

impl StagingPolicy {
    pub fn stages(&self, task_type: TaskType) -> bool {
        match task_type {
            TaskType::Pipeline => self.pipeline,
            TaskType::DeploySpec => self.deployspec,
        }
    }
}

pub struct Router {
    gateway: InvocationGateway,
    stager: ArtefactStager,
    failure_policy: FailurePolicy,
    staging: StagingPolicy,
}

impl Router {
    pub fn new(gateway: InvocationGateway, stager: ArtefactStager) -> Self {
        Self {
            gateway,
            stager,
            failure_policy: FailurePolicy::default(),
            staging: StagingPolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn with_staging_policy(mut self, staging: StagingPolicy) -> Self {
        self.staging = staging;
        self
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn staging_policy(&self) -> StagingPolicy {
        self.staging
    }

    /// Entry point with the legacy wire contract.
    ///
    /// Under [`FailurePolicy::Envelope`] this never returns `Err`.
    pub async fn handler(
        &self,
        raw: Value,
        invocation: Option<&InvocationContext>,
    ) -> Result<Value, InvokerError> {
        self.handle(raw, invocation).await.map(TaskResult::into_wire)
    }

    /// Route a raw request and apply the failure policy.
    pub async fn handle(
        &self,
        raw: Value,
        invocation: Option<&InvocationContext>,
    ) -> Result<TaskResult, InvokerError> {
        match self.route(raw, invocation).await {
            Ok(result) => Ok(result),
            Err(error) => {
                let propagated = self.failure_policy == FailurePolicy::Propagate;
                let identity = context::current_identity();
                TaskFailed {
                    identity: identity.as_deref(),
                    error_kind: error.kind(),
                    error: &error,
                    propagated,
                }
                .log();

                if propagated {
                    Err(error)
                } else {
                    Ok(TaskResult::Error(error.to_string()))
                }
            }
        }
    }

    /// Parse, set up correlation and dispatch. Faults are returned as-is.
    pub async fn route(
        &self,
        raw: Value,
        invocation: Option<&InvocationContext>,
    ) -> Result<TaskResult, InvokerError> {
        let task = TaskDescription::parse(raw)?;
        context::setup(task.identity());

        let span = context::request_span(
            task.identity(),
            task.task_type().as_str(),
            task.task().as_str(),
        );

        async {
            TaskReceived {
                identity: task.identity(),
                task_type: task.task_type().as_str(),
                task: task.task().as_str(),
            }
            .log();

            if let Some(invocation) = invocation {
                ContextAttached {
                    request_id: invocation.request_id.as_deref(),
                    remaining_time: invocation.remaining_time,
                }
                .log();
            }

            self.dispatch(&task).await
        }
        .instrument(span)
        .await
    }

    /// Execute the transition for an already validated task.
    pub async fn dispatch(&self, task: &TaskDescription) -> Result<TaskResult, InvokerError> {
        use TaskAction::*;

        match (task.task_type(), task.task()) {
            (TaskType::Pipeline, Compile) => {
                self.stage_if_enabled(task).await?;
                let result = self.gateway.execute_pipeline_compiler(task).await?;
                Ok(TaskResult::Success(result))
            }
            (TaskType::Pipeline, Deploy | Release | Teardown) => {
                let result = self.gateway.execute_runner(task).await?;
                Ok(TaskResult::Success(result))
            }
            (TaskType::Pipeline, Plan | Apply) => Err(unsupported(task)),

            (TaskType::DeploySpec, Compile) => {
                self.stage_if_enabled(task).await?;
                let result = self.gateway.execute_deployspec_compiler(task).await?;
                Ok(TaskResult::Success(result))
            }
            (TaskType::DeploySpec, Plan | Apply) => {
                ActionNotImplemented {
                    task_type: task.task_type().as_str(),
                    task: task.task().as_str(),
                }
                .log();
                Ok(TaskResult::NotImplemented)
            }
            (TaskType::DeploySpec, Deploy | Teardown) => {
                let result = self.gateway.execute_runner(task).await?;
                Ok(TaskResult::Success(result))
            }
            (TaskType::DeploySpec, Release) => Err(unsupported(task)),
        }
    }

    async fn stage_if_enabled(&self, task: &TaskDescription) -> Result<(), InvokerError> {
        if self.staging.stages(task.task_type()) {
            self.stager.stage(task).await?;
        } else {
            StagingSkipped {
                task_type: task.task_type().as_str(),
            }
            .log();
        }
        Ok(())
    }
}

fn unsupported(task: &TaskDescription) -> InvokerError {
    InvokerError::UnsupportedOperation {
        task_type: task.task_type().to_string(),
        task: task.task().to_string(),
    }
}
