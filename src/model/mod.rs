// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Task description and result envelope.

mod context;
mod deployment;
mod envelope;
mod task;

pub use context::InvocationContext;
pub use deployment::{DeploymentDetails, ObjectType};
pub use envelope::TaskResult;
pub use task::{
    FileDetails, PackageDetails, PackageMode, TaskAction, TaskArguments, TaskDescription,
    TaskRequest, TaskType,
};
