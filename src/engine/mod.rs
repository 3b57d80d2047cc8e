// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Routing core: the router state machine, the invocation gateway and the
//! artefact stager.

pub mod gateway;
pub mod router;
pub mod stager;
#[cfg(test)]
mod integration_tests;

pub use gateway::InvocationGateway;
pub use router::{FailurePolicy, Router, StagingPolicy};
pub use stager::ArtefactStager;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Downstream engine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    PipelineCompiler,
    #[serde(rename = "deployspec_compiler")]
    DeploySpecCompiler,
    Runner,
}

impl EngineKind {
    pub const ALL: [EngineKind; 3] = [
        EngineKind::PipelineCompiler,
        EngineKind::DeploySpecCompiler,
        EngineKind::Runner,
    ];

    /// Name used for this engine in configuration files.
    pub fn config_key(&self) -> &'static str {
        match self {
            EngineKind::PipelineCompiler => "pipeline_compiler",
            EngineKind::DeploySpecCompiler => "deployspec_compiler",
            EngineKind::Runner => "runner",
        }
    }

    /// Compilers report completion one level deeper than the runner.
    pub fn is_compiler(&self) -> bool {
        !matches!(self, EngineKind::Runner)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineKind::PipelineCompiler => "Pipeline compiler",
            EngineKind::DeploySpecCompiler => "Deployspec compiler",
            EngineKind::Runner => "Runner",
        };
        f.write_str(name)
    }
}
