// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::{CommandEngine, EngineMap};
use crate::config::EnginesConfig;
use crate::engine::EngineKind;

/// Factory for in-process engines.
pub struct LocalEngineFactory;

impl LocalEngineFactory {
    /// Create a command engine for every kind that configures a `command`.
    ///
    /// Kinds without one are left unregistered; invoking them fails with
    /// `EngineNotRegistered` unless an embedder injects an engine.
    pub fn create_engines(config: &EnginesConfig) -> EngineMap {
        let mut engines = EngineMap::new();
        for kind in EngineKind::ALL {
            if let Some(command) = &config.get(kind).command {
                engines.insert(kind, Arc::new(CommandEngine::new(kind, command)));
            }
        }
        engines
    }
}
