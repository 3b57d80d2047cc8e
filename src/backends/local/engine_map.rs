// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::EngineKind;
use crate::traits::Engine;

/// Registry of in-process engines, keyed by kind.
#[derive(Clone, Default)]
pub struct EngineMap(pub HashMap<EngineKind, Arc<dyn Engine>>);

impl EngineMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Register an engine, replacing any previous one of the same kind.
    pub fn insert(&mut self, kind: EngineKind, engine: Arc<dyn Engine>) {
        self.0.insert(kind, engine);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, kind: EngineKind, engine: Arc<dyn Engine>) -> Self {
        self.insert(kind, engine);
        self
    }

    pub fn get(&self, kind: EngineKind) -> Option<&Arc<dyn Engine>> {
        self.0.get(&kind)
    }

    pub fn contains(&self, kind: EngineKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add every engine from `other`, overriding existing registrations.
    pub fn extend(&mut self, other: EngineMap) {
        self.0.extend(other.0);
    }
}

impl std::fmt::Debug for EngineMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut registered: Vec<_> = self
            .0
            .iter()
            .map(|(kind, engine)| (kind.config_key(), engine.name()))
            .collect();
        registered.sort();
        f.debug_struct("EngineMap")
            .field("engine_count", &self.0.len())
            .field("engines", &registered)
            .finish()
    }
}

impl From<HashMap<EngineKind, Arc<dyn Engine>>> for EngineMap {
    fn from(map: HashMap<EngineKind, Arc<dyn Engine>>) -> Self {
        Self(map)
    }
}
