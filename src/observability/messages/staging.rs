// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for artefact staging events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Copy of a package into the artefacts bucket is about to start.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use deploy_invoker::observability::messages::staging::ArtefactCopyStarted;
///
/// let msg = ArtefactCopyStarted {
///     source_bucket: "uploads",
///     source_key: "packages/p/a/main/1/package.zip",
///     destination_bucket: "artefacts",
///     destination_key: "artefacts/p/a/main/1/package.zip",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ArtefactCopyStarted<'a> {
    pub source_bucket: &'a str,
    pub source_key: &'a str,
    pub destination_bucket: &'a str,
    pub destination_key: &'a str,
}

impl Display for ArtefactCopyStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Copying object to artefacts: {}/{} -> {}/{}",
            self.source_bucket, self.source_key, self.destination_bucket, self.destination_key
        )
    }
}

impl StructuredLog for ArtefactCopyStarted<'_> {
    fn log(&self) {
        tracing::info!(
            source_bucket = self.source_bucket,
            source_key = self.source_key,
            destination_bucket = self.destination_bucket,
            destination_key = self.destination_key,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "artefact_copy",
            span_name = name,
            destination_bucket = self.destination_bucket,
            destination_key = self.destination_key,
        )
    }
}

/// Package copied into the artefacts bucket.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ArtefactCopyCompleted<'a> {
    pub destination_key: &'a str,
    pub store: &'a str,
    pub duration: std::time::Duration,
}

impl Display for ArtefactCopyCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Artefact '{}' staged via {} store in {:?}",
            self.destination_key, self.store, self.duration
        )
    }
}

impl StructuredLog for ArtefactCopyCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            destination_key = self.destination_key,
            store = self.store,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "artefact_copied",
            span_name = name,
            destination_key = self.destination_key,
            store = self.store,
        )
    }
}

/// Staging skipped because the task type does not stage.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct StagingSkipped<'a> {
    pub task_type: &'a str,
}

impl Display for StagingSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Artefact staging disabled for task type '{}'", self.task_type)
    }
}

impl StructuredLog for StagingSkipped<'_> {
    fn log(&self) {
        tracing::debug!(task_type = self.task_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("staging_skipped", span_name = name, task_type = self.task_type)
    }
}
