// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors reported by an object store while copying artefacts.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The source object does not exist.
    #[error("Object '{key}' not found in bucket '{bucket}'")]
    NotFound { bucket: String, key: String },

    /// A bucket or key that cannot be mapped inside the store root.
    #[error("Invalid object location '{bucket}/{key}': {reason}")]
    InvalidKey {
        bucket: String,
        key: String,
        reason: &'static str,
    },

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced by a remote storage service.
    #[error("{0}")]
    Backend(String),
}
