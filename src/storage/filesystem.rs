// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{CopyAcknowledgement, CopyObjectRequest};
use crate::errors::StorageError;
use crate::traits::ObjectStore;

/// Local-mode object store.
///
/// Buckets are directories under `root`; keys are relative paths inside them.
/// ACL and encryption have no local meaning and are only logged.
#[derive(Debug, Clone)]
pub struct FilesystemObjectStore {
    root: PathBuf,
}

impl FilesystemObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path backing `bucket`/`key`.
    ///
    /// The result always stays under `root`: absolute keys, `.`/`..` segments
    /// and drive prefixes are rejected.
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = |reason| StorageError::InvalidKey {
            bucket: bucket.to_string(),
            key: key.to_string(),
            reason,
        };

        if !is_plain_segment(bucket) {
            return Err(invalid("bucket must be a single path segment"));
        }
        if key.starts_with(['/', '\\']) {
            return Err(invalid("key must be relative"));
        }

        let mut path = self.root.join(bucket);
        let mut segments = 0;
        for segment in key.split(['/', '\\']).filter(|s| !s.is_empty()) {
            if !is_plain_segment(segment) {
                return Err(invalid("key segment escapes the bucket"));
            }
            path.push(segment);
            segments += 1;
        }
        if segments == 0 {
            return Err(invalid("key is empty"));
        }
        Ok(path)
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\', ':'])
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn copy_object(
        &self,
        request: &CopyObjectRequest,
    ) -> Result<CopyAcknowledgement, StorageError> {
        let source = self.object_path(&request.source.bucket, &request.source.key)?;
        let destination =
            self.object_path(&request.destination.bucket, &request.destination.key)?;

        if !tokio::fs::try_exists(&source).await? {
            return Err(StorageError::NotFound {
                bucket: request.source.bucket.clone(),
                key: request.source.key.clone(),
            });
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = tokio::fs::copy(&source, &destination).await?;
        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            bytes,
            acl = request.acl.as_str(),
            server_side_encryption = request.server_side_encryption.as_str(),
            "Copied object on local filesystem"
        );

        Ok(CopyAcknowledgement {
            destination: request.destination.clone(),
            etag: None,
            version_id: None,
        })
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
