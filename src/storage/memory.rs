// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{CopyAcknowledgement, CopyObjectRequest, ObjectAcl, ServerSideEncryption};
use crate::errors::StorageError;
use crate::traits::ObjectStore;

/// Object held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub acl: Option<ObjectAcl>,
    pub server_side_encryption: Option<ServerSideEncryption>,
}

/// `HashMap`-backed object store.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    copies: AtomicUsize,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload an object without ACL or encryption.
    pub fn put_object(&self, bucket: &str, key: &str, bytes: impl Into<Vec<u8>>) {
        self.lock().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                bytes: bytes.into(),
                acl: None,
                server_side_encryption: None,
            },
        );
    }

    pub fn get_object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of copy calls received, successful or not.
    pub fn copy_count(&self) -> usize {
        self.copies.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(String, String), StoredObject>> {
        // Stored data stays consistent even if a holder panicked
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn copy_object(
        &self,
        request: &CopyObjectRequest,
    ) -> Result<CopyAcknowledgement, StorageError> {
        self.copies.fetch_add(1, Ordering::SeqCst);

        let mut objects = self.lock();
        let source_key = (request.source.bucket.clone(), request.source.key.clone());
        let source = objects
            .get(&source_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: request.source.bucket.clone(),
                key: request.source.key.clone(),
            })?;

        let mut hasher = DefaultHasher::new();
        source.bytes.hash(&mut hasher);
        let etag = format!("{:016x}", hasher.finish());

        objects.insert(
            (
                request.destination.bucket.clone(),
                request.destination.key.clone(),
            ),
            StoredObject {
                bytes: source.bytes,
                acl: Some(request.acl),
                server_side_encryption: Some(request.server_side_encryption),
            },
        );

        Ok(CopyAcknowledgement {
            destination: request.destination.clone(),
            etag: Some(etag),
            version_id: None,
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ObjectLocation;

    #[tokio::test]
    async fn copy_applies_acl_and_encryption() {
        let store = InMemoryObjectStore::new();
        store.put_object("uploads", "pkg.zip", b"zip-bytes".to_vec());

        let request = CopyObjectRequest::new(
            ObjectLocation::latest("uploads", "pkg.zip"),
            ObjectLocation::latest("artefacts", "artefacts/p/package.zip"),
        );
        let ack = store.copy_object(&request).await.unwrap();

        assert_eq!(ack.destination.key, "artefacts/p/package.zip");
        assert!(ack.etag.is_some());

        let copied = store.get_object("artefacts", "artefacts/p/package.zip").unwrap();
        assert_eq!(copied.bytes, b"zip-bytes");
        assert_eq!(copied.acl, Some(ObjectAcl::BucketOwnerFullControl));
        assert_eq!(copied.server_side_encryption, Some(ServerSideEncryption::Aes256));
        assert_eq!(store.copy_count(), 1);
    }

    #[tokio::test]
    async fn copy_of_missing_source_fails() {
        let store = InMemoryObjectStore::new();
        let request = CopyObjectRequest::new(
            ObjectLocation::latest("uploads", "missing.zip"),
            ObjectLocation::latest("artefacts", "package.zip"),
        );

        let err = store.copy_object(&request).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
        assert!(store.get_object("artefacts", "package.zip").is_none());
    }
}
