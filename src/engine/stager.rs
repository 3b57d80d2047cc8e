// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Artefact stager.
//!
//! Copies an uploaded package into the artefacts bucket before compilation.
//! Both preconditions (matching region, non-empty source key) are checked
//! before the object store is touched.

use std::sync::Arc;
use std::time::Instant;

use crate::config::consts::ARTEFACT_PACKAGE_NAME;
use crate::config::ArtefactsConfig;
use crate::errors::InvokerError;
use crate::model::{ObjectType, TaskDescription};
use crate::observability::messages::staging::{ArtefactCopyCompleted, ArtefactCopyStarted};
use crate::observability::messages::StructuredLog;
use crate::storage::{CopyAcknowledgement, CopyObjectRequest, ObjectLocation};
use crate::traits::ObjectStore;

pub struct ArtefactStager {
    store: Arc<dyn ObjectStore>,
    target: ArtefactsConfig,
}

impl ArtefactStager {
    pub fn new(store: Arc<dyn ObjectStore>, target: ArtefactsConfig) -> Self {
        Self { store, target }
    }

    /// Key the package will be copied to.
    ///
    /// Service-mode packages use `/`-separated storage keys; full packages are
    /// joined with the platform separator whatever the execution mode.
    pub fn destination_key(&self, task: &TaskDescription) -> String {
        let storage_backed = task.package().mode.is_service();
        task.deployment_details()
            .object_key(ObjectType::Artefacts, ARTEFACT_PACKAGE_NAME, storage_backed)
    }

    /// Copy the task's package into the artefacts bucket.
    pub async fn stage(&self, task: &TaskDescription) -> Result<CopyAcknowledgement, InvokerError> {
        let package = task.package();

        if package.bucket_region != self.target.bucket_region {
            return Err(InvokerError::RegionMismatch {
                expected: self.target.bucket_region.clone(),
                actual: package.bucket_region.clone(),
            });
        }

        if package.key.is_empty() {
            return Err(InvokerError::MissingPackageKey);
        }

        let destination_key = self.destination_key(task);
        let request = CopyObjectRequest::new(
            ObjectLocation::latest(&package.bucket_name, &package.key),
            ObjectLocation::latest(&self.target.bucket_name, &destination_key),
        );

        ArtefactCopyStarted {
            source_bucket: &package.bucket_name,
            source_key: &package.key,
            destination_bucket: &self.target.bucket_name,
            destination_key: &destination_key,
        }
        .log();

        let start = Instant::now();
        let acknowledgement = self
            .store
            .copy_object(&request)
            .await
            .map_err(|e| InvokerError::CopyFailed(e.to_string()))?;

        ArtefactCopyCompleted {
            destination_key: &destination_key,
            store: self.store.name(),
            duration: start.elapsed(),
        }
        .log();

        Ok(acknowledgement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{sample_task_json, FailingObjectStore};
    use crate::storage::{
        FilesystemObjectStore, InMemoryObjectStore, ObjectAcl, ServerSideEncryption,
    };
    use serde_json::{json, Value};

    const SOURCE_KEY: &str = "packages/test-portfolio/test-app/main/latest/package.zip";
    const DEST_KEY: &str = "artefacts/test-portfolio/test-app/main/latest/package.zip";

    fn target() -> ArtefactsConfig {
        ArtefactsConfig {
            bucket_name: "acme-artefacts".to_string(),
            bucket_region: "eu-west-1".to_string(),
        }
    }

    fn seeded_store() -> Arc<InMemoryObjectStore> {
        let store = Arc::new(InMemoryObjectStore::new());
        store.put_object("acme-uploads", SOURCE_KEY, b"zip-bytes".to_vec());
        store
    }

    fn task_with(package: Value) -> TaskDescription {
        let mut raw = sample_task_json();
        raw["Package"] = package;
        TaskDescription::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn stage_copies_with_acl_and_encryption() {
        let store = seeded_store();
        let stager = ArtefactStager::new(store.clone(), target());
        let task = TaskDescription::parse(sample_task_json()).unwrap();

        let ack = stager.stage(&task).await.unwrap();

        assert_eq!(ack.destination, ObjectLocation::latest("acme-artefacts", DEST_KEY));

        let copied = store.get_object("acme-artefacts", DEST_KEY).unwrap();
        assert_eq!(copied.bytes, b"zip-bytes".to_vec());
        assert_eq!(copied.acl, Some(ObjectAcl::BucketOwnerFullControl));
        assert_eq!(
            copied.server_side_encryption,
            Some(ServerSideEncryption::Aes256)
        );
        assert_eq!(store.copy_count(), 1);
    }

    #[tokio::test]
    async fn region_mismatch_fails_before_copy() {
        let store = seeded_store();
        let stager = ArtefactStager::new(store.clone(), target());
        let task = task_with(json!({
            "BucketName": "acme-uploads",
            "BucketRegion": "us-east-1",
            "Key": SOURCE_KEY
        }));

        match stager.stage(&task).await.unwrap_err() {
            InvokerError::RegionMismatch { expected, actual } => {
                assert_eq!(expected, "eu-west-1");
                assert_eq!(actual, "us-east-1");
            }
            other => panic!("expected region mismatch, got {other:?}"),
        }
        assert_eq!(store.copy_count(), 0);
    }

    #[tokio::test]
    async fn region_is_checked_before_key() {
        let store = seeded_store();
        let stager = ArtefactStager::new(store.clone(), target());
        let task = task_with(json!({
            "BucketName": "acme-uploads",
            "BucketRegion": "us-east-1",
            "Key": ""
        }));

        let err = stager.stage(&task).await.unwrap_err();
        assert!(matches!(err, InvokerError::RegionMismatch { .. }));
    }

    #[tokio::test]
    async fn empty_key_fails_before_copy() {
        let store = seeded_store();
        let stager = ArtefactStager::new(store.clone(), target());
        let task = task_with(json!({
            "BucketName": "acme-uploads",
            "BucketRegion": "eu-west-1",
            "Key": ""
        }));

        let err = stager.stage(&task).await.unwrap_err();
        assert!(matches!(err, InvokerError::MissingPackageKey));
        assert_eq!(err.to_string(), "Package key not found in task payload");
        assert_eq!(store.copy_count(), 0);
    }

    #[tokio::test]
    async fn storage_error_becomes_copy_failed() {
        let stager = ArtefactStager::new(Arc::new(FailingObjectStore), target());
        let task = TaskDescription::parse(sample_task_json()).unwrap();

        let err = stager.stage(&task).await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Error copying object to artefacts: "));
    }

    #[tokio::test]
    async fn missing_source_object_becomes_copy_failed() {
        let store = Arc::new(InMemoryObjectStore::new());
        let stager = ArtefactStager::new(store.clone(), target());
        let task = TaskDescription::parse(sample_task_json()).unwrap();

        let err = stager.stage(&task).await.unwrap_err();
        assert!(matches!(err, InvokerError::CopyFailed(_)));
        assert_eq!(store.copy_count(), 1);
    }

    #[test]
    fn full_packages_use_platform_separator() {
        let stager = ArtefactStager::new(Arc::new(InMemoryObjectStore::new()), target());
        let task = TaskDescription::parse(sample_task_json()).unwrap();
        let sep = std::path::MAIN_SEPARATOR;

        assert_eq!(
            stager.destination_key(&task),
            format!("artefacts{sep}test-portfolio{sep}test-app{sep}main{sep}latest{sep}package.zip")
        );
    }

    #[tokio::test]
    async fn full_package_key_does_not_depend_on_execution_mode() {
        let store = seeded_store();
        let stager = ArtefactStager::new(store.clone(), target());
        let task = TaskDescription::parse(sample_task_json()).unwrap();
        let expected = stager.destination_key(&task);

        let ack = stager.stage(&task).await.unwrap();

        assert_eq!(ack.destination.key, expected);
        assert!(store.get_object("acme-artefacts", &expected).is_some());
    }

    #[tokio::test]
    async fn traversal_in_package_key_is_copy_failed() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().join("store");
        std::fs::write(dir.path().join("secret.txt"), b"secret").unwrap();
        let stager = ArtefactStager::new(Arc::new(FilesystemObjectStore::new(&root)), target());
        let task = task_with(json!({
            "BucketName": "acme-uploads",
            "BucketRegion": "eu-west-1",
            "Key": "../../secret.txt"
        }));

        let err = stager.stage(&task).await.unwrap_err();
        assert!(matches!(err, InvokerError::CopyFailed(_)));
        assert!(!root.join("acme-artefacts").exists());
    }

    #[test]
    fn service_packages_always_use_storage_keys() {
        let stager = ArtefactStager::new(Arc::new(InMemoryObjectStore::new()), target());
        let task = task_with(json!({
            "BucketName": "acme-uploads",
            "BucketRegion": "eu-west-1",
            "Key": SOURCE_KEY,
            "Mode": "service"
        }));

        assert_eq!(stager.destination_key(&task), DEST_KEY);
    }
}
