// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Amazon S3 object store (feature `aws`).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{ObjectCannedAcl, ServerSideEncryption as S3Encryption};
use aws_sdk_s3::Client;

use super::{CopyAcknowledgement, CopyObjectRequest, ObjectAcl, ServerSideEncryption};
use crate::errors::StorageError;
use crate::traits::ObjectStore;

/// S3-backed store performing server-side copies.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Build a client for `region` from the default credential chain.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::from_client(Client::new(&config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn copy_object(
        &self,
        request: &CopyObjectRequest,
    ) -> Result<CopyAcknowledgement, StorageError> {
        let acl = match request.acl {
            ObjectAcl::BucketOwnerFullControl => ObjectCannedAcl::BucketOwnerFullControl,
        };
        let encryption = match request.server_side_encryption {
            ServerSideEncryption::Aes256 => S3Encryption::Aes256,
        };

        // Staging sources carry no version id, so the latest version is copied
        let copy_source = request.source.copy_source();

        let output = self
            .client
            .copy_object()
            .bucket(&request.destination.bucket)
            .key(&request.destination.key)
            .copy_source(copy_source)
            .acl(acl)
            .server_side_encryption(encryption)
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(&e).to_string()))?;

        Ok(CopyAcknowledgement {
            destination: request.destination.clone(),
            etag: output
                .copy_object_result()
                .and_then(|result| result.e_tag())
                .map(str::to_string),
            version_id: output.version_id().map(str::to_string),
        })
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
