// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Object storage backends used for artefact staging.
//!
//! # Available Backends
//!
//! ## In-Memory
//! `HashMap`-backed buckets. Records the ACL and encryption of every copied
//! object, which makes it the store of choice for tests.
//!
//! ## Filesystem
//! Local-mode store rooted at a directory: `{root}/{bucket}/{key}`.
//!
//! ## S3 (feature `aws`)
//! Server-side `CopyObject` against Amazon S3.

pub mod filesystem;
pub mod memory;
#[cfg(feature = "aws")]
pub mod s3;

pub use filesystem::FilesystemObjectStore;
pub use memory::InMemoryObjectStore;
#[cfg(feature = "aws")]
pub use s3::S3ObjectStore;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::config::consts::{ACL_BUCKET_OWNER_FULL_CONTROL, SSE_AES256};

/// Encoded in a copy source: everything but RFC 3986 unreserved characters.
const COPY_SOURCE_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Bucket/key/version triple identifying an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
    /// Always `None` for staging copies: the latest version is copied.
    pub version_id: Option<String>,
}

impl ObjectLocation {
    /// Location of the latest version of an object.
    pub fn latest(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            version_id: None,
        }
    }

    /// `bucket/key` in the URL-encoded form S3 expects for `x-amz-copy-source`.
    ///
    /// Each key segment is percent-encoded; the `/` separators are kept.
    pub fn copy_source(&self) -> String {
        let key = self
            .key
            .split('/')
            .map(|segment| utf8_percent_encode(segment, COPY_SOURCE_ENCODE).to_string())
            .collect::<Vec<_>>()
            .join("/");
        let mut source = format!(
            "{}/{}",
            utf8_percent_encode(&self.bucket, COPY_SOURCE_ENCODE),
            key
        );
        if let Some(version_id) = &self.version_id {
            source.push_str("?versionId=");
            source.push_str(&utf8_percent_encode(version_id, COPY_SOURCE_ENCODE).to_string());
        }
        source
    }
}

/// Canned ACL applied to a copied object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectAcl {
    #[serde(rename = "bucket-owner-full-control")]
    BucketOwnerFullControl,
}

impl ObjectAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectAcl::BucketOwnerFullControl => ACL_BUCKET_OWNER_FULL_CONTROL,
        }
    }
}

/// Server-side encryption applied to a copied object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServerSideEncryption {
    #[serde(rename = "AES256")]
    Aes256,
}

impl ServerSideEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerSideEncryption::Aes256 => SSE_AES256,
        }
    }
}

/// A server-side copy request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CopyObjectRequest {
    pub source: ObjectLocation,
    pub destination: ObjectLocation,
    pub acl: ObjectAcl,
    pub server_side_encryption: ServerSideEncryption,
}

impl CopyObjectRequest {
    /// Copy request with owner-full-control ACL and AES-256 encryption.
    pub fn new(source: ObjectLocation, destination: ObjectLocation) -> Self {
        Self {
            source,
            destination,
            acl: ObjectAcl::BucketOwnerFullControl,
            server_side_encryption: ServerSideEncryption::Aes256,
        }
    }
}

/// Acknowledgement returned by a successful copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CopyAcknowledgement {
    pub destination: ObjectLocation,
    pub etag: Option<String>,
    pub version_id: Option<String>,
}
