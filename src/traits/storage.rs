// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::StorageError;
use crate::storage::{CopyAcknowledgement, CopyObjectRequest};

/// Object storage capable of server-side copies.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Copy an object. The destination must end up with the requested ACL and
    /// encryption regardless of how the source is stored.
    async fn copy_object(
        &self,
        request: &CopyObjectRequest,
    ) -> Result<CopyAcknowledgement, StorageError>;

    fn name(&self) -> &'static str;
}
