// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use crate::backends::local::LocalEngineFactory;
use crate::backends::{EngineMap, HttpInvoker, LocalInvoker};
use crate::config::{Config, ExecutionMode, RemoteTransport, StorageType};
use crate::engine::{ArtefactStager, InvocationGateway, Router};
use crate::errors::ConfigError;
use crate::storage::{FilesystemObjectStore, InMemoryObjectStore};
use crate::traits::{EngineInvoker, ObjectStore};

/// Router builder - picks the invoker and object store from configuration and
/// wires them into a [`Router`].
///
/// # Examples
///
/// ## Local mode with injected engines
/// ```
/// use deploy_invoker::backends::EngineMap;
/// use deploy_invoker::config::{Config, RuntimeBuilder};
///
/// # #[tokio::main]
/// # async fn main() {
/// let config: Config = serde_yaml::from_str(
///     "artefacts: { bucket_name: artefacts, bucket_region: eu-west-1 }\nstorage: { type: memory }",
/// )
/// .unwrap();
///
/// let router = RuntimeBuilder::with_engines(&config, EngineMap::new()).await.unwrap();
/// assert!(router.staging_policy().pipeline);
/// # }
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a router from configuration alone.
    pub async fn from_config(cfg: &Config) -> Result<Router, ConfigError> {
        Self::with_engines(cfg, EngineMap::new()).await
    }

    /// Build a router, registering `engines` on top of any configured
    /// command engines. Injected engines are only used in local mode.
    pub async fn with_engines(cfg: &Config, engines: EngineMap) -> Result<Router, ConfigError> {
        let invoker = Self::build_invoker(cfg, engines).await?;
        let store = Self::build_store(cfg).await?;
        Ok(Self::assemble(cfg, invoker, store))
    }

    /// Wire an already built invoker and store into a router.
    pub fn assemble(
        cfg: &Config,
        invoker: Arc<dyn EngineInvoker>,
        store: Arc<dyn ObjectStore>,
    ) -> Router {
        let gateway = InvocationGateway::new(invoker);
        let stager = ArtefactStager::new(store, cfg.artefacts.clone());

        Router::new(gateway, stager)
            .with_failure_policy(cfg.failure_policy)
            .with_staging_policy(cfg.staging)
    }

    async fn build_invoker(
        cfg: &Config,
        injected: EngineMap,
    ) -> Result<Arc<dyn EngineInvoker>, ConfigError> {
        match cfg.execution_mode {
            ExecutionMode::Local => {
                let mut engines = LocalEngineFactory::create_engines(&cfg.engines);
                engines.extend(injected);
                Ok(Arc::new(LocalInvoker::new(engines)))
            }
            ExecutionMode::Remote => match cfg.remote.transport {
                RemoteTransport::Http => {
                    let timeout = cfg.remote.timeout_seconds.map(Duration::from_secs);
                    Ok(Arc::new(HttpInvoker::from_engines(&cfg.engines, timeout)?))
                }
                RemoteTransport::Lambda => Self::build_lambda_invoker(cfg).await,
            },
        }
    }

    #[cfg(feature = "aws")]
    async fn build_lambda_invoker(cfg: &Config) -> Result<Arc<dyn EngineInvoker>, ConfigError> {
        let region = cfg
            .remote
            .region
            .as_deref()
            .unwrap_or(&cfg.artefacts.bucket_region);
        Ok(Arc::new(
            crate::backends::LambdaInvoker::new(region, &cfg.engines).await,
        ))
    }

    #[cfg(not(feature = "aws"))]
    async fn build_lambda_invoker(_cfg: &Config) -> Result<Arc<dyn EngineInvoker>, ConfigError> {
        Err(ConfigError::Runtime(
            "lambda transport requires the 'aws' feature".to_string(),
        ))
    }

    async fn build_store(cfg: &Config) -> Result<Arc<dyn ObjectStore>, ConfigError> {
        match cfg.storage.backend {
            StorageType::Memory => Ok(Arc::new(InMemoryObjectStore::new())),
            StorageType::Filesystem => {
                let root = cfg.storage.root.clone().ok_or_else(|| {
                    ConfigError::Runtime("storage.root is required for filesystem storage".to_string())
                })?;
                Ok(Arc::new(FilesystemObjectStore::new(root)))
            }
            StorageType::S3 => Self::build_s3_store(cfg).await,
        }
    }

    #[cfg(feature = "aws")]
    async fn build_s3_store(cfg: &Config) -> Result<Arc<dyn ObjectStore>, ConfigError> {
        Ok(Arc::new(
            crate::storage::S3ObjectStore::new(&cfg.artefacts.bucket_region).await,
        ))
    }

    #[cfg(not(feature = "aws"))]
    async fn build_s3_store(_cfg: &Config) -> Result<Arc<dyn ObjectStore>, ConfigError> {
        Err(ConfigError::Runtime(
            "s3 storage requires the 'aws' feature".to_string(),
        ))
    }
}
