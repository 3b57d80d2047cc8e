// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine invocation backends.
//!
//! Every backend implements [`EngineInvoker`](crate::traits::EngineInvoker);
//! the router never knows which one it was given.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process engines held in an [`EngineMap`](local::EngineMap):
//! - **Command engines**: an executable per engine, task on stdin, envelope on stdout
//! - **Injected engines**: any [`Engine`](crate::traits::Engine) an embedder registers
//! - **Use Case**: development, single-binary deployments, tests
//!
//! ## HTTP Backend
//! Remote engines behind an HTTP endpoint; the task is POSTed as JSON.
//!
//! ## Lambda Backend (feature `aws`)
//! Remote engines deployed as functions, invoked synchronously.
//!
//! ## Stub Backend (Test-Only)
//! - **StaticEngine**: canned response, records what it received
//! - **RecordingInvoker**: canned response per engine kind, records every call
//! - **FailingObjectStore**: rejects every copy
//!
//! # Architecture
//!
//! ```text
//! Configuration → RuntimeBuilder → EngineInvoker → InvocationGateway → Router
//! ```

pub mod http;
#[cfg(feature = "aws")]
pub mod lambda;
pub mod local;
#[cfg(test)]
pub mod stub;

pub use http::HttpInvoker;
#[cfg(feature = "aws")]
pub use lambda::LambdaInvoker;
pub use local::{EngineMap, LocalInvoker};
