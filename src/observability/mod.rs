// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and request correlation.
//!
//! Message types follow a struct-based pattern with `Display` plus
//! [`messages::StructuredLog`], which keeps log wording out of the routing code
//! and attaches consistent fields to every event.
//!
//! # Architecture
//!
//! * `messages::router` - request lifecycle and routing decisions
//! * `messages::gateway` - engine invocation events
//! * `messages::staging` - artefact staging events
//! * `context` - process-wide correlation identity for the current request
//!
//! # Usage
//!
//! ```rust
//! use deploy_invoker::observability::messages::{router::TaskReceived, StructuredLog};
//!
//! let msg = TaskReceived {
//!     identity: "prn:portfolio:app:main:1",
//!     task_type: "pipeline",
//!     task: "compile",
//! };
//!
//! msg.log();
//! ```

pub mod context;
pub mod messages;

use tracing_subscriber::EnvFilter;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info`. Logs go to stderr so stdout stays
/// reserved for result envelopes. Calling this twice is harmless.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
