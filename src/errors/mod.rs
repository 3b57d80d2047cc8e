// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod invoke;
mod storage;

pub use config::ConfigError;
pub use invoke::InvokerError;
pub use storage::StorageError;
