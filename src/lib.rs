// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // engine invokers
pub mod config;     // config loading + runtime wiring
pub mod engine;     // router, gateway, stager
pub mod errors;     // error handling
pub mod model;      // task description + result envelope
pub mod observability;
pub mod storage;    // object stores for staging
pub mod traits;     // unified abstractions
