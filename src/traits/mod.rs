// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod engine;
pub mod invoker;
pub mod storage;

pub use engine::Engine;
pub use invoker::EngineInvoker;
pub use storage::ObjectStore;
