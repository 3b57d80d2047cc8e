// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod command;
pub mod engine_map;
pub mod factory;
pub mod invoker;

pub use command::CommandEngine;
pub use engine_map::EngineMap;
pub use factory::LocalEngineFactory;
pub use invoker::LocalInvoker;
