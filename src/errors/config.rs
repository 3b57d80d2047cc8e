// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that can occur while loading or validating the invoker configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML document could not be parsed
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The TOML document could not be parsed
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is neither YAML nor TOML
    #[error("Unsupported configuration format '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    /// One or more semantic problems were found
    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),

    /// The configuration asks for something the runtime cannot build
    #[error("Failed to build runtime: {0}")]
    Runtime(String),
}
