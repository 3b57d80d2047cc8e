// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Maximum length of a derived branch short name.
const BRANCH_SHORT_NAME_MAX: usize = 20;

/// Top-level storage area an object key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Artefacts,
    Packages,
    Files,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Artefacts => "artefacts",
            ObjectType::Packages => "packages",
            ObjectType::Files => "files",
        }
    }
}

/// Deployment-target identity used to derive canonical storage keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct DeploymentDetails {
    #[serde(default, alias = "client")]
    pub client: String,
    #[serde(alias = "portfolio")]
    pub portfolio: String,
    #[serde(default, alias = "app", skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, alias = "branch", skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, alias = "branch_short_name", skip_serializing_if = "Option::is_none")]
    pub branch_short_name: Option<String>,
    #[serde(default, alias = "build", skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(default, alias = "component", skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, alias = "environment", skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, alias = "data_center", skip_serializing_if = "Option::is_none")]
    pub data_center: Option<String>,
}

impl DeploymentDetails {
    /// Branch name safe for use in keys and stack names.
    ///
    /// Uses the explicit short name when present, otherwise derives one from
    /// `branch`: lowercased, anything outside `[a-z0-9-]` replaced by `-`,
    /// truncated to 20 characters.
    pub fn branch_short_name(&self) -> Option<String> {
        if let Some(short) = self.branch_short_name.as_deref().filter(|s| !s.is_empty()) {
            return Some(short.to_string());
        }

        self.branch.as_deref().filter(|b| !b.is_empty()).map(|branch| {
            branch
                .to_ascii_lowercase()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
                .take(BRANCH_SHORT_NAME_MAX)
                .collect()
        })
    }

    /// Correlation identity in `prn:` form, e.g. `prn:portfolio:app:branch:build`.
    pub fn identity(&self) -> String {
        let mut parts = vec!["prn".to_string(), self.portfolio.clone()];
        parts.extend(self.scope_parts().into_iter().skip(1));
        parts.join(":")
    }

    /// Canonical object key for a file belonging to this deployment.
    ///
    /// The key is `{object_type}/{portfolio}/{app}/{branch}/{build}[/{component}]/{name}`
    /// with absent coordinates skipped. `storage_backed` keys always use `/`;
    /// otherwise the platform path separator is used so the key maps onto a
    /// local directory tree.
    pub fn object_key(&self, object_type: ObjectType, name: &str, storage_backed: bool) -> String {
        let separator = if storage_backed {
            "/".to_string()
        } else {
            std::path::MAIN_SEPARATOR.to_string()
        };

        let mut parts = vec![object_type.as_str().to_string()];
        parts.extend(self.scope_parts());
        if let Some(component) = self.component.as_deref().filter(|c| !c.is_empty()) {
            parts.push(component.to_string());
        }
        if !name.is_empty() {
            parts.push(name.to_string());
        }
        parts.join(&separator)
    }

    fn scope_parts(&self) -> Vec<String> {
        let mut parts = vec![self.portfolio.clone()];
        let optional = [
            self.app.clone(),
            self.branch_short_name(),
            self.build.clone(),
        ];
        // Stop at the first missing coordinate: a build without a branch is meaningless.
        for part in optional {
            match part.filter(|p| !p.is_empty()) {
                Some(p) => parts.push(p),
                None => break,
            }
        }
        parts
    }
}
