// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Result envelope returned by the router.
//!
//! Callers of the legacy interface expect three different JSON shapes. Inside
//! the crate a single [`TaskResult`] is used; [`TaskResult::into_wire`] does the
//! translation at the outermost boundary.

use serde_json::{json, Value};

use crate::config::consts::{NOT_IMPLEMENTED, RESULT_KEY, STATUS_ERROR};

/// Outcome of routing one task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    /// Payload produced by an engine, including engine-reported business errors.
    Success(Value),
    /// Action exists in the transition table but has no engine yet.
    NotImplemented,
    /// A fault converted into a result.
    Error(String),
}

impl TaskResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }

    /// Legacy wire shape.
    ///
    /// * `Success(v)` → `v`
    /// * `NotImplemented` → `{"Error": "Not implemented"}`
    /// * `Error(m)` → `{"Response": {"Status": "error", "Message": m}}`
    pub fn into_wire(self) -> Value {
        match self {
            TaskResult::Success(payload) => payload,
            TaskResult::NotImplemented => json!({ "Error": NOT_IMPLEMENTED }),
            TaskResult::Error(message) => {
                let mut envelope = serde_json::Map::new();
                envelope.insert(
                    RESULT_KEY.to_string(),
                    json!({ "Status": STATUS_ERROR, "Message": message }),
                );
                Value::Object(envelope)
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_implemented_has_no_response_wrapper() {
        assert_eq!(
            TaskResult::NotImplemented.into_wire(),
            json!({"Error": "Not implemented"})
        );
    }

    #[test]
    fn error_uses_response_wrapper() {
        assert_eq!(
            TaskResult::Error("boom".to_string()).into_wire(),
            json!({"Response": {"Status": "error", "Message": "boom"}})
        );
    }

    #[test]
    fn success_is_passed_through() {
        let payload = json!({"Response": {"Status": "ok", "Data": [1, 2, 3]}});
        assert_eq!(TaskResult::Success(payload.clone()).into_wire(), payload);
    }
}
