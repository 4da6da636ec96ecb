//! Tagged outcome of a resilient call.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ApiError;

/// Where a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Live,
    Fallback,
}

/// Payload returned by a resilient call, tagged with its origin.
///
/// Both variants carry a payload, so callers that only render data can use
/// [`ApiResponse::payload`] and ignore the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum ApiResponse {
    /// Body returned by the backend, unchanged.
    Live { status: u16, payload: JsonValue },

    /// Substituted payload after a failed call.
    Fallback {
        payload: JsonValue,

        /// The failure that triggered the substitution
        reason: ApiError,

        /// Area of the matching rule, `None` for the generic wrapper
        #[serde(default, skip_serializing_if = "Option::is_none")]
        area: Option<String>,
    },
}

impl ApiResponse {
    pub fn payload(&self) -> &JsonValue {
        match self {
            ApiResponse::Live { payload, .. } | ApiResponse::Fallback { payload, .. } => payload,
        }
    }

    pub fn into_payload(self) -> JsonValue {
        match self {
            ApiResponse::Live { payload, .. } | ApiResponse::Fallback { payload, .. } => payload,
        }
    }

    pub fn origin(&self) -> Origin {
        match self {
            ApiResponse::Live { .. } => Origin::Live,
            ApiResponse::Fallback { .. } => Origin::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ApiResponse::Fallback { .. })
    }

    /// The failure behind a fallback, if any.
    pub fn reason(&self) -> Option<&ApiError> {
        match self {
            ApiResponse::Fallback { reason, .. } => Some(reason),
            ApiResponse::Live { .. } => None,
        }
    }

    pub fn area(&self) -> Option<&str> {
        match self {
            ApiResponse::Fallback { area, .. } => area.as_deref(),
            ApiResponse::Live { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let live = ApiResponse::Live {
            status: 200,
            payload: json!({"ok": true}),
        };
        assert_eq!(live.origin(), Origin::Live);
        assert!(live.reason().is_none());
        assert_eq!(live.payload()["ok"], true);

        let fallback = ApiResponse::Fallback {
            payload: json!([]),
            reason: ApiError::network("refused"),
            area: Some("agents".to_string()),
        };
        assert!(fallback.is_fallback());
        assert_eq!(fallback.area(), Some("agents"));
        assert_eq!(fallback.into_payload(), json!([]));
    }

    #[test]
    fn test_serialized_origin_tag() {
        let fallback = ApiResponse::Fallback {
            payload: json!({}),
            reason: ApiError::malformed("expected value at line 1 column 1"),
            area: None,
        };
        let json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(json["origin"], "fallback");
        assert_eq!(json["reason"]["kind"], "malformed_response");
        assert!(json.get("area").is_none());
    }
}
