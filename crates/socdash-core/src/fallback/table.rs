//! Ordered path-pattern to payload lookup.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

use super::payloads;
use crate::error::ApiError;
use crate::path::EndpointPath;

/// Area names used by the built-in table.
pub mod areas {
    pub const DASHBOARD: &str = "dashboard";
    pub const AGENTS: &str = "agents";
    pub const ALERTS: &str = "alerts";
    pub const THREATS: &str = "threats";
    pub const SYSTEM: &str = "system";
    pub const EVENTS: &str = "events";
    pub const REALTIME: &str = "realtime";
}

lazy_static! {
    /// Built-in security-operations table, constructed once per process.
    static ref SECURITY_OPS: Arc<FallbackTable> = Arc::new(
        FallbackTable::new()
            .with_rule("/dashboard", areas::DASHBOARD, payloads::dashboard_stats())
            .with_rule("/agents", areas::AGENTS, payloads::agents())
            .with_rule("/alerts", areas::ALERTS, payloads::alerts())
            .with_rule("/threats", areas::THREATS, payloads::threats())
            .with_rule("/system", areas::SYSTEM, payloads::system_status())
            .with_rule("/events", areas::EVENTS, payloads::events())
            .with_rule("/realtime", areas::REALTIME, payloads::realtime())
    );
}

/// One substitution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRule {
    /// Substring looked for anywhere in the endpoint path
    pub pattern: String,

    /// Domain area the payload belongs to
    pub area: String,

    /// Payload returned when this rule is selected
    pub payload: JsonValue,
}

/// Payload chosen for a failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution<'a> {
    pub payload: JsonValue,

    /// Rule that matched, `None` when the generic wrapper was used
    pub rule: Option<&'a FallbackRule>,
}

/// Ordered list of fallback rules. First match wins.
///
/// Tables are assembled up front and then only read, so a single instance
/// can be shared behind an `Arc` by any number of concurrent callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackTable {
    rules: Vec<FallbackRule>,
}

impl FallbackTable {
    /// Create an empty table. Every failure gets the generic wrapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(
        mut self,
        pattern: impl Into<String>,
        area: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        self.rules.push(FallbackRule {
            pattern: pattern.into(),
            area: area.into(),
            payload,
        });
        self
    }

    /// Shared handle to the built-in security-operations table.
    pub fn security_ops() -> Arc<FallbackTable> {
        Arc::clone(&SECURITY_OPS)
    }

    /// First rule whose pattern occurs in `path`.
    pub fn resolve(&self, path: &EndpointPath) -> Option<&FallbackRule> {
        self.rules.iter().find(|rule| path.contains(&rule.pattern))
    }

    /// Select the payload to serve in place of a failed call.
    pub fn substitute(&self, path: &EndpointPath, error: &ApiError) -> Substitution<'_> {
        match self.resolve(path) {
            Some(rule) => Substitution {
                payload: rule.payload.clone(),
                rule: Some(rule),
            },
            None => Substitution {
                payload: unmatched_wrapper(error),
                rule: None,
            },
        }
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Generic payload for paths no rule covers.
pub fn unmatched_wrapper(error: &ApiError) -> JsonValue {
    json!({
        "error": error.to_string(),
        "fallback": true,
        "data": {}
    })
}
