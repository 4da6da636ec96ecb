//! Fallback payloads for failed backend calls.
//!
//! A [`FallbackTable`] maps path substrings to pre-built payloads. The
//! built-in table covers the dashboard areas:
//! - dashboard statistics
//! - agents, alerts, threats
//! - system status, events, realtime metrics

pub mod payloads;
mod table;

pub use table::{areas, unmatched_wrapper, FallbackRule, FallbackTable, Substitution};
