//! Observer that keeps events in memory.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{CallEvent, CallObserver};

/// An event with the time it was observed.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub at: DateTime<Utc>,
    pub event: CallEvent,
}

/// Captures every event for later inspection.
///
/// Safe to share between concurrent calls; events are appended in the order
/// the observer sees them.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events observed so far, oldest first.
    pub fn events(&self) -> Vec<CallEvent> {
        self.events.lock().iter().map(|r| r.event.clone()).collect()
    }

    pub fn recorded(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Only the failure events.
    pub fn failures(&self) -> Vec<CallEvent> {
        self.events
            .lock()
            .iter()
            .filter(|r| matches!(r.event, CallEvent::Failure { .. }))
            .map(|r| r.event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl CallObserver for RecordingObserver {
    fn observe(&self, event: &CallEvent) {
        self.events.lock().push(RecordedEvent {
            at: Utc::now(),
            event: event.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socdash_core::{ApiError, Method};

    #[test]
    fn test_records_in_order() {
        let observer = RecordingObserver::new();
        assert!(observer.is_empty());

        observer.observe(&CallEvent::Request {
            url: "a".to_string(),
            method: Method::Get,
        });
        observer.observe(&CallEvent::Failure {
            url: "a".to_string(),
            error: ApiError::network("down"),
            area: None,
        });

        assert_eq!(observer.len(), 2);
        assert!(matches!(observer.events()[0], CallEvent::Request { .. }));
        assert_eq!(observer.failures().len(), 1);

        let recorded = observer.recorded();
        assert!(recorded[0].at <= recorded[1].at);

        observer.clear();
        assert!(observer.is_empty());
    }
}
