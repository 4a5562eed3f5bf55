//! Tracker listener trait definition.

use crate::model::TrackerEvent;

/// Receiver of tracker notifications.
///
/// Events are delivered synchronously, in the order the tracker emits them.
pub trait TrackerListener: Send + Sync {
    fn on_event(&self, event: &TrackerEvent);
}

impl<F> TrackerListener for F
where
    F: Fn(&TrackerEvent) + Send + Sync,
{
    fn on_event(&self, event: &TrackerEvent) {
        self(event)
    }
}
