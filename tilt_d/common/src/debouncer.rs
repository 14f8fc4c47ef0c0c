use api::Side;
use log::{debug, trace};
use std::time::{Duration, Instant};

use crate::TiltSample;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

pub type GestureCallback = Box<dyn FnMut(GestureEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub direction: Side,
    pub timestamp: Instant,
}

/// Proof of holding the gesture slot. Only the current holder can revoke it.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

/// Collapses a stream of per-frame tilt samples into discrete gesture events.
///
/// At most one event fires per window; samples inside the window are dropped,
/// not queued. There is a single consumer slot, and whoever subscribes last
/// owns it.
pub struct GestureDebouncer {
    window: Duration,
    last_emitted_at: Option<Instant>,
    slot: Option<(u64, GestureCallback)>,
    next_id: u64,
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl GestureDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_emitted_at: None,
            slot: None,
            next_id: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn last_emitted_at(&self) -> Option<Instant> {
        self.last_emitted_at
    }

    pub fn is_subscribed(&self) -> bool {
        self.slot.is_some()
    }

    /// Replaces any previous subscriber and resets the debounce clock.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(GestureEvent) + Send + 'static,
    {
        if self.slot.is_some() {
            debug!("Replacing existing gesture subscriber");
        }
        self.next_id += 1;
        self.slot = Some((self.next_id, Box::new(callback)));
        self.last_emitted_at = None;
        Subscription { id: self.next_id }
    }

    /// Returns `false` if `subscription` had already been replaced or cleared.
    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        match &self.slot {
            Some((id, _)) if *id == subscription.id => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        if self.slot.take().is_some() {
            debug!("Gesture subscriber cleared");
        }
        self.last_emitted_at = None;
    }

    /// Feeds one classified sample. Returns the event if one was delivered.
    pub fn process(&mut self, sample: &TiltSample, now: Instant) -> Option<GestureEvent> {
        let direction = sample.direction.side()?;
        let (_, callback) = self.slot.as_mut()?;

        if let Some(last) = self.last_emitted_at {
            if now.saturating_duration_since(last) <= self.window {
                trace!(
                    "Dropping {} tilt inside debounce window",
                    direction.as_str()
                );
                return None;
            }
        }

        let event = GestureEvent {
            direction,
            timestamp: now,
        };
        self.last_emitted_at = Some(now);
        debug!(
            "Gesture {} (angle {:.1} deg)",
            direction.as_str(),
            sample.angle_degrees
        );
        callback(event);
        Some(event)
    }
}
