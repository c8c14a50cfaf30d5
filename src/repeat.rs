//! Press-and-hold key repeat
//!
//! A held key fires once on press (done by the caller) and then once per
//! interval until the pointer is released or leaves the key. Time is passed
//! in explicitly so the frame loop drives it and tests can fake it.

use crate::types::{KeyAction, KeyPos};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatState {
    Idle,
    Repeating {
        key: KeyPos,
        action: KeyAction,
        next_fire: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct HoldRepeater {
    interval: Duration,
    state: RepeatState,
}

impl HoldRepeater {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: RepeatState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> &RepeatState {
        &self.state
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self.state, RepeatState::Repeating { .. })
    }

    /// Begin a repeat session. Any previous session is dropped, so there is
    /// never more than one timer.
    pub fn start(&mut self, key: KeyPos, action: KeyAction, now: Instant) {
        if self.is_repeating() {
            tracing::debug!("Replacing active repeat session");
        }
        self.state = RepeatState::Repeating {
            key,
            action,
            next_fire: now + self.interval,
        };
    }

    /// End the session. Safe to call when idle.
    pub fn stop(&mut self) {
        self.state = RepeatState::Idle;
    }

    /// Pointer moved to `pos`; stops the session if it left the held key
    pub fn pointer_at(&mut self, pos: Option<KeyPos>) {
        if let RepeatState::Repeating { key, .. } = &self.state
            && pos != Some(*key)
        {
            tracing::debug!("Pointer left key {:?}, stopping repeat", key);
            self.stop();
        }
    }

    /// Number of intervals elapsed since the last poll, with the action to
    /// fire that many times.
    pub fn poll(&mut self, now: Instant) -> Option<(KeyAction, u32)> {
        let interval = self.interval;
        let RepeatState::Repeating {
            action, next_fire, ..
        } = &mut self.state
        else {
            return None;
        };

        if now < *next_fire {
            return None;
        }

        let overdue = now.duration_since(*next_fire);
        let count = if interval.is_zero() {
            1
        } else {
            1 + (overdue.as_nanos() / interval.as_nanos()) as u32
        };
        *next_fire += interval * count;

        Some((action.clone(), count))
    }
}
