use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{TimerMode, TimerState};

/// Every state change of the controller produces an Event.
/// The CLI prints them; the dispatcher inspects them for notification and
/// deferred completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    ModeChanged {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; completion is handled on the next dispatcher turn.
    TimerExpired {
        mode: TimerMode,
        generation: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        focus_secs: u64,
        sessions_since_long_break: u32,
        next: TimerMode,
        at: DateTime<Utc>,
    },
    BreakCompleted {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    FocusAttributed {
        date: NaiveDate,
        focus_secs: u64,
        at: DateTime<Utc>,
    },
    DurationChanged {
        mode: TimerMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: TimerMode,
        time_left_secs: u64,
        total_secs: u64,
        progress: f64,
        formatted_time: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether the event ends a countdown and should be announced.
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. } | Event::BreakCompleted { .. })
    }
}
