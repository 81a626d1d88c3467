mod clock;
mod engine;
mod mode;
mod snapshot;
mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{TimerController, TimerState, ACCRUAL_STEP_SECS};
pub use mode::{TimerMode, LONG_BREAK_INTERVAL};
pub use snapshot::{
    DailyReport, Durations, TimerSnapshot, DEFAULT_FOCUS_SECS, DEFAULT_LONG_BREAK_SECS,
    DEFAULT_SHORT_BREAK_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS,
};
pub use view::{format_clock, format_hours_minutes, progress_fraction, TimerView};
