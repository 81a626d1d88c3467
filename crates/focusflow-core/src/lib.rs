//! # FocusFlow Core Library
//!
//! Core logic for the FocusFlow focus timer. The CLI binary and any other
//! front end are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a wall-clock-based state machine over a persisted
//!   [`TimerSnapshot`]. The caller ticks it; it never spawns threads.
//! - **Runtime**: a [`Dispatcher`] that serializes commands, ticks, accrual
//!   checks and deferred completions, plus a tokio [`TimerService`] that
//!   drives it in the background.
//! - **Storage**: SQLite snapshot persistence and TOML configuration.
//! - **Stats**: pure report projections (week/month charts, totals).
//! - **Notify**: completion cues with a file-then-tone fallback chain.
//!
//! ## Key Components
//!
//! - [`TimerController`]: core timer state machine
//! - [`Database`]: snapshot persistence
//! - [`Config`]: application configuration management
//! - [`Notifier`]: trait for completion notifications

pub mod error;
pub mod events;
pub mod notify;
pub mod runtime;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, NotifyError, StoreError, ValidationError};
pub use events::Event;
pub use notify::{default_notifier, Cue, NoopNotifier, Notifier, SoundNotifier, ToneSpec};
pub use runtime::{Command, Dispatcher, Message, ServiceConfig, TimerHandle, TimerService};
pub use stats::{ChartPoint, ReportSummary, ReportWindow};
pub use storage::{Config, Database, MemoryStore, SnapshotStore};
pub use timer::{
    Clock, DailyReport, Durations, ManualClock, SystemClock, TimerController, TimerMode,
    TimerSnapshot, TimerState, TimerView,
};
