pub mod config;
pub mod run;
pub mod stats;
pub mod timer;

use focusflow_core::storage::Database;
use focusflow_core::timer::format_clock;
use focusflow_core::{
    default_notifier, Config, Dispatcher, Event, Notifier, SystemClock, TimerMode, TimerState,
    TimerView,
};
use serde::Serialize;
use tracing::warn;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type CliDispatcher = Dispatcher<Database, Box<dyn Notifier + Send>, SystemClock>;

/// Config for timer commands. A broken config file must not stop the timer.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        Config::default()
    })
}

/// Open the timer stored in the data directory.
pub fn open_dispatcher(config: &Config) -> Result<CliDispatcher, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(Dispatcher::load(
        db,
        default_notifier(&config.notifications),
        SystemClock,
        config.durations(),
    ))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line human description of an event, for events worth announcing.
pub fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::TimerStarted {
            mode,
            time_left_secs,
            ..
        } => format!("{} started, {} left", mode.label(), format_clock(*time_left_secs)),
        Event::TimerPaused {
            mode,
            time_left_secs,
            ..
        } => format!("{} paused at {}", mode.label(), format_clock(*time_left_secs)),
        Event::TimerReset { mode, .. } => format!("{} reset", mode.label()),
        Event::ModeChanged { to, .. } => format!("Switched to {}", to.label()),
        Event::TimerSkipped { from, to, .. } => {
            format!("Skipped {}, next up: {}", from.label(), to.label())
        }
        Event::SessionCompleted { next, .. } => {
            let kind = if *next == TimerMode::LongBreak { "long" } else { "short" };
            format!("Focus session completed! Time for a {kind} break.")
        }
        Event::BreakCompleted { mode, .. } => {
            format!("{} completed! Time to focus again.", mode.label())
        }
        Event::DurationChanged {
            mode,
            duration_secs,
            ..
        } => format!("{} duration set to {} min", mode.label(), duration_secs / 60),
        Event::TimerExpired { .. } | Event::FocusAttributed { .. } | Event::StateSnapshot { .. } => {
            return None
        }
    };
    Some(line)
}

/// Status line, e.g. `Focus  24:13  running`.
pub fn status_line(view: &TimerView) -> String {
    let state = match view.state {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
    };
    format!("{}  {}  {}", view.mode.label(), view.formatted_time, state)
}
