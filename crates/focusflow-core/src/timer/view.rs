//! Derived read state for presentation layers.
//!
//! Everything here is a pure projection of a [`TimerSnapshot`]; nothing is
//! stored back.

use chrono::NaiveDate;
use serde::Serialize;

use super::engine::TimerState;
use super::mode::TimerMode;
use super::snapshot::TimerSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub state: TimerState,
    pub mode: TimerMode,
    pub time_left_secs: u64,
    pub total_secs: u64,
    /// 0.0 at session start, 1.0 at expiry.
    pub progress: f64,
    pub formatted_time: String,
    pub sessions_since_long_break: u32,
    pub sessions_completed_all_time: u32,
    pub total_focus_secs: u64,
    pub total_focus_formatted: String,
    pub today_focus_secs: u64,
    pub today_sessions: u32,
}

impl TimerView {
    pub fn from_snapshot(snapshot: &TimerSnapshot, today: NaiveDate) -> Self {
        let total_secs = snapshot.current_nominal_secs();
        let today_report = snapshot.report_for(today);
        Self {
            state: snapshot.state(),
            mode: snapshot.mode,
            time_left_secs: snapshot.time_left_seconds,
            total_secs,
            progress: progress_fraction(snapshot.time_left_seconds, total_secs),
            formatted_time: format_clock(snapshot.time_left_seconds),
            sessions_since_long_break: snapshot.sessions_since_long_break,
            sessions_completed_all_time: snapshot.sessions_completed_all_time,
            total_focus_secs: snapshot.total_focus_seconds_all_time,
            total_focus_formatted: format_hours_minutes(snapshot.total_focus_seconds_all_time),
            today_focus_secs: today_report.map(|r| r.focus_seconds).unwrap_or(0),
            today_sessions: today_report.map(|r| r.sessions_completed).unwrap_or(0),
        }
    }
}

pub fn progress_fraction(time_left_secs: u64, total_secs: u64) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (1.0 - time_left_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

/// `mm:ss`, zero padded. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Whole hours and minutes, e.g. `3h 5m`.
pub fn format_hours_minutes(secs: u64) -> String {
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}
