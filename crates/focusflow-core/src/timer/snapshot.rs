//! The persisted timer snapshot and its daily reports.
//!
//! A [`TimerSnapshot`] is the whole durable state of the timer. It is written
//! to the store after every change and read back once at startup, so the
//! serialized shape (camelCase JSON) is part of the on-disk format.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::engine::TimerState;
use super::mode::TimerMode;

/// Shortest accepted nominal duration.
pub const MIN_DURATION_SECS: u64 = 60;
/// Longest accepted nominal duration.
pub const MAX_DURATION_SECS: u64 = 24 * 60 * 60;

pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;
pub const DEFAULT_SHORT_BREAK_SECS: u64 = 5 * 60;
pub const DEFAULT_LONG_BREAK_SECS: u64 = 15 * 60;

/// Focus time and completed sessions attributed to one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub focus_seconds: u64,
    pub sessions_completed: u32,
}

impl DailyReport {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            focus_seconds: 0,
            sessions_completed: 0,
        }
    }
}

/// Nominal durations for the three modes, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub focus_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
}

impl Durations {
    pub fn from_minutes(focus: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            focus_secs: clamp_duration_secs(u64::from(focus) * 60),
            short_break_secs: clamp_duration_secs(u64::from(short_break) * 60),
            long_break_secs: clamp_duration_secs(u64::from(long_break) * 60),
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus_secs: DEFAULT_FOCUS_SECS,
            short_break_secs: DEFAULT_SHORT_BREAK_SECS,
            long_break_secs: DEFAULT_LONG_BREAK_SECS,
        }
    }
}

pub(crate) fn clamp_duration_secs(secs: u64) -> u64 {
    secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub time_left_seconds: u64,
    pub is_active: bool,
    pub is_paused: bool,
    pub sessions_since_long_break: u32,
    pub focus_duration_seconds: u64,
    pub short_break_duration_seconds: u64,
    pub long_break_duration_seconds: u64,
    pub total_focus_seconds_all_time: u64,
    pub sessions_completed_all_time: u32,
    pub daily_reports: Vec<DailyReport>,
    pub last_update_timestamp: DateTime<Utc>,
    /// Instant up to which the countdown has been decremented. Set while running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_anchor: Option<DateTime<Utc>>,
    /// Instant up to which focus time has been credited. Set while running in focus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual_checkpoint: Option<DateTime<Utc>>,
    /// Focus seconds already credited for the session in progress.
    #[serde(default)]
    pub session_credited_seconds: u64,
}

impl TimerSnapshot {
    /// A fresh idle snapshot in focus mode with an empty report for `now`'s date.
    pub fn new(durations: Durations, now: DateTime<Utc>) -> Self {
        Self {
            mode: TimerMode::Focus,
            time_left_seconds: durations.focus_secs,
            is_active: false,
            is_paused: false,
            sessions_since_long_break: 0,
            focus_duration_seconds: durations.focus_secs,
            short_break_duration_seconds: durations.short_break_secs,
            long_break_duration_seconds: durations.long_break_secs,
            total_focus_seconds_all_time: 0,
            sessions_completed_all_time: 0,
            daily_reports: vec![DailyReport::empty(now.date_naive())],
            last_update_timestamp: now,
            tick_anchor: None,
            accrual_checkpoint: None,
            session_credited_seconds: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        match (self.is_active, self.is_paused) {
            (false, _) => TimerState::Idle,
            (true, false) => TimerState::Running,
            (true, true) => TimerState::Paused,
        }
    }

    pub fn nominal_secs(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Focus => self.focus_duration_seconds,
            TimerMode::ShortBreak => self.short_break_duration_seconds,
            TimerMode::LongBreak => self.long_break_duration_seconds,
        }
    }

    pub fn current_nominal_secs(&self) -> u64 {
        self.nominal_secs(self.mode)
    }

    pub fn report_for(&self, date: NaiveDate) -> Option<&DailyReport> {
        self.daily_reports.iter().find(|r| r.date == date)
    }

    /// Locate or lazily create the report for `date`.
    pub fn ensure_report(&mut self, date: NaiveDate) -> &mut DailyReport {
        let idx = match self.daily_reports.iter().position(|r| r.date == date) {
            Some(idx) => idx,
            None => {
                self.daily_reports.push(DailyReport::empty(date));
                self.daily_reports.len() - 1
            }
        };
        &mut self.daily_reports[idx]
    }

    /// The only mutation path for reports and all-time focus totals.
    pub fn attribute(&mut self, date: NaiveDate, focus_secs: u64, sessions: u32) {
        let report = self.ensure_report(date);
        report.focus_seconds = report.focus_seconds.saturating_add(focus_secs);
        report.sessions_completed = report.sessions_completed.saturating_add(sessions);
        self.total_focus_seconds_all_time =
            self.total_focus_seconds_all_time.saturating_add(focus_secs);
    }

    /// Repair a snapshot read from storage so every invariant holds.
    ///
    /// Durations are clamped into range, duplicate report dates are merged,
    /// `time_left_seconds` is clamped to the current mode and today's report
    /// is created if missing. A running snapshot without anchors is
    /// re-anchored at `now`.
    pub fn normalize(&mut self, now: DateTime<Utc>) {
        self.focus_duration_seconds = clamp_duration_secs(self.focus_duration_seconds);
        self.short_break_duration_seconds = clamp_duration_secs(self.short_break_duration_seconds);
        self.long_break_duration_seconds = clamp_duration_secs(self.long_break_duration_seconds);
        self.time_left_seconds = self.time_left_seconds.min(self.current_nominal_secs());

        let mut merged: Vec<DailyReport> = Vec::with_capacity(self.daily_reports.len());
        for report in self.daily_reports.drain(..) {
            match merged.iter_mut().find(|r| r.date == report.date) {
                Some(existing) => {
                    existing.focus_seconds = existing.focus_seconds.saturating_add(report.focus_seconds);
                    existing.sessions_completed = existing
                        .sessions_completed
                        .saturating_add(report.sessions_completed);
                }
                None => merged.push(report),
            }
        }
        self.daily_reports = merged;
        self.ensure_report(now.date_naive());

        match self.state() {
            TimerState::Idle => {
                self.is_paused = false;
                self.tick_anchor = None;
                self.accrual_checkpoint = None;
            }
            TimerState::Paused => {
                self.tick_anchor = None;
                self.accrual_checkpoint = None;
            }
            TimerState::Running => {
                if self.tick_anchor.is_none() {
                    self.tick_anchor = Some(now);
                }
                if self.mode == TimerMode::Focus && self.accrual_checkpoint.is_none() {
                    self.accrual_checkpoint = Some(now);
                }
            }
        }
        self.session_credited_seconds = self.session_credited_seconds.min(self.focus_duration_seconds);
    }
}
