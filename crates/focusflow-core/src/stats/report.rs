//! Activity report projections over daily reports.
//!
//! Builds the per-day series shown by the report screen: a trailing window
//! of days ending today, zero-filled where nothing was recorded.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::timer::{format_hours_minutes, DailyReport, TimerSnapshot};

/// Trailing window covered by a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportWindow {
    /// Last 7 days, labelled by weekday
    Week,
    /// Last 30 days, labelled by month and day
    Month,
}

impl ReportWindow {
    pub fn days(self) -> i64 {
        match self {
            ReportWindow::Week => 7,
            ReportWindow::Month => 30,
        }
    }

    fn label(self, date: NaiveDate) -> String {
        match self {
            ReportWindow::Week => date.format("%a").to_string(),
            ReportWindow::Month => date.format("%b %-d").to_string(),
        }
    }
}

impl FromStr for ReportWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "7d" => Ok(ReportWindow::Week),
            "month" | "30d" => Ok(ReportWindow::Month),
            other => Err(ValidationError::InvalidValue {
                field: "window".to_string(),
                message: format!("expected 'week' or 'month', got '{other}'"),
            }),
        }
    }
}

/// One day of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Focus time rounded to the nearest minute
    pub minutes: u64,
    pub sessions: u32,
    pub label: String,
}

/// Headline numbers of the report screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_focus_secs: u64,
    pub total_focus_formatted: String,
    pub sessions_completed: u32,
    pub today: DailyReport,
}

impl ReportSummary {
    pub fn from_snapshot(snapshot: &TimerSnapshot, today: NaiveDate) -> Self {
        Self {
            total_focus_secs: snapshot.total_focus_seconds_all_time,
            total_focus_formatted: format_hours_minutes(snapshot.total_focus_seconds_all_time),
            sessions_completed: snapshot.sessions_completed_all_time,
            today: snapshot
                .report_for(today)
                .cloned()
                .unwrap_or_else(|| DailyReport::empty(today)),
        }
    }
}

/// Build the chart series for `window`, oldest day first, ending at `today`.
pub fn chart(reports: &[DailyReport], window: ReportWindow, today: NaiveDate) -> Vec<ChartPoint> {
    (0..window.days())
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let report = reports.iter().find(|r| r.date == date);
            ChartPoint {
                date,
                minutes: report.map(|r| rounded_minutes(r.focus_seconds)).unwrap_or(0),
                sessions: report.map(|r| r.sessions_completed).unwrap_or(0),
                label: window.label(date),
            }
        })
        .collect()
}

fn rounded_minutes(secs: u64) -> u64 {
    (secs + 30) / 60
}
