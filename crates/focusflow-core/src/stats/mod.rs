//! Statistics module for focusflow
//!
//! Report projections over the daily reports kept in the timer snapshot:
//! trailing week/month charts and the all-time summary.

mod report;

pub use report::{chart, ChartPoint, ReportSummary, ReportWindow};
