mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DurationsConfig, NotificationsConfig, RuntimeConfig};
pub use database::Database;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::Result;
use crate::timer::{Durations, TimerSnapshot};

/// Durable home of the timer snapshot.
///
/// `load` is called once at startup, `save` after every change.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<TimerSnapshot>>;
    fn save(&self, snapshot: &TimerSnapshot) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Result<Option<TimerSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &TimerSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

/// In-process store, used by tests and embedders without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw JSON, which need not be valid.
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Mutex::new(Some(json.into())),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn raw(&self) -> Option<String> {
        self.json.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<TimerSnapshot>> {
        let guard = self.json.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &TimerSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        *self.json.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Load the stored snapshot, falling back to a fresh one built from
/// `durations` when nothing is stored or the stored copy is unreadable.
///
/// Never fails. The returned snapshot is normalized for `now`, which also
/// guarantees a report entry for today.
pub fn load_or_default<S: SnapshotStore + ?Sized>(
    store: &S,
    durations: Durations,
    now: DateTime<Utc>,
) -> TimerSnapshot {
    let mut snapshot = match store.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => TimerSnapshot::new(durations, now),
        Err(e) => {
            warn!(error = %e, "failed to load timer snapshot, starting fresh");
            TimerSnapshot::new(durations, now)
        }
    };
    snapshot.normalize(now);
    snapshot
}

/// Returns the focusflow data directory.
///
/// `FOCUSFLOW_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/focusflow[-dev]/`, with `FOCUSFLOW_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FOCUSFLOW_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("focusflow-dev")
            } else {
                base_dir.join("focusflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_store_yields_default_snapshot() {
        let store = MemoryStore::new();
        let snap = load_or_default(&store, Durations::default(), noon());
        assert_eq!(snap.time_left_seconds, 1500);
        assert_eq!(snap.daily_reports.len(), 1);
    }

    #[test]
    fn corrupt_store_falls_back_to_default() {
        let store = MemoryStore::with_json("{\"mode\": 42");
        let snap = load_or_default(&store, Durations::from_minutes(50, 10, 20), noon());
        assert_eq!(snap.focus_duration_seconds, 3000);
        assert_eq!(snap.sessions_completed_all_time, 0);
    }

    #[test]
    fn load_appends_report_for_a_new_day() {
        let store = MemoryStore::new();
        let yesterday = noon() - chrono::Duration::days(1);
        store.save(&TimerSnapshot::new(Durations::default(), yesterday)).unwrap();

        let snap = load_or_default(&store, Durations::default(), noon());
        assert_eq!(snap.daily_reports.len(), 2);
        assert_eq!(snap.daily_reports[1].date, noon().date_naive());
        assert_eq!(snap.daily_reports[1].focus_seconds, 0);
    }

    #[test]
    fn save_of_load_is_idempotent() {
        let store = MemoryStore::new();
        let mut snap = TimerSnapshot::new(Durations::default(), noon());
        snap.attribute(noon().date_naive(), 1500, 1);
        store.save(&snap).unwrap();

        let first = load_or_default(&store, Durations::default(), noon());
        store.save(&first).unwrap();
        let second = load_or_default(&store, Durations::default(), noon());

        assert_eq!(first, second);
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn save_count_is_shared_across_threads() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let snap = TimerSnapshot::new(Durations::default(), noon());
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                let snap = snap.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store.save(&snap).unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(store.save_count(), 100);
        assert!(store.raw().is_some());
    }
}
