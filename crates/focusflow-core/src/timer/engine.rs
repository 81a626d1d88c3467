//! Timer controller implementation.
//!
//! The controller is a wall-clock-based state machine over a
//! [`TimerSnapshot`]. It does not use internal threads - the caller is
//! responsible for calling `tick()` (countdown) and `accrue()` (minute-wise
//! focus accrual) periodically, and for handing a `TimerExpired` event back
//! through `complete()` on a later turn.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^        |
//!   +--------+  (reset / set_mode / skip / completion)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = TimerController::new(snapshot, SystemClock);
//! timer.start();
//! // In a loop:
//! if let Some(Event::TimerExpired { generation, .. }) = timer.tick() {
//!     // next turn:
//!     timer.complete(generation);
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::mode::TimerMode;
use super::snapshot::{clamp_duration_secs, TimerSnapshot};
use super::view::TimerView;
use crate::events::Event;

/// Seconds of focus credited by one accrual checkpoint.
pub const ACCRUAL_STEP_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Core timer controller.
///
/// Owns the snapshot exclusively. Commands never fail: a command that does
/// not apply in the current state returns `None`.
#[derive(Debug, Clone)]
pub struct TimerController<C: Clock = SystemClock> {
    snapshot: TimerSnapshot,
    clock: C,
    /// Bumped on every transition; stale deferred completions compare against it.
    generation: u64,
    /// Set when the countdown reached zero and a completion is outstanding.
    completion_pending: bool,
}

impl<C: Clock> TimerController<C> {
    /// Take ownership of a snapshot.
    ///
    /// The snapshot must already satisfy its invariants: build it with
    /// [`TimerSnapshot::new`] or pass it through [`TimerSnapshot::normalize`]
    /// (as [`crate::storage::load_or_default`] does) first.
    pub fn new(snapshot: TimerSnapshot, clock: C) -> Self {
        Self {
            snapshot,
            clock,
            generation: 0,
            completion_pending: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> &TimerSnapshot {
        &self.snapshot
    }

    pub fn state(&self) -> TimerState {
        self.snapshot.state()
    }

    pub fn mode(&self) -> TimerMode {
        self.snapshot.mode
    }

    pub fn time_left_secs(&self) -> u64 {
        self.snapshot.time_left_seconds
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn view(&self) -> TimerView {
        TimerView::from_snapshot(&self.snapshot, self.clock.today())
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        let view = self.view();
        Event::StateSnapshot {
            state: view.state,
            mode: view.mode,
            time_left_secs: view.time_left_secs,
            total_secs: view.total_secs,
            progress: view.progress,
            formatted_time: view.formatted_time,
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state() {
            TimerState::Running => None,
            TimerState::Idle | TimerState::Paused => {
                let now = self.clock.now();
                let snap = &mut self.snapshot;
                snap.is_active = true;
                snap.is_paused = false;
                snap.tick_anchor = Some(now);
                snap.accrual_checkpoint = (snap.mode == TimerMode::Focus).then_some(now);
                self.transition(now);
                debug!(mode = %self.snapshot.mode, time_left = self.snapshot.time_left_seconds, "timer started");
                Some(Event::TimerStarted {
                    mode: self.snapshot.mode,
                    time_left_secs: self.snapshot.time_left_seconds,
                    at: now,
                })
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state() != TimerState::Running {
            return None;
        }
        let now = self.clock.now();
        self.advance_countdown(now);
        self.flush_focus(now);
        let snap = &mut self.snapshot;
        snap.is_paused = true;
        snap.tick_anchor = None;
        snap.accrual_checkpoint = None;
        self.transition(now);
        debug!(time_left = self.snapshot.time_left_seconds, "timer paused");
        Some(Event::TimerPaused {
            mode: self.snapshot.mode,
            time_left_secs: self.snapshot.time_left_seconds,
            at: now,
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        let now = self.clock.now();
        self.flush_focus(now);
        let mode = self.snapshot.mode;
        self.enter_idle(mode);
        self.transition(now);
        debug!(%mode, "timer reset");
        Some(Event::TimerReset { mode, at: now })
    }

    pub fn set_mode(&mut self, mode: TimerMode) -> Option<Event> {
        let now = self.clock.now();
        self.flush_focus(now);
        let from = self.snapshot.mode;
        self.enter_idle(mode);
        self.transition(now);
        debug!(%from, to = %mode, "mode changed");
        Some(Event::ModeChanged { from, to: mode, at: now })
    }

    /// Advance to the next mode without crediting a completed session.
    ///
    /// The long-break decision uses the session count as it stands, not the
    /// count a completion would produce.
    pub fn skip(&mut self) -> Option<Event> {
        let now = self.clock.now();
        self.flush_focus(now);
        let from = self.snapshot.mode;
        let to = match from {
            TimerMode::Focus => TimerMode::break_after(self.snapshot.sessions_since_long_break),
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Focus,
        };
        self.enter_idle(to);
        self.transition(now);
        debug!(%from, %to, "timer skipped");
        Some(Event::TimerSkipped { from, to, at: now })
    }

    /// Decrement the countdown by the whole seconds elapsed since the last
    /// tick. Returns `TimerExpired` once when the countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state() != TimerState::Running {
            return None;
        }
        let now = self.clock.now();
        self.advance_countdown(now);
        if self.snapshot.time_left_seconds == 0 && !self.completion_pending {
            self.completion_pending = true;
            debug!(mode = %self.snapshot.mode, generation = self.generation, "countdown expired");
            return Some(Event::TimerExpired {
                mode: self.snapshot.mode,
                generation: self.generation,
                at: now,
            });
        }
        None
    }

    /// Credit every full minute of focus elapsed since the accrual checkpoint.
    pub fn accrue(&mut self) -> Option<Event> {
        if self.state() != TimerState::Running || self.snapshot.mode != TimerMode::Focus {
            return None;
        }
        let now = self.clock.now();
        let checkpoint = self.snapshot.accrual_checkpoint?;
        let elapsed = whole_secs_between(checkpoint, self.running_until(now));
        let steps = elapsed / ACCRUAL_STEP_SECS;
        if steps == 0 {
            return None;
        }
        let secs = steps * ACCRUAL_STEP_SECS;
        self.snapshot.accrual_checkpoint = Some(checkpoint + secs_duration(secs));
        self.credit(now, secs)
    }

    /// Finish the countdown that expired at `generation`.
    ///
    /// A completion whose generation no longer matches, or that arrives when
    /// the timer is not running at zero, is stale and ignored.
    pub fn complete(&mut self, generation: u64) -> Option<Event> {
        if generation != self.generation
            || self.state() != TimerState::Running
            || self.snapshot.time_left_seconds != 0
        {
            debug!(generation, current = self.generation, "dropping stale completion");
            return None;
        }
        let now = self.clock.now();
        let event = match self.snapshot.mode {
            TimerMode::Focus => {
                let remainder = self
                    .snapshot
                    .focus_duration_seconds
                    .saturating_sub(self.snapshot.session_credited_seconds);
                let today = self.clock.today();
                self.snapshot.attribute(today, remainder, 1);
                self.snapshot.sessions_since_long_break =
                    self.snapshot.sessions_since_long_break.saturating_add(1);
                self.snapshot.sessions_completed_all_time =
                    self.snapshot.sessions_completed_all_time.saturating_add(1);
                let next = TimerMode::break_after(self.snapshot.sessions_since_long_break);
                self.enter_idle(next);
                info!(
                    sessions = self.snapshot.sessions_completed_all_time,
                    next = %next,
                    "focus session completed"
                );
                Event::SessionCompleted {
                    focus_secs: self.snapshot.focus_duration_seconds,
                    sessions_since_long_break: self.snapshot.sessions_since_long_break,
                    next,
                    at: now,
                }
            }
            mode @ (TimerMode::ShortBreak | TimerMode::LongBreak) => {
                self.enter_idle(TimerMode::Focus);
                info!(%mode, "break completed");
                Event::BreakCompleted { mode, at: now }
            }
        };
        self.transition(now);
        Some(event)
    }

    pub fn set_focus_duration(&mut self, minutes: u32) -> Option<Event> {
        self.set_duration(TimerMode::Focus, minutes)
    }

    pub fn set_short_break_duration(&mut self, minutes: u32) -> Option<Event> {
        self.set_duration(TimerMode::ShortBreak, minutes)
    }

    pub fn set_long_break_duration(&mut self, minutes: u32) -> Option<Event> {
        self.set_duration(TimerMode::LongBreak, minutes)
    }

    /// Store a new nominal duration for `mode`.
    ///
    /// Only an idle timer in that mode picks the new value up immediately. A
    /// countdown in progress keeps running unless the new duration is shorter
    /// than what is left, in which case it is cut down to the new duration.
    pub fn set_duration(&mut self, mode: TimerMode, minutes: u32) -> Option<Event> {
        let requested = u64::from(minutes).saturating_mul(60);
        let secs = clamp_duration_secs(requested);
        if secs != requested {
            warn!(%mode, minutes, clamped_secs = secs, "duration out of range, clamped");
        }
        let now = self.clock.now();
        let snap = &mut self.snapshot;
        match mode {
            TimerMode::Focus => snap.focus_duration_seconds = secs,
            TimerMode::ShortBreak => snap.short_break_duration_seconds = secs,
            TimerMode::LongBreak => snap.long_break_duration_seconds = secs,
        }
        if snap.mode == mode {
            if !snap.is_active {
                snap.time_left_seconds = secs;
                snap.session_credited_seconds = 0;
            } else if snap.time_left_seconds > secs {
                snap.time_left_seconds = secs;
            }
        }
        snap.last_update_timestamp = now;
        Some(Event::DurationChanged {
            mode,
            duration_secs: secs,
            at: now,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn transition(&mut self, now: DateTime<Utc>) {
        self.generation = self.generation.wrapping_add(1);
        self.completion_pending = false;
        self.snapshot.last_update_timestamp = now;
    }

    fn enter_idle(&mut self, mode: TimerMode) {
        let snap = &mut self.snapshot;
        snap.mode = mode;
        snap.is_active = false;
        snap.is_paused = false;
        snap.time_left_seconds = snap.nominal_secs(mode);
        snap.tick_anchor = None;
        snap.accrual_checkpoint = None;
        snap.session_credited_seconds = 0;
    }

    /// Instant the countdown stops counting: `now`, or the expiry instant if
    /// that came first.
    fn running_until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.snapshot.tick_anchor {
            Some(anchor) => now.min(anchor + secs_duration(self.snapshot.time_left_seconds)),
            None => now,
        }
    }

    fn advance_countdown(&mut self, now: DateTime<Utc>) {
        let Some(anchor) = self.snapshot.tick_anchor else {
            self.snapshot.tick_anchor = Some(now);
            return;
        };
        if now < anchor {
            // Clock went backwards; restart measuring from here.
            self.snapshot.tick_anchor = Some(now);
            return;
        }
        let elapsed = whole_secs_between(anchor, now);
        let consumed = elapsed.min(self.snapshot.time_left_seconds);
        if consumed > 0 {
            self.snapshot.time_left_seconds -= consumed;
            self.snapshot.tick_anchor = Some(anchor + secs_duration(consumed));
        }
    }

    /// Credit the whole seconds of focus since the accrual checkpoint.
    /// Only applies while running in focus mode.
    fn flush_focus(&mut self, now: DateTime<Utc>) {
        if self.state() != TimerState::Running || self.snapshot.mode != TimerMode::Focus {
            return;
        }
        let Some(checkpoint) = self.snapshot.accrual_checkpoint else {
            return;
        };
        let secs = whole_secs_between(checkpoint, self.running_until(now));
        self.snapshot.accrual_checkpoint = Some(checkpoint + secs_duration(secs));
        self.credit(now, secs);
    }

    fn credit(&mut self, now: DateTime<Utc>, secs: u64) -> Option<Event> {
        if secs == 0 {
            return None;
        }
        let date = self.clock.today();
        self.snapshot.attribute(date, secs, 0);
        self.snapshot.session_credited_seconds =
            self.snapshot.session_credited_seconds.saturating_add(secs);
        self.snapshot.last_update_timestamp = now;
        debug!(%date, secs, "focus time attributed");
        Some(Event::FocusAttributed {
            date,
            focus_secs: secs,
            at: now,
        })
    }
}

/// Floor of the seconds between two instants; zero if `to` precedes `from`.
fn whole_secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    let ms = (to - from).num_milliseconds();
    if ms <= 0 {
        0
    } else {
        (ms / 1000) as u64
    }
}

fn secs_duration(secs: u64) -> Duration {
    Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::ManualClock;
    use crate::timer::snapshot::Durations;
    use chrono::TimeZone;

    fn controller() -> (TimerController<ManualClock>, ManualClock) {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let snap = TimerSnapshot::new(Durations::default(), start);
        (TimerController::new(snap, clock.clone()), clock)
    }

    fn run_to_completion(timer: &mut TimerController<ManualClock>, clock: &ManualClock) -> Event {
        let secs = timer.time_left_secs() as i64;
        timer.start();
        clock.advance_secs(secs);
        timer.accrue();
        let generation = match timer.tick() {
            Some(Event::TimerExpired { generation, .. }) => generation,
            other => panic!("expected expiry, got {other:?}"),
        };
        timer.complete(generation).expect("completion applies")
    }

    fn today_focus(timer: &TimerController<ManualClock>) -> u64 {
        let today = timer.clock().today();
        timer.snapshot().report_for(today).map(|r| r.focus_seconds).unwrap_or(0)
    }

    #[test]
    fn start_pause_resume() {
        let (mut timer, _clock) = controller();
        assert_eq!(timer.state(), TimerState::Idle);

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);
        assert!(timer.start().is_none());

        assert!(timer.pause().is_some());
        assert_eq!(timer.state(), TimerState::Paused);
        assert!(timer.pause().is_none());

        assert!(timer.start().is_some());
        assert_eq!(timer.state(), TimerState::Running);
    }

    #[test]
    fn tick_decrements_whole_seconds_without_drift() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance(Duration::milliseconds(1_400));
        timer.tick();
        assert_eq!(timer.time_left_secs(), 1499);
        clock.advance(Duration::milliseconds(700));
        timer.tick();
        // 2.1s elapsed in total
        assert_eq!(timer.time_left_secs(), 1498);
    }

    #[test]
    fn completing_focus_credits_exact_duration() {
        let (mut timer, clock) = controller();
        let event = run_to_completion(&mut timer, &clock);
        assert!(matches!(event, Event::SessionCompleted { next: TimerMode::ShortBreak, .. }));
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.time_left_secs(), 300);
        assert_eq!(timer.snapshot().sessions_completed_all_time, 1);
        assert_eq!(timer.snapshot().sessions_since_long_break, 1);
        assert_eq!(today_focus(&timer), 1500);
        assert_eq!(timer.snapshot().total_focus_seconds_all_time, 1500);
    }

    #[test]
    fn minute_accrual_does_not_double_count_on_completion() {
        let (mut timer, clock) = controller();
        timer.start();
        for _ in 0..25 {
            clock.advance_secs(60);
            timer.tick();
            timer.accrue();
        }
        // accrual credited all 25 minutes before completion ran
        assert_eq!(today_focus(&timer), 1500);
        let generation = timer.generation();
        timer.complete(generation).unwrap();
        assert_eq!(today_focus(&timer), 1500);
        assert_eq!(timer.snapshot().report_for(timer.clock().today()).unwrap().sessions_completed, 1);
    }

    #[test]
    fn expiry_fires_once() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance_secs(1600);
        assert!(matches!(timer.tick(), Some(Event::TimerExpired { .. })));
        clock.advance_secs(1);
        assert!(timer.tick().is_none());
        assert_eq!(timer.time_left_secs(), 0);
    }

    #[test]
    fn late_observation_never_credits_past_expiry() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance_secs(4000);
        timer.accrue();
        assert_eq!(today_focus(&timer), 1500);
        let generation = match timer.tick() {
            Some(Event::TimerExpired { generation, .. }) => generation,
            other => panic!("unexpected {other:?}"),
        };
        timer.complete(generation);
        assert_eq!(today_focus(&timer), 1500);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance_secs(1500);
        let generation = match timer.tick() {
            Some(Event::TimerExpired { generation, .. }) => generation,
            other => panic!("unexpected {other:?}"),
        };
        timer.reset();
        assert!(timer.complete(generation).is_none());
        assert_eq!(timer.snapshot().sessions_completed_all_time, 0);
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert_eq!(timer.time_left_secs(), 1500);
    }

    #[test]
    fn pause_flushes_partial_focus() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance(Duration::milliseconds(95_900));
        timer.pause();
        assert_eq!(today_focus(&timer), 95);
        assert_eq!(timer.time_left_secs(), 1500 - 95);
        assert_eq!(timer.snapshot().session_credited_seconds, 95);
    }

    #[test]
    fn paused_session_still_totals_nominal_duration() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance_secs(610);
        timer.pause();
        clock.advance_secs(3600);
        timer.start();
        clock.advance_secs(890);
        let generation = match timer.tick() {
            Some(Event::TimerExpired { generation, .. }) => generation,
            other => panic!("unexpected {other:?}"),
        };
        timer.complete(generation);
        assert_eq!(today_focus(&timer), 1500);
    }

    #[test]
    fn skip_flushes_but_does_not_count_session() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance_secs(130);
        timer.accrue();
        clock.advance_secs(15);
        timer.skip();
        assert_eq!(today_focus(&timer), 145);
        assert_eq!(timer.snapshot().sessions_completed_all_time, 0);
        assert_eq!(timer.snapshot().sessions_since_long_break, 0);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn skip_uses_pre_skip_session_count() {
        let (mut timer, clock) = controller();
        // zero completed sessions: 0 % 4 == 0
        timer.skip();
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        timer.skip();
        assert_eq!(timer.mode(), TimerMode::Focus);

        run_to_completion(&mut timer, &clock);
        timer.skip();
        assert_eq!(timer.mode(), TimerMode::Focus);
        timer.skip();
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
    }

    #[test]
    fn fourth_completion_goes_to_long_break() {
        let (mut timer, clock) = controller();
        for round in 1..=4 {
            let event = run_to_completion(&mut timer, &clock);
            let expected = if round == 4 { TimerMode::LongBreak } else { TimerMode::ShortBreak };
            assert!(matches!(event, Event::SessionCompleted { next, .. } if next == expected));
            if round < 4 {
                run_to_completion(&mut timer, &clock);
                assert_eq!(timer.mode(), TimerMode::Focus);
            }
        }
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.time_left_secs(), 900);
    }

    #[test]
    fn break_completion_returns_to_focus_without_credit() {
        let (mut timer, clock) = controller();
        timer.set_mode(TimerMode::ShortBreak);
        let event = run_to_completion(&mut timer, &clock);
        assert!(matches!(event, Event::BreakCompleted { mode: TimerMode::ShortBreak, .. }));
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert_eq!(today_focus(&timer), 0);
        assert_eq!(timer.snapshot().sessions_completed_all_time, 0);
    }

    #[test]
    fn set_mode_leaving_focus_flushes() {
        let (mut timer, clock) = controller();
        timer.start();
        clock.advance_secs(42);
        timer.set_mode(TimerMode::LongBreak);
        assert_eq!(today_focus(&timer), 42);
        assert_eq!(timer.time_left_secs(), 900);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn breaks_do_not_accrue_focus() {
        let (mut timer, clock) = controller();
        timer.set_mode(TimerMode::ShortBreak);
        timer.start();
        clock.advance_secs(120);
        assert!(timer.accrue().is_none());
        timer.reset();
        assert_eq!(today_focus(&timer), 0);
    }

    #[test]
    fn duration_change_applies_only_when_idle_in_mode() {
        let (mut timer, clock) = controller();
        timer.set_focus_duration(50);
        assert_eq!(timer.time_left_secs(), 3000);

        timer.set_short_break_duration(10);
        assert_eq!(timer.time_left_secs(), 3000);

        timer.start();
        clock.advance_secs(10);
        timer.tick();
        timer.set_focus_duration(60);
        assert_eq!(timer.time_left_secs(), 2990);
        assert_eq!(timer.snapshot().focus_duration_seconds, 3600);
    }

    #[test]
    fn shrinking_active_duration_clamps_time_left() {
        let (mut timer, _clock) = controller();
        timer.start();
        timer.set_focus_duration(10);
        assert_eq!(timer.time_left_secs(), 600);
    }

    #[test]
    fn zero_minutes_is_clamped_to_one() {
        let (mut timer, _clock) = controller();
        timer.set_focus_duration(0);
        assert_eq!(timer.snapshot().focus_duration_seconds, 60);
        assert_eq!(timer.time_left_secs(), 60);
    }

    #[test]
    fn report_rolls_over_at_midnight() {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 23, 50, 0).unwrap();
        let clock = ManualClock::new(start);
        let snap = TimerSnapshot::new(Durations::default(), start);
        let mut timer = TimerController::new(snap, clock.clone());
        timer.start();
        clock.advance_secs(25 * 60);
        let generation = match timer.tick() {
            Some(Event::TimerExpired { generation, .. }) => generation,
            other => panic!("unexpected {other:?}"),
        };
        timer.complete(generation);
        let next_day = chrono::NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
        assert_eq!(timer.snapshot().daily_reports.len(), 2);
        assert_eq!(timer.snapshot().report_for(next_day).unwrap().focus_seconds, 1500);
    }

    #[test]
    fn snapshot_event_reports_derived_state() {
        let (timer, _clock) = controller();
        match timer.snapshot_event() {
            Event::StateSnapshot {
                state,
                time_left_secs,
                formatted_time,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(time_left_secs, 1500);
                assert_eq!(formatted_time, "25:00");
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
