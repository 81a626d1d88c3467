//! Background timer service.
//!
//! Owns a [`Dispatcher`] on a tokio task and drives it from three sources:
//! commands sent through a [`TimerHandle`], a countdown ticker and a
//! once-a-minute accrual ticker. After every turn the current [`TimerView`]
//! is published on a watch channel and events are fanned out on a broadcast
//! channel.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::dispatcher::{Command, Dispatcher, Message};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::notify::Notifier;
use crate::storage::{RuntimeConfig, SnapshotStore};
use crate::timer::{Clock, TimerMode, TimerSnapshot, TimerView, ACCRUAL_STEP_SECS};

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub tick_interval: Duration,
    pub accrual_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            accrual_interval: Duration::from_secs(ACCRUAL_STEP_SECS),
        }
    }
}

impl From<&RuntimeConfig> for ServiceConfig {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
            ..Self::default()
        }
    }
}

enum Request {
    Command {
        command: Command,
        reply: oneshot::Sender<Vec<Event>>,
    },
    Snapshot(oneshot::Sender<TimerSnapshot>),
    Shutdown,
}

/// Cloneable front end of a running [`TimerService`].
#[derive(Clone)]
pub struct TimerHandle {
    requests: mpsc::Sender<Request>,
    views: watch::Receiver<TimerView>,
    events: broadcast::Sender<Event>,
}

impl TimerHandle {
    /// Send a command and wait for the events it produced.
    pub async fn send(&self, command: Command) -> Result<Vec<Event>> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request::Command { command, reply })
            .await
            .map_err(|_| CoreError::ServiceStopped)?;
        rx.await.map_err(|_| CoreError::ServiceStopped)
    }

    pub async fn start(&self) -> Result<Vec<Event>> {
        self.send(Command::Start).await
    }

    pub async fn pause(&self) -> Result<Vec<Event>> {
        self.send(Command::Pause).await
    }

    pub async fn reset(&self) -> Result<Vec<Event>> {
        self.send(Command::Reset).await
    }

    pub async fn skip(&self) -> Result<Vec<Event>> {
        self.send(Command::Skip).await
    }

    pub async fn set_mode(&self, mode: TimerMode) -> Result<Vec<Event>> {
        self.send(Command::SetMode { mode }).await
    }

    pub async fn set_duration(&self, mode: TimerMode, minutes: u32) -> Result<Vec<Event>> {
        self.send(Command::SetDuration { mode, minutes }).await
    }

    pub async fn snapshot(&self) -> Result<TimerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request::Snapshot(reply))
            .await
            .map_err(|_| CoreError::ServiceStopped)?;
        rx.await.map_err(|_| CoreError::ServiceStopped)
    }

    /// Latest published view.
    pub fn view(&self) -> TimerView {
        self.views.borrow().clone()
    }

    pub fn subscribe_views(&self) -> watch::Receiver<TimerView> {
        self.views.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Ask the service to stop. Already-stopped services are fine.
    pub async fn shutdown(&self) {
        let _ = self.requests.send(Request::Shutdown).await;
    }
}

pub struct TimerService;

impl TimerService {
    /// Move `dispatcher` onto a tokio task. The task hands the dispatcher
    /// back when it stops.
    pub fn spawn<S, N, C>(
        dispatcher: Dispatcher<S, N, C>,
        config: ServiceConfig,
    ) -> (TimerHandle, JoinHandle<Dispatcher<S, N, C>>)
    where
        S: SnapshotStore + Send + 'static,
        N: Notifier + Send + 'static,
        C: Clock + Send + 'static,
    {
        let (requests, rx) = mpsc::channel(COMMAND_BUFFER);
        let (view_tx, views) = watch::channel(dispatcher.view());
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let handle = TimerHandle {
            requests,
            views,
            events: events.clone(),
        };
        let task = tokio::spawn(run(dispatcher, rx, view_tx, events, config));
        (handle, task)
    }
}

async fn run<S, N, C>(
    mut dispatcher: Dispatcher<S, N, C>,
    mut requests: mpsc::Receiver<Request>,
    view_tx: watch::Sender<TimerView>,
    event_tx: broadcast::Sender<Event>,
    config: ServiceConfig,
) -> Dispatcher<S, N, C>
where
    S: SnapshotStore,
    N: Notifier,
    C: Clock,
{
    let mut ticker = interval(config.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut accrual = interval_at(Instant::now() + config.accrual_interval, config.accrual_interval);
    accrual.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(tick_ms = config.tick_interval.as_millis() as u64, "timer service started");

    loop {
        let (events, reply) = tokio::select! {
            request = requests.recv() => match request {
                Some(Request::Command { command, reply }) => (dispatcher.execute(command), Some(reply)),
                Some(Request::Snapshot(reply)) => {
                    let _ = reply.send(dispatcher.timer().snapshot().clone());
                    continue;
                }
                Some(Request::Shutdown) | None => break,
            },
            _ = ticker.tick() => (dispatcher.dispatch(Message::Tick), None),
            _ = accrual.tick() => (dispatcher.dispatch(Message::AccrualCheck), None),
        };

        let view = dispatcher.view();
        view_tx.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
        for event in &events {
            debug!(?event, "timer event");
            // no subscribers is fine
            let _ = event_tx.send(event.clone());
        }
        if let Some(reply) = reply {
            let _ = reply.send(events);
        }
    }

    info!("timer service stopped");
    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;
    use crate::storage::MemoryStore;
    use crate::timer::{Durations, ManualClock, TimerState};
    use chrono::{TimeZone, Utc};

    fn dispatcher(
        clock: &ManualClock,
        durations: Durations,
    ) -> Dispatcher<MemoryStore, NoopNotifier, ManualClock> {
        Dispatcher::load(MemoryStore::new(), NoopNotifier, clock.clone(), durations)
    }

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_drives_countdown_to_completion() {
        let clock = clock();
        let (handle, task) =
            TimerService::spawn(dispatcher(&clock, Durations::from_minutes(1, 1, 1)), ServiceConfig::default());
        let mut events = handle.subscribe_events();

        let started = handle.start().await.unwrap();
        assert!(matches!(started.last(), Some(Event::TimerStarted { .. })));
        assert_eq!(handle.view().state, TimerState::Running);

        clock.advance_secs(60);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let view = handle.view();
        assert_eq!(view.state, TimerState::Idle);
        assert_eq!(view.mode, TimerMode::ShortBreak);
        assert_eq!(view.today_sessions, 1);

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        assert!(seen.iter().any(|e| matches!(e, Event::TimerExpired { .. })));
        assert!(seen.iter().any(|e| matches!(e, Event::SessionCompleted { .. })));

        handle.shutdown().await;
        let dispatcher = task.await.unwrap();
        assert_eq!(dispatcher.timer().snapshot().sessions_completed_all_time, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn accrual_ticker_credits_whole_minutes() {
        let clock = clock();
        let (handle, task) = TimerService::spawn(dispatcher(&clock, Durations::default()), ServiceConfig::default());

        handle.start().await.unwrap();
        clock.advance_secs(150);
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(handle.view().today_focus_secs, 120);
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.time_left_seconds, 1350);

        handle.shutdown().await;
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn commands_fail_after_shutdown() {
        let clock = clock();
        let (handle, task) = TimerService::spawn(dispatcher(&clock, Durations::default()), ServiceConfig::default());
        handle.shutdown().await;
        task.await.unwrap();

        assert!(matches!(handle.start().await, Err(CoreError::ServiceStopped)));
        assert!(matches!(handle.snapshot().await, Err(CoreError::ServiceStopped)));
    }

    #[test]
    fn service_config_follows_runtime_config() {
        let config = ServiceConfig::from(&RuntimeConfig { tick_interval_ms: 250 });
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.accrual_interval, Duration::from_secs(60));
    }
}
