//! Single-threaded message dispatcher around the timer controller.
//!
//! Commands, countdown ticks, accrual checks and deferred completions all
//! pass through one queue and are handled strictly in order. A tick that
//! brings the countdown to zero does not complete the session itself; it
//! enqueues `Message::Complete` tagged with the controller generation, which
//! runs on the next turn and is dropped if anything changed in between.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::Event;
use crate::notify::{Cue, Notifier};
use crate::storage::{load_or_default, SnapshotStore};
use crate::timer::{Clock, Durations, TimerController, TimerMode, TimerView};

/// User-facing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Start,
    Pause,
    Reset,
    Skip,
    SetMode { mode: TimerMode },
    SetDuration { mode: TimerMode, minutes: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Command(Command),
    Tick,
    AccrualCheck,
    Complete { generation: u64 },
}

pub struct Dispatcher<S, N, C: Clock> {
    timer: TimerController<C>,
    store: S,
    notifier: N,
    queue: VecDeque<Message>,
}

impl<S, N, C> Dispatcher<S, N, C>
where
    S: SnapshotStore,
    N: Notifier,
    C: Clock,
{
    pub fn new(timer: TimerController<C>, store: S, notifier: N) -> Self {
        Self {
            timer,
            store,
            notifier,
            queue: VecDeque::new(),
        }
    }

    /// Restore the timer from `store` (or start fresh with `durations`) and
    /// write the repaired snapshot back.
    pub fn load(store: S, notifier: N, clock: C, durations: Durations) -> Self {
        let snapshot = load_or_default(&store, durations, clock.now());
        let dispatcher = Self::new(TimerController::new(snapshot, clock), store, notifier);
        dispatcher.persist();
        dispatcher
    }

    pub fn timer(&self) -> &TimerController<C> {
        &self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn view(&self) -> TimerView {
        self.timer.view()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue without running.
    pub fn post(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Handle one queued message. Returns `None` when the queue is empty.
    pub fn turn(&mut self) -> Option<Vec<Event>> {
        let message = self.queue.pop_front()?;
        Some(self.handle(message))
    }

    /// Run turns until the queue is empty, including follow-ups enqueued
    /// along the way.
    pub fn run_pending(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(mut produced) = self.turn() {
            events.append(&mut produced);
        }
        events
    }

    pub fn dispatch(&mut self, message: Message) -> Vec<Event> {
        self.post(message);
        self.run_pending()
    }

    /// Bring the countdown and accrual up to the current instant, completing
    /// a session that expired since the last observation.
    pub fn catch_up(&mut self) -> Vec<Event> {
        let mut events = self.dispatch(Message::Tick);
        events.append(&mut self.dispatch(Message::AccrualCheck));
        events
    }

    /// Catch up, then apply `command`.
    pub fn execute(&mut self, command: Command) -> Vec<Event> {
        let mut events = self.catch_up();
        events.append(&mut self.dispatch(Message::Command(command)));
        events
    }

    fn handle(&mut self, message: Message) -> Vec<Event> {
        let before = self.timer.snapshot().clone();
        let event = match message {
            Message::Command(command) => self.apply(command),
            Message::Tick => {
                let event = self.timer.tick();
                if let Some(Event::TimerExpired { generation, .. }) = &event {
                    self.queue.push_back(Message::Complete {
                        generation: *generation,
                    });
                }
                event
            }
            Message::AccrualCheck => self.timer.accrue(),
            Message::Complete { generation } => {
                let event = self.timer.complete(generation);
                match &event {
                    Some(Event::SessionCompleted { .. }) => self.notifier.notify(Cue::FocusComplete),
                    Some(Event::BreakCompleted { .. }) => self.notifier.notify(Cue::BreakComplete),
                    _ => {}
                }
                event
            }
        };
        if *self.timer.snapshot() != before {
            self.persist();
        }
        event.into_iter().collect()
    }

    fn apply(&mut self, command: Command) -> Option<Event> {
        debug!(?command, "applying command");
        match command {
            Command::Start => self.timer.start(),
            Command::Pause => self.timer.pause(),
            Command::Reset => self.timer.reset(),
            Command::Skip => self.timer.skip(),
            Command::SetMode { mode } => self.timer.set_mode(mode),
            Command::SetDuration { mode, minutes } => self.timer.set_duration(mode, minutes),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(self.timer.snapshot()) {
            warn!(error = %e, "failed to persist timer snapshot");
        }
    }
}
