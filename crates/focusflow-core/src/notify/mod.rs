//! Completion notifications.
//!
//! A [`Notifier`] is fire-and-forget: it never reports failure to the timer.
//! [`SoundNotifier`] tries the configured sound file first and falls back to
//! a synthesized tone; if both fail the failure is logged and dropped.

mod backend;

pub use backend::{AudioBackend, BellBackend};
#[cfg(feature = "sound")]
pub use backend::RodioBackend;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::storage::NotificationsConfig;

/// What is being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    FocusComplete,
    BreakComplete,
}

/// Fallback tone parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub duration_ms: u64,
    pub gain: f32,
}

impl Default for ToneSpec {
    fn default() -> Self {
        Self {
            frequency_hz: 800.0,
            duration_ms: 500,
            gain: 0.5,
        }
    }
}

pub trait Notifier {
    fn notify(&self, cue: Cue);
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, cue: Cue) {
        (**self).notify(cue)
    }
}

/// Notifier that does nothing, for disabled notifications and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, cue: Cue) {
        debug!(?cue, "notification suppressed");
    }
}

/// Plays the configured sound file, falling back to a synthesized tone.
pub struct SoundNotifier<B> {
    backend: B,
    sound_file: Option<PathBuf>,
    tone: ToneSpec,
}

impl<B: AudioBackend> SoundNotifier<B> {
    pub fn new(backend: B, sound_file: Option<PathBuf>, tone: ToneSpec) -> Self {
        Self {
            backend,
            sound_file,
            tone,
        }
    }

    pub fn from_config(backend: B, config: &NotificationsConfig) -> Self {
        Self::new(
            backend,
            config.sound_file.as_ref().map(PathBuf::from),
            config.tone(),
        )
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: AudioBackend> Notifier for SoundNotifier<B> {
    fn notify(&self, cue: Cue) {
        if let Some(path) = &self.sound_file {
            match self.backend.play_file(path) {
                Ok(()) => {
                    debug!(?cue, path = %path.display(), "notification sound played");
                    return;
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "could not play notification sound, using fallback tone");
                }
            }
        }
        if let Err(e) = self.backend.play_tone(&self.tone) {
            error!(error = %e, "failed to play fallback tone");
        }
    }
}

/// Notifier for the current build: real audio with the `sound` feature,
/// the terminal bell otherwise. Disabled notifications yield a no-op.
pub fn default_notifier(config: &NotificationsConfig) -> Box<dyn Notifier + Send> {
    if !config.enabled {
        return Box::new(NoopNotifier);
    }
    #[cfg(feature = "sound")]
    let backend = RodioBackend::new();
    #[cfg(not(feature = "sound"))]
    let backend = BellBackend::stderr();
    Box::new(SoundNotifier::from_config(backend, config))
}
