use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use super::ToneSpec;
use crate::error::NotifyError;

/// Low-level playback used by [`super::SoundNotifier`].
pub trait AudioBackend {
    /// Play a media file. Errors when the file cannot be loaded or played.
    fn play_file(&self, path: &Path) -> Result<(), NotifyError>;
    /// Synthesize and play a sine tone.
    fn play_tone(&self, tone: &ToneSpec) -> Result<(), NotifyError>;
}

/// Backend for builds without audio output: files are unavailable and the
/// tone degrades to the ASCII bell.
pub struct BellBackend {
    out: Mutex<Box<dyn Write + Send>>,
}

impl BellBackend {
    pub fn stderr() -> Self {
        Self::with_writer(std::io::stderr())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl AudioBackend for BellBackend {
    fn play_file(&self, path: &Path) -> Result<(), NotifyError> {
        if !path.exists() {
            return Err(NotifyError::AssetUnavailable(format!(
                "{} not found",
                path.display()
            )));
        }
        Err(NotifyError::AssetUnavailable(format!(
            "{}: built without audio playback",
            path.display()
        )))
    }

    fn play_tone(&self, _tone: &ToneSpec) -> Result<(), NotifyError> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| NotifyError::Output(e.to_string()))?;
        out.write_all(b"\x07")
            .and_then(|()| out.flush())
            .map_err(|e| NotifyError::Output(e.to_string()))
    }
}

#[cfg(feature = "sound")]
pub use rodio_backend::RodioBackend;

#[cfg(feature = "sound")]
mod rodio_backend {
    use std::f32::consts::PI;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use rodio::{Decoder, OutputStream, Sink, Source};

    use super::AudioBackend;
    use crate::error::NotifyError;
    use crate::notify::ToneSpec;

    const SAMPLE_RATE: u32 = 44_100;

    type BoxedSource = Box<dyn Source<Item = f32> + Send>;

    /// Audio output through rodio.
    ///
    /// Each cue plays on its own short-lived thread because the output
    /// stream is not `Send`. The call returns once playback has started or
    /// failed to start, not when it ends.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RodioBackend;

    impl RodioBackend {
        pub fn new() -> Self {
            Self
        }
    }

    impl AudioBackend for RodioBackend {
        fn play_file(&self, path: &Path) -> Result<(), NotifyError> {
            let file = File::open(path)
                .map_err(|e| NotifyError::AssetUnavailable(format!("{}: {e}", path.display())))?;
            let decoder = Decoder::new(BufReader::new(file))
                .map_err(|e| NotifyError::AssetUnavailable(format!("{}: {e}", path.display())))?;
            spawn_playback("notify-sound", move || {
                Ok(Box::new(decoder.convert_samples::<f32>()) as BoxedSource)
            })
        }

        fn play_tone(&self, tone: &ToneSpec) -> Result<(), NotifyError> {
            let tone = *tone;
            spawn_playback("notify-tone", move || {
                Ok(Box::new(Tone::new(tone)) as BoxedSource)
            })
        }
    }

    fn spawn_playback<F>(name: &str, make_source: F) -> Result<(), NotifyError>
    where
        F: FnOnce() -> Result<BoxedSource, NotifyError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let started: Result<(OutputStream, Sink), NotifyError> = (|| {
                    let source = make_source()?;
                    let (stream, handle) = OutputStream::try_default()
                        .map_err(|e| NotifyError::Output(format!("Failed to create audio output stream: {e}")))?;
                    let sink = Sink::try_new(&handle)
                        .map_err(|e| NotifyError::Output(format!("Failed to create audio sink: {e}")))?;
                    sink.append(source);
                    Ok((stream, sink))
                })();
                match started {
                    Ok((_stream, sink)) => {
                        let _ = tx.send(Ok(()));
                        sink.sleep_until_end();
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e));
                    }
                }
            })
            .map_err(|e| NotifyError::Output(e.to_string()))?;
        rx.recv()
            .map_err(|e| NotifyError::Output(e.to_string()))?
    }

    /// Finite mono sine wave at a fixed gain.
    struct Tone {
        frequency: f32,
        gain: f32,
        num_sample: usize,
        total_samples: usize,
    }

    impl Tone {
        fn new(spec: ToneSpec) -> Self {
            let total_samples = (u64::from(SAMPLE_RATE) * spec.duration_ms / 1000) as usize;
            Self {
                frequency: spec.frequency_hz,
                gain: spec.gain.clamp(0.0, 1.0),
                num_sample: 0,
                total_samples,
            }
        }
    }

    impl Iterator for Tone {
        type Item = f32;

        fn next(&mut self) -> Option<Self::Item> {
            if self.num_sample >= self.total_samples {
                return None;
            }
            let t = self.num_sample as f32 / SAMPLE_RATE as f32;
            self.num_sample += 1;
            Some((2.0 * PI * self.frequency * t).sin() * self.gain)
        }
    }

    impl Source for Tone {
        fn current_frame_len(&self) -> Option<usize> {
            Some(self.total_samples - self.num_sample)
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            SAMPLE_RATE
        }

        fn total_duration(&self) -> Option<Duration> {
            Some(Duration::from_secs_f64(
                self.total_samples as f64 / f64::from(SAMPLE_RATE),
            ))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bell_backend_rings_for_tone() {
        let buf = SharedBuf::default();
        let backend = BellBackend::with_writer(buf.clone());
        backend.play_tone(&ToneSpec::default()).unwrap();
        assert_eq!(buf.0.lock().unwrap().as_slice(), b"\x07");
    }

    #[test]
    fn bell_backend_cannot_play_files() {
        let backend = BellBackend::with_writer(SharedBuf::default());
        let missing = backend.play_file(Path::new("/definitely/not/here.mp3"));
        assert!(matches!(missing, Err(NotifyError::AssetUnavailable(m)) if m.contains("not found")));
    }
}
