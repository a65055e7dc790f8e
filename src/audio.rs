use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{info, warn};

use crate::config::{VOLUME_DEFAULT, VOLUME_MAX, VOLUME_STEP};

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

struct Track {
    name: String,
    bytes: Arc<[u8]>,
}

/// Background music. Every failure in here is absorbed and logged; the game
/// keeps running without sound.
pub struct AudioManager {
    output: Option<Output>,
    track: Option<Track>,
    sink: Option<Sink>,
    enabled: bool,
    volume: i32,
}

impl AudioManager {
    /// A manager with no device and no track. Music can never start.
    pub fn silent() -> Self {
        Self {
            output: None,
            track: None,
            sink: None,
            enabled: false,
            volume: VOLUME_DEFAULT,
        }
    }

    /// Opens the default output device and preloads `music_path`.
    ///
    /// Fails only when there is no usable output device. A missing or
    /// undecodable track is logged and leaves the manager without music.
    pub fn init(music_path: &Path) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("no audio output device available")?;
        let mut audio = Self::silent();
        audio.output = Some(Output {
            _stream: stream,
            handle,
        });

        match load_track(music_path) {
            Ok(track) => {
                info!(track = %track.name, "music loaded");
                audio.track = Some(track);
            }
            Err(e) => {
                warn!(path = %music_path.display(), error = %format!("{e:#}"), "could not load music, playing without it");
            }
        }
        Ok(audio)
    }

    pub fn track_name(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.name.as_str())
    }

    pub fn toggle_music(&mut self) {
        self.enabled = !self.enabled;
        if self.enabled {
            match self.start_playback() {
                Ok(()) => info!(volume = self.volume_percent(), "music on"),
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "no music available to play");
                    self.enabled = false;
                }
            }
        } else {
            self.stop_playback();
            info!("music off");
        }
    }

    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, VOLUME_MAX);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.gain());
        }
        if self.enabled {
            info!(volume = self.volume_percent(), "music volume");
        }
    }

    pub fn increase_volume(&mut self) {
        self.set_volume(self.volume + VOLUME_STEP);
    }

    pub fn decrease_volume(&mut self) {
        self.set_volume(self.volume - VOLUME_STEP);
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn volume_percent(&self) -> i32 {
        self.volume * 100 / VOLUME_MAX
    }

    pub fn is_music_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_music_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.empty() && !sink.is_paused())
    }

    /// Stops playback and releases the track and the output device.
    pub fn cleanup(&mut self) {
        self.stop_playback();
        self.enabled = false;
        self.track = None;
        self.output = None;
    }

    fn start_playback(&mut self) -> Result<()> {
        let track = self.track.as_ref().context("no music track loaded")?;
        let output = self.output.as_ref().context("no audio output device")?;

        let source = Decoder::new(Cursor::new(Arc::clone(&track.bytes)))
            .with_context(|| format!("failed to decode {}", track.name))?;
        let sink = Sink::try_new(&output.handle).context("failed to open playback sink")?;
        sink.set_volume(self.gain());
        sink.append(source.repeat_infinite());
        self.sink = Some(sink);
        Ok(())
    }

    fn stop_playback(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn gain(&self) -> f32 {
        self.volume as f32 / VOLUME_MAX as f32
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn load_track(path: &Path) -> Result<Track> {
    let bytes: Arc<[u8]> = fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .into();
    // Decode the header once so a bad file is reported at startup.
    Decoder::new(Cursor::new(Arc::clone(&bytes))).context("unsupported audio format")?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Track { name, bytes })
}
