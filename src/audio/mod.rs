//! Background music playback
//!
//! This module handles:
//! - Loading the music track from its reference (URL or path)
//! - The `Playback` seam the app drives
//! - Playing through the default output device with rodio (output.rs)
//!
//! When to play is decided by the audio gate in `state::audio`; this module
//! only does what it is told.

pub mod output;

use std::fmt;
use std::sync::Arc;

use crate::fetch::{FetchError, Fetcher};

pub use output::{RodioPlayback, UnavailablePlayback};

/// Default background music when neither the invitation file nor the
/// command line provides one
pub const DEFAULT_AUDIO_SOURCE: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";

/// Why playback could not start
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    #[error("no audio output available: {0}")]
    NoOutput(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("unsupported audio data: {0}")]
    Decode(String),
    #[error("no track loaded")]
    NotLoaded,
}

/// An encoded music track held in memory
#[derive(Clone)]
pub struct Track {
    pub reference: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("reference", &self.reference)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// A playback backend.
///
/// `play` reports failure instead of panicking; the caller hands the result
/// to the audio gate. All methods are called from the UI thread.
pub trait Playback {
    /// Has a track been loaded successfully?
    fn is_loaded(&self) -> bool;

    /// Replace the current track. The new track starts paused.
    fn load(&mut self, track: &Track) -> Result<(), PlaybackError>;

    /// Set the volume as a fraction of maximum
    fn set_volume(&mut self, volume: f32);

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);
}

/// Download or read the track behind `reference`
pub async fn load_track(fetcher: Fetcher, reference: String) -> Result<Track, PlaybackError> {
    let bytes = fetcher.fetch_bytes(reference.clone()).await?;
    tracing::info!(source = %reference, size = bytes.len(), "🎵 music track loaded");
    Ok(Track { reference, bytes })
}

/// Open the default output device, degrading to a silent backend when the
/// machine has no audio output
pub fn open_default_output() -> Box<dyn Playback> {
    match RodioPlayback::open() {
        Ok(playback) => Box::new(playback),
        Err(error) => {
            tracing::warn!(%error, "background music disabled");
            Box::new(UnavailablePlayback::new(error.to_string()))
        }
    }
}
