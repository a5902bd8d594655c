use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{Playback, PlaybackError, Track};

/// Plays the track in a loop on the default output device.
///
/// `OutputStream` must stay alive for as long as anything is playing, and
/// it is not `Send`, so this lives in the app state on the UI thread.
pub struct RodioPlayback {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioPlayback {
    pub fn open() -> Result<Self, PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|err| PlaybackError::NoOutput(err.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
            volume: 1.0,
        })
    }
}

impl Playback for RodioPlayback {
    fn is_loaded(&self) -> bool {
        self.sink.is_some()
    }

    fn load(&mut self, track: &Track) -> Result<(), PlaybackError> {
        let decoder = Decoder::new(Cursor::new(track.bytes.clone()))
            .map_err(|err| PlaybackError::Decode(err.to_string()))?;
        let sink =
            Sink::try_new(&self.handle).map_err(|err| PlaybackError::NoOutput(err.to_string()))?;

        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder.repeat_infinite());

        if let Some(previous) = self.sink.replace(sink) {
            previous.stop();
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let sink = self.sink.as_ref().ok_or(PlaybackError::NotLoaded)?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }
}

/// Stand-in used when no output device could be opened.
///
/// Accepts tracks but every start fails, which the audio gate logs and
/// shows as paused.
#[derive(Debug)]
pub struct UnavailablePlayback {
    reason: String,
    loaded: bool,
}

impl UnavailablePlayback {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            loaded: false,
        }
    }
}

impl Playback for UnavailablePlayback {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn load(&mut self, _track: &Track) -> Result<(), PlaybackError> {
        self.loaded = true;
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn play(&mut self) -> Result<(), PlaybackError> {
        Err(PlaybackError::NoOutput(self.reason.clone()))
    }

    fn pause(&mut self) {}
}
