//! Background music gate
//!
//! Platforms refuse to start audio before the user has interacted with the
//! page, so the music stays dormant until the first click anywhere. That
//! click activates the gate exactly once; afterwards only the dedicated
//! toggle control starts or pauses playback.

use crate::audio::PlaybackError;

/// Volume applied when the gate activates (fraction of maximum)
pub const DEFAULT_VOLUME: f32 = 0.3;

/// One-way activation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Inactive,
    Active,
}

/// Playback state, meaningful once the gate is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayingState {
    Paused,
    /// A start request is in flight. The toggle can still flip what
    /// happens once it lands.
    Starting,
    Playing,
}

/// The first-interaction listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listener {
    Registered,
    Detached,
}

/// What the playback backend should do next
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// First activation: apply the volume, then start playback
    Activate { volume: f32 },
    /// Start playback again after a pause or a failed start
    Resume,
    Pause,
}

#[derive(Debug)]
pub struct AudioGate {
    state: GateState,
    playing: PlayingState,
    /// Set when the toggle is pressed while `Starting`; the start is
    /// undone as soon as it succeeds
    pause_requested: bool,
    listener: Listener,
}

impl Default for AudioGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Inactive,
            playing: PlayingState::Paused,
            pause_requested: false,
            listener: Listener::Registered,
        }
    }

    /// Feed a document-wide click into the gate.
    ///
    /// Only the first click while the listener is registered activates the
    /// gate; the listener detaches itself in the process, so every later
    /// click returns `None`.
    pub fn on_interaction(&mut self) -> Option<AudioCommand> {
        if !self.detach() {
            return None;
        }
        Some(self.activate())
    }

    /// The explicit play/mute control.
    ///
    /// Pressing it before the first interaction counts as that interaction.
    /// While a start is in flight there is nothing to stop yet, so a press
    /// only flips the pending intent; [`AudioGate::resolve`] acts on it.
    pub fn toggle(&mut self) -> Option<AudioCommand> {
        if self.state == GateState::Inactive {
            return self.on_interaction();
        }

        match self.playing {
            PlayingState::Playing => {
                self.playing = PlayingState::Paused;
                tracing::debug!("background music paused");
                Some(AudioCommand::Pause)
            }
            PlayingState::Paused => {
                self.start();
                Some(AudioCommand::Resume)
            }
            PlayingState::Starting => {
                self.pause_requested = !self.pause_requested;
                tracing::debug!(
                    pause_requested = self.pause_requested,
                    "toggle pressed while music is starting"
                );
                None
            }
        }
    }

    /// Report the outcome of a start request.
    ///
    /// Failures are logged and leave the gate paused; they are never
    /// surfaced to the user. Returns `Pause` when the toggle was pressed
    /// while the start was in flight and the backend must be stopped again.
    pub fn resolve(&mut self, outcome: Result<(), PlaybackError>) -> Option<AudioCommand> {
        if self.playing != PlayingState::Starting {
            tracing::debug!(?outcome, "ignoring stale playback outcome");
            return None;
        }

        let pause_requested = std::mem::take(&mut self.pause_requested);
        match outcome {
            Ok(()) if pause_requested => {
                self.playing = PlayingState::Paused;
                tracing::debug!("background music started after it was muted, pausing");
                Some(AudioCommand::Pause)
            }
            Ok(()) => {
                self.playing = PlayingState::Playing;
                tracing::debug!("background music playing");
                None
            }
            Err(error) => {
                self.playing = PlayingState::Paused;
                tracing::warn!(%error, "could not start background music");
                None
            }
        }
    }

    /// Unregister the first-interaction listener.
    ///
    /// Returns true if this call detached it, false if it was already gone.
    pub fn detach(&mut self) -> bool {
        match self.listener {
            Listener::Registered => {
                self.listener = Listener::Detached;
                true
            }
            Listener::Detached => false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn playing(&self) -> PlayingState {
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing == PlayingState::Playing
    }

    /// What the toggle shows: playing, or starting and not muted since
    pub fn wants_playing(&self) -> bool {
        match self.playing {
            PlayingState::Playing => true,
            PlayingState::Starting => !self.pause_requested,
            PlayingState::Paused => false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listener == Listener::Registered
    }

    fn activate(&mut self) -> AudioCommand {
        self.state = GateState::Active;
        self.start();
        tracing::info!("🎵 first interaction, starting background music");
        AudioCommand::Activate {
            volume: DEFAULT_VOLUME,
        }
    }

    fn start(&mut self) {
        self.playing = PlayingState::Starting;
        self.pause_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked() -> PlaybackError {
        PlaybackError::NoOutput("blocked by platform policy".to_string())
    }

    #[test]
    fn test_starts_inactive_and_listening() {
        let gate = AudioGate::new();
        assert_eq!(gate.state(), GateState::Inactive);
        assert_eq!(gate.playing(), PlayingState::Paused);
        assert!(gate.is_listening());
    }

    #[test]
    fn test_first_click_activates_once() {
        let mut gate = AudioGate::new();

        let command = gate.on_interaction();
        assert_eq!(command, Some(AudioCommand::Activate { volume: 0.3 }));
        assert_eq!(gate.state(), GateState::Active);
        assert!(!gate.is_listening());

        // Second click before the start resolves
        assert_eq!(gate.on_interaction(), None);

        gate.resolve(Ok(()));
        assert!(gate.is_playing());

        // And after
        assert_eq!(gate.on_interaction(), None);
        assert!(gate.is_playing());
    }

    #[test]
    fn test_failed_start_still_activates_but_stays_paused() {
        let mut gate = AudioGate::new();
        gate.on_interaction();

        gate.resolve(Err(blocked()));

        assert_eq!(gate.state(), GateState::Active);
        assert_eq!(gate.playing(), PlayingState::Paused);
        assert!(!gate.is_listening());
        assert_eq!(gate.on_interaction(), None);
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let mut gate = AudioGate::new();
        gate.on_interaction();
        gate.resolve(Ok(()));

        assert_eq!(gate.toggle(), Some(AudioCommand::Pause));
        assert_eq!(gate.playing(), PlayingState::Paused);

        assert_eq!(gate.toggle(), Some(AudioCommand::Resume));
        assert_eq!(gate.playing(), PlayingState::Starting);

        gate.resolve(Ok(()));
        assert!(gate.is_playing());
    }

    #[test]
    fn test_failed_resume_leaves_paused() {
        let mut gate = AudioGate::new();
        gate.on_interaction();
        gate.resolve(Ok(()));
        gate.toggle();

        gate.toggle();
        gate.resolve(Err(blocked()));

        assert_eq!(gate.playing(), PlayingState::Paused);
    }

    #[test]
    fn test_toggle_before_first_click_activates() {
        let mut gate = AudioGate::new();

        assert_eq!(gate.toggle(), Some(AudioCommand::Activate { volume: DEFAULT_VOLUME }));
        // The document-level notification for the same click arrives second
        assert_eq!(gate.on_interaction(), None);
        assert_eq!(gate.playing(), PlayingState::Starting);
    }

    #[test]
    fn test_toggle_while_starting_pauses_once_started() {
        let mut gate = AudioGate::new();
        gate.on_interaction();
        assert!(gate.wants_playing());

        assert_eq!(gate.toggle(), None);
        assert_eq!(gate.playing(), PlayingState::Starting);
        assert!(!gate.wants_playing());

        assert_eq!(gate.resolve(Ok(())), Some(AudioCommand::Pause));
        assert_eq!(gate.playing(), PlayingState::Paused);
        assert!(!gate.wants_playing());

        // The next press starts from scratch
        assert_eq!(gate.toggle(), Some(AudioCommand::Resume));
        assert_eq!(gate.resolve(Ok(())), None);
        assert!(gate.is_playing());
    }

    #[test]
    fn test_second_toggle_while_starting_cancels_the_pause() {
        let mut gate = AudioGate::new();
        gate.on_interaction();

        gate.toggle();
        gate.toggle();

        assert!(gate.wants_playing());
        assert_eq!(gate.resolve(Ok(())), None);
        assert!(gate.is_playing());
    }

    #[test]
    fn test_failed_start_clears_pause_request() {
        let mut gate = AudioGate::new();
        gate.on_interaction();
        gate.toggle();

        assert_eq!(gate.resolve(Err(blocked())), None);
        assert_eq!(gate.playing(), PlayingState::Paused);

        gate.toggle();
        assert!(gate.wants_playing());
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let mut gate = AudioGate::new();
        gate.on_interaction();
        gate.resolve(Ok(()));
        gate.toggle();

        gate.resolve(Ok(()));

        assert_eq!(gate.playing(), PlayingState::Paused);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut gate = AudioGate::new();

        assert!(gate.detach());
        assert!(!gate.detach());

        // Torn down before firing: clicks no longer activate anything
        assert_eq!(gate.on_interaction(), None);
        assert_eq!(gate.state(), GateState::Inactive);
    }
}
