use std::time::Instant;

use super::audio::{AudioCommand, AudioGate};
use super::data::{Photo, Position};
use super::effects::{EffectId, EffectManager};
use super::gallery::{GalleryError, GalleryNavigator};
use super::overlay::OverlayState;
use super::pointer::PointerTracker;

/// Everything a document-level click caused
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickOutcome {
    /// The sparkle left at the pointer; schedule its expiry
    pub sparkle: EffectId,
    /// Set only for the click that activated the audio gate
    pub audio: Option<AudioCommand>,
}

/// The page-level context handed to every component.
///
/// Each component owns its own state; the only shared input is the
/// document click stream, which is fanned out in [`PageContext::on_click`].
#[derive(Debug)]
pub struct PageContext {
    pub overlays: OverlayState,
    pub gallery: GalleryNavigator,
    pub effects: EffectManager,
    pub audio: AudioGate,
    pub pointer: PointerTracker,
}

impl PageContext {
    /// Build the context for a photo collection. An empty collection is fatal.
    pub fn new(photos: Vec<Photo>) -> Result<Self, GalleryError> {
        Ok(Self {
            overlays: OverlayState::new(),
            gallery: GalleryNavigator::new(photos)?,
            effects: EffectManager::new(),
            audio: AudioGate::new(),
            pointer: PointerTracker::new(),
        })
    }

    pub fn on_pointer_moved(&mut self, position: Position) {
        self.pointer.update(position);
    }

    /// A click anywhere in the window: leave a sparkle where the pointer
    /// is and give the audio gate its chance to activate.
    pub fn on_click(&mut self, now: Instant) -> ClickOutcome {
        let at = self.pointer.current_position();
        ClickOutcome {
            sparkle: self.effects.spawn(at, now),
            audio: self.audio.on_interaction(),
        }
    }

    /// Release listeners, overlays and transient effects when the page goes
    /// away. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.audio.detach() {
            tracing::debug!("audio gate torn down before first interaction");
        }
        self.overlays.close_all();
        self.effects.clear();
    }
}
