//! Shared data structures for the page state
//!
//! These structs represent the data model that flows between
//! the configuration layer, the page context and the UI layer.

use serde::{Deserialize, Serialize};

/// Represents a single photo in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Unique, stable ID (also defines display order in the default set)
    pub id: u32,
    /// Image reference: an http(s) URL or a local file path
    pub src: String,
    /// Accessible description, shown while the image is loading
    pub alt: String,
}

impl Photo {
    pub fn new(id: u32, src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// The overlays that can be layered above the landing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// The expandable invitation details panel
    Details,
    /// The full screen photo gallery
    Gallery,
    /// The venue map
    Map,
}

impl Overlay {
    pub const ALL: [Overlay; 3] = [Overlay::Details, Overlay::Gallery, Overlay::Map];
}

/// A pointer position in window coordinates (logical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<iced::Point> for Position {
    fn from(point: iced::Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Position> for iced::Point {
    fn from(position: Position) -> Self {
        iced::Point::new(position.x, position.y)
    }
}

/// The reference photo set shown when no invitation file overrides it
pub fn default_photos() -> Vec<Photo> {
    vec![
        Photo::new(
            1,
            "https://images.unsplash.com/photo-1519741497674-611481863552?q=80&w=600&auto=format&fit=crop",
            "Sarah and John on beach",
        ),
        Photo::new(
            2,
            "https://images.unsplash.com/photo-1529636798458-92182e662485?q=80&w=600&auto=format&fit=crop",
            "Sarah and John in park",
        ),
        Photo::new(
            3,
            "https://images.unsplash.com/photo-1537907510278-a5a2191f146a?q=80&w=600&auto=format&fit=crop",
            "Sarah and John at sunset",
        ),
        Photo::new(
            4,
            "https://images.unsplash.com/photo-1583939003579-730e3918a45a?q=80&w=600&auto=format&fit=crop",
            "Sarah and John hiking",
        ),
        Photo::new(
            5,
            "https://images.unsplash.com/photo-1591604466107-ec97de577aff?q=80&w=600&auto=format&fit=crop",
            "Sarah and John at dinner",
        ),
    ]
}
