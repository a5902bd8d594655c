//! Page state module
//!
//! This module holds all of the invitation's interactive state:
//! - Shared data structures (data.rs)
//! - Overlay visibility flags (overlay.rs)
//! - Gallery cursor (gallery.rs)
//! - Click sparkles and their expiry (effects.rs)
//! - The first-interaction audio gate (audio.rs)
//! - Pointer position for parallax (pointer.rs)
//! - The page-level context tying them together (page.rs)

pub mod audio;
pub mod data;
pub mod effects;
pub mod gallery;
pub mod overlay;
pub mod page;
pub mod pointer;
