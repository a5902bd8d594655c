//! User interface
//!
//! - `scene.rs` - what is visible, as plain data
//! - `render.rs` - scene to iced widgets
//! - `backdrop.rs` - animated canvas layers (background, sparkles)
//! - `photos.rs` - photo loading and decoded image cache

pub mod backdrop;
pub mod photos;
pub mod render;
pub mod scene;
