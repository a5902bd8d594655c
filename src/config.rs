//! Invitation configuration
//!
//! The invitation text, date, venue, photos and music can be overridden by a
//! JSON file. Any field left out of the file keeps its built-in value, so an
//! empty object `{}` is a valid invitation.
//!
//! Lookup order:
//! 1. `--config <path>` on the command line (must exist)
//! 2. `<config dir>/wedding-invite/invitation.json`
//!    - Linux: ~/.config/wedding-invite/invitation.json
//!    - macOS: ~/Library/Application Support/wedding-invite/invitation.json
//!    - Windows: %APPDATA%\wedding-invite\invitation.json
//! 3. Built-in defaults

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_AUDIO_SOURCE;
use crate::state::data::{default_photos, Photo};

const MAP_EMBED_URL: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3022.2246782731376!2d-73.98784492394061!3d40.758889971383794!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x89c25855c6480299%3A0x55194ec5a1ae072e!2sTimes%20Square!5e0!3m2!1sen!2sus!4v1674338740400!5m2!1sen!2sus";
const DIRECTIONS_URL: &str = "https://maps.google.com/?q=Times+Square,+New+York,+NY";

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(name = "wedding-invite", about = "An animated wedding invitation")]
pub struct Args {
    /// JSON invitation file to load instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Background music: an http(s) URL or a local audio file
    #[arg(long)]
    pub audio: Option<String>,
}

/// Errors while loading the invitation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid invitation file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("the invitation needs at least one photo")]
    NoPhotos,
    #[error("photo id {0} is used more than once")]
    DuplicatePhoto(u32),
}

/// Everything the invitation shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationConfig {
    pub couple: String,
    pub description: String,
    /// Shown exactly as written, e.g. "Saturday, December 31st, 2024"
    pub date: String,
    /// Shown exactly as written, e.g. "4:00 PM"
    pub time: String,
    pub venue_name: String,
    pub address: String,
    /// Map embed reference, shown as small print in the map panel and
    /// never fetched by the app
    pub map_embed_url: String,
    /// Opened in the system browser by "Get Directions"
    pub directions_url: String,
    pub audio_source: String,
    pub photos: Vec<Photo>,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            couple: "Sarah & John".to_string(),
            description: "We are delighted to invite you to our wedding celebration".to_string(),
            date: "Saturday, December 31st, 2024".to_string(),
            time: "4:00 PM".to_string(),
            venue_name: "Wedding Venue".to_string(),
            address: "123 Wedding Lane, New York, NY 10001".to_string(),
            map_embed_url: MAP_EMBED_URL.to_string(),
            directions_url: DIRECTIONS_URL.to_string(),
            audio_source: DEFAULT_AUDIO_SOURCE.to_string(),
            photos: default_photos(),
        }
    }
}

impl InvitationConfig {
    /// Resolve the invitation from the command line, the default file
    /// location, or the built-in defaults (in that order)
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    tracing::info!("no invitation file, using built-in invitation");
                    Self::default()
                }
            },
        };

        if let Some(audio) = &args.audio {
            config.audio_source = audio.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load and validate an invitation file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!(path = %path.display(), "📁 invitation loaded");
        Ok(config)
    }

    /// Where the invitation file lives when `--config` is not given
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("wedding-invite");
        path.push("invitation.json");
        Some(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photos.is_empty() {
            return Err(ConfigError::NoPhotos);
        }

        let mut seen = HashSet::new();
        for photo in &self.photos {
            if !seen.insert(photo.id) {
                return Err(ConfigError::DuplicatePhoto(photo.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_match_the_invitation() {
        let config = InvitationConfig::default();
        assert_eq!(config.couple, "Sarah & John");
        assert_eq!(config.date, "Saturday, December 31st, 2024");
        assert_eq!(config.time, "4:00 PM");
        assert_eq!(config.address, "123 Wedding Lane, New York, NY 10001");
        assert_eq!(config.audio_source, DEFAULT_AUDIO_SOURCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "couple": "Ana & Luis", "date": "Sunday, June 22nd, 2025" }"#);

        let config = InvitationConfig::from_file(file.path()).unwrap();

        assert_eq!(config.couple, "Ana & Luis");
        assert_eq!(config.date, "Sunday, June 22nd, 2025");
        assert_eq!(config.time, "4:00 PM");
        assert_eq!(config.photos.len(), 5);
    }

    #[test]
    fn test_empty_photo_list_is_rejected() {
        let file = write_config(r#"{ "photos": [] }"#);

        let err = InvitationConfig::from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::NoPhotos));
    }

    #[test]
    fn test_duplicate_photo_ids_are_rejected() {
        let file = write_config(
            r#"{ "photos": [
                { "id": 7, "src": "a.jpg", "alt": "first" },
                { "id": 7, "src": "b.jpg", "alt": "second" }
            ] }"#,
        );

        let err = InvitationConfig::from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::DuplicatePhoto(7)));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let file = write_config("{ couple: ");
        let err = InvitationConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            config: Some(dir.path().join("invitation.json")),
            audio: None,
        };

        let err = InvitationConfig::resolve(&args).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_audio_flag_overrides_file() {
        let file = write_config(r#"{ "audio_source": "https://example.com/a.mp3" }"#);
        let args = Args {
            config: Some(file.path().to_path_buf()),
            audio: Some("/music/first-dance.ogg".to_string()),
        };

        let config = InvitationConfig::resolve(&args).unwrap();

        assert_eq!(config.audio_source, "/music/first-dance.ogg");
    }
}
