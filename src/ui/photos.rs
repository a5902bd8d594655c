use ::image::imageops::FilterType;
use iced::widget::image::Handle;
use std::collections::HashMap;
use std::sync::Arc;

use crate::fetch::{FetchError, Fetcher};
use crate::state::data::Photo;

/// Size of gallery thumbnails (square)
const THUMBNAIL_SIZE: u32 = 96;

/// A decoded photo ready for display
#[derive(Debug, Clone)]
pub struct LoadedPhoto {
    pub full: Handle,
    pub thumbnail: Handle,
    pub width: u32,
    pub height: u32,
}

/// Where each photo stands
#[derive(Debug, Clone)]
pub enum PhotoStatus {
    Loading,
    Ready(LoadedPhoto),
    /// Shown as its alt text from now on
    Failed,
}

/// Decoded photos by photo ID
#[derive(Debug, Default)]
pub struct PhotoCache {
    photos: HashMap<u32, PhotoStatus>,
}

impl PhotoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a load
    pub fn insert(&mut self, id: u32, result: Result<LoadedPhoto, FetchError>) {
        let status = match result {
            Ok(photo) => {
                tracing::debug!(id, width = photo.width, height = photo.height, "photo ready");
                PhotoStatus::Ready(photo)
            }
            Err(error) => {
                tracing::warn!(id, %error, "photo unavailable, showing its description");
                PhotoStatus::Failed
            }
        };
        self.photos.insert(id, status);
    }

    pub fn status(&self, id: u32) -> PhotoStatus {
        self.photos.get(&id).cloned().unwrap_or(PhotoStatus::Loading)
    }

    pub fn thumbnail(&self, id: u32) -> Option<&Handle> {
        match self.photos.get(&id) {
            Some(PhotoStatus::Ready(photo)) => Some(&photo.thumbnail),
            _ => None,
        }
    }
}

/// Fetch a photo and decode it on a blocking worker
pub async fn load(fetcher: Fetcher, photo: Photo) -> Result<LoadedPhoto, FetchError> {
    let bytes = fetcher.fetch_bytes(photo.src.clone()).await?;
    let reference = photo.src;

    // Decoding and resizing is CPU-bound, keep it off the async workers
    let worker_reference = reference.clone();
    tokio::task::spawn_blocking(move || decode(&worker_reference, bytes))
        .await
        .map_err(|err| FetchError::Decode {
            reference,
            reason: format!("decode task failed: {}", err),
        })?
}

/// Decode image bytes and build the square thumbnail
pub fn decode(reference: &str, bytes: Arc<[u8]>) -> Result<LoadedPhoto, FetchError> {
    let img = ::image::load_from_memory(&bytes).map_err(|err| FetchError::Decode {
        reference: reference.to_string(),
        reason: err.to_string(),
    })?;

    let thumbnail = img
        .resize_to_fill(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3)
        .to_rgba8();

    Ok(LoadedPhoto {
        full: Handle::from_bytes(bytes.to_vec()),
        thumbnail: Handle::from_rgba(thumbnail.width(), thumbnail.height(), thumbnail.into_raw()),
        width: img.width(),
        height: img.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Arc<[u8]> {
        let img = RgbaImage::from_pixel(width, height, Rgba([240, 180, 200, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        Arc::from(out.into_inner())
    }

    #[test]
    fn test_decode_keeps_original_dimensions() {
        let photo = decode("beach.png", png(300, 200)).unwrap();
        assert_eq!((photo.width, photo.height), (300, 200));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("beach.jpg", Arc::from(&b"definitely not a jpeg"[..])).unwrap_err();
        assert!(matches!(err, FetchError::Decode { reference, .. } if reference == "beach.jpg"));
    }

    #[test]
    fn test_cache_tracks_status() {
        let mut cache = PhotoCache::new();
        assert!(matches!(cache.status(1), PhotoStatus::Loading));

        cache.insert(1, decode("a.png", png(10, 10)));
        cache.insert(
            2,
            Err(FetchError::Http {
                url: "https://example.com/b.jpg".to_string(),
                reason: "404".to_string(),
            }),
        );

        assert!(matches!(cache.status(1), PhotoStatus::Ready(_)));
        assert!(cache.thumbnail(1).is_some());
        assert!(matches!(cache.status(2), PhotoStatus::Failed));
        assert!(cache.thumbnail(2).is_none());
    }

    #[tokio::test]
    async fn test_load_from_local_file() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::io::Write::write_all(&mut file, &png(40, 20)).unwrap();
        let photo = Photo::new(9, file.path().to_string_lossy(), "local photo");

        let loaded = load(Fetcher::new().unwrap(), photo).await.unwrap();

        assert_eq!((loaded.width, loaded.height), (40, 20));
    }
}
