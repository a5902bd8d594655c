use super::data::Photo;

/// Errors raised by the gallery navigator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    /// The gallery needs at least one photo
    #[error("the photo gallery is empty")]
    Empty,
    /// A thumbnail selection pointed outside the collection
    #[error("photo index {index} is out of range (gallery has {len} photos)")]
    OutOfRange { index: usize, len: usize },
}

/// Cursor over a fixed, non-empty, ordered photo collection.
///
/// Stepping wraps around at both ends. The collection never changes after
/// construction, so `current()` can never fail.
#[derive(Debug, Clone)]
pub struct GalleryNavigator {
    photos: Vec<Photo>,
    cursor: usize,
}

impl GalleryNavigator {
    /// Create a navigator positioned on the first photo.
    pub fn new(photos: Vec<Photo>) -> Result<Self, GalleryError> {
        if photos.is_empty() {
            return Err(GalleryError::Empty);
        }
        Ok(Self { photos, cursor: 0 })
    }

    /// Step forward, wrapping from the last photo back to the first
    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1) % self.photos.len();
    }

    /// Step backward, wrapping from the first photo to the last
    pub fn previous(&mut self) {
        let len = self.photos.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    /// Jump straight to a photo (thumbnail picking).
    ///
    /// An out-of-range index is rejected and leaves the cursor untouched.
    pub fn select(&mut self, index: usize) -> Result<(), GalleryError> {
        if index >= self.photos.len() {
            return Err(GalleryError::OutOfRange {
                index,
                len: self.photos.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    pub fn current(&self) -> &Photo {
        &self.photos[self.cursor]
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::default_photos;

    fn navigator() -> GalleryNavigator {
        GalleryNavigator::new(default_photos()).unwrap()
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        assert_eq!(GalleryNavigator::new(Vec::new()).unwrap_err(), GalleryError::Empty);
    }

    #[test]
    fn test_next_wraps_after_full_cycle() {
        let mut gallery = navigator();
        for _ in 0..5 {
            gallery.next();
        }
        assert_eq!(gallery.index(), 0);
        assert_eq!(gallery.current().id, 1);
    }

    #[test]
    fn test_previous_from_first_goes_to_last() {
        let mut gallery = navigator();
        gallery.previous();
        assert_eq!(gallery.index(), 4);
        assert_eq!(gallery.current().alt, "Sarah and John at dinner");
    }

    #[test]
    fn test_mixed_steps_stay_in_range() {
        let mut gallery = navigator();
        // A fixed but irregular walk: forward-heavy, then backward-heavy
        let steps = [1, 1, -1, 1, 1, 1, 1, -1, -1, -1, -1, -1, -1, -1, 1, -1];
        let mut expected: i64 = 0;

        for step in steps {
            if step > 0 {
                gallery.next();
            } else {
                gallery.previous();
            }
            expected = (expected + step).rem_euclid(5);
            assert!(gallery.index() < gallery.len());
            assert_eq!(gallery.index() as i64, expected);
        }
    }

    #[test]
    fn test_select_sets_current_photo() {
        let mut gallery = navigator();
        for index in 0..gallery.len() {
            gallery.select(index).unwrap();
            assert_eq!(gallery.current(), &gallery.photos()[index]);
        }
    }

    #[test]
    fn test_select_out_of_range_keeps_cursor() {
        let mut gallery = navigator();
        gallery.select(2).unwrap();

        let err = gallery.select(5).unwrap_err();

        assert_eq!(err, GalleryError::OutOfRange { index: 5, len: 5 });
        assert_eq!(gallery.index(), 2);
    }

    #[test]
    fn test_single_photo_gallery_stays_put() {
        let mut gallery = GalleryNavigator::new(default_photos()[..1].to_vec()).unwrap();
        gallery.next();
        gallery.previous();
        assert_eq!(gallery.index(), 0);
    }
}
