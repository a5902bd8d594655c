use super::data::Overlay;

/// Visibility flags for the details panel, gallery and map overlays.
///
/// The three flags are independent: closing the details panel does not
/// close an open gallery or map. The UI only offers the gallery and map
/// triggers from inside the details panel, but nothing here enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    details_open: bool,
    gallery_open: bool,
    map_open: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an overlay. Opening an already open overlay is a no-op.
    pub fn open(&mut self, overlay: Overlay) {
        let flag = self.flag_mut(overlay);
        if !*flag {
            *flag = true;
            tracing::debug!(?overlay, "overlay opened");
        }
    }

    /// Hide an overlay. Closing an already closed overlay is a no-op.
    pub fn close(&mut self, overlay: Overlay) {
        let flag = self.flag_mut(overlay);
        if *flag {
            *flag = false;
            tracing::debug!(?overlay, "overlay closed");
        }
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Details => self.details_open,
            Overlay::Gallery => self.gallery_open,
            Overlay::Map => self.map_open,
        }
    }

    /// Close every overlay
    pub fn close_all(&mut self) {
        for overlay in Overlay::ALL {
            self.close(overlay);
        }
    }

    fn flag_mut(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::Details => &mut self.details_open,
            Overlay::Gallery => &mut self.gallery_open,
            Overlay::Map => &mut self.map_open,
        }
    }
}
