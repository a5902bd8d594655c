//! What is on screen, as plain data
//!
//! A `Scene` is rebuilt from the page context on every view. The renderer
//! turns it into widgets; tests query it directly ("is this text visible?",
//! "what does pressing this button send?").

use crate::config::InvitationConfig;
use crate::state::data::Overlay;
use crate::state::page::PageContext;
use crate::Message;

pub const HEADING: &str = "Wedding Invitation";
pub const SUBHEADING: &str = "Join us in celebrating our special day";
pub const OPEN_LABEL: &str = "Open Invitation";
pub const CLOSE_LABEL: &str = "Close";
pub const VIEW_GALLERY_LABEL: &str = "View Gallery";
pub const VIEW_MAP_LABEL: &str = "View on map";
pub const DIRECTIONS_LABEL: &str = "Get Directions";
pub const MUTE_LABEL: &str = "Mute background music";
pub const PLAY_LABEL: &str = "Play background music";

/// Icons, identified by a stable test id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Heart,
    Calendar,
    Clock,
    MapPin,
    Close,
    Previous,
    Next,
    VolumeOn,
    VolumeOff,
}

impl Icon {
    pub fn test_id(self) -> &'static str {
        match self {
            Icon::Heart => "heart-icon",
            Icon::Calendar => "calendar-icon",
            Icon::Clock => "clock-icon",
            Icon::MapPin => "map-pin-icon",
            Icon::Close => "close-icon",
            Icon::Previous => "chevron-left-icon",
            Icon::Next => "chevron-right-icon",
            Icon::VolumeOn => "volume-icon",
            Icon::VolumeOff => "volume-off-icon",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Heart => "♥",
            Icon::Calendar => "📅",
            Icon::Clock => "🕓",
            Icon::MapPin => "📍",
            Icon::Close => "✕",
            Icon::Previous => "‹",
            Icon::Next => "›",
            Icon::VolumeOn => "🔊",
            Icon::VolumeOff => "🔇",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Primary,
    Outline,
    Ghost,
}

/// A labelled button
#[derive(Debug, Clone)]
pub struct Action {
    pub label: String,
    pub on_press: Message,
    pub emphasis: Emphasis,
}

impl Action {
    fn new(label: &str, on_press: Message, emphasis: Emphasis) -> Self {
        Self {
            label: label.to_string(),
            on_press,
            emphasis,
        }
    }
}

/// A button showing only an icon; the label is for accessibility
#[derive(Debug, Clone)]
pub struct IconButton {
    pub icon: Icon,
    pub aria_label: String,
    pub on_press: Message,
}

impl IconButton {
    fn new(icon: Icon, aria_label: &str, on_press: Message) -> Self {
        Self {
            icon,
            aria_label: aria_label.to_string(),
            on_press,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Item {
    Icon(Icon),
    Heading(String),
    Subheading(String),
    Title(String),
    Text(String),
    /// Small print, e.g. a reference the app cannot display itself
    Caption(String),
    Button(Action),
    /// An icon and a line of text, with an optional inline action
    Detail {
        icon: Icon,
        text: String,
        action: Option<Action>,
    },
    /// A photo that opens the gallery when pressed
    Preview {
        photo_id: u32,
        alt: String,
        caption: String,
        on_press: Message,
    },
}

#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub index: usize,
    pub photo_id: u32,
    pub alt: String,
    pub selected: bool,
    pub on_press: Message,
}

/// The gallery overlay
#[derive(Debug, Clone)]
pub struct GallerySlide {
    pub photo_id: u32,
    pub alt: String,
    /// "current / total", 1-based
    pub counter: String,
    pub close: IconButton,
    pub previous: IconButton,
    pub next: IconButton,
    pub thumbnails: Vec<Thumbnail>,
    /// Sent when the backdrop around the slide is pressed
    pub dismiss: Message,
}

/// The map overlay
#[derive(Debug, Clone)]
pub struct MapPanel {
    pub close: IconButton,
    pub items: Vec<Item>,
    pub dismiss: Message,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub landing: Vec<Item>,
    pub details: Option<Vec<Item>>,
    pub gallery: Option<GallerySlide>,
    pub map: Option<MapPanel>,
    pub audio_toggle: IconButton,
}

impl Scene {
    pub fn build(page: &PageContext, config: &InvitationConfig) -> Self {
        let overlays = &page.overlays;

        Self {
            landing: landing(),
            details: overlays
                .is_open(Overlay::Details)
                .then(|| details(page, config)),
            gallery: overlays.is_open(Overlay::Gallery).then(|| gallery(page)),
            map: overlays.is_open(Overlay::Map).then(|| map(config)),
            audio_toggle: audio_toggle(page.audio.wants_playing()),
        }
    }

    /// Every visible line of text (button labels excluded)
    pub fn texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();

        for item in self.items() {
            match item {
                Item::Heading(text)
                | Item::Subheading(text)
                | Item::Title(text)
                | Item::Text(text)
                | Item::Caption(text)
                | Item::Detail { text, .. } => texts.push(text.as_str()),
                Item::Icon(_) | Item::Button(_) | Item::Preview { .. } => {}
            }
        }

        if let Some(slide) = &self.gallery {
            texts.push(slide.counter.as_str());
        }
        texts
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }

    /// The message sent by the button with this label or accessible label.
    ///
    /// Overlays are searched topmost first: map, gallery, details, landing,
    /// then the audio toggle.
    pub fn button(&self, label: &str) -> Option<Message> {
        self.actions()
            .into_iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, message)| message.clone())
    }

    pub fn has_icon(&self, icon: Icon) -> bool {
        let in_items = self.items().any(|item| match item {
            Item::Icon(candidate) | Item::Detail { icon: candidate, .. } => *candidate == icon,
            _ => false,
        });
        in_items || self.icon_buttons().any(|button| button.icon == icon)
    }

    pub fn audio_toggle(&self) -> &IconButton {
        &self.audio_toggle
    }

    /// Visible items, topmost layer first
    fn items(&self) -> impl Iterator<Item = &Item> {
        let map = self.map.iter().flat_map(|panel| panel.items.iter());
        let details = self.details.iter().flatten();
        map.chain(details).chain(self.landing.iter())
    }

    fn icon_buttons(&self) -> impl Iterator<Item = &IconButton> {
        let map = self.map.iter().map(|panel| &panel.close);
        let gallery = self
            .gallery
            .iter()
            .flat_map(|slide| [&slide.close, &slide.previous, &slide.next]);
        map.chain(gallery).chain(std::iter::once(&self.audio_toggle))
    }

    /// Every pressable control as (label, message), topmost layer first
    fn actions(&self) -> Vec<(&str, &Message)> {
        let mut actions = Vec::new();

        if let Some(panel) = &self.map {
            actions.push((panel.close.aria_label.as_str(), &panel.close.on_press));
            collect_actions(&panel.items, &mut actions);
        }

        if let Some(slide) = &self.gallery {
            for control in [&slide.close, &slide.previous, &slide.next] {
                actions.push((control.aria_label.as_str(), &control.on_press));
            }
            for thumbnail in &slide.thumbnails {
                actions.push((thumbnail.alt.as_str(), &thumbnail.on_press));
            }
        }

        if let Some(items) = &self.details {
            collect_actions(items, &mut actions);
        }
        collect_actions(&self.landing, &mut actions);

        actions.push((self.audio_toggle.aria_label.as_str(), &self.audio_toggle.on_press));
        actions
    }
}

fn collect_actions<'a>(items: &'a [Item], actions: &mut Vec<(&'a str, &'a Message)>) {
    for item in items {
        match item {
            Item::Button(action)
            | Item::Detail {
                action: Some(action),
                ..
            } => actions.push((action.label.as_str(), &action.on_press)),
            Item::Preview {
                caption, on_press, ..
            } => actions.push((caption.as_str(), on_press)),
            _ => {}
        }
    }
}

fn landing() -> Vec<Item> {
    vec![
        Item::Icon(Icon::Heart),
        Item::Heading(HEADING.to_string()),
        Item::Subheading(SUBHEADING.to_string()),
        Item::Button(Action::new(
            OPEN_LABEL,
            Message::Open(Overlay::Details),
            Emphasis::Primary,
        )),
    ]
}

fn details(page: &PageContext, config: &InvitationConfig) -> Vec<Item> {
    // The preview always shows the first photo, whatever the gallery cursor says
    let cover = &page.gallery.photos()[0];

    vec![
        Item::Title(config.couple.clone()),
        Item::Preview {
            photo_id: cover.id,
            alt: cover.alt.clone(),
            caption: VIEW_GALLERY_LABEL.to_string(),
            on_press: Message::Open(Overlay::Gallery),
        },
        Item::Text(config.description.clone()),
        Item::Detail {
            icon: Icon::Calendar,
            text: config.date.clone(),
            action: None,
        },
        Item::Detail {
            icon: Icon::Clock,
            text: config.time.clone(),
            action: None,
        },
        Item::Detail {
            icon: Icon::MapPin,
            text: config.address.clone(),
            action: Some(Action::new(
                VIEW_MAP_LABEL,
                Message::Open(Overlay::Map),
                Emphasis::Ghost,
            )),
        },
        Item::Button(Action::new(
            CLOSE_LABEL,
            Message::Close(Overlay::Details),
            Emphasis::Outline,
        )),
    ]
}

fn gallery(page: &PageContext) -> GallerySlide {
    let gallery = &page.gallery;
    let current = gallery.current();

    let thumbnails = gallery
        .photos()
        .iter()
        .enumerate()
        .map(|(index, photo)| Thumbnail {
            index,
            photo_id: photo.id,
            alt: photo.alt.clone(),
            selected: index == gallery.index(),
            on_press: Message::SelectPhoto(index),
        })
        .collect();

    GallerySlide {
        photo_id: current.id,
        alt: current.alt.clone(),
        counter: format!("{} / {}", gallery.index() + 1, gallery.len()),
        close: IconButton::new(Icon::Close, "Close gallery", Message::Close(Overlay::Gallery)),
        previous: IconButton::new(Icon::Previous, "Previous photo", Message::PreviousPhoto),
        next: IconButton::new(Icon::Next, "Next photo", Message::NextPhoto),
        thumbnails,
        dismiss: Message::Close(Overlay::Gallery),
    }
}

fn map(config: &InvitationConfig) -> MapPanel {
    MapPanel {
        close: IconButton::new(Icon::Close, "Close map", Message::Close(Overlay::Map)),
        items: vec![
            Item::Title(config.venue_name.clone()),
            Item::Text(config.address.clone()),
            // No embedded map view; the embed reference is shown as-is
            Item::Caption(config.map_embed_url.clone()),
            Item::Button(Action::new(
                DIRECTIONS_LABEL,
                Message::GetDirections,
                Emphasis::Primary,
            )),
            Item::Button(Action::new(
                CLOSE_LABEL,
                Message::Close(Overlay::Map),
                Emphasis::Outline,
            )),
        ],
        dismiss: Message::Close(Overlay::Map),
    }
}

fn audio_toggle(playing: bool) -> IconButton {
    if playing {
        IconButton::new(Icon::VolumeOn, MUTE_LABEL, Message::ToggleAudio)
    } else {
        IconButton::new(Icon::VolumeOff, PLAY_LABEL, Message::ToggleAudio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::default_photos;

    fn page() -> PageContext {
        PageContext::new(default_photos()).unwrap()
    }

    #[test]
    fn test_landing_only_at_start() {
        let scene = Scene::build(&page(), &InvitationConfig::default());

        assert!(scene.contains_text(HEADING));
        assert!(scene.contains_text(SUBHEADING));
        assert!(scene.has_icon(Icon::Heart));
        assert!(!scene.has_icon(Icon::Calendar));
        assert!(scene.details.is_none() && scene.gallery.is_none() && scene.map.is_none());
        assert!(matches!(
            scene.button(OPEN_LABEL),
            Some(Message::Open(Overlay::Details))
        ));
        assert_eq!(scene.audio_toggle().aria_label, PLAY_LABEL);
    }

    #[test]
    fn test_gallery_counter_and_selection() {
        let mut page = page();
        page.overlays.open(Overlay::Gallery);
        page.gallery.select(3).unwrap();

        let scene = Scene::build(&page, &InvitationConfig::default());
        let slide = scene.gallery.as_ref().unwrap();

        assert_eq!(slide.counter, "4 / 5");
        assert_eq!(slide.alt, "Sarah and John hiking");
        let selected: Vec<usize> = slide
            .thumbnails
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.index)
            .collect();
        assert_eq!(selected, vec![3]);
        assert!(matches!(
            scene.button("Sarah and John in park"),
            Some(Message::SelectPhoto(1))
        ));
    }

    #[test]
    fn test_preview_always_shows_first_photo() {
        let mut page = page();
        page.overlays.open(Overlay::Details);
        page.gallery.select(4).unwrap();

        let scene = Scene::build(&page, &InvitationConfig::default());

        let preview = scene
            .details
            .iter()
            .flatten()
            .find_map(|item| match item {
                Item::Preview { photo_id, .. } => Some(*photo_id),
                _ => None,
            });
        assert_eq!(preview, Some(1));
    }

    #[test]
    fn test_close_button_prefers_topmost_overlay() {
        let mut page = page();
        page.overlays.open(Overlay::Details);
        page.overlays.open(Overlay::Map);

        let scene = Scene::build(&page, &InvitationConfig::default());

        assert!(scene.contains_text("Wedding Venue"));
        assert!(scene.contains_text(&InvitationConfig::default().map_embed_url));
        assert!(matches!(
            scene.button(CLOSE_LABEL),
            Some(Message::Close(Overlay::Map))
        ));
        assert!(matches!(scene.button(DIRECTIONS_LABEL), Some(Message::GetDirections)));
    }

    #[test]
    fn test_audio_toggle_label_follows_playback() {
        let mut page = page();
        page.audio.on_interaction();
        page.audio.resolve(Ok(()));

        let scene = Scene::build(&page, &InvitationConfig::default());

        assert_eq!(scene.audio_toggle().aria_label, MUTE_LABEL);
        assert!(scene.has_icon(Icon::VolumeOn));
    }
}
