use iced::widget::image::Image;
use iced::widget::{
    button, canvas, center, column, container, horizontal_space, mouse_area, opaque, row,
    scrollable, stack, text, Column, Row,
};
use iced::{Alignment, Background, Border, Color, ContentFit, Element, Length, Theme};

use super::backdrop::{Backdrop, HeartHalo, SparkleLayer};
use super::photos::{PhotoCache, PhotoStatus};
use super::scene::{
    Action, Emphasis, GallerySlide, Icon, IconButton, Item, MapPanel, Scene, Thumbnail,
};
use crate::Message;

const PINK_500: Color = Color {
    r: 0.925,
    g: 0.282,
    b: 0.600,
    a: 1.0,
};
const PINK_800: Color = Color {
    r: 0.616,
    g: 0.090,
    b: 0.302,
    a: 1.0,
};
const GRAY_600: Color = Color {
    r: 0.294,
    g: 0.333,
    b: 0.388,
    a: 1.0,
};

/// Build the whole window from a scene
pub fn page<'a>(
    scene: Scene,
    photos: &'a PhotoCache,
    backdrop: Backdrop,
    sparkles: SparkleLayer,
) -> Element<'a, Message> {
    let Scene {
        landing,
        details,
        gallery,
        map,
        audio_toggle,
    } = scene;
    let elapsed = backdrop.elapsed;

    let mut content = Column::new()
        .push(items(landing, photos, elapsed, 32))
        .spacing(48)
        .padding(64)
        .width(Length::Fill)
        .align_x(Alignment::Center);

    if let Some(details) = details {
        content = content.push(card(items(details, photos, elapsed, 40)));
    }

    let music = container(icon_button(audio_toggle, 22))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
        .align_x(Alignment::End)
        .align_y(Alignment::End);

    let mut layers: Element<'a, Message> = stack![
        canvas(backdrop).width(Length::Fill).height(Length::Fill),
        scrollable(content).height(Length::Fill),
        music,
    ]
    .into();

    // Only the dimmed area around an overlay sends `dismiss`; presses on the
    // overlay's own content stop at the `opaque` wrapper inside `modal`
    if let Some(slide) = gallery {
        let dismiss = slide.dismiss.clone();
        layers = modal(layers, gallery_slide(slide, photos), dismiss);
    }

    if let Some(panel) = map {
        let dismiss = panel.dismiss.clone();
        layers = modal(layers, map_panel(panel, photos, elapsed), dismiss);
    }

    // Sparkles are drawn above everything, overlays included
    stack![
        layers,
        canvas(sparkles).width(Length::Fill).height(Length::Fill),
    ]
    .into()
}

/// Layer `content` over `base` on a dimmed backdrop.
///
/// Presses on the backdrop send `on_blur`; the inner `opaque` keeps presses
/// on the content itself from reaching the backdrop.
fn modal<'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(Background::Color(Color {
                    a: 0.8,
                    ..Color::BLACK
                })),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

fn card<'a>(content: Element<'a, Message>) -> Element<'a, Message> {
    container(content)
        .padding(32)
        .max_width(896)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color {
                a: 0.85,
                ..Color::WHITE
            })),
            border: Border {
                color: Color {
                    a: 0.4,
                    ..PINK_500
                },
                width: 1.0,
                radius: 16.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn items<'a>(
    items: Vec<Item>,
    photos: &'a PhotoCache,
    elapsed: f32,
    spacing: u16,
) -> Element<'a, Message> {
    items
        .into_iter()
        .fold(Column::new(), |column, entry| column.push(item(entry, photos, elapsed)))
        .spacing(spacing)
        .align_x(Alignment::Center)
        .into()
}

fn item<'a>(item: Item, photos: &'a PhotoCache, elapsed: f32) -> Element<'a, Message> {
    match item {
        Item::Icon(Icon::Heart) => stack![
            canvas(HeartHalo { elapsed })
                .width(Length::Fixed(128.0))
                .height(Length::Fixed(128.0)),
            center(text(Icon::Heart.glyph()).size(64).color(PINK_500)),
        ]
        .width(Length::Fixed(128.0))
        .height(Length::Fixed(128.0))
        .into(),
        Item::Icon(icon) => text(icon.glyph()).size(64).color(PINK_500).into(),
        Item::Heading(heading) => text(heading).size(64).color(PINK_800).into(),
        Item::Subheading(line) => text(line).size(24).color(GRAY_600).into(),
        Item::Title(title) => text(title).size(40).color(PINK_800).into(),
        Item::Text(line) => text(line).size(18).into(),
        Item::Caption(line) => text(line).size(11).color(GRAY_600).into(),
        Item::Button(action) => action_button(action),
        Item::Detail {
            icon,
            text: line,
            action,
        } => {
            let mut detail = row![
                text(icon.glyph()).size(20).color(PINK_500),
                text(line).size(18).color(GRAY_600),
            ]
            .spacing(8)
            .align_y(Alignment::Center);

            if let Some(action) = action {
                detail = detail.push(action_button(action));
            }
            detail.into()
        }
        Item::Preview {
            photo_id,
            alt,
            caption,
            on_press,
        } => {
            let picture = photo(photos, photo_id, alt, Length::Fixed(448.0), Length::Fixed(299.0));
            button(column![picture, text(caption).size(16)].align_x(Alignment::Center).spacing(8))
                .on_press(on_press)
                .style(button::text)
                .into()
        }
    }
}

fn action_button<'a>(action: Action) -> Element<'a, Message> {
    let style = match action.emphasis {
        Emphasis::Primary => button::primary,
        Emphasis::Outline => button::secondary,
        Emphasis::Ghost => button::text,
    };

    button(text(action.label).size(18))
        .on_press(action.on_press)
        .padding([12, 32])
        .style(style)
        .into()
}

fn icon_button<'a>(control: IconButton, size: u16) -> Element<'a, Message> {
    button(text(control.icon.glyph()).size(size))
        .on_press(control.on_press)
        .padding(12)
        .style(button::secondary)
        .into()
}

/// The photo behind `photo_id`, or its description while loading or if it
/// could not be loaded
fn photo<'a>(
    photos: &'a PhotoCache,
    photo_id: u32,
    alt: String,
    width: Length,
    height: Length,
) -> Element<'a, Message> {
    match photos.status(photo_id) {
        PhotoStatus::Ready(loaded) => Image::new(loaded.full)
            .width(width)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        PhotoStatus::Loading => placeholder(format!("Loading {}…", alt), width, height),
        PhotoStatus::Failed => placeholder(alt, width, height),
    }
}

fn placeholder<'a>(label: String, width: Length, height: Length) -> Element<'a, Message> {
    container(text(label).size(16).color(GRAY_600))
        .width(width)
        .height(height)
        .center_x(width)
        .center_y(height)
        .into()
}

fn gallery_slide<'a>(slide: GallerySlide, photos: &'a PhotoCache) -> Element<'a, Message> {
    let GallerySlide {
        photo_id,
        alt,
        counter,
        close,
        previous,
        next,
        thumbnails,
        ..
    } = slide;

    let viewer = row![
        icon_button(previous, 24),
        photo(photos, photo_id, alt, Length::Fixed(768.0), Length::Fixed(512.0)),
        icon_button(next, 24),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let strip = thumbnails
        .into_iter()
        .fold(Row::new(), |strip, thumbnail| strip.push(thumbnail_button(thumbnail, photos)))
        .spacing(8);

    column![
        row![horizontal_space(), icon_button(close, 20)],
        viewer,
        text(counter).size(14).color(Color::WHITE),
        strip,
    ]
    .spacing(12)
    .align_x(Alignment::Center)
    .into()
}

fn thumbnail_button<'a>(thumbnail: Thumbnail, photos: &'a PhotoCache) -> Element<'a, Message> {
    let content: Element<'a, Message> = match photos.thumbnail(thumbnail.photo_id) {
        Some(handle) => Image::new(handle.clone()).width(40).height(40).into(),
        None => text(format!("{}", thumbnail.index + 1)).size(14).into(),
    };

    let selected = thumbnail.selected;
    button(content)
        .on_press(thumbnail.on_press)
        .padding(2)
        .style(move |theme: &Theme, status| {
            let base = button::secondary(theme, status);
            button::Style {
                border: Border {
                    color: if selected { PINK_500 } else { Color::TRANSPARENT },
                    width: 2.0,
                    radius: 6.0.into(),
                },
                ..base
            }
        })
        .into()
}

fn map_panel<'a>(panel: MapPanel, photos: &'a PhotoCache, elapsed: f32) -> Element<'a, Message> {
    let MapPanel { close, items: body, .. } = panel;

    card(
        column![
            row![horizontal_space(), icon_button(close, 18)],
            items(body, photos, elapsed, 16),
        ]
        .width(Length::Fixed(640.0))
        .into(),
    )
}
