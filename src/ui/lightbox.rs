use iced::widget::{
    button, center, container, horizontal_space, image, mouse_area, opaque, row, text, Column,
    Space,
};
use iced::{border, Background, Color, Element, Length};

use crate::state::gallery::Gallery;
use crate::Message;

/// Full-screen viewer over the gallery; `None` at the app level means closed.
///
/// The viewer holds an index into the gallery, not a copy of the entry, so
/// `clamp` must run after every gallery mutation to keep the index live.
#[derive(Debug, Clone)]
pub struct Lightbox {
    index: usize,
    /// Set when the full-size fetch for the current entry failed
    error: Option<String>,
}

impl Lightbox {
    pub fn open(index: usize) -> Self {
        Self { index, error: None }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Keep the viewer pointing at a live entry after the gallery changes.
    /// Returns false when the gallery is empty and the viewer must close.
    pub fn clamp(&mut self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        if self.index >= len {
            self.index = len - 1;
        }
        true
    }

    /// Advance with wrap-around. Clears any failure marker so the new
    /// entry gets a fresh fetch.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
            self.error = None;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = if self.index == 0 { len - 1 } else { self.index - 1 };
            self.error = None;
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }
}

/// Overlay: dimmed backdrop (click closes), image panel with caption,
/// position indicator and navigation controls.
pub fn view<'a>(lightbox: &'a Lightbox, gallery: &'a Gallery) -> Element<'a, Message> {
    let Some(entry) = gallery.get(lightbox.index) else {
        // clamp runs after every mutation, so this never draws
        return Space::new(Length::Shrink, Length::Shrink).into();
    };

    let picture: Element<'a, Message> = if let Some(handle) = &entry.full_image {
        image(handle.clone()).into()
    } else if let Some(error) = &lightbox.error {
        text(format!("Could not load image: {}", error)).size(16).into()
    } else {
        text("Loading full image...").size(16).into()
    };

    let position = format!("{} of {}", lightbox.index + 1, gallery.len());
    let caption = row![
        text(&entry.hit.tags).size(16),
        horizontal_space(),
        text(position).size(14),
    ]
    .spacing(16);

    let controls = row![
        button("< Prev").on_press(Message::LightboxPrev).padding(8),
        button("Close").on_press(Message::LightboxClosed).padding(8),
        button("Next >").on_press(Message::LightboxNext).padding(8),
    ]
    .spacing(12);

    let panel = container(
        Column::with_children(vec![picture, caption.into(), controls.into()])
            .spacing(12)
            .align_x(iced::Alignment::Center),
    )
    .padding(16)
    .style(|_theme| container::Style {
        background: Some(Background::Color(Color::from_rgb8(0x20, 0x20, 0x24))),
        text_color: Some(Color::WHITE),
        border: border::rounded(10),
        ..container::Style::default()
    });

    // Clicks on the panel stay on the panel; clicks on the backdrop close.
    opaque(
        mouse_area(
            center(opaque(panel)).style(|_theme| container::Style {
                background: Some(Background::Color(Color {
                    a: 0.85,
                    ..Color::BLACK
                })),
                ..container::Style::default()
            }),
        )
        .on_press(Message::LightboxClosed),
    )
}
