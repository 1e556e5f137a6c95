use iced::widget::{column, container, image, mouse_area, row, text};
use iced::{border, Alignment, Background, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;

use crate::media;
use crate::state::gallery::{Gallery, GalleryEntry, ThumbState};
use crate::Message;

/// Wrapping grid of result cards. Clicking a card opens the lightbox on
/// that entry.
pub fn view(gallery: &Gallery) -> Element<'_, Message> {
    gallery
        .entries()
        .iter()
        .enumerate()
        .fold(
            Wrap::new().spacing(16.0).line_spacing(16.0),
            |grid, (index, entry)| grid.push(card(index, entry)),
        )
        .into()
}

fn card(index: usize, entry: &GalleryEntry) -> Element<'_, Message> {
    let thumbnail: Element<'_, Message> = match &entry.thumbnail {
        ThumbState::Ready(handle) => image(handle.clone())
            .width(Length::Fixed(media::THUMB_WIDTH as f32))
            .height(Length::Fixed(media::THUMB_HEIGHT as f32))
            .content_fit(ContentFit::Cover)
            .into(),
        ThumbState::Loading => placeholder("Loading..."),
        ThumbState::Failed => placeholder("Image unavailable"),
    };

    let counters = row![
        counter("Likes", entry.hit.likes),
        counter("Views", entry.hit.views),
        counter("Comments", entry.hit.comments),
        counter("Downloads", entry.hit.downloads),
    ]
    .spacing(14);

    mouse_area(
        container(
            column![thumbnail, text(&entry.hit.tags).size(13), counters]
                .spacing(6)
                .width(Length::Fixed(media::THUMB_WIDTH as f32)),
        )
        .padding(8)
        .style(card_style),
    )
    .on_press(Message::LightboxOpened(index))
    .into()
}

fn counter(label: &'static str, value: u64) -> Element<'static, Message> {
    column![text(label).size(12), text(value.to_string()).size(13)]
        .align_x(Alignment::Center)
        .spacing(2)
        .into()
}

/// Fixed-size stand-in drawn while the thumbnail is in flight or after its
/// download failed.
fn placeholder(label: &str) -> Element<'_, Message> {
    container(text(label).size(13))
        .center_x(Length::Fixed(media::THUMB_WIDTH as f32))
        .center_y(Length::Fixed(media::THUMB_HEIGHT as f32))
        .style(card_style)
        .into()
}

fn card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: border::rounded(8),
        ..container::Style::default()
    }
}
