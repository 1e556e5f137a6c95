use std::time::Duration;

use iced::widget::{container, mouse_area, text, Column};
use iced::{alignment, border, Background, Color, Element, Length};

use crate::Message;

/// Banners never grow past this width
pub const MAX_WIDTH: f32 = 432.0;

/// Banners dismiss themselves after this long
pub const DISMISS_AFTER: Duration = Duration::from_secs(4);

/// Banner severity. At most one banner per severity is showing at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// One transient banner
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

/// The active banners plus the id counter their expiry timers match on.
///
/// Pushing a banner evicts any showing banner of the same severity, so an
/// expiry timer can fire for a banner that is long gone; `dismiss` treats
/// that as a no-op.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    next_id: u64,
    active: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> &[Toast] {
        &self.active
    }

    /// Show a banner, replacing any active banner of the same severity.
    /// Returns the id the expiry timer must carry.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.active.retain(|toast| toast.severity != severity);
        self.next_id += 1;
        self.active.push(Toast {
            id: self.next_id,
            severity,
            message: message.into(),
        });
        self.next_id
    }

    /// Drop a banner by id. Ids of already-replaced banners miss silently.
    pub fn dismiss(&mut self, id: u64) {
        self.active.retain(|toast| toast.id != id);
    }
}

/// Top-right overlay with the active banners. Clicking one dismisses it
/// ahead of its timer.
pub fn view(toasts: &Toasts) -> Element<'_, Message> {
    let banners = toasts.active().iter().map(banner).collect::<Vec<_>>();

    container(Column::with_children(banners).spacing(10))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .padding(16)
        .into()
}

fn banner(toast: &Toast) -> Element<'_, Message> {
    let background = match toast.severity {
        Severity::Success => Color::from_rgb8(0x59, 0xA1, 0x0D),
        Severity::Error => Color::from_rgb8(0xEF, 0x40, 0x40),
    };
    let id = toast.id;

    mouse_area(
        container(text(&toast.message).size(16))
            .padding(14)
            .max_width(MAX_WIDTH)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(background)),
                text_color: Some(Color::WHITE),
                border: border::rounded(6),
                ..container::Style::default()
            }),
    )
    .on_press(Message::ToastDismissed(id))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut toasts = Toasts::new();
        let first = toasts.push(Severity::Success, "one");
        let second = toasts.push(Severity::Error, "two");
        assert!(second > first);
        assert_eq!(toasts.active().len(), 2);
    }

    #[test]
    fn test_push_replaces_same_severity() {
        let mut toasts = Toasts::new();
        toasts.push(Severity::Success, "first");
        toasts.push(Severity::Success, "second");

        let successes: Vec<_> = toasts
            .active()
            .iter()
            .filter(|toast| toast.severity == Severity::Success)
            .collect();
        assert_eq!(successes.len(), 1);
        assert_eq!(successes[0].message, "second");
    }

    #[test]
    fn test_severities_do_not_evict_each_other() {
        let mut toasts = Toasts::new();
        toasts.push(Severity::Success, "found images");
        toasts.push(Severity::Error, "network down");
        assert_eq!(toasts.active().len(), 2);
    }

    #[test]
    fn test_dismiss_removes_only_the_matching_banner() {
        let mut toasts = Toasts::new();
        let keep = toasts.push(Severity::Success, "keep");
        let drop = toasts.push(Severity::Error, "drop");

        toasts.dismiss(drop);
        assert_eq!(toasts.active().len(), 1);
        assert_eq!(toasts.active()[0].id, keep);
    }

    #[test]
    fn test_dismissing_a_replaced_banner_is_a_no_op() {
        let mut toasts = Toasts::new();
        let stale = toasts.push(Severity::Success, "first");
        toasts.push(Severity::Success, "second");

        toasts.dismiss(stale);
        assert_eq!(toasts.active().len(), 1);
        assert_eq!(toasts.active()[0].message, "second");
    }
}
