use iced::widget::image;

use crate::api::types::ImageHit;

/// Thumbnail lifecycle for one card
#[derive(Debug, Clone)]
pub enum ThumbState {
    /// Bytes still downloading or decoding
    Loading,
    /// Decoded and ready to draw
    Ready(image::Handle),
    /// Download or decode failed; the card keeps its placeholder
    Failed,
}

/// One search result as the gallery holds it
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub hit: ImageHit,
    pub thumbnail: ThumbState,
    /// Full-size handle, cached after the first lightbox view
    pub full_image: Option<image::Handle>,
}

impl GalleryEntry {
    fn new(hit: ImageHit) -> Self {
        Self {
            hit,
            thumbnail: ThumbState::Loading,
            full_image: None,
        }
    }
}

/// Ordered collection of entries for the current query.
///
/// Replaced on a new query, appended to on load-more, never reordered, so
/// an entry's index stays valid for the lifetime of its query session.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&GalleryEntry> {
        self.entries.get(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// New query: drop everything and start over from `hits`.
    /// Returns the index range of the added entries.
    pub fn replace(&mut self, hits: Vec<ImageHit>) -> std::ops::Range<usize> {
        self.entries = hits.into_iter().map(GalleryEntry::new).collect();
        0..self.entries.len()
    }

    /// Load-more: extend the gallery with the next page.
    /// Returns the index range of the added entries.
    pub fn append(&mut self, hits: Vec<ImageHit>) -> std::ops::Range<usize> {
        let start = self.entries.len();
        self.entries.extend(hits.into_iter().map(GalleryEntry::new));
        start..self.entries.len()
    }

    /// Out-of-range indexes are ignored; they can only come from a task
    /// whose query session has already been torn down.
    pub fn set_thumbnail(&mut self, index: usize, thumbnail: ThumbState) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.thumbnail = thumbnail;
        }
    }

    pub fn set_full_image(&mut self, index: usize, handle: image::Handle) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.full_image = Some(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(tag: &str) -> ImageHit {
        ImageHit {
            webformat_url: format!("https://img.test/{}_640.jpg", tag),
            large_image_url: format!("https://img.test/{}_1280.jpg", tag),
            tags: tag.to_string(),
            likes: 1,
            views: 2,
            comments: 3,
            downloads: 4,
        }
    }

    fn handle() -> image::Handle {
        image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn test_replace_clears_prior_entries() {
        let mut gallery = Gallery::new();
        gallery.replace(vec![hit("a"), hit("b")]);

        let range = gallery.replace(vec![hit("c")]);
        assert_eq!(range, 0..1);
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.get(0).unwrap().hit.tags, "c");
    }

    #[test]
    fn test_append_keeps_order_and_reports_new_range() {
        let mut gallery = Gallery::new();
        gallery.replace(vec![hit("a"), hit("b")]);

        let range = gallery.append(vec![hit("c"), hit("d")]);
        assert_eq!(range, 2..4);
        assert_eq!(gallery.len(), 4);
        assert_eq!(gallery.get(0).unwrap().hit.tags, "a");
        assert_eq!(gallery.get(3).unwrap().hit.tags, "d");
    }

    #[test]
    fn test_new_entries_start_without_images() {
        let mut gallery = Gallery::new();
        gallery.replace(vec![hit("a")]);

        let entry = gallery.get(0).unwrap();
        assert!(matches!(entry.thumbnail, ThumbState::Loading));
        assert!(entry.full_image.is_none());
    }

    #[test]
    fn test_set_thumbnail_out_of_range_is_a_no_op() {
        let mut gallery = Gallery::new();
        gallery.replace(vec![hit("a")]);

        gallery.set_thumbnail(5, ThumbState::Ready(handle()));
        gallery.set_full_image(5, handle());
        assert_eq!(gallery.len(), 1);
        assert!(matches!(gallery.get(0).unwrap().thumbnail, ThumbState::Loading));
    }

    #[test]
    fn test_set_images_land_on_the_right_entry() {
        let mut gallery = Gallery::new();
        gallery.replace(vec![hit("a"), hit("b")]);

        gallery.set_thumbnail(1, ThumbState::Ready(handle()));
        gallery.set_full_image(1, handle());

        assert!(matches!(gallery.get(0).unwrap().thumbnail, ThumbState::Loading));
        assert!(matches!(gallery.get(1).unwrap().thumbnail, ThumbState::Ready(_)));
        assert!(gallery.get(1).unwrap().full_image.is_some());
    }
}
