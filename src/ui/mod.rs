/// UI building blocks
///
/// This module holds the widgets layered on top of the root view:
/// - The wrapping thumbnail grid (gallery.rs)
/// - The full-screen image viewer (lightbox.rs)
/// - Transient notification banners (toast.rs)

pub mod gallery;
pub mod lightbox;
pub mod toast;
