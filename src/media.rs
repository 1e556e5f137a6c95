/// Image download and decode pipeline
///
/// The gallery shows remote images, so every card needs its bytes fetched
/// and decoded before iced can draw them. Downloads run on the async
/// executor; decoding and resizing are CPU-bound and go through
/// `spawn_blocking` so the UI never stalls on a large JPEG.
use iced::widget::image::Handle;
use image::imageops::FilterType;

/// Bounding box for gallery thumbnails (aspect ratio is preserved)
pub const THUMB_WIDTH: u32 = 320;
pub const THUMB_HEIGHT: u32 = 214;

/// Bounding box for the lightbox image. Full-size downloads come in at
/// 1280px wide; anything larger is scaled down so the viewer always fits
/// the window.
const FULL_MAX_WIDTH: u32 = 1200;
const FULL_MAX_HEIGHT: u32 = 680;

/// Download and decode a gallery thumbnail.
pub async fn fetch_thumbnail(http: reqwest::Client, url: String) -> Result<Handle, String> {
    let bytes = download(http, url).await?;
    tokio::task::spawn_blocking(move || decode_thumbnail(&bytes))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Download and decode a full-size image for the lightbox.
pub async fn fetch_full(http: reqwest::Client, url: String) -> Result<Handle, String> {
    let bytes = download(http, url).await?;
    tokio::task::spawn_blocking(move || decode_full(&bytes))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Fetch raw image bytes. One attempt, like every other network call here.
async fn download(http: reqwest::Client, url: String) -> Result<Vec<u8>, String> {
    let response = http
        .get(url.as_str())
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| format!("Failed to download {}: {}", url, e))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Failed to read {}: {}", url, e))?;

    Ok(bytes.to_vec())
}

fn decode_thumbnail(bytes: &[u8]) -> Result<Handle, String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let pixels = thumbnail_pixels(decoded);
    let (width, height) = pixels.dimensions();
    Ok(Handle::from_rgba(width, height, pixels.into_raw()))
}

fn decode_full(bytes: &[u8]) -> Result<Handle, String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| format!("Failed to decode image: {}", e))?;
    let pixels = full_pixels(decoded);
    let (width, height) = pixels.dimensions();
    Ok(Handle::from_rgba(width, height, pixels.into_raw()))
}

/// Resize to the card size.
fn thumbnail_pixels(decoded: image::DynamicImage) -> image::RgbaImage {
    decoded
        .resize(THUMB_WIDTH, THUMB_HEIGHT, FilterType::Lanczos3)
        .to_rgba8()
}

/// Scale down to fit the viewer; images that already fit pass through.
fn full_pixels(decoded: image::DynamicImage) -> image::RgbaImage {
    let pixels = decoded.to_rgba8();
    if pixels.width() <= FULL_MAX_WIDTH && pixels.height() <= FULL_MAX_HEIGHT {
        return pixels;
    }
    image::DynamicImage::ImageRgba8(pixels)
        .resize(FULL_MAX_WIDTH, FULL_MAX_HEIGHT, FilterType::Lanczos3)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_thumbnail_fits_bounding_box_and_keeps_aspect() {
        let decoded = image::load_from_memory(&png_bytes(1280, 853)).unwrap();
        let pixels = thumbnail_pixels(decoded);

        assert!(pixels.width() <= THUMB_WIDTH);
        assert!(pixels.height() <= THUMB_HEIGHT);
        // 1280x853 is wider than the 320x214 box is tall, so width binds.
        let aspect = f64::from(pixels.width()) / f64::from(pixels.height());
        assert!((aspect - 1280.0 / 853.0).abs() < 0.05);
    }

    #[test]
    fn test_small_full_image_passes_through_unscaled() {
        let decoded = image::load_from_memory(&png_bytes(640, 480)).unwrap();
        let pixels = full_pixels(decoded);
        assert_eq!((pixels.width(), pixels.height()), (640, 480));
    }

    #[test]
    fn test_oversized_full_image_is_scaled_down() {
        let decoded = image::load_from_memory(&png_bytes(2560, 1440)).unwrap();
        let pixels = full_pixels(decoded);
        assert!(pixels.width() <= FULL_MAX_WIDTH);
        assert!(pixels.height() <= FULL_MAX_HEIGHT);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(decode_thumbnail(b"definitely not an image").is_err());
        assert!(decode_full(&[0u8; 64]).is_err());
    }

    #[test]
    fn test_decode_thumbnail_produces_a_handle() {
        assert!(decode_thumbnail(&png_bytes(640, 426)).is_ok());
    }
}
