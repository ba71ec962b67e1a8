/// Photo download and decode
///
/// Tiles get a downscaled in-memory thumbnail; the lightbox gets the
/// original bytes and lets the widget decode them. All failures come back
/// as plain strings: a broken photo degrades that one tile, it never takes
/// the gallery down.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use tokio::task;

use crate::config::THUMBNAIL_SIZE;

/// Download a photo and decode it into a square-bounded thumbnail.
///
/// Decoding and resizing are CPU-heavy, so they run on a blocking task
/// instead of stalling the async executor.
pub async fn fetch_thumbnail(url: String) -> Result<Handle, String> {
    let bytes = fetch_bytes(&url).await?;

    task::spawn_blocking(move || decode_thumbnail(&bytes))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Download a photo at full size for the lightbox. The widget layer decodes
/// lazily from the raw bytes, mirroring an image element getting its src.
pub async fn fetch_photo(url: String) -> Result<Handle, String> {
    let bytes = fetch_bytes(&url).await?;
    Ok(Handle::from_bytes(bytes))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {} for {}", status.as_u16(), url));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("Read failed: {}", e))?;

    Ok(bytes.to_vec())
}

fn decode_thumbnail(bytes: &[u8]) -> Result<Handle, String> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image: {}", e))?;

    let thumbnail = decoded.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);
    let rgba = thumbnail.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_thumbnail_downscales() {
        // 512x512 solid grey PNG, encoded in memory
        let source = image::RgbaImage::from_pixel(512, 512, image::Rgba([128, 128, 128, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(source)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .unwrap();

        let handle = decode_thumbnail(&bytes);
        assert!(handle.is_ok());
    }

    #[test]
    fn test_decode_thumbnail_rejects_garbage() {
        assert!(decode_thumbnail(b"definitely not an image").is_err());
    }

    #[tokio::test]
    async fn test_fetch_bytes_reports_unreachable_host() {
        let result = fetch_bytes("http://127.0.0.1:1/never.jpg").await;
        assert!(result.is_err());
    }
}
