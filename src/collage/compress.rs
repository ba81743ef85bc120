/// Preview proxy generation
///
/// Preview requests re-render on every configuration tweak, so uploading
/// full-size originals each time would hammer both the network and the
/// rendering service. Instead every selected image gets a tiny JPEG proxy:
/// longest side capped at 100 px, quality 60. Originals are only uploaded
/// for the final render job.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use std::io::Cursor;

/// Longest side of a preview proxy, in pixels. Never upscaled.
pub const PREVIEW_LONG_SIDE: u32 = 100;

/// JPEG quality for preview proxies
pub const PREVIEW_JPEG_QUALITY: u8 = 60;

/// A downsampled stand-in for one selected image
#[derive(Debug, Clone)]
pub struct PreviewProxy {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Compress the whole selection into preview proxies.
///
/// Decode/re-encode is CPU-bound, so the work runs on the blocking pool.
/// Images that fail to decode are logged and skipped; the preview requester
/// falls back to originals when the proxy set is unusable.
pub async fn compress_selection(files: Vec<(String, Vec<u8>)>) -> Vec<PreviewProxy> {
    let result = tokio::task::spawn_blocking(move || {
        files
            .into_iter()
            .filter_map(|(name, bytes)| match compress_one(&bytes) {
                Ok(tiny) => Some(PreviewProxy {
                    file_name: proxy_name(&name),
                    bytes: tiny,
                }),
                Err(err) => {
                    log::warn!("preview compression failed for {}: {}", name, err);
                    None
                }
            })
            .collect()
    })
    .await;

    match result {
        Ok(proxies) => proxies,
        Err(err) => {
            log::error!("preview compression task panicked: {}", err);
            Vec::new()
        }
    }
}

/// Downscale one image so its longer side is at most 100 px and re-encode
/// it as a quality-60 JPEG.
pub fn compress_one(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let (width, height) = img.dimensions();
    let img = if width.max(height) > PREVIEW_LONG_SIDE {
        img.resize(PREVIEW_LONG_SIDE, PREVIEW_LONG_SIDE, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut out = Cursor::new(Vec::new());
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, PREVIEW_JPEG_QUALITY))?;
    Ok(out.into_inner())
}

/// "IMG_0001.CR2" -> "IMG_0001_preview.jpg"
pub fn proxy_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    format!("{stem}_preview.jpg")
}
