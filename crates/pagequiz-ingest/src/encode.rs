//! Image encoding for transport.
//!
//! | Input | Payload | MIME type |
//! |---|---|---|
//! | jpg, jpeg | raw bytes | `image/jpeg` |
//! | png | raw bytes | `image/png` |
//! | gif | raw bytes | `image/gif` |
//! | webp | raw bytes | `image/webp` |
//! | heic, heif | decoded, converted to RGB if needed, JPEG q95 | `image/jpeg` |

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use pagequiz_core::model::ImagePart;

use crate::error::IngestError;

/// JPEG quality used when transcoding HEIC/HEIF pages.
pub const JPEG_QUALITY: u8 = 95;

const JPEG_MIME: &str = "image/jpeg";

/// MIME type for a pass-through image extension.
///
/// Unknown extensions fall back to JPEG.
pub fn mime_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => JPEG_MIME,
    }
}

fn is_heif(extension: &str) -> bool {
    extension.eq_ignore_ascii_case("heic") || extension.eq_ignore_ascii_case("heif")
}

/// Load one page image and encode it as base64 with its MIME type.
pub fn load_image(path: &Path) -> Result<ImagePart, IngestError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    if is_heif(extension) {
        let decoded = decode_heif(path)?;
        let bytes = transcode_to_jpeg(decoded).map_err(|e| IngestError::Convert {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "transcoded HEIF page to JPEG");
        return Ok(ImagePart {
            mime_type: JPEG_MIME.to_string(),
            data: STANDARD.encode(bytes),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| IngestError::ReadImage {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ImagePart {
        mime_type: mime_type_for(extension).to_string(),
        data: STANDARD.encode(bytes),
    })
}

/// Re-encode a decoded image as JPEG at [`JPEG_QUALITY`].
///
/// Color types JPEG cannot hold (alpha channels, 16-bit and float samples)
/// are flattened to 8-bit RGB first; 8-bit gray and RGB are kept as-is.
pub fn transcode_to_jpeg(image: DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let image = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    image.write_with_encoder(encoder)?;
    Ok(buffer)
}

#[cfg(feature = "heif")]
fn decode_heif(path: &Path) -> Result<DynamicImage, IngestError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let convert = |message: String| IngestError::Convert {
        path: path.to_path_buf(),
        message,
    };

    let path_str = path
        .to_str()
        .ok_or_else(|| convert("path is not valid UTF-8".into()))?;
    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_file(path_str).map_err(|e| convert(e.to_string()))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| convert(e.to_string()))?;

    let has_alpha = handle.has_alpha_channel();
    let (chroma, channels) = if has_alpha {
        (RgbChroma::Rgba, 4)
    } else {
        (RgbChroma::Rgb, 3)
    };

    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| convert(e.to_string()))?;
    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| convert("decoder returned no interleaved plane".into()))?;

    let width = plane.width;
    let height = plane.height;
    let row_len = width as usize * channels;

    // Rows may be padded to `stride` bytes.
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        pixels.extend_from_slice(&row[..row_len]);
    }

    let image = if has_alpha {
        image::RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
    } else {
        image::RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
    };
    image.ok_or_else(|| convert("decoded pixel buffer has the wrong size".into()))
}

#[cfg(not(feature = "heif"))]
fn decode_heif(path: &Path) -> Result<DynamicImage, IngestError> {
    Err(IngestError::HeifUnsupported {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn mime_types_by_extension() {
        assert_eq!(mime_type_for("jpg"), "image/jpeg");
        assert_eq!(mime_type_for("JPEG"), "image/jpeg");
        assert_eq!(mime_type_for("png"), "image/png");
        assert_eq!(mime_type_for("GIF"), "image/gif");
        assert_eq!(mime_type_for("webp"), "image/webp");
        assert_eq!(mime_type_for("bmp"), "image/jpeg");
    }

    #[test]
    fn passthrough_keeps_raw_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.PNG");
        std::fs::write(&path, b"not really a png").unwrap();

        let part = load_image(&path).unwrap();
        assert_eq!(part.mime_type, "image/png");
        assert_eq!(STANDARD.decode(&part.data).unwrap(), b"not really a png");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_image(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, IngestError::ReadImage { .. }));
    }

    #[test]
    fn alpha_image_transcodes_to_rgb_jpeg() {
        let rgba = RgbaImage::from_pixel(8, 6, Rgba([200, 30, 30, 128]));
        let bytes = transcode_to_jpeg(DynamicImage::ImageRgba8(rgba)).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn sixteen_bit_image_transcodes() {
        let img = DynamicImage::new_rgb16(4, 4);
        let bytes = transcode_to_jpeg(img).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn grayscale_stays_grayscale() {
        let img = DynamicImage::new_luma8(4, 4);
        let bytes = transcode_to_jpeg(img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(matches!(decoded, DynamicImage::ImageLuma8(_)));
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn heif_without_feature_is_explicit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.HEIC");
        std::fs::write(&path, b"ftypheic").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, IngestError::HeifUnsupported { .. }));
        assert!(err.to_string().contains("`heif` feature"));
    }

    #[cfg(feature = "heif")]
    fn heif_fixture() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/page-alpha.heif")
    }

    #[cfg(feature = "heif")]
    #[test]
    fn heif_page_becomes_rgb_jpeg() {
        let part = load_image(&heif_fixture()).unwrap();
        assert_eq!(part.mime_type, "image/jpeg");

        let bytes = STANDARD.decode(&part.data).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
        let (width, height) = decoded.dimensions();
        assert!(width > 0 && height > 0);
    }

    #[cfg(feature = "heif")]
    #[test]
    fn heic_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IMG_0001.HEIC");
        std::fs::copy(heif_fixture(), &path).unwrap();

        let part = load_image(&path).unwrap();
        assert_eq!(part.mime_type, "image/jpeg");
        let bytes = STANDARD.decode(&part.data).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    }

    #[cfg(feature = "heif")]
    #[test]
    fn corrupt_heif_is_a_convert_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.heic");
        std::fs::write(&path, b"definitely not a heif container").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, IngestError::Convert { .. }));
    }
}
