//! Pure Rust codec backend on top of the `image` crate.
//!
//! ## Format mapping
//!
//! | Output extension | Encoder | `quality` | `optimize` |
//! |---|---|---|---|
//! | `jpg`, `jpeg` | `JpegEncoder::new_with_quality` | yes | — |
//! | `png` | `PngEncoder` | — | `CompressionType::Best` |
//! | `tif`, `tiff`, `webp` | `DynamicImage::write_to` | — | — |
//!
//! Formats without a quality knob still go through the search; their size
//! simply does not move between attempts, so an unreachable budget ends in
//! the usual exhaustion error.

use super::backend::{BackendError, ImageBackend};
use super::params::EncodeParams;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the format-to-encoder mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// JPEG has no alpha channel and only 8-bit samples.
fn jpeg_compatible(img: &DynamicImage) -> Cow<'_, DynamicImage> {
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(img),
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

fn write_image(
    img: &DynamicImage,
    ext: &str,
    writer: &mut BufWriter<File>,
    params: &EncodeParams,
) -> Result<(), String> {
    let quality = params.quality.value() as u8;
    match ext {
        "jpg" | "jpeg" => {
            let encoder = JpegEncoder::new_with_quality(&mut *writer, quality);
            jpeg_compatible(img)
                .write_with_encoder(encoder)
                .map_err(|e| e.to_string())
        }
        "png" => {
            let compression = if params.optimize {
                CompressionType::Best
            } else {
                CompressionType::Default
            };
            let encoder =
                PngEncoder::new_with_quality(&mut *writer, compression, FilterType::Adaptive);
            img.write_with_encoder(encoder).map_err(|e| e.to_string())
        }
        other => {
            let format = ImageFormat::from_extension(other)
                .filter(|f| f.writing_enabled())
                .ok_or_else(|| format!("no encoder for '.{other}'"))?;
            img.write_to(writer, format).map_err(|e| e.to_string())
        }
    }
}

/// Whether the backend can write files with this extension.
pub fn can_encode(path: &Path) -> bool {
    match extension_of(path).as_str() {
        "jpg" | "jpeg" | "png" => true,
        other => ImageFormat::from_extension(other).is_some_and(|f| f.writing_enabled()),
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let decode_err = |reason: String| BackendError::Decode {
            path: path.to_path_buf(),
            reason,
        };
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| decode_err(e.to_string()))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        output: &Path,
        params: &EncodeParams,
    ) -> Result<u64, BackendError> {
        if !can_encode(output) {
            return Err(BackendError::UnsupportedFormat(extension_of(output)));
        }
        let file = File::create(output)?;
        let mut writer = BufWriter::new(file);
        write_image(image, &extension_of(output), &mut writer, params).map_err(|reason| {
            BackendError::Encode {
                path: output.to_path_buf(),
                reason,
            }
        })?;
        writer.flush()?;
        drop(writer);
        Ok(std::fs::metadata(output)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use image::{RgbImage, RgbaImage};

    /// A noisy RGB image: gradients alone compress too well to show quality effects.
    fn noisy_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let n = x.wrapping_mul(7919) ^ y.wrapping_mul(104_729);
            image::Rgb([(n % 256) as u8, ((x * 3 + y) % 256) as u8, (n >> 3) as u8])
        }))
    }

    #[test]
    fn encode_jpeg_reports_written_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.jpg");
        let backend = RustBackend::new();

        let size = backend
            .encode(
                &noisy_image(64, 48),
                &output,
                &EncodeParams::new(Quality::new(80), true),
            )
            .unwrap();

        assert_eq!(size, std::fs::metadata(&output).unwrap().len());
        let decoded = backend.decode(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn lower_jpeg_quality_gives_smaller_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = RustBackend::new();
        let img = noisy_image(128, 128);

        let high = backend
            .encode(
                &img,
                &tmp.path().join("high.jpg"),
                &EncodeParams::new(Quality::new(95), true),
            )
            .unwrap();
        let low = backend
            .encode(
                &img,
                &tmp.path().join("low.jpg"),
                &EncodeParams::new(Quality::new(10), true),
            )
            .unwrap();

        assert!(low < high, "q10 = {low} bytes, q95 = {high} bytes");
    }

    #[test]
    fn jpeg_accepts_images_with_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("alpha.jpg");
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, image::Rgba([1, 2, 3, 4])));

        RustBackend::new()
            .encode(&img, &output, &EncodeParams::new(Quality::new(90), true))
            .unwrap();
        assert!(output.exists());
    }

    #[test]
    fn encode_png_round_trips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.png");
        let backend = RustBackend::new();

        backend
            .encode(
                &noisy_image(20, 10),
                &output,
                &EncodeParams::new(Quality::new(50), true),
            )
            .unwrap();
        let decoded = backend.decode(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = RustBackend::new().encode(
            &noisy_image(4, 4),
            &tmp.path().join("out.xyz"),
            &EncodeParams::new(Quality::new(50), true),
        );
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(ext)) if ext == "xyz"));
    }

    #[test]
    fn avif_output_is_unsupported() {
        let tmp = tempfile::TempDir::new().unwrap();
        let output = tmp.path().join("out.avif");
        let result = RustBackend::new().encode(
            &noisy_image(4, 4),
            &output,
            &EncodeParams::new(Quality::new(80), true),
        );
        assert!(matches!(result, Err(BackendError::UnsupportedFormat(ext)) if ext == "avif"));
        assert!(!output.exists());
    }

    #[test]
    fn decode_nonexistent_file_errors() {
        let result = RustBackend::new().decode(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn decode_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("notes.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = RustBackend::new().decode(&path);
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    #[test]
    fn can_encode_known_extensions() {
        assert!(can_encode(Path::new("a.JPG")));
        assert!(can_encode(Path::new("a.png")));
        assert!(!can_encode(Path::new("a.avif")));
        assert!(can_encode(Path::new("a.tiff")));
        assert!(!can_encode(Path::new("a.xyz")));
        assert!(!can_encode(Path::new("noext")));
    }
}
