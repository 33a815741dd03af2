use crate::error::{ArtworkError, Result};
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// MIME type of the embedded rendition
pub const PNG_MIME_TYPE: &str = "image/png";

/// A decoded cover image plus its PNG encoding
///
/// The PNG is produced once in [`CoverArt::decode`], so every file tagged
/// from the same `CoverArt` embeds byte-identical pictures.
#[derive(Debug, Clone)]
pub struct CoverArt {
    image: DynamicImage,
    png: Vec<u8>,
}

impl CoverArt {
    /// Decode an encoded source image and prepare its PNG rendition
    ///
    /// # Errors
    /// `ArtworkError::Empty` for an empty source, `ArtworkError::Decode` when
    /// the bytes are not a supported image
    pub fn decode(source: &[u8]) -> Result<Self> {
        if source.is_empty() {
            return Err(ArtworkError::Empty);
        }

        let image = image::load_from_memory(source).map_err(ArtworkError::Decode)?;

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(ArtworkError::Encode)?;

        tracing::debug!(
            "Prepared cover {}x{} ({} PNG bytes)",
            image.width(),
            image.height(),
            png.get_ref().len()
        );

        Ok(Self {
            image,
            png: png.into_inner(),
        })
    }

    /// PNG bytes to embed in audio files
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Bits per pixel of the decoded image (24 for RGB, 32 for RGBA, ...)
    pub fn color_depth(&self) -> u32 {
        u32::from(self.image.color().bits_per_pixel())
    }

    /// Write a JPEG rendition of the cover to `path`
    ///
    /// JPEG has no alpha channel, so the image is flattened to RGB first.
    pub fn save_jpeg(&self, path: &Path) -> Result<()> {
        let rgb = DynamicImage::ImageRgb8(self.image.to_rgb8());

        let mut jpeg = Cursor::new(Vec::new());
        rgb.write_to(&mut jpeg, ImageFormat::Jpeg)
            .map_err(ArtworkError::Encode)?;

        fs::write(path, jpeg.into_inner())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn encoded(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_jpeg_source_into_png() {
        let source = encoded(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([200, 10, 10]))),
            ImageFormat::Jpeg,
        );

        let cover = CoverArt::decode(&source).unwrap();
        assert_eq!(cover.width(), 4);
        assert_eq!(cover.height(), 3);
        assert_eq!(cover.color_depth(), 24);
        assert_eq!(&cover.png_bytes()[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn png_rendition_is_stable() {
        let source = encoded(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]))),
            ImageFormat::Png,
        );

        let first = CoverArt::decode(&source).unwrap();
        let second = first.clone();
        assert_eq!(first.png_bytes(), second.png_bytes());
        assert_eq!(first.color_depth(), 32);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(CoverArt::decode(b""), Err(ArtworkError::Empty)));
        assert!(matches!(
            CoverArt::decode(b"definitely not an image"),
            Err(ArtworkError::Decode(_))
        ));
    }

    #[test]
    fn saves_jpeg_even_with_alpha() {
        let temp = TempDir::new().unwrap();
        let source = encoded(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 128]))),
            ImageFormat::Png,
        );
        let cover = CoverArt::decode(&source).unwrap();

        let path = temp.path().join("cover.jpg");
        cover.save_jpeg(&path).unwrap();

        let written = fs::read(&path).unwrap();
        assert_eq!(&written[..2], &[0xFF, 0xD8]);
    }
}
