use crate::error::ImageError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

pub const UPLOAD_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Which input channel produced an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Upload,
}

/// A decoded bitmap, held for the duration of one interaction.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    image: DynamicImage,
    source: ImageSource,
}

impl ImagePayload {
    /// Decodes PNG or JPEG bytes. Anything else is rejected.
    pub fn from_bytes(bytes: &[u8], source: ImageSource) -> Result<Self, ImageError> {
        let format =
            image::guess_format(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(ImageError::UnsupportedFormat(format!("{:?}", format)));
        }

        let image = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        log::debug!(
            "Decoded {:?} image from {:?}: {}x{}",
            format,
            source,
            image.width(),
            image.height()
        );

        Ok(Self { image, source })
    }

    pub fn from_capture(bytes: &[u8]) -> Result<Self, ImageError> {
        Self::from_bytes(bytes, ImageSource::Camera)
    }

    /// Uploads are limited to png, jpg and jpeg file names.
    pub fn from_upload(file_name: &str, bytes: &[u8]) -> Result<Self, ImageError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ImageError::UnsupportedFormat(file_name.to_string()));
        }

        Self::from_bytes(bytes, ImageSource::Upload)
    }

    pub fn open(path: impl AsRef<Path>, source: ImageSource) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        match source {
            ImageSource::Upload => {
                let name = path.to_string_lossy();
                Self::from_upload(&name, &bytes)
            }
            ImageSource::Camera => Self::from_capture(&bytes),
        }
    }

    pub fn from_image(image: DynamicImage, source: ImageSource) -> Self {
        Self { image, source }
    }

    pub fn source(&self) -> ImageSource {
        self.source
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }

    /// Lossless PNG encoding of the bitmap, whatever its original format.
    pub fn encode_png(&self) -> Result<Vec<u8>, ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }

    pub fn to_base64_png(&self) -> Result<String, ImageError> {
        Ok(STANDARD.encode(self.encode_png()?))
    }

    pub fn to_data_uri(&self) -> Result<String, ImageError> {
        Ok(format!("data:image/png;base64,{}", self.to_base64_png()?))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    pub(crate) fn red_square_png(size: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(size, size, Rgb([255, 0, 0])));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn red_square_jpeg(size: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(size, size, Rgb([255, 0, 0])));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Jpeg).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png_capture() {
        let payload = ImagePayload::from_capture(&red_square_png(10)).unwrap();
        assert_eq!(payload.source(), ImageSource::Camera);
        assert_eq!((payload.width(), payload.height()), (10, 10));
    }

    #[test]
    fn test_upload_accepts_uppercase_jpeg_extension() {
        let payload = ImagePayload::from_upload("problem.JPEG", &red_square_jpeg(8)).unwrap();
        assert_eq!(payload.source(), ImageSource::Upload);
        assert_eq!(payload.width(), 8);
    }

    #[test]
    fn test_upload_rejects_other_extensions() {
        let err = ImagePayload::from_upload("problem.gif", &red_square_png(4)).unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = ImagePayload::from_capture(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn test_data_uri_round_trips_bitmap() {
        let payload = ImagePayload::from_upload("square.png", &red_square_png(10)).unwrap();
        let uri = payload.to_data_uri().unwrap();
        let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();

        let bytes = STANDARD.decode(encoded).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.to_rgba8(), payload.as_image().to_rgba8());

        let again = ImagePayload::from_image(decoded, ImageSource::Upload);
        assert_eq!(again.encode_png().unwrap(), bytes);
    }
}
