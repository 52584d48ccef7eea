//! Profile photo decoding and scaling

use crate::error::{CvMatcherError, Result};
use printpdf::image_crate::{self, imageops::FilterType, DynamicImage, GenericImageView};

/// Decoded photos are downscaled to fit this pixel box before embedding.
pub const MAX_PHOTO_PX: (u32, u32) = (480, 600);

#[derive(Debug, Clone)]
pub struct PreparedPhoto {
    pub image: DynamicImage,
}

impl PreparedPhoto {
    pub fn from_image(image: DynamicImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CvMatcherError::Image("Photo has no pixels".to_string()));
        }

        let (max_w, max_h) = MAX_PHOTO_PX;
        let scaled = if width > max_w || height > max_h {
            image.resize(max_w, max_h, FilterType::Triangle)
        } else {
            image
        };

        // Alpha channels are flattened; embedded images are plain RGB.
        Ok(Self {
            image: DynamicImage::ImageRgb8(scaled.to_rgb8()),
        })
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CvMatcherError::Image("Photo data is empty".to_string()));
        }

        let image = image_crate::load_from_memory(bytes)
            .map_err(|e| CvMatcherError::Image(format!("Failed to decode photo: {}", e)))?;
        Self::from_image(image)
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Display size in points for a photo fitted inside `box_width` x `box_height`.
    pub fn fit_within(&self, box_width: f32, box_height: f32) -> (f32, f32) {
        let (w, h) = self.pixel_size();
        let scale = (box_width / w as f32).min(box_height / h as f32);
        (w as f32 * scale, h as f32 * scale)
    }
}
