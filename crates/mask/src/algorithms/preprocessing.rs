use image::{GrayImage, Luma};
use crate::{
    error::{MaskError, Result},
    traits::MaskBinarizer,
    types::ProbabilityMask,
};

/// Foreground where the probability is strictly above `threshold`
#[derive(Debug, Clone)]
pub struct ProbabilityThreshold {
    pub threshold: f32,
}

impl ProbabilityThreshold {
    pub fn new(threshold: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MaskError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }
}

impl Default for ProbabilityThreshold {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl MaskBinarizer for ProbabilityThreshold {
    fn binarize(&self, mask: &ProbabilityMask) -> Result<GrayImage> {
        let binary = GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
            if mask.get_pixel(x, y)[0] > self.threshold {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        Ok(binary)
    }
}
