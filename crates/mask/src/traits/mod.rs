use image::GrayImage;
use crate::{error::Result, types::{Contour, ProbabilityMask}};

/// Trait for turning a probability mask into a binary (0 / 255) mask
pub trait MaskBinarizer: Send + Sync {
    fn binarize(&self, mask: &ProbabilityMask) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract contours from a binary image
    fn extract_contours(&self, binary: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for point-reduction algorithms. Implementations must not change
/// the area a contour encloses.
pub trait ContourSimplifier: Send + Sync {
    fn simplify(&self, contours: &mut [Contour]) -> Result<()>;
}

/// Trait for contour post-processing algorithms (filters, validators)
pub trait ContourPostProcessor: Send + Sync {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()>;
}
