//! # Detector
//!
//! Candidate object instances from an instance-segmentation model, and the
//! filter that selects the ones worth measuring.
//!
//! The model itself sits behind the [`Detector`] trait so the rest of the
//! pipeline can be driven by synthetic detections. [`MaskRcnnDetector`] is
//! the production implementation, backed by ONNX Runtime.
//!
//! ```rust,no_run
//! use detector::{Detector, DetectionFilter, Device, DevicePreference, MaskRcnnDetector, OnnxModelConfig};
//! use std::path::Path;
//!
//! let device = Device::resolve(DevicePreference::Auto);
//! let mut model = MaskRcnnDetector::load(Path::new("maskrcnn.onnx"), OnnxModelConfig::default(), device)?;
//!
//! let image = image::open("frame.jpg")?.to_rgb8();
//! let objects = DetectionFilter::default().apply(model.detect(&image)?);
//! println!("{} objects", objects.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod device;
pub mod error;
pub mod filter;
pub mod onnx;
pub mod types;

pub use device::{Device, DevicePreference};
pub use error::{DetectorError, Result};
pub use filter::DetectionFilter;
pub use onnx::{MaskRcnnDetector, OnnxModelConfig};
pub use types::Detection;

use image::RgbImage;

/// Runs inference on a single image
pub trait Detector {
    /// All candidate detections, in model output order
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>>;

    /// Detector name (for logging)
    fn name(&self) -> &str;
}
