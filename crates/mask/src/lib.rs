//! # Mask Contour Extraction
//!
//! Turns per-pixel probability masks (as produced by instance-segmentation
//! models) into measured external contours: binarize, follow the outer
//! borders, collapse collinear boundary points and compute enclosed areas.
//!
//! ## Quick Start
//!
//! ```rust
//! use mask::{MaskPipeline, ProbabilityMask};
//! use image::Luma;
//!
//! let mut probabilities = ProbabilityMask::new(100, 100);
//! for y in 45..55 {
//!     for x in 45..55 {
//!         probabilities.put_pixel(x, y, Luma([0.9]));
//!     }
//! }
//!
//! let pipeline = MaskPipeline::builder().build();
//! let outline = pipeline.process(&probabilities)?;
//! assert_eq!(outline.contours.len(), 1);
//! assert_eq!(outline.contours[0].area, 100.0);
//! # Ok::<(), mask::MaskError>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust
//! use mask::{MaskPipeline, AreaConvention, ProbabilityThreshold};
//!
//! let pipeline = MaskPipeline::builder()
//!     .set_binarizer(ProbabilityThreshold::new(0.7)?)
//!     .with_area_convention(AreaConvention::PixelCenters)
//!     .with_min_area(4.0)
//!     .build();
//! # Ok::<(), mask::MaskError>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;

pub use error::{MaskError, Result};
pub use types::{AreaConvention, Contour, MaskOutline, ProbabilityMask};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{MaskPipeline, builder::MaskPipelineBuilder};
