//! # Predict
//!
//! Post-processing for instance-segmentation output: keep confident
//! detections of the target class, trace each mask's external contours,
//! outline them on the image and report one `score, area` pair per contour.
//!
//! ```rust
//! use detector::Detection;
//! use image::{Luma, RgbImage};
//! use mask::ProbabilityMask;
//! use predict::{PredictionPipeline, Report, ReportFormat};
//!
//! let mut probabilities = ProbabilityMask::new(100, 100);
//! for y in 45..55 {
//!     for x in 45..55 {
//!         probabilities.put_pixel(x, y, Luma([0.9]));
//!     }
//! }
//!
//! let mut image = RgbImage::new(100, 100);
//! let results = PredictionPipeline::default()
//!     .process(vec![Detection::new(0.95, 1, probabilities)], &mut image)?;
//!
//! let text = Report::new(&results, ReportFormat::Text).render()?;
//! assert_eq!(text, "物件1: Score=0.95, PixelArea=100\n");
//! # Ok::<(), predict::PredictError>(())
//! ```

pub mod annotate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use annotate::Annotator;
pub use config::{AnnotationStyle, PipelineConfig, ResultOrder};
pub use error::{PredictError, Result};
pub use pipeline::{Prediction, PredictionPipeline};
pub use report::{format_line, ObjectResult, Report, ReportFormat};
