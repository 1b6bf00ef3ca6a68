pub mod builder;

use tracing::debug;
use crate::{
    error::Result,
    types::{MaskOutline, ProbabilityMask},
    traits::{MaskBinarizer, ContourExtractor, ContourSimplifier, ContourPostProcessor},
};

/// Probability mask to measured external contours
pub struct MaskPipeline {
    binarizer: Box<dyn MaskBinarizer>,
    contour_extractor: Box<dyn ContourExtractor>,
    simplifier: Box<dyn ContourSimplifier>,
    postprocessors: Vec<Box<dyn ContourPostProcessor>>,
}

impl MaskPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::MaskPipelineBuilder {
        builder::MaskPipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        binarizer: Box<dyn MaskBinarizer>,
        contour_extractor: Box<dyn ContourExtractor>,
        simplifier: Box<dyn ContourSimplifier>,
        postprocessors: Vec<Box<dyn ContourPostProcessor>>,
    ) -> Self {
        Self {
            binarizer,
            contour_extractor,
            simplifier,
            postprocessors,
        }
    }

    /// Process a probability mask through the entire pipeline.
    /// The mask itself is never modified.
    pub fn process(&self, mask: &ProbabilityMask) -> Result<MaskOutline> {
        let binary = self.binarizer.binarize(mask)?;

        let mut contours = self.contour_extractor.extract_contours(&binary)?;

        self.simplifier.simplify(&mut contours)?;

        for postprocessor in &self.postprocessors {
            postprocessor.process(&mut contours)?;
        }

        debug!(
            width = mask.width(),
            height = mask.height(),
            contours = contours.len(),
            "mask processed"
        );

        Ok(MaskOutline {
            contours,
            mask_width: mask.width(),
            mask_height: mask.height(),
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "MaskPipeline: 1 binarizer, 1 contour extractor, 1 simplifier, {} postprocessors",
            self.postprocessors.len()
        )
    }
}
