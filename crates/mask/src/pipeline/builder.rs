use crate::{
    error::Result,
    pipeline::MaskPipeline,
    traits::{MaskBinarizer, ContourExtractor, ContourSimplifier, ContourPostProcessor},
    algorithms::{
        CollinearSimplifier,
        ExternalContourExtractor,
        MinimumAreaFilter,
        ProbabilityThreshold,
    },
    types::AreaConvention,
};

/// Builder for creating mask pipelines with a fluent API
pub struct MaskPipelineBuilder {
    binarizer: Option<Box<dyn MaskBinarizer>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    simplifier: Option<Box<dyn ContourSimplifier>>,
    postprocessors: Vec<Box<dyn ContourPostProcessor>>,
}

impl MaskPipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            binarizer: None,
            contour_extractor: None,
            simplifier: None,
            postprocessors: Vec::new(),
        }
    }

    /// Set the binarizer (replaces any existing one)
    pub fn set_binarizer<B>(mut self, binarizer: B) -> Self
    where
        B: MaskBinarizer + 'static,
    {
        self.binarizer = Some(Box::new(binarizer));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Add a post-processor to the pipeline
    pub fn add_postprocessor<P>(mut self, postprocessor: P) -> Self
    where
        P: ContourPostProcessor + 'static,
    {
        self.postprocessors.push(Box::new(postprocessor));
        self
    }

    /// Binarize at `p > threshold`; fails outside `[0, 1]`
    pub fn with_threshold(self, threshold: f32) -> Result<Self> {
        Ok(self.set_binarizer(ProbabilityThreshold::new(threshold)?))
    }

    /// Measure areas under the given convention
    pub fn with_area_convention(self, convention: AreaConvention) -> Self {
        self.set_contour_extractor(ExternalContourExtractor::new(convention))
    }

    /// Drop contours smaller than `min_area` pixels
    pub fn with_min_area(self, min_area: f32) -> Self {
        self.add_postprocessor(MinimumAreaFilter { min_area })
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> MaskPipeline {
        let binarizer = self.binarizer
            .unwrap_or_else(|| Box::new(ProbabilityThreshold::default()));

        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor::default()));

        let simplifier = self.simplifier
            .unwrap_or_else(|| Box::new(CollinearSimplifier));

        MaskPipeline::new(
            binarizer,
            contour_extractor,
            simplifier,
            self.postprocessors,
        )
    }
}

impl Default for MaskPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
