use std::path::{Path, PathBuf};

use detector::{Detection, DetectionFilter, Detector};
use image::{ImageError, ImageReader, RgbImage};
use mask::{MaskPipeline, ProbabilityThreshold};
use tracing::{debug, error, info, warn};

use crate::{
    annotate::Annotator,
    config::{PipelineConfig, ResultOrder},
    error::{PredictError, Result},
    report::ObjectResult,
};

/// Outcome of one invocation. `image` is `None` when the input could not be
/// read, in which case `unreadable` holds the reason.
#[derive(Debug)]
pub struct Prediction {
    pub image: Option<RgbImage>,
    pub results: Vec<ObjectResult>,
    pub unreadable: Option<PredictError>,
}

impl Prediction {
    fn unreadable(error: PredictError) -> Self {
        Self {
            image: None,
            results: Vec::new(),
            unreadable: Some(error),
        }
    }
}

/// Decode by content, not by file extension.
fn read_rgb(path: &Path) -> std::result::Result<RgbImage, ImageError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image.to_rgb8())
}

/// Filter -> contour -> annotate -> measure, for one image.
pub struct PredictionPipeline {
    filter: DetectionFilter,
    masks: MaskPipeline,
    annotator: Annotator,
    order: ResultOrder,
}

impl PredictionPipeline {
    pub fn new(filter: DetectionFilter, masks: MaskPipeline, annotator: Annotator, order: ResultOrder) -> Self {
        Self {
            filter,
            masks,
            annotator,
            order,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let mut masks = MaskPipeline::builder()
            .set_binarizer(ProbabilityThreshold::new(config.mask_threshold)?)
            .with_area_convention(config.area);
        if let Some(min_area) = config.min_area {
            masks = masks.with_min_area(min_area);
        }
        let masks = masks.build();
        debug!(pipeline = %masks.info(), "Mask pipeline ready");

        Ok(Self::new(
            DetectionFilter::new(config.threshold, config.target_label)?,
            masks,
            Annotator::from(&config.annotation),
            config.order,
        ))
    }

    /// Measure every external contour of every accepted detection and draw it
    /// onto `image`. Detections and their masks are only read.
    pub fn process(&self, detections: Vec<Detection>, image: &mut RgbImage) -> Result<Vec<ObjectResult>> {
        let total = detections.len();
        let kept = self.filter.apply(detections);
        info!(
            total,
            kept = kept.len(),
            threshold = self.filter.threshold,
            label = self.filter.target_label,
            "Filtered detections"
        );

        let mut results = Vec::new();
        for (i, detection) in kept.iter().enumerate() {
            if detection.mask.dimensions() != image.dimensions() {
                warn!(
                    detection = i,
                    mask = ?detection.mask.dimensions(),
                    image = ?image.dimensions(),
                    "Mask and image sizes differ; outlines drawn in mask coordinates"
                );
            }

            let outline = self.masks.process(&detection.mask)?;
            for contour in &outline.contours {
                self.annotator.draw(image, contour);
                results.push(ObjectResult {
                    score: detection.score,
                    area: contour.area,
                });
                debug!(
                    detection = i,
                    score = detection.score,
                    area = contour.area,
                    bounds = ?contour.bounding_box(),
                    "Contour"
                );
            }
        }

        self.order.apply(&mut results);
        Ok(results)
    }

    /// Read `image_path`, detect, process and optionally save the annotated
    /// image. An unreadable image is logged and yields an empty prediction
    /// instead of an error; the detector is not invoked in that case.
    pub fn run<D>(&self, detector: &mut D, image_path: &Path, output_path: Option<&Path>) -> Result<Prediction>
    where
        D: Detector + ?Sized,
    {
        let mut image = match read_rgb(image_path) {
            Ok(image) => image,
            Err(source) => {
                let err = PredictError::ImageRead {
                    path: image_path.to_path_buf(),
                    source,
                };
                error!(error = %err, "Skipping unreadable image");
                return Ok(Prediction::unreadable(err));
            }
        };

        info!(
            detector = detector.name(),
            image = %image_path.display(),
            width = image.width(),
            height = image.height(),
            "Running detector"
        );
        let detections = detector.detect(&image)?;
        let results = self.process(detections, &mut image)?;

        if let Some(output_path) = output_path {
            image.save(output_path).map_err(|source| PredictError::ImageWrite {
                path: PathBuf::from(output_path),
                source,
            })?;
            info!(output = %output_path.display(), "Wrote annotated image");
        }

        Ok(Prediction {
            image: Some(image),
            results,
            unreadable: None,
        })
    }
}

impl Default for PredictionPipeline {
    fn default() -> Self {
        Self::new(
            DetectionFilter::default(),
            MaskPipeline::builder().build(),
            Annotator::default(),
            ResultOrder::default(),
        )
    }
}
