//! Mask R-CNN served through ONNX Runtime.
//!
//! Expects the torchvision export layout: one `[3, H, W]` float RGB input in
//! `[0, 1]` and per-detection `scores [N]`, `labels [N]` (int64) and
//! `masks [N, 1, H, W]` outputs, masks already pasted to image resolution.

use std::path::Path;

use image::RgbImage;
use mask::ProbabilityMask;
use ort::{
    session::Session,
    tensor::PrimitiveTensorElementType,
    value::{DynValue, Tensor},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    device::Device,
    error::{DetectorError, Result},
    types::Detection,
    Detector,
};

/// Tensor names of the exported graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnnxModelConfig {
    pub input: String,
    /// Feed `[1, 3, H, W]` instead of `[3, H, W]`
    pub batched_input: bool,
    pub scores_output: String,
    pub labels_output: String,
    pub masks_output: String,
}

impl Default for OnnxModelConfig {
    fn default() -> Self {
        Self {
            input: "image".to_string(),
            batched_input: false,
            scores_output: "scores".to_string(),
            labels_output: "labels".to_string(),
            masks_output: "masks".to_string(),
        }
    }
}

pub struct MaskRcnnDetector {
    session: Session,
    config: OnnxModelConfig,
}

impl MaskRcnnDetector {
    /// Load an exported model onto `device`. Any failure here is fatal to the
    /// caller; there is no fallback model.
    #[instrument(skip(config))]
    pub fn load(model_path: &Path, config: OnnxModelConfig, device: Device) -> Result<Self> {
        if !model_path.is_file() {
            return Err(DetectorError::ModelNotFound(model_path.to_path_buf()));
        }

        let load_error = |reason: String| DetectorError::ModelLoad {
            path: model_path.to_path_buf(),
            reason,
        };

        let session = Session::builder()
            .map_err(|e| load_error(e.to_string()))?
            .with_execution_providers([device.execution_provider()])
            .map_err(|e| load_error(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| load_error(e.to_string()))?;

        check_signature(&session, &config, model_path)?;

        info!(model = %model_path.display(), %device, "Loaded Mask R-CNN model");

        Ok(Self { session, config })
    }
}

impl Detector for MaskRcnnDetector {
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>> {
        let (width, height) = image.dimensions();
        let shape: Vec<usize> = if self.config.batched_input {
            vec![1, 3, height as usize, width as usize]
        } else {
            vec![3, height as usize, width as usize]
        };
        let input = Tensor::from_array((shape.as_slice(), to_chw(image).into_boxed_slice()))?;

        let outputs = self.session.run(ort::inputs![self.config.input.as_str() => input])?;

        let (_, scores) = extract::<f32>(outputs.get(&self.config.scores_output), &self.config.scores_output)?;
        let (_, labels) = extract::<i64>(outputs.get(&self.config.labels_output), &self.config.labels_output)?;
        let (mask_dims, masks) = extract::<f32>(outputs.get(&self.config.masks_output), &self.config.masks_output)?;

        let detections = assemble(&scores, &labels, &mask_dims, &masks, &self.config.masks_output)?;
        debug!(count = detections.len(), width, height, "Raw detections");
        Ok(detections)
    }

    fn name(&self) -> &str {
        "mask-rcnn-onnx"
    }
}

fn check_signature(session: &Session, config: &OnnxModelConfig, path: &Path) -> Result<()> {
    let incompatible = |reason: String| DetectorError::IncompatibleModel {
        path: path.to_path_buf(),
        reason,
    };

    if !session.inputs.iter().any(|input| input.name == config.input) {
        return Err(incompatible(format!("no input named '{}'", config.input)));
    }

    for name in [&config.scores_output, &config.labels_output, &config.masks_output] {
        if !session.outputs.iter().any(|output| &output.name == name) {
            return Err(incompatible(format!("no output named '{name}'")));
        }
    }

    Ok(())
}

/// Planar RGB, scaled to `[0, 1]`.
fn to_chw(image: &RgbImage) -> Vec<f32> {
    let (width, height) = image.dimensions();
    let plane = width as usize * height as usize;
    let mut data = vec![0f32; 3 * plane];

    for (x, y, pixel) in image.enumerate_pixels() {
        let index = y as usize * width as usize + x as usize;
        for channel in 0..3 {
            data[channel * plane + index] = f32::from(pixel[channel]) / 255.0;
        }
    }

    data
}

fn extract<T>(value: Option<&DynValue>, name: &str) -> Result<(Vec<usize>, Vec<T>)>
where
    T: PrimitiveTensorElementType + Copy + std::fmt::Debug,
{
    let value = value.ok_or_else(|| DetectorError::InvalidOutput {
        name: name.to_string(),
        reason: "missing from session outputs".to_string(),
    })?;

    let (shape, data) = value.try_extract_tensor::<T>()?;
    let dims = shape
        .iter()
        .map(|&d| usize::try_from(d))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| DetectorError::InvalidOutput {
            name: name.to_string(),
            reason: format!("dynamic dimension in shape {shape:?}"),
        })?;

    Ok((dims, data.to_vec()))
}

/// Zip flat output tensors into detections. `mask_dims` is `[N, 1, H, W]` or
/// `[N, H, W]`.
fn assemble(
    scores: &[f32],
    labels: &[i64],
    mask_dims: &[usize],
    masks: &[f32],
    masks_name: &str,
) -> Result<Vec<Detection>> {
    let invalid = |reason: String| DetectorError::InvalidOutput {
        name: masks_name.to_string(),
        reason,
    };

    let count = scores.len();
    if labels.len() != count {
        return Err(invalid(format!(
            "{} scores but {} labels",
            count,
            labels.len()
        )));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let (mask_height, mask_width) = match mask_dims {
        [n, 1, h, w] | [n, h, w] if *n == count => (*h, *w),
        _ => return Err(invalid(format!("shape {mask_dims:?} for {count} detections"))),
    };
    let plane = mask_height * mask_width;
    if masks.len() != count * plane {
        return Err(invalid(format!(
            "{} values for shape {mask_dims:?}",
            masks.len()
        )));
    }

    let width = u32::try_from(mask_width).map_err(|_| invalid(format!("mask width {mask_width}")))?;
    let height = u32::try_from(mask_height).map_err(|_| invalid(format!("mask height {mask_height}")))?;

    scores
        .iter()
        .zip(labels)
        .zip(masks.chunks_exact(plane.max(1)))
        .map(|((&score, &label), probabilities)| {
            let mask = ProbabilityMask::from_raw(width, height, probabilities.to_vec())
                .ok_or_else(|| invalid("mask buffer too small".to_string()))?;
            Ok(Detection::new(score, label, mask))
        })
        .collect()
}
