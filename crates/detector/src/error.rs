use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Invalid score threshold: {0} (expected a value in [0, 1])")]
    InvalidThreshold(f32),

    #[error("Model weights not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("Failed to load model {}: {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    #[error("Incompatible model {}: {reason}", path.display())]
    IncompatibleModel { path: PathBuf, reason: String },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output '{name}': {reason}")]
    InvalidOutput { name: String, reason: String },
}

impl From<ort::Error> for DetectorError {
    fn from(e: ort::Error) -> Self {
        tracing::error!(error = %e, "ONNX Runtime error");
        DetectorError::Inference(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
