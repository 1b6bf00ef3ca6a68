use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Cannot read {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot write {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Detector(#[from] detector::DetectorError),

    #[error(transparent)]
    Mask(#[from] mask::MaskError),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PredictError>;
