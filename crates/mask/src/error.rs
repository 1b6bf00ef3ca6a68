use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("Invalid binarization threshold: {0} (expected a value in [0, 1])")]
    InvalidThreshold(f32),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),
}

pub type Result<T> = std::result::Result<T, MaskError>;
