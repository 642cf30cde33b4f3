use thiserror::Error;

use crate::distancer;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),
    #[error("The engine has not been initialized")]
    NotInitialized,
    #[error("Failed to build the engine thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("The generation task ended without delivering a result")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("The image is empty")]
    Empty,
    #[error("The image has no pixels")]
    ZeroSized,
    #[error("The image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Point count must be at least 3, got {0}")]
    TooFewPoints(i32),
    #[error("Line count must not be negative, got {0}")]
    NegativeLineCount(i32),
    #[error("Weight must be greater than 0, got {0}")]
    NonPositiveWeight(i32),
    #[error("Working resolution must be greater than 0")]
    ZeroResolution,
    #[error("Target size must be greater than 0 on both axes")]
    ZeroTarget,
    #[error(transparent)]
    PinDistance(#[from] distancer::Error),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Decode(DecodeError::Image(err))
    }
}
