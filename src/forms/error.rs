//! Form lookup errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("invalid control path '{0}'")]
    InvalidPath(String),

    #[error("no control at '{0}'")]
    MissingControl(String),

    #[error("control at '{0}' has no children")]
    NotAContainer(String),

    #[error("control at '{0}' is not a form array")]
    NotAnArray(String),

    #[error("index {index} out of range for form array '{path}' of length {len}")]
    IndexOutOfRange { path: String, index: usize, len: usize },
}
