use std::time::Duration;
use thiserror::Error;

/// The capture device or the landmark detector could not be brought up.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to open capture stream: {0}")]
    Stream(String),
    #[error("failed to create landmark detector: {0}")]
    Detector(String),
    #[error("camera did not become ready within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a session without questions")]
    Empty,
}
