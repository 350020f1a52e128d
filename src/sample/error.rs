use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// The sampling interval must be a finite, positive number of meters.
    InvalidInterval(f64),
}

impl Display for SampleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::InvalidInterval(interval) => write!(
                f,
                "sampling interval must be a positive number of meters. Given: {interval}"
            ),
        }
    }
}

impl std::error::Error for SampleError {}
