//! Distance from spot outlines to a segmented structure, measured per frame.

pub mod mask;
pub mod measure;
#[cfg(test)]
mod tests;

pub use mask::{BinaryMask, MaskSequence};
pub use measure::{measure_spots, nearest_distance, spot_number, MaskIndex, SpotDistance, SpotRoi};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ProximityError {
    #[error("mask of {width}x{height} needs {expected} pixels, got {actual}")]
    MaskSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("mask of {width}x{height} is too large to address")]
    MaskOverflow { width: usize, height: usize },

    #[error("no mask loaded for frame {0}")]
    MissingFrame(u32),

    #[error("no frame at or before {0} has foreground pixels")]
    NoMaskAvailable(u32),

    #[error("spot {0} has an empty ROI")]
    EmptyRoi(String),

    #[error("spot label {0:?} carries no numeric id")]
    InvalidLabel(String),
}

pub type Result<T> = std::result::Result<T, ProximityError>;
