use crate::{ProximityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Row-major binary image; any non-zero pixel is foreground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMask")]
pub struct BinaryMask {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

#[derive(Deserialize)]
struct RawMask {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl TryFrom<RawMask> for BinaryMask {
    type Error = ProximityError;

    fn try_from(raw: RawMask) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.pixels)
    }
}

impl BinaryMask {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(ProximityError::MaskOverflow { width, height })?;
        if pixels.len() != expected {
            return Err(ProximityError::MaskSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    pub fn has_foreground(&self) -> bool {
        self.pixels.iter().any(|&p| p > 0)
    }

    /// Foreground pixel coordinates as `(x, y)`.
    pub fn foreground(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0)
            .map(move |(i, _)| ((i % width) as f64, (i / width) as f64))
    }
}

/// Per-frame masks for one movie.
#[derive(Debug, Clone, Default)]
pub struct MaskSequence {
    frames: BTreeMap<u32, BinaryMask>,
}

impl MaskSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frame: u32, mask: BinaryMask) {
        self.frames.insert(frame, mask);
    }

    pub fn get(&self, frame: u32) -> Option<&BinaryMask> {
        self.frames.get(&frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Mask to measure against at `frame`.
    ///
    /// Segmentation occasionally drops a frame entirely; when the mask at
    /// `frame` is blank the newest earlier mask with foreground is used.
    pub fn resolve(&self, frame: u32) -> Result<(u32, &BinaryMask)> {
        let mut current = frame;
        loop {
            let mask = self
                .frames
                .get(&current)
                .ok_or(ProximityError::MissingFrame(current))?;
            if mask.has_foreground() {
                if current != frame {
                    warn!(requested = frame, used = current, "blank mask, fell back to earlier frame");
                }
                return Ok((current, mask));
            }
            current = current
                .checked_sub(1)
                .ok_or(ProximityError::NoMaskAvailable(frame))?;
        }
    }
}
