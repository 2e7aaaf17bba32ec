use crate::mask::{BinaryMask, MaskSequence};
use crate::{ProximityError, Result};
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Outline pixels of one spot, as exported by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotRoi {
    pub label: String,
    pub frame: u32,
    /// `None` for spots that never made it into a track.
    pub track_id: Option<u64>,
    pub pixels: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotDistance {
    pub spot_id: u64,
    /// Frame whose mask was actually used.
    pub mask_frame: u32,
    pub distance: f64,
}

/// k-d tree over the foreground pixels of one mask.
pub struct MaskIndex {
    tree: ImmutableKdTree<f64, 2>,
}

impl MaskIndex {
    /// `None` when the mask has no foreground to measure against.
    pub fn new(mask: &BinaryMask) -> Option<Self> {
        let entries: Vec<[f64; 2]> = mask.foreground().map(|(x, y)| [x, y]).collect();
        if entries.is_empty() {
            return None;
        }
        let tree = ImmutableKdTree::new_from_slice(&entries);
        Some(Self { tree })
    }

    /// Minimum distance from any ROI pixel to the nearest foreground pixel.
    pub fn nearest(&self, roi: &[(f64, f64)]) -> Option<f64> {
        roi.iter()
            .map(|&(x, y)| self.tree.nearest_one::<SquaredEuclidean>(&[x, y]).distance)
            .min_by(f64::total_cmp)
            .map(f64::sqrt)
    }
}

/// Minimum Euclidean distance from any ROI pixel to any foreground pixel.
pub fn nearest_distance(roi: &[(f64, f64)], mask: &BinaryMask) -> Option<f64> {
    if roi.is_empty() {
        return None;
    }
    MaskIndex::new(mask)?.nearest(roi)
}

/// Numeric part of a spot label, `"ID1234"` -> `1234`.
pub fn spot_number(label: &str) -> Option<u64> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Distances for every tracked spot; untracked spots are skipped.
pub fn measure_spots(rois: &[SpotRoi], masks: &MaskSequence) -> Result<Vec<SpotDistance>> {
    let mut out = Vec::with_capacity(rois.len());
    // One tree per mask frame, shared by every spot measured against it.
    let mut indices: BTreeMap<u32, Option<MaskIndex>> = BTreeMap::new();
    for roi in rois.iter().filter(|r| r.track_id.is_some()) {
        let (mask_frame, mask) = masks.resolve(roi.frame)?;
        let index = indices
            .entry(mask_frame)
            .or_insert_with(|| MaskIndex::new(mask));
        let distance = index
            .as_ref()
            .and_then(|index| index.nearest(&roi.pixels))
            .ok_or_else(|| ProximityError::EmptyRoi(roi.label.clone()))?;
        let spot_id = spot_number(&roi.label)
            .ok_or_else(|| ProximityError::InvalidLabel(roi.label.clone()))?;
        debug!(spot_id, mask_frame, distance, "measured spot");
        out.push(SpotDistance {
            spot_id,
            mask_frame,
            distance,
        });
    }
    Ok(out)
}
