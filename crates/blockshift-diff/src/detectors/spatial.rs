use blockshift_types::Feature;

use crate::detectors::{BlockDetector, BlockPair};
use crate::equality::check_same_block;
use crate::error::DiffResult;

/// Spatial move: a block that is top-level in both snapshots changed its
/// canvas coordinates.
///
/// A block that became nested or was pulled out to the workspace is not a
/// spatial move; the context detector reports that.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpatialMoveDetector;

impl BlockDetector for SpatialMoveDetector {
    fn feature(&self) -> Feature {
        Feature::MovedInSpace
    }

    fn detect(&self, pair: &BlockPair<'_>) -> DiffResult<bool> {
        check_same_block(pair.prev_block, pair.cur_block)?;
        match (pair.prev_block.coordinates(), pair.cur_block.coordinates()) {
            (Some(before), Some(after)) => Ok(before != after),
            _ => Ok(false),
        }
    }
}
