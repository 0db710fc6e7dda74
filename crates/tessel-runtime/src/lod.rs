use serde::{Deserialize, Serialize};

use crate::error::StreamError;

/// One LOD threshold: chunks up to `max_distance` (chunk units) use `level`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LodLevel {
    pub level: u8,
    pub max_distance: f32,
}

impl LodLevel {
    pub const fn new(level: u8, max_distance: f32) -> Self {
        Self {
            level,
            max_distance,
        }
    }
}

/// Thresholds sorted by ascending `max_distance`.
#[derive(Clone, Debug, PartialEq)]
pub struct LodTable {
    levels: Vec<LodLevel>,
}

impl LodTable {
    pub fn new(mut levels: Vec<LodLevel>) -> Result<Self, StreamError> {
        if levels.is_empty() {
            return Err(StreamError::EmptyLodTable);
        }
        levels.sort_by(|a, b| a.max_distance.total_cmp(&b.max_distance));
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    /// First level whose `max_distance >= distance`, else the last level.
    pub fn resolve(&self, distance: f32) -> u8 {
        self.levels
            .iter()
            .find(|l| distance <= l.max_distance)
            .or(self.levels.last())
            .map_or(0, |l| l.level)
    }
}

pub(crate) fn default_levels() -> Vec<LodLevel> {
    vec![
        LodLevel::new(0, 2.0),
        LodLevel::new(1, 4.0),
        LodLevel::new(2, 6.0),
        LodLevel::new(3, f32::INFINITY),
    ]
}

impl Default for LodTable {
    fn default() -> Self {
        Self {
            levels: default_levels(),
        }
    }
}
