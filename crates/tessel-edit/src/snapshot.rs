use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tessel_blocks::BlockId;
use thiserror::Error;

use crate::BlockOverlay;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Serializable overlay contents keyed by `"x|y|z"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    #[serde(default)]
    pub edits: BTreeMap<String, BlockId>,
}

fn parse_pos(key: &str) -> Option<(i32, i32, i32)> {
    let mut it = key.split('|').map(|p| p.trim().parse::<i32>());
    let pos = (it.next()?.ok()?, it.next()?.ok()?, it.next()?.ok()?);
    it.next().is_none().then_some(pos)
}

impl OverlaySnapshot {
    pub fn from_overlay(overlay: &BlockOverlay) -> Self {
        let edits = overlay
            .iter()
            .map(|((x, y, z), id)| (format!("{x}|{y}|{z}"), id))
            .collect();
        Self { edits }
    }

    /// Writes each well-formed entry into `overlay`; malformed keys are skipped.
    /// Returns how many entries were applied.
    pub fn apply_to(&self, overlay: &mut BlockOverlay) -> usize {
        let mut n = 0;
        for (key, &id) in &self.edits {
            match parse_pos(key) {
                Some((x, y, z)) => {
                    overlay.set(x, y, z, id);
                    n += 1;
                }
                None => log::debug!(target: "world", "skipping malformed overlay key {key:?}"),
            }
        }
        n
    }

    pub fn to_toml_string(&self) -> Result<String, SnapshotError> {
        Ok(toml::to_string(self)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, SnapshotError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_integers_only() {
        assert_eq!(parse_pos("1|-2|3"), Some((1, -2, 3)));
        assert_eq!(parse_pos(" 4 | 5 | 6 "), Some((4, 5, 6)));
        assert_eq!(parse_pos("1|2"), None);
        assert_eq!(parse_pos("1|2|3|4"), None);
        assert_eq!(parse_pos("a|2|3"), None);
        assert_eq!(parse_pos("1.5|2|3"), None);
        assert_eq!(parse_pos("99999999999|0|0"), None);
        assert_eq!(parse_pos(""), None);
    }
}
