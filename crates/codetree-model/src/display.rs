//! Display depth settings and the range they must stay within.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};

/// Inclusive range every depth knob must fall in.
///
/// Always satisfies `1 <= min <= max <= DepthBounds::CEILING`; the tree depth
/// the engine builds is capped by `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct DepthBounds {
    min: u8,
    max: u8,
}

/// Unchecked form used on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct RawBounds {
    min: u8,
    max: u8,
}

impl Default for RawBounds {
    fn default() -> Self {
        let bounds = DepthBounds::default();
        Self {
            min: bounds.min,
            max: bounds.max,
        }
    }
}

impl TryFrom<RawBounds> for DepthBounds {
    type Error = TreeError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

impl From<DepthBounds> for RawBounds {
    fn from(bounds: DepthBounds) -> Self {
        Self {
            min: bounds.min,
            max: bounds.max,
        }
    }
}

impl Default for DepthBounds {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

impl DepthBounds {
    /// Deepest tree any bounds may allow. Saved documents nest one JSON level
    /// pair per tree level, which keeps them inside the parser's nesting limit.
    pub const CEILING: u8 = 32;

    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min == 0 || min > max || max > Self::CEILING {
            return Err(TreeError::InvalidBounds {
                min,
                max,
                ceiling: Self::CEILING,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn contains(&self, value: usize) -> bool {
        value >= usize::from(self.min) && value <= usize::from(self.max)
    }

    /// Reject `value` unless it is inside the bounds.
    pub fn check(&self, value: usize) -> Result<u8> {
        if self.contains(value) {
            // contains() guarantees value <= max, which fits in u8
            Ok(u8::try_from(value).unwrap_or(self.max))
        } else {
            Err(TreeError::DepthOutOfRange {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Pull `value` into the bounds.
    pub fn clamp(&self, value: usize) -> u8 {
        let clamped = value.clamp(usize::from(self.min), usize::from(self.max));
        u8::try_from(clamped).unwrap_or(self.max)
    }
}

/// Depth knobs the presentation layer exposes.
///
/// `depth` drives the depth projection (nodes shallower than it are open);
/// `collapse_threshold` is the depth from which expand-all and collapse-all
/// apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub depth: u8,
    pub collapse_threshold: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            depth: 2,
            collapse_threshold: 1,
        }
    }
}

impl DisplaySettings {
    /// Check both knobs against `bounds`.
    pub fn validate(&self, bounds: &DepthBounds) -> Result<()> {
        bounds.check(usize::from(self.depth))?;
        bounds.check(usize::from(self.collapse_threshold))?;
        Ok(())
    }
}
