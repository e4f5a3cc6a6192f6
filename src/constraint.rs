//! Tile constraints and the geometry value types shared by every module.
//!
//! Pure geometry: no pixel operations, no allocations, `no_std` compatible.
//!
//! # Example
//!
//! ```
//! use zengrid::{Extent, MinSizePolicy, TileConstraints};
//!
//! let constraints = TileConstraints::new(16.0 / 9.0, 160.0, 90.0)
//!     .gap(8.0)
//!     .policy(MinSizePolicy::Strict);
//!
//! assert!(constraints.validate().is_ok());
//! assert_eq!(constraints.min_size(), Extent::new(160.0, 90.0));
//! assert_eq!(constraints.row_capacity(1200.0), 7);
//! ```

use core::fmt;

use whereat::{At, at};

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Width × height in layout units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    /// Zero width and height.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new extent.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Raise each axis to at least the matching axis of `floor`.
    pub fn clamp_min(self, floor: Extent) -> Self {
        Self {
            width: self.width.max(floor.width),
            height: self.height.max(floor.height),
        }
    }

    /// Replace negative or non-finite components with zero.
    pub fn sanitized(self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }

    /// `width * height`.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A pointer position or other 2D coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - origin`.
    pub fn delta_from(self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Axis-aligned rectangle in container coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// How the solver treats the minimum tile size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MinSizePolicy {
    /// Return the largest-area candidate even if it is below the minimum.
    #[default]
    BestEffort,
    /// Only accept candidates meeting both minimums. When none does, fall
    /// back to a single row of all tiles.
    Strict,
}

/// Fixed per-instance tile configuration.
///
/// `min_width`/`min_height` also act as the container floor: neither a drag
/// nor an auto-fit can shrink the container below one minimum tile.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileConstraints {
    /// Tile width divided by tile height.
    pub aspect_ratio: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Spacing between adjacent tiles, on both axes.
    pub gap: f64,
    pub policy: MinSizePolicy,
}

impl Default for TileConstraints {
    fn default() -> Self {
        Self::new(16.0 / 9.0, 160.0, 90.0).gap(8.0)
    }
}

impl TileConstraints {
    /// Constraints with no gap and the best-effort minimum policy.
    pub const fn new(aspect_ratio: f64, min_width: f64, min_height: f64) -> Self {
        Self {
            aspect_ratio,
            min_width,
            min_height,
            gap: 0.0,
            policy: MinSizePolicy::BestEffort,
        }
    }

    /// Set the inter-tile gap.
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the minimum-size policy.
    pub fn policy(mut self, policy: MinSizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Minimum tile size, which doubles as the container floor.
    pub fn min_size(&self) -> Extent {
        Extent::new(self.min_width, self.min_height)
    }

    /// How many minimum-width tiles fit side by side in `width`.
    ///
    /// `floor((width + gap) / (min_width + gap))`. A zero-width minimum with a
    /// zero gap has no meaningful capacity and reports `usize::MAX`.
    pub fn row_capacity(&self, width: f64) -> usize {
        let width = non_negative(width);
        let pitch = self.min_width + self.gap;
        if pitch <= 0.0 {
            return usize::MAX;
        }
        // Saturating float-to-int cast; NaN is excluded above.
        ((width + self.gap) / pitch).floor() as usize
    }

    /// Reject configurations the solver cannot honor.
    pub fn validate(&self) -> Result<(), At<ConfigError>> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(at!(ConfigError::InvalidAspectRatio));
        }
        if !self.min_width.is_finite()
            || !self.min_height.is_finite()
            || self.min_width < 0.0
            || self.min_height < 0.0
        {
            return Err(at!(ConfigError::InvalidMinimum));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(at!(ConfigError::InvalidGap));
        }
        Ok(())
    }
}

/// Configuration error, reported at construction time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Aspect ratio is zero, negative, or not finite.
    InvalidAspectRatio,
    /// Minimum tile width or height is negative or not finite.
    InvalidMinimum,
    /// Gap is negative or not finite.
    InvalidGap,
    /// Page capacity is zero.
    ZeroPageCapacity,
    /// Row cap is zero.
    ZeroRowCap,
    /// Auto-fit preferred tile width is zero, negative, or not finite.
    InvalidPreferredWidth,
    /// Auto-fit gap differs from the tile gap.
    AutoFitGapMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidAspectRatio => "aspect ratio must be positive and finite",
            Self::InvalidMinimum => "minimum tile size must be non-negative and finite",
            Self::InvalidGap => "gap must be non-negative and finite",
            Self::ZeroPageCapacity => "page capacity must be at least 1",
            Self::ZeroRowCap => "row cap must be at least 1",
            Self::InvalidPreferredWidth => "preferred tile width must be positive and finite",
            Self::AutoFitGapMismatch => "auto-fit gap must equal the tile gap",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for ConfigError {}

/// Map negative and non-finite values to zero.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Extent ──────────────────────────────────────────────────────────

    #[test]
    fn clamp_min_raises_each_axis_independently() {
        let e = Extent::new(100.0, 600.0).clamp_min(Extent::new(160.0, 90.0));
        assert_eq!(e, Extent::new(160.0, 600.0));
    }

    #[test]
    fn sanitized_zeroes_garbage() {
        let e = Extent::new(f64::NAN, -4.0).sanitized();
        assert_eq!(e, Extent::ZERO);
        let e = Extent::new(f64::INFINITY, 3.0).sanitized();
        assert_eq!(e, Extent::new(0.0, 3.0));
    }

    #[test]
    fn point_delta() {
        let d = Point::new(850.0, 580.0).delta_from(Point::new(800.0, 600.0));
        assert_eq!(d, (50.0, -20.0));
    }

    // ── row_capacity ────────────────────────────────────────────────────

    #[test]
    fn row_capacity_matches_min_width_pitch() {
        let c = TileConstraints::default();
        // (1200 + 8) / 168 = 7.19
        assert_eq!(c.row_capacity(1200.0), 7);
        // Exactly one tile at the floor.
        assert_eq!(c.row_capacity(160.0), 1);
        assert_eq!(c.row_capacity(100.0), 0);
    }

    #[test]
    fn row_capacity_exact_multiple() {
        let c = TileConstraints::default();
        // 8 tiles: 8 * 160 + 7 * 8 = 1336
        assert_eq!(c.row_capacity(1336.0), 8);
        assert_eq!(c.row_capacity(1335.9), 7);
    }

    #[test]
    fn row_capacity_degenerate_pitch() {
        let c = TileConstraints::new(1.0, 0.0, 0.0);
        assert_eq!(c.row_capacity(500.0), usize::MAX);
    }

    // ── validate ────────────────────────────────────────────────────────

    #[test]
    fn default_is_valid() {
        assert!(TileConstraints::default().validate().is_ok());
    }

    #[test]
    fn bad_ratio_rejected() {
        for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = TileConstraints::new(ratio, 160.0, 90.0)
                .validate()
                .unwrap_err();
            assert_eq!(*err.error(), ConfigError::InvalidAspectRatio);
        }
    }

    #[test]
    fn negative_minimum_rejected() {
        let err = TileConstraints::new(1.5, -1.0, 90.0).validate().unwrap_err();
        assert_eq!(*err.error(), ConfigError::InvalidMinimum);
    }

    #[test]
    fn negative_gap_rejected() {
        let err = TileConstraints::default().gap(-2.0).validate().unwrap_err();
        assert_eq!(*err.error(), ConfigError::InvalidGap);
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(
            format!("{}", ConfigError::ZeroPageCapacity),
            "page capacity must be at least 1"
        );
    }
}
