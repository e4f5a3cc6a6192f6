//! Container width suggestions when the participant count changes.

use whereat::{At, at};

use crate::constraint::ConfigError;

/// Auto-fit parameters.
///
/// The target width for `n` participants is one preferred-width tile per
/// participant in a single row: `n * preferred_tile_width + (n - 1) * gap`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoFit {
    pub preferred_tile_width: f64,
    pub gap: f64,
}

impl Default for AutoFit {
    fn default() -> Self {
        Self::new(320.0, 8.0)
    }
}

impl AutoFit {
    pub const fn new(preferred_tile_width: f64, gap: f64) -> Self {
        Self {
            preferred_tile_width,
            gap,
        }
    }

    pub fn validate(&self) -> Result<(), At<ConfigError>> {
        if !self.preferred_tile_width.is_finite() || self.preferred_tile_width <= 0.0 {
            return Err(at!(ConfigError::InvalidPreferredWidth));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(at!(ConfigError::InvalidGap));
        }
        Ok(())
    }

    /// Single-row width for `participants` preferred-width tiles.
    pub fn target_width(&self, participants: usize) -> f64 {
        if participants == 0 {
            return 0.0;
        }
        participants as f64 * self.preferred_tile_width + (participants - 1) as f64 * self.gap
    }

    /// Propose a new container width, or `None` to leave it alone.
    ///
    /// Growth is capped at `last_user_width`, the last width chosen by drag.
    /// A decrease only ever shrinks, and a drop to zero participants
    /// changes nothing.
    pub fn propose(
        &self,
        previous: usize,
        current: usize,
        current_width: f64,
        last_user_width: f64,
    ) -> Option<f64> {
        let target = self.target_width(current);
        if current > previous {
            Some(target.min(last_user_width))
        } else if current < previous && current > 0 && target < current_width {
            Some(target)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_width_counts_gaps_between_tiles() {
        let fit = AutoFit::default();
        assert_eq!(fit.target_width(0), 0.0);
        assert_eq!(fit.target_width(1), 320.0);
        assert_eq!(fit.target_width(10), 3272.0);
    }

    #[test]
    fn increase_is_capped_by_user_width() {
        let fit = AutoFit::default();
        assert_eq!(fit.propose(4, 10, 1200.0, 1200.0), Some(1200.0));
    }

    #[test]
    fn increase_below_cap_uses_target() {
        let fit = AutoFit::default();
        // 3 * 320 + 2 * 8 = 976
        assert_eq!(fit.propose(2, 3, 648.0, 1200.0), Some(976.0));
    }

    #[test]
    fn decrease_shrinks_to_target() {
        let fit = AutoFit::default();
        // 2 * 320 + 8 = 648
        assert_eq!(fit.propose(8, 2, 1200.0, 1200.0), Some(648.0));
    }

    #[test]
    fn decrease_never_grows() {
        let fit = AutoFit::default();
        assert_eq!(fit.propose(8, 3, 500.0, 1200.0), None);
    }

    #[test]
    fn decrease_to_zero_is_ignored() {
        let fit = AutoFit::default();
        assert_eq!(fit.propose(3, 0, 1200.0, 1200.0), None);
    }

    #[test]
    fn unchanged_count_is_ignored() {
        let fit = AutoFit::default();
        assert_eq!(fit.propose(5, 5, 1200.0, 1200.0), None);
    }

    #[test]
    fn invalid_width_rejected() {
        let err = AutoFit::new(0.0, 8.0).validate().unwrap_err();
        assert_eq!(*err.error(), ConfigError::InvalidPreferredWidth);
    }
}
