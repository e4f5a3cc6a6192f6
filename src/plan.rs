//! Grid configuration and the single pure derivation from inputs to layout.
//!
//! Everything the renderer needs is recomputed from one [`GridInputs`]
//! snapshot by [`derive`]; nothing downstream is patched incrementally.
//!
//! # Example
//!
//! ```
//! use zengrid::{Extent, GridConfig, GridInputs, derive};
//!
//! let config = GridConfig::default().page_capacity(25);
//! let plan = derive(
//!     &config,
//!     &GridInputs {
//!         participants: 60,
//!         container: Extent::new(1200.0, 300.0),
//!         page: 5,
//!     },
//! );
//! assert_eq!(plan.page.index, 3);
//! assert_eq!(plan.page.visible_count, 10);
//! assert!(plan.layout.cell_count() >= 10);
//! ```

use core::num::NonZeroUsize;

use whereat::{At, at};

use crate::autofit::AutoFit;
use crate::constraint::{ConfigError, Extent, Rect, TileConstraints};
use crate::page::{Page, paginate};
use crate::solve::{GridLayout, solve_capped};

/// What happens to participants beyond what fits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    /// Split into pages of `page_capacity` tiles.
    #[default]
    Paginate,
    /// One page only, showing at most as many tiles as fit in a single row
    /// at minimum width (and never more than `page_capacity`). The rest are
    /// hidden.
    Truncate,
}

/// Engine configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub constraints: TileConstraints,
    /// Maximum tiles per page. Must be at least 1.
    pub page_capacity: usize,
    /// Upper bound on rows considered by the solver. `Some(0)` is invalid.
    pub max_rows: Option<usize>,
    pub overflow: Overflow,
    /// `None` disables auto-fit.
    pub auto_fit: Option<AutoFit>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(TileConstraints::default())
    }
}

impl GridConfig {
    /// Config with page capacity 8, no row cap, pagination, and default
    /// auto-fit using the constraints' gap.
    pub fn new(constraints: TileConstraints) -> Self {
        Self {
            constraints,
            page_capacity: 8,
            max_rows: None,
            overflow: Overflow::Paginate,
            auto_fit: Some(AutoFit::new(320.0, constraints.gap)),
        }
    }

    pub fn page_capacity(mut self, capacity: usize) -> Self {
        self.page_capacity = capacity;
        self
    }

    pub fn max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn auto_fit(mut self, auto_fit: Option<AutoFit>) -> Self {
        self.auto_fit = auto_fit;
        self
    }

    /// Check every field. [`GridEngine::new`](crate::GridEngine::new) calls
    /// this and refuses to start on failure.
    pub fn validate(&self) -> Result<(), At<ConfigError>> {
        self.constraints.validate()?;
        if self.page_capacity == 0 {
            return Err(at!(ConfigError::ZeroPageCapacity));
        }
        if self.max_rows == Some(0) {
            return Err(at!(ConfigError::ZeroRowCap));
        }
        if let Some(fit) = &self.auto_fit {
            fit.validate()?;
            if fit.gap != self.constraints.gap {
                return Err(at!(ConfigError::AutoFitGapMismatch));
            }
        }
        Ok(())
    }

    /// Page capacity as a non-zero value. Zero (invalid) reads as one.
    pub fn capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_capacity).unwrap_or(NonZeroUsize::MIN)
    }

    /// Number of participants that take part in pagination.
    pub fn effective_total(&self, participants: usize, container_width: f64) -> usize {
        match self.overflow {
            Overflow::Paginate => participants,
            Overflow::Truncate => participants
                .min(self.constraints.row_capacity(container_width))
                .min(self.capacity().get()),
        }
    }
}

/// Snapshot of every input the layout depends on.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridInputs {
    pub participants: usize,
    pub container: Extent,
    /// Requested 1-based page; clamped during derivation.
    pub page: usize,
}

/// Everything derived from one [`GridInputs`] snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPlan {
    pub container: Extent,
    pub page: Page,
    pub layout: GridLayout,
    /// Gap the layout was solved with.
    pub gap: f64,
}

impl GridPlan {
    /// `(participant index, rect)` for every tile on the current page.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        let count = self.page.visible_count;
        (0..count).filter_map(move |i| {
            self.layout
                .tile_rect(i, count, self.container, self.gap)
                .map(|r| (self.page.start_offset + i, r))
        })
    }
}

/// Derive page and layout from a snapshot.
///
/// Total and deterministic: invalid numbers degrade to empty or zero-sized
/// output instead of failing.
pub fn derive(config: &GridConfig, inputs: &GridInputs) -> GridPlan {
    let total = config.effective_total(inputs.participants, inputs.container.width);
    let page = paginate(total, config.capacity(), inputs.page);
    let layout = solve_capped(
        page.visible_count,
        inputs.container,
        &config.constraints,
        config.max_rows,
    );
    GridPlan {
        container: inputs.container,
        page,
        layout,
        gap: config.constraints.gap,
    }
}
