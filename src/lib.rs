//! Fixed-aspect-ratio tile grid layout with pagination, drag-resize, and auto-fit.
//!
//! Pure geometry and state machines: no rendering, no timers, `no_std` compatible.
//!
//! # Modules
//!
//! - [`constraint`] — Tile constraints (aspect ratio, minimum size, gap), geometry types, config errors
//! - [`solve`] — Rows × columns search maximizing tile area
//! - [`page`] — Page arithmetic and the pagination controller
//! - [`resize`] — Pointer-driven container resize session with scoped capture
//! - [`autofit`] — Container width suggestions on participant count changes
//! - [`plan`] — Engine configuration and the pure `derive` from inputs to layout
//! - [`engine`] — Stateful engine tying the pieces together with change notifications
//!
//! # Example
//!
//! ```
//! use zengrid::{Extent, TileConstraints, solve};
//!
//! let c = TileConstraints::default();
//! let layout = solve(8, Extent::new(1200.0, 300.0), &c);
//! assert_eq!((layout.rows, layout.cols), (2, 4));
//! assert!((layout.tile_width / layout.tile_height - 16.0 / 9.0).abs() < 1e-9);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

whereat::define_at_crate_info!();

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod autofit;
pub mod constraint;
pub mod engine;
pub mod page;
pub mod plan;
pub mod resize;
pub mod solve;

/// Parse grid configuration from URL query strings.
#[cfg(feature = "query")]
pub mod query;

/// SVG visualization of grid plans.
#[cfg(feature = "svg")]
pub mod svg;

// Re-exports: geometry and constraints
pub use constraint::{ConfigError, Extent, MinSizePolicy, Point, Rect, TileConstraints};
pub use solve::{GridLayout, sanitize_count, solve, solve_capped};

pub use autofit::AutoFit;
pub use engine::{GridEngine, GridObserver};
pub use page::{Page, PaginationController, paginate};
pub use plan::{GridConfig, GridInputs, GridPlan, Overflow, derive};
pub use resize::{
    PointerCapture, PointerEvent, PointerTarget, ResizeEffect, ResizeNoopReason, ResizePhase,
    ResizeSession,
};
