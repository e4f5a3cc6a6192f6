//! Grid partition search.
//!
//! Picks the row/column split and tile size that maximizes tile area for a
//! given tile count, container, and [`TileConstraints`].
//!
//! The search is exhaustive over row counts `1..=n`. Ties keep the
//! first-evaluated (fewest rows) candidate because the incumbent is only
//! replaced on strictly larger area.
//!
//! # Example
//!
//! ```
//! use zengrid::{Extent, TileConstraints, solve};
//!
//! let layout = solve(4, Extent::new(1200.0, 700.0), &TileConstraints::default());
//! assert_eq!((layout.rows, layout.cols), (2, 2));
//! assert!((layout.tile_width / layout.tile_height - 16.0 / 9.0).abs() < 1e-9);
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::constraint::{Extent, MinSizePolicy, Rect, TileConstraints, non_negative};

/// Solved grid: partition and per-tile size.
///
/// Always produced whole by [`solve`]; never patched field by field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub tile_width: f64,
    pub tile_height: f64,
}

impl GridLayout {
    /// No tiles.
    pub const EMPTY: Self = Self {
        rows: 0,
        cols: 0,
        tile_width: 0.0,
        tile_height: 0.0,
    };

    /// Whether the layout holds no cells.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Number of cells, `rows * cols`.
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Tile size as an extent.
    pub fn tile(&self) -> Extent {
        Extent::new(self.tile_width, self.tile_height)
    }

    /// Area of one tile.
    pub fn tile_area(&self) -> f64 {
        self.tile_width * self.tile_height
    }

    /// Number of rows actually occupied by `count` tiles.
    ///
    /// Can be fewer than `rows`: 5 tiles searched as 4 rows get 2 columns
    /// and only fill 3 rows.
    pub fn occupied_rows(&self, count: usize) -> usize {
        if self.cols == 0 {
            return 0;
        }
        count.min(self.cell_count()).div_ceil(self.cols)
    }

    /// Rectangle of tile `index` out of `count`, in container coordinates.
    ///
    /// Tiles fill row-major. The occupied block is centered in the container
    /// and a partial last row is centered on its own. Returns `None` for an
    /// out-of-range index.
    pub fn tile_rect(&self, index: usize, count: usize, container: Extent, gap: f64) -> Option<Rect> {
        let count = count.min(self.cell_count());
        if index >= count {
            return None;
        }
        let gap = non_negative(gap);
        let (w, h) = (self.tile_width, self.tile_height);
        let rows_used = self.occupied_rows(count);
        let row = index / self.cols;
        let col = index % self.cols;

        let in_row = if row + 1 == rows_used {
            count - row * self.cols
        } else {
            self.cols
        };
        let row_width = span(in_row, w, gap);
        let block_height = span(rows_used, h, gap);

        let x0 = (container.width - row_width) / 2.0;
        let y0 = (container.height - block_height) / 2.0;
        Some(Rect::new(
            x0 + col as f64 * (w + gap),
            y0 + row as f64 * (h + gap),
            w,
            h,
        ))
    }
}

/// Solve for `tile_count` tiles in `container`.
pub fn solve(tile_count: usize, container: Extent, constraints: &TileConstraints) -> GridLayout {
    solve_capped(tile_count, container, constraints, None)
}

/// Like [`solve`], but only considers row counts up to `max_rows`.
///
/// `Some(1)` forces a single row. A cap of zero is treated as one.
pub fn solve_capped(
    tile_count: usize,
    container: Extent,
    constraints: &TileConstraints,
    max_rows: Option<usize>,
) -> GridLayout {
    if tile_count == 0 {
        return GridLayout::EMPTY;
    }

    let container = container.sanitized();
    let gap = non_negative(constraints.gap);
    let ratio = constraints.aspect_ratio;
    if !ratio.is_finite() || ratio <= 0.0 {
        // No aspect-exact tile exists; keep the partition honest.
        return GridLayout {
            rows: 1,
            cols: tile_count,
            tile_width: 0.0,
            tile_height: 0.0,
        };
    }

    if tile_count == 1 {
        let (tile_width, tile_height) = fit_cell(container.width, container.height, ratio);
        return GridLayout {
            rows: 1,
            cols: 1,
            tile_width,
            tile_height,
        };
    }

    let row_limit = max_rows.map_or(tile_count, |m| m.clamp(1, tile_count));
    let strict = constraints.policy == MinSizePolicy::Strict;

    let single_row = candidate(tile_count, 1, container, gap, ratio);
    let mut best: Option<GridLayout> = None;
    for rows in 1..=row_limit {
        let c = if rows == 1 {
            single_row
        } else {
            candidate(tile_count, rows, container, gap, ratio)
        };
        if strict && !meets_minimum(&c, constraints) {
            continue;
        }
        match &best {
            Some(b) if c.tile_area() <= b.tile_area() => {}
            _ => best = Some(c),
        }
    }

    best.unwrap_or(single_row)
}

/// Sanitize a raw tile count from an untyped source.
///
/// Negative, NaN, and infinite values become zero; fractions truncate.
pub fn sanitize_count(raw: f64) -> usize {
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as usize
    } else {
        0
    }
}

/// Evaluate one row count.
fn candidate(tile_count: usize, rows: usize, container: Extent, gap: f64, ratio: f64) -> GridLayout {
    let cols = tile_count.div_ceil(rows);
    let avail_w = (container.width - (cols - 1) as f64 * gap).max(0.0);
    let avail_h = (container.height - (rows - 1) as f64 * gap).max(0.0);
    let (tile_width, tile_height) = fit_cell(avail_w / cols as f64, avail_h / rows as f64, ratio);
    GridLayout {
        rows,
        cols,
        tile_width,
        tile_height,
    }
}

/// Largest `ratio`-exact rectangle inside a cell.
///
/// Width constrains first; height takes over when the width-derived height
/// would overflow.
fn fit_cell(cell_w: f64, cell_h: f64, ratio: f64) -> (f64, f64) {
    let h_from_w = cell_w / ratio;
    if h_from_w <= cell_h {
        (cell_w, h_from_w)
    } else {
        (cell_h * ratio, cell_h)
    }
}

fn meets_minimum(layout: &GridLayout, constraints: &TileConstraints) -> bool {
    layout.tile_width >= constraints.min_width && layout.tile_height >= constraints.min_height
}

/// Length of `n` items of size `len` separated by `gap`.
fn span(n: usize, len: f64, gap: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    n as f64 * len + (n - 1) as f64 * gap
}
