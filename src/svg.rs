//! SVG visualization of a derived grid plan.
//!
//! Draws the container, every tile on the current page with its participant
//! index, and a caption with the partition, tile size, and page. Meant for
//! debugging and documentation, not for production rendering.
//!
//! # Example
//!
//! ```
//! use zengrid::{Extent, GridConfig, GridInputs, derive, svg::render_grid_svg};
//!
//! let config = GridConfig::default();
//! let plan = derive(
//!     &config,
//!     &GridInputs { participants: 5, container: Extent::new(1200.0, 300.0), page: 1 },
//! );
//! let svg = render_grid_svg(&plan);
//! assert!(svg.starts_with("<svg"));
//! assert_eq!(svg.matches("class=\"tile\"").count(), 5);
//! ```

use core::fmt::Write;

use crate::constraint::Rect;
use crate::plan::GridPlan;

/// Largest drawn container width; larger containers are scaled down.
const MAX_DRAW_W: f64 = 800.0;
/// Margin around the container.
const MARGIN: f64 = 20.0;
/// Height of the caption area below the container.
const CAPTION_H: f64 = 28.0;

/// Render `plan` as a complete SVG document.
pub fn render_grid_svg(plan: &GridPlan) -> String {
    let c = plan.container.sanitized();
    let scale = if c.width > MAX_DRAW_W {
        MAX_DRAW_W / c.width
    } else {
        1.0
    };
    let draw_w = c.width * scale;
    let draw_h = c.height * scale;
    let doc_w = draw_w + 2.0 * MARGIN;
    let doc_h = draw_h + 2.0 * MARGIN + CAPTION_H;

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{doc_w:.0}" height="{doc_h:.0}" viewBox="0 0 {doc_w:.1} {doc_h:.1}">"#
    );
    let _ = writeln!(
        out,
        r##"  <rect class="container" x="{MARGIN:.1}" y="{MARGIN:.1}" width="{draw_w:.1}" height="{draw_h:.1}" fill="#f4f4f4" stroke="#888" stroke-dasharray="4 3"/>"##
    );

    for (index, rect) in plan.tiles() {
        let r = place(rect, scale);
        let cx = r.x + r.width / 2.0;
        let cy = r.y + r.height / 2.0;
        let _ = writeln!(
            out,
            r##"  <rect class="tile" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="4" fill="#222"/>"##,
            r.x, r.y, r.width, r.height
        );
        let _ = writeln!(
            out,
            r##"  <text x="{cx:.1}" y="{cy:.1}" fill="#eee" font-family="monospace" font-size="12" text-anchor="middle" dominant-baseline="middle">{index}</text>"##
        );
    }

    let l = &plan.layout;
    let p = &plan.page;
    let _ = writeln!(
        out,
        r##"  <text x="{MARGIN:.1}" y="{:.1}" fill="#333" font-family="monospace" font-size="13">{}×{} tiles {:.1}×{:.1} in {:.0}×{:.0}, page {}/{}</text>"##,
        MARGIN + draw_h + CAPTION_H - 8.0,
        l.rows,
        l.cols,
        l.tile_width,
        l.tile_height,
        c.width,
        c.height,
        p.index,
        p.total_pages
    );
    out.push_str("</svg>\n");
    out
}

/// Map a container-space rect into document space.
fn place(r: Rect, scale: f64) -> Rect {
    Rect::new(
        MARGIN + r.x * scale,
        MARGIN + r.y * scale,
        r.width * scale,
        r.height * scale,
    )
}
