//! Merging of closed polygons: nested ones first, then overlapping ones.

pub mod intersect;
pub mod nested;

pub use intersect::{combine_intersecting, in_contact};
pub use nested::combine_nested;

use crate::part::ClosedPolygon;

/// Alternates the nested pass and the intersection fixed point until the
/// polygon count stops shrinking.
///
/// A union can enclose a polygon it never touched (its holes are dropped),
/// which only the next nested pass picks up.
pub fn merge_closed(mut polys: Vec<ClosedPolygon>, tol: f64, coverage_ratio: f64) -> Vec<ClosedPolygon> {
    loop {
        let before = polys.len();
        polys = combine_nested(polys, tol, coverage_ratio);
        polys = combine_intersecting(polys, tol);
        if polys.len() == before {
            return polys;
        }
    }
}
