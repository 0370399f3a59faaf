use geo::{Area, BooleanOps, Buffer, Distance, Euclidean, Intersects};
use geo_types::Polygon;

use crate::index::EnvelopeIndex;
use crate::part::{ClosedPolygon, AREA_EPSILON};
use crate::provenance;

/// Unions overlapping (or, with `tol > 0`, nearly touching) polygons until no
/// pair is left to merge.
///
/// Pairs `(i, j)`, `i < j`, are visited in index order. The first merge
/// replaces `polys[i]`, removes `polys[j]`, and restarts the pass.
pub fn combine_intersecting(mut polys: Vec<ClosedPolygon>, tol: f64) -> Vec<ClosedPolygon> {
    while let Some((i, j, merged)) = first_merge(&polys, tol) {
        polys[i] = merged;
        polys.remove(j);
    }
    polys
}

fn first_merge(polys: &[ClosedPolygon], tol: f64) -> Option<(usize, usize, ClosedPolygon)> {
    if polys.len() < 2 {
        return None;
    }
    let shapes: Vec<Polygon<f64>> = polys.iter().map(ClosedPolygon::to_polygon).collect();
    let index = EnvelopeIndex::build(&shapes, tol);

    for i in 0..shapes.len() {
        for j in index.candidates_after(i) {
            if !in_contact(&shapes[i], &shapes[j], tol) {
                continue;
            }
            log::trace!("union of {:?} and {:?}", polys[i].handles, polys[j].handles);
            let merged = union_pair(&polys[i], &shapes[i], &polys[j], &shapes[j]);
            return Some((i, j, merged));
        }
    }
    None
}

// Relative slack on the distance test, so a gap written as `0.1` in a drawing
// still counts as within a tolerance of `0.1`.
const DISTANCE_SLACK: f64 = 1e-9;

/// Whether two rings should be merged.
///
/// With `tol == 0` only a real area overlap counts; exact touching does not.
/// Otherwise the rings must lie within `tol` of each other and their
/// `tol`-grown outlines must overlap by more than [`AREA_EPSILON`], so rings
/// meeting in a single point at a tiny tolerance stay apart.
pub fn in_contact(a: &Polygon<f64>, b: &Polygon<f64>, tol: f64) -> bool {
    if tol <= 0.0 {
        return a.intersection(b).unsigned_area() > AREA_EPSILON;
    }
    if !a.intersects(b) && Euclidean.distance(a, b) > tol * (1.0 + DISTANCE_SLACK) {
        return false;
    }
    a.buffer(tol).intersection(&b.buffer(tol)).unsigned_area() > AREA_EPSILON
}

// Union of the exact rings. When the union falls apart into several pieces
// only the largest one is kept.
fn union_pair(a: &ClosedPolygon, a_shape: &Polygon<f64>, b: &ClosedPolygon, b_shape: &Polygon<f64>) -> ClosedPolygon {
    let handles = provenance::union(&a.handles, &b.handles);
    let union = a_shape.union(b_shape);

    let mut largest: Option<(&Polygon<f64>, f64)> = None;
    for piece in &union.0 {
        let area = piece.unsigned_area();
        if largest.map_or(true, |(_, best)| area > best) {
            largest = Some((piece, area));
        }
    }
    if union.0.len() > 1 {
        log::debug!(
            "union of {:?} split into {} pieces, keeping the largest",
            handles,
            union.0.len()
        );
    }

    match largest {
        Some((piece, _)) => ClosedPolygon::from_polygon(piece, handles),
        None => ClosedPolygon::new(a.ring.clone(), handles),
    }
}
