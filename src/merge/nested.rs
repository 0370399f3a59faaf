use std::cmp::Ordering;

use geo::{Area, BooleanOps, Buffer, Contains};
use geo_types::{MultiPolygon, Polygon};
use rstar::Envelope;

use crate::index::grown_envelope;
use crate::part::{ClosedPolygon, AREA_EPSILON};
use crate::provenance::union_into;
use crate::utils::parallel;

/// Folds every polygon lying inside another into that outer polygon.
///
/// Candidates are visited by descending area (stable, so ties keep input
/// order). The outer ring is kept as-is; only the child's handles survive.
/// Survivors are returned in their original order.
pub fn combine_nested(mut polys: Vec<ClosedPolygon>, tol: f64, coverage_ratio: f64) -> Vec<ClosedPolygon> {
    if polys.len() < 2 {
        return polys;
    }

    let shapes: Vec<Polygon<f64>> = polys.iter().map(ClosedPolygon::to_polygon).collect();
    let areas: Vec<f64> = parallel::map(&shapes, |p| p.unsigned_area());

    let mut order: Vec<usize> = (0..polys.len()).collect();
    order.sort_by(|&a, &b| areas[b].partial_cmp(&areas[a]).unwrap_or(Ordering::Equal));

    let mut keep = vec![true; polys.len()];
    for (pos, &i) in order.iter().enumerate() {
        if !keep[i] {
            continue;
        }
        let mut parent = Parent::new(&shapes[i], tol);
        for &j in &order[pos + 1..] {
            if !keep[j] {
                continue;
            }
            if parent.holds(&shapes[j], areas[j], coverage_ratio) {
                log::trace!("nesting {:?} into {:?}", polys[j].handles, polys[i].handles);
                let child_handles = std::mem::take(&mut polys[j].handles);
                union_into(&mut polys[i].handles, &child_handles);
                keep[j] = false;
            }
        }
    }

    polys
        .into_iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(p))
        .collect()
}

// Candidate parent, with its tolerance-grown outline built on first use.
struct Parent<'a> {
    shape: &'a Polygon<f64>,
    tol: f64,
    grown: Option<MultiPolygon<f64>>,
}

impl<'a> Parent<'a> {
    fn new(shape: &'a Polygon<f64>, tol: f64) -> Self {
        Self { shape, tol, grown: None }
    }

    fn holds(&mut self, child: &Polygon<f64>, child_area: f64, coverage_ratio: f64) -> bool {
        let (Some(outer), Some(inner)) = (grown_envelope(self.shape, self.tol), grown_envelope(child, 0.0)) else {
            return false;
        };
        if !outer.contains_envelope(&inner) {
            return false;
        }

        if self.shape.contains(child) {
            return true;
        }

        if !self.covers(child, child_area) {
            return false;
        }
        let overlap = self.shape.intersection(child).unsigned_area();
        overlap >= coverage_ratio * child_area
    }

    // Nothing of `child` sticks out of the grown parent.
    fn covers(&mut self, child: &Polygon<f64>, child_area: f64) -> bool {
        let slack = AREA_EPSILON.max(child_area * AREA_EPSILON);
        if self.tol <= 0.0 {
            return child.difference(self.shape).unsigned_area() <= slack;
        }
        let tol = self.tol;
        let shape = self.shape;
        let grown = self.grown.get_or_insert_with(|| shape.buffer(tol));
        child.difference(&*grown).unsigned_area() <= slack
    }
}
