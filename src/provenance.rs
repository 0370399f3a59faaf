//! Handle bookkeeping shared by every merge step.
//!
//! Stitching concatenates handle lists as-is; every other step unions them,
//! keeping the first occurrence of each handle in order.

use std::collections::HashSet;

use crate::part::{ClosedPolygon, Handle, PolygonPart};

/// Appends the handles of `other` that `target` does not hold yet.
pub fn union_into(target: &mut Vec<Handle>, other: &[Handle]) {
    let mut seen: HashSet<Handle> = target.iter().cloned().collect();
    for handle in other {
        if seen.insert(handle.clone()) {
            target.push(handle.clone());
        }
    }
}

pub fn union(a: &[Handle], b: &[Handle]) -> Vec<Handle> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    union_into(&mut out, a);
    union_into(&mut out, b);
    out
}

/// Distinct handles of all parts, in first-seen order.
pub fn part_handles<'a>(parts: impl IntoIterator<Item = &'a PolygonPart>) -> Vec<Handle> {
    let mut out = Vec::new();
    for part in parts {
        union_into(&mut out, &part.handles);
    }
    out
}

/// Distinct handles of all polygons, in first-seen order.
pub fn polygon_handles<'a>(polygons: impl IntoIterator<Item = &'a ClosedPolygon>) -> Vec<Handle> {
    let mut out = Vec::new();
    for polygon in polygons {
        union_into(&mut out, &polygon.handles);
    }
    out
}

/// Input handles that no output polygon carries. Empty when nothing was lost.
pub fn missing_handles(inputs: &[PolygonPart], outputs: &[ClosedPolygon]) -> Vec<Handle> {
    let covered: HashSet<Handle> = outputs
        .iter()
        .flat_map(|p| p.handles.iter().cloned())
        .collect();
    part_handles(inputs)
        .into_iter()
        .filter(|h| !covered.contains(h))
        .collect()
}
