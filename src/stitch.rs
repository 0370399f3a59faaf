use crate::part::PolygonPart;

/// Which endpoints of `a` and `b` coincide, in matching priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Junction {
    StartStart,
    StartEnd,
    EndStart,
    EndEnd,
}

/// Returns the first endpoint pairing of `a` and `b` that is equal within `tol`.
pub fn junction(a: &PolygonPart, b: &PolygonPart, tol: f64) -> Option<Junction> {
    let (a_start, a_end) = (a.start(), a.end());
    let (b_start, b_end) = (b.start(), b.end());
    if a_start.eq_to(&b_start, tol) {
        Some(Junction::StartStart)
    } else if a_start.eq_to(&b_end, tol) {
        Some(Junction::StartEnd)
    } else if a_end.eq_to(&b_start, tol) {
        Some(Junction::EndStart)
    } else if a_end.eq_to(&b_end, tol) {
        Some(Junction::EndEnd)
    } else {
        None
    }
}

/// Joins two open chains at a shared endpoint.
///
/// The shared vertex appears once, taken from whichever chain comes first in
/// the result. Handles are `a`'s followed by `b`'s, duplicates kept.
pub fn stitch(a: &PolygonPart, b: &PolygonPart, tol: f64) -> Option<PolygonPart> {
    let joint = junction(a, b, tol)?;
    let mut points = Vec::with_capacity(a.points.len() + b.points.len() - 1);
    match joint {
        Junction::StartStart => {
            points.extend(b.points.iter().rev());
            points.extend(&a.points[1..]);
        }
        Junction::StartEnd => {
            points.extend(&b.points);
            points.extend(&a.points[1..]);
        }
        Junction::EndStart => {
            points.extend(&a.points);
            points.extend(&b.points[1..]);
        }
        Junction::EndEnd => {
            points.extend(&a.points);
            points.extend(b.points.iter().rev().skip(1));
        }
    }

    let mut handles = Vec::with_capacity(a.handles.len() + b.handles.len());
    handles.extend(a.handles.iter().cloned());
    handles.extend(b.handles.iter().cloned());

    Some(PolygonPart { points, handles })
}

/// Stitches the first matching pair `(i, j)`, `i < j`, in index order.
///
/// Both originals are removed and the joined chain is appended. Returns
/// `false` if no pair shares an endpoint.
pub fn stitch_first(open: &mut Vec<PolygonPart>, tol: f64) -> bool {
    for i in 0..open.len() {
        for j in (i + 1)..open.len() {
            let Some(joined) = stitch(&open[i], &open[j], tol) else {
                continue;
            };
            log::trace!("stitched {:?} + {:?}", open[i].handles, open[j].handles);
            // j > i, so removing j first keeps i valid.
            open.remove(j);
            open.remove(i);
            open.push(joined);
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "stitch_tests.rs"]
mod tests;
