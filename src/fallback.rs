use crate::error::{MergeError, Result};
use crate::part::{ClosedPolygon, Point, PolygonPart};
use crate::provenance;

/// Smallest half-extent given to a degenerate fallback rectangle.
pub const MIN_FALLBACK_PADDING: f64 = 1e-6;

/// What to do with open parts nothing else could resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// Close them all with a single bounding rectangle.
    #[default]
    BoundingBox,
    /// Fail with [`MergeError::UnresolvableGeometry`].
    Strict,
}

/// Empties `open`, returning the polygon that now carries its handles.
pub fn resolve_leftovers(open: &mut Vec<PolygonPart>, tol: f64, mode: FallbackMode) -> Result<Option<ClosedPolygon>> {
    if open.is_empty() {
        return Ok(None);
    }
    let handles = provenance::part_handles(open.iter());
    match mode {
        FallbackMode::Strict => Err(MergeError::UnresolvableGeometry { handles }),
        FallbackMode::BoundingBox => {
            log::warn!(
                "closing {} unresolved open part(s) with a bounding box: {:?}",
                open.len(),
                handles
            );
            let polygon = bounding_box(open, tol).map(|ring| ClosedPolygon::new(ring, handles));
            open.clear();
            Ok(polygon)
        }
    }
}

// Counter-clockwise rectangle over every point of every part.
fn bounding_box(parts: &[PolygonPart], tol: f64) -> Option<Vec<Point>> {
    let mut points = parts.iter().flat_map(|p| p.points.iter());
    let first = points.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let pad = tol.max(MIN_FALLBACK_PADDING);
    if max_x - min_x <= 0.0 {
        min_x -= pad;
        max_x += pad;
    }
    if max_y - min_y <= 0.0 {
        min_y -= pad;
        max_y += pad;
    }

    Some(vec![
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
        Point::new(min_x, min_y),
    ])
}
