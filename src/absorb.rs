use geo::Intersects;
use geo_types::{Coord, Polygon};

use crate::part::{ClosedPolygon, PolygonPart};
use crate::provenance::union_into;

/// Folds open strokes lying entirely on or inside a closed polygon into it.
///
/// Each open part goes to the first polygon, in list order, that covers all
/// of its points. Geometry is unchanged. Returns whether anything moved.
pub fn absorb_contained(open: &mut Vec<PolygonPart>, closed: &mut [ClosedPolygon]) -> bool {
    if open.is_empty() || closed.is_empty() {
        return false;
    }
    let shapes: Vec<Polygon<f64>> = closed.iter().map(ClosedPolygon::to_polygon).collect();

    let before = open.len();
    let mut remaining = Vec::with_capacity(open.len());
    for part in open.drain(..) {
        match shapes.iter().position(|shape| covers_all(shape, &part)) {
            Some(k) => {
                log::trace!("absorbing {:?} into {:?}", part.handles, closed[k].handles);
                union_into(&mut closed[k].handles, &part.handles);
            }
            None => remaining.push(part),
        }
    }
    *open = remaining;
    open.len() < before
}

fn covers_all(shape: &Polygon<f64>, part: &PolygonPart) -> bool {
    part.points.iter().all(|p| shape.intersects(&Coord::from(*p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{Handle, Point};

    fn unit_square(handle: &str) -> ClosedPolygon {
        ClosedPolygon::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)],
            vec![Handle::from(handle)],
        )
    }

    fn segment(a: (f64, f64), b: (f64, f64), handle: &str) -> PolygonPart {
        PolygonPart::new(vec![a.into(), b.into()], handle).unwrap()
    }

    #[test]
    fn test_inner_stroke_is_absorbed() {
        let square = unit_square("handle1");
        let mut closed = vec![square.clone()];
        let mut open = vec![segment((0.25, 0.25), (0.25, 0.5), "handle2")];

        assert!(absorb_contained(&mut open, &mut closed));
        assert!(open.is_empty());
        assert_eq!(closed[0].ring, square.ring);
        let handles: Vec<&str> = closed[0].handles.iter().map(Handle::as_str).collect();
        assert_eq!(handles, vec!["handle1", "handle2"]);
    }

    #[test]
    fn test_stroke_on_the_boundary_counts_as_covered() {
        let mut closed = vec![unit_square("sq")];
        let mut open = vec![segment((0.0, 0.2), (0.0, 0.8), "edge")];
        assert!(absorb_contained(&mut open, &mut closed));
        assert!(open.is_empty());
    }

    #[test]
    fn test_stroke_leaving_the_polygon_is_kept() {
        let mut closed = vec![unit_square("sq")];
        let mut open = vec![segment((0.5, 0.5), (1.5, 0.5), "out")];
        assert!(!absorb_contained(&mut open, &mut closed));
        assert_eq!(open.len(), 1);
        assert_eq!(closed[0].handles.len(), 1);
    }
}
