use crate::part::{ClosedPolygon, PolygonPart, AREA_EPSILON};

/// Splits parts into open chains and closed rings, keeping input order.
///
/// A chain only counts as closed when it also encloses some area; a stroke
/// that runs out and back onto its own start stays open. Parts with fewer
/// than two points are dropped with a warning.
pub fn classify(parts: Vec<PolygonPart>, tol: f64) -> (Vec<PolygonPart>, Vec<ClosedPolygon>) {
    let mut open = Vec::new();
    let mut closed = Vec::new();
    for part in parts {
        if !part.is_valid() {
            warn_invalid(&part);
        } else if closes(&part, tol) {
            closed.push(ClosedPolygon::from_part(part));
        } else {
            open.push(part);
        }
    }
    (open, closed)
}

/// Removes parts with fewer than two points, keeping the order of the rest.
pub fn drop_invalid(parts: &mut Vec<PolygonPart>) {
    parts.retain(|part| {
        let valid = part.is_valid();
        if !valid {
            warn_invalid(part);
        }
        valid
    });
}

fn warn_invalid(part: &PolygonPart) {
    log::warn!(
        "skipping part {:?}: {} point(s), at least 2 required",
        part.handles,
        part.points.len()
    );
}

pub(crate) fn closes(part: &PolygonPart, tol: f64) -> bool {
    part.is_closed(tol) && part.ring_area() > AREA_EPSILON
}

/// Moves every open part that has become self-closing into `closed`.
/// Returns the number of promoted parts.
pub fn promote_closed(open: &mut Vec<PolygonPart>, closed: &mut Vec<ClosedPolygon>, tol: f64) -> usize {
    let before = open.len();
    let mut remaining = Vec::with_capacity(open.len());
    for part in open.drain(..) {
        if closes(&part, tol) {
            log::trace!("promoting self-closing chain {:?}", part.handles);
            closed.push(ClosedPolygon::from_part(part));
        } else {
            remaining.push(part);
        }
    }
    *open = remaining;
    before - open.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Point;

    fn part(points: &[(f64, f64)], handle: &str) -> PolygonPart {
        PolygonPart::new(points.iter().map(|&p| Point::from(p)).collect(), handle).unwrap()
    }

    #[test]
    fn test_classify_splits_and_keeps_order() {
        let parts = vec![
            part(&[(0.0, 0.0), (1.0, 0.0)], "line"),
            part(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)], "tri"),
            part(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)], "arc"),
        ];
        let (open, closed) = classify(parts, 0.1);
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].handles[0].as_str(), "line");
        assert_eq!(open[1].handles[0].as_str(), "arc");
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].handles[0].as_str(), "tri");
    }

    #[test]
    fn test_zero_area_loop_stays_open() {
        let parts = vec![part(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)], "back-and-forth")];
        let (open, closed) = classify(parts, 0.1);
        assert_eq!(open.len(), 1);
        assert!(closed.is_empty());
    }

    #[test]
    fn test_parts_without_two_points_are_dropped() {
        let lone = PolygonPart { points: vec![Point::new(3.0, 3.0)], handles: vec!["lone".into()] };
        let empty = PolygonPart { points: vec![], handles: vec!["empty".into()] };
        let line = part(&[(0.0, 0.0), (1.0, 0.0)], "line");

        let (open, closed) = classify(vec![lone.clone(), line.clone(), empty.clone()], 0.1);
        assert_eq!(open, vec![line.clone()]);
        assert!(closed.is_empty());

        let mut parts = vec![empty, line.clone(), lone];
        drop_invalid(&mut parts);
        assert_eq!(parts, vec![line]);
    }

    #[test]
    fn test_zero_tolerance_needs_exact_closure() {
        // eq_to is strict, so nothing is closed at tol == 0.
        let parts = vec![part(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)], "tri")];
        let (open, closed) = classify(parts.clone(), 0.0);
        assert_eq!((open.len(), closed.len()), (1, 0));
        let (open, closed) = classify(parts, 1e-12);
        assert_eq!((open.len(), closed.len()), (0, 1));
    }
}
