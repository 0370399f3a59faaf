use std::fmt;

use geo::Area;
use geo_types::{Coord, LineString, Polygon};

use crate::error::{MergeError, Result};

/// Areas at or below this are treated as zero (drawing units squared).
pub const AREA_EPSILON: f64 = 1e-9;

/// A vertex in drawing units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinate deltas strictly below `tol`.
    pub fn eq_to(&self, other: &Point, tol: f64) -> bool {
        (self.x - other.x).abs() < tol && (self.y - other.y).abs() < tol
    }
}

impl From<Coord<f64>> for Point {
    fn from(c: Coord<f64>) -> Self {
        Point { x: c.x, y: c.y }
    }
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Identifier of one source drawing entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(String);

impl Handle {
    pub fn new(id: impl Into<String>) -> Self {
        Handle(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(s: &str) -> Self {
        Handle(s.to_owned())
    }
}

impl From<String> for Handle {
    fn from(s: String) -> Self {
        Handle(s)
    }
}

/// An open (or not yet classified) point chain and the entities it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonPart {
    pub points: Vec<Point>,
    pub handles: Vec<Handle>,
}

impl PolygonPart {
    /// Builds a part for a single entity. Fails for chains shorter than two points.
    pub fn new(points: Vec<Point>, handle: impl Into<Handle>) -> Result<Self> {
        let handle = handle.into();
        if points.len() < 2 {
            return Err(MergeError::DegenerateEntity {
                handle,
                reason: format!("{} point(s), at least 2 required", points.len()),
            });
        }
        Ok(Self { points, handles: vec![handle] })
    }

    /// Like [`PolygonPart::new`], but first collapses consecutive points that
    /// are equal within `tol`, as produced by over-dense curve flattening.
    pub fn from_entity(points: Vec<Point>, handle: impl Into<Handle>, tol: f64) -> Result<Self> {
        let mut unique: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            match unique.last() {
                Some(last) if last.eq_to(&p, tol) => {}
                _ => unique.push(p),
            }
        }
        Self::new(unique, handle)
    }

    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn is_closed(&self, tol: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.is_valid() => first.eq_to(last, tol),
            _ => false,
        }
    }

    /// First vertex. The part must be valid (see [`PolygonPart::is_valid`]).
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Last vertex. The part must be valid.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Area of the ring this chain would form if closed.
    pub fn ring_area(&self) -> f64 {
        ring_polygon(&self.points).unsigned_area()
    }
}

/// A closed ring (first point == last point) and every handle merged into it.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedPolygon {
    pub ring: Vec<Point>,
    pub handles: Vec<Handle>,
}

impl ClosedPolygon {
    pub fn new(mut ring: Vec<Point>, handles: Vec<Handle>) -> Self {
        close_ring(&mut ring);
        Self { ring, handles }
    }

    /// Promotes a self-closing chain. The closing vertex is snapped onto the
    /// first one so the ring is exactly closed.
    pub fn from_part(part: PolygonPart) -> Self {
        let PolygonPart { mut points, handles } = part;
        if points.len() > 2 {
            let first = points[0];
            if let Some(last) = points.last_mut() {
                *last = first;
            }
        }
        Self::new(points, handles)
    }

    pub fn from_polygon(polygon: &Polygon<f64>, handles: Vec<Handle>) -> Self {
        let ring = polygon.exterior().coords().map(|c| Point::from(*c)).collect();
        Self::new(ring, handles)
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        ring_polygon(&self.ring)
    }

    pub fn area(&self) -> f64 {
        self.to_polygon().unsigned_area()
    }
}

pub(crate) fn ring_polygon(points: &[Point]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord::from(*p)).collect();
    // LineString is closed by Polygon::new if needed.
    Polygon::new(LineString::new(coords), vec![])
}

fn close_ring(ring: &mut Vec<Point>) {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_to_is_strict() {
        let a = Point::new(0.0, 0.0);
        assert!(a.eq_to(&Point::new(0.05, -0.05), 0.1));
        assert!(!a.eq_to(&Point::new(0.1, 0.0), 0.1));
        assert!(!a.eq_to(&a, 0.0));
    }

    #[test]
    fn test_part_requires_two_points() {
        let err = PolygonPart::new(vec![Point::new(1.0, 1.0)], "A1").unwrap_err();
        assert!(matches!(err, MergeError::DegenerateEntity { ref handle, .. } if handle.as_str() == "A1"));
    }

    #[test]
    fn test_from_entity_drops_duplicate_points() {
        let part = PolygonPart::from_entity(
            vec![Point::new(0.0, 0.0), Point::new(0.001, 0.0), Point::new(1.0, 0.0)],
            "L1",
            0.01,
        )
        .unwrap();
        assert_eq!(part.points, vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);

        let collapsed = PolygonPart::from_entity(vec![Point::new(0.0, 0.0), Point::new(0.001, 0.0)], "L2", 0.01);
        assert!(collapsed.is_err());
    }

    #[test]
    fn test_is_closed_within_tolerance() {
        let part = PolygonPart::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.01, 0.0)],
            "P",
        )
        .unwrap();
        assert!(part.is_closed(0.1));
        assert!(!part.is_closed(0.001));
    }

    #[test]
    fn test_from_part_snaps_closing_vertex() {
        let part = PolygonPart::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.01, 0.0)],
            "P",
        )
        .unwrap();
        let closed = ClosedPolygon::from_part(part);
        assert_eq!(closed.ring.len(), 4);
        assert_eq!(closed.ring.first(), closed.ring.last());
        assert!((closed.area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_new_closes_open_ring() {
        let closed = ClosedPolygon::new(
            vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, 2.0)],
            vec![Handle::from("T")],
        );
        assert_eq!(closed.ring.len(), 4);
        assert!((closed.area() - 2.0).abs() < 1e-12);
    }
}
