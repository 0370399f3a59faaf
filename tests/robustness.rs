use outline_merge::provenance::missing_handles;
use outline_merge::{Handle, PartMerger, Point, PolygonPart};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn random_drawing(rng: &mut StdRng, segments: usize, squares: usize) -> Vec<PolygonPart> {
    let mut parts = Vec::new();
    for i in 0..segments {
        let a = Point::new(rng.gen_range(0.0..20.0), rng.gen_range(0.0..20.0));
        let b = Point::new(a.x + rng.gen_range(-3.0..3.0), a.y + rng.gen_range(-3.0..3.0));
        parts.push(PolygonPart::new(vec![a, b], format!("seg-{}", i)).unwrap());
    }
    for i in 0..squares {
        let x = rng.gen_range(0.0..18.0);
        let y = rng.gen_range(0.0..18.0);
        let s = rng.gen_range(0.5..4.0);
        let ring = vec![
            Point::new(x, y),
            Point::new(x + s, y),
            Point::new(x + s, y + s),
            Point::new(x, y + s),
            Point::new(x, y),
        ];
        parts.push(PolygonPart::new(ring, format!("sq-{}", i)).unwrap());
    }
    parts
}

// Cells of a grid drawn as loose, randomly reversed edges, shuffled.
fn exploded_grid(rng: &mut StdRng, n: usize) -> Vec<PolygonPart> {
    let mut parts = Vec::new();
    for row in 0..n {
        for col in 0..n {
            let (x, y) = (col as f64 * 3.0, row as f64 * 3.0);
            let c = [
                Point::new(x, y),
                Point::new(x + 2.0, y),
                Point::new(x + 2.0, y + 2.0),
                Point::new(x, y + 2.0),
            ];
            for k in 0..4 {
                let mut edge = vec![c[k], c[(k + 1) % 4]];
                if rng.gen_bool(0.5) {
                    edge.reverse();
                }
                parts.push(PolygonPart::new(edge, format!("cell-{}-{}-{}", row, col, k)).unwrap());
            }
        }
    }
    for i in (1..parts.len()).rev() {
        let j = rng.gen_range(0..=i);
        parts.swap(i, j);
    }
    parts
}

#[test]
fn test_random_drawings_lose_no_handles() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..10 {
        let parts = random_drawing(&mut rng, 12, 6);
        let polygons = PartMerger::new(0.05).merge(parts.clone()).expect("merge failed");

        assert!(
            missing_handles(&parts, &polygons).is_empty(),
            "round {} lost handles",
            round
        );

        // Each input handle ends up in exactly one polygon.
        let mut seen: HashMap<&Handle, usize> = HashMap::new();
        for polygon in &polygons {
            assert!(polygon.area() > 0.0);
            for handle in &polygon.handles {
                *seen.entry(handle).or_default() += 1;
            }
        }
        assert!(seen.values().all(|&n| n == 1), "round {} duplicated handles", round);
    }
}

#[test]
fn test_shuffled_exploded_grid_closes_every_cell() {
    let mut rng = StdRng::seed_from_u64(42);
    let parts = exploded_grid(&mut rng, 4);
    let polygons = PartMerger::new(0.01).merge(parts).unwrap();

    assert_eq!(polygons.len(), 16);
    for polygon in &polygons {
        assert_eq!(polygon.handles.len(), 4);
        assert!((polygon.area() - 4.0).abs() < 1e-9);
    }
}

#[test]
fn test_same_input_same_output() {
    let mut rng = StdRng::seed_from_u64(99);
    let parts = random_drawing(&mut rng, 10, 5);
    let merger = PartMerger::new(0.05);
    let first = merger.merge(parts.clone()).unwrap();
    let second = merger.merge(parts).unwrap();
    assert_eq!(first, second);
}
