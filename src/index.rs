use geo::BoundingRect;
use geo_types::Polygon;
use rstar::{RTree, RTreeObject, AABB};
use smallvec::SmallVec;

// Envelope of one polygon, grown by the merge tolerance, tagged with its slot.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IndexedEnvelope {
    envelope: AABB<[f64; 2]>,
    pub index: usize,
}

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

pub(crate) fn grown_envelope(polygon: &Polygon<f64>, margin: f64) -> Option<AABB<[f64; 2]>> {
    let bbox = polygon.bounding_rect()?;
    Some(AABB::from_corners(
        [bbox.min().x - margin, bbox.min().y - margin],
        [bbox.max().x + margin, bbox.max().y + margin],
    ))
}

/// Pair-candidate lookup over a fixed list of polygons.
pub(crate) struct EnvelopeIndex {
    tree: RTree<IndexedEnvelope>,
    envelopes: Vec<Option<AABB<[f64; 2]>>>,
}

impl EnvelopeIndex {
    pub fn build(polygons: &[Polygon<f64>], margin: f64) -> Self {
        let envelopes: Vec<_> = crate::utils::parallel::map(polygons, |p| grown_envelope(p, margin));
        let entries = envelopes
            .iter()
            .enumerate()
            .filter_map(|(index, env)| env.as_ref().map(|&envelope| IndexedEnvelope { envelope, index }))
            .collect();
        Self { tree: RTree::bulk_load(entries), envelopes }
    }

    /// Indices greater than `i` whose envelope touches `i`'s, ascending.
    pub fn candidates_after(&self, i: usize) -> SmallVec<[usize; 8]> {
        let Some(Some(env)) = self.envelopes.get(i) else {
            return SmallVec::new();
        };
        let mut out: SmallVec<[usize; 8]> = self
            .tree
            .locate_in_envelope_intersecting(env)
            .map(|e| e.index)
            .filter(|&j| j > i)
            .collect();
        out.sort_unstable();
        out
    }
}
