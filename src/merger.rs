use crate::absorb::absorb_contained;
use crate::classify::{classify, drop_invalid, promote_closed};
use crate::error::{MergeError, Result};
use crate::fallback::{resolve_leftovers, FallbackMode};
use crate::merge::merge_closed;
use crate::part::{ClosedPolygon, PolygonPart};
use crate::stitch::stitch_first;

/// Default share of a child's area that must overlap its parent for the
/// tolerant nesting test.
pub const DEFAULT_NESTED_COVERAGE_RATIO: f64 = 0.9;

/// Resolves open and closed parts into closed, handle-tagged polygons.
#[derive(Clone, Debug)]
pub struct PartMerger {
    /// Endpoint matching distance and containment / proximity margin.
    pub tolerance: f64,
    pub nested_coverage_ratio: f64,
    pub fallback: FallbackMode,
    /// Give up with [`MergeError::IterationLimit`] after this many rounds.
    pub max_iterations: Option<usize>,
}

impl PartMerger {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            nested_coverage_ratio: DEFAULT_NESTED_COVERAGE_RATIO,
            fallback: FallbackMode::default(),
            max_iterations: None,
        }
    }

    pub fn with_coverage_ratio(mut self, ratio: f64) -> Self {
        self.nested_coverage_ratio = ratio;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackMode) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Classifies `parts` and merges them.
    pub fn merge(&self, parts: Vec<PolygonPart>) -> Result<Vec<ClosedPolygon>> {
        self.validate()?;
        let (open, closed) = classify(parts, self.tolerance);
        log::debug!("classified {} open and {} closed part(s)", open.len(), closed.len());
        self.merge_classified(open, closed)
    }

    /// Runs the merge loop on already classified parts.
    ///
    /// Each round merges the closed polygons, promotes chains that have
    /// closed, then makes at most one kind of progress on the open chains:
    /// one stitch, else one absorption pass, else the fallback.
    pub fn merge_classified(
        &self,
        mut open: Vec<PolygonPart>,
        mut closed: Vec<ClosedPolygon>,
    ) -> Result<Vec<ClosedPolygon>> {
        self.validate()?;
        drop_invalid(&mut open);
        if open.is_empty() && closed.is_empty() {
            return Err(MergeError::EmptyInput);
        }
        let tol = self.tolerance;

        let mut round = 0usize;
        loop {
            round += 1;
            if let Some(limit) = self.max_iterations {
                if round > limit {
                    return Err(MergeError::IterationLimit(limit));
                }
            }

            closed = merge_closed(closed, tol, self.nested_coverage_ratio);
            let promoted = promote_closed(&mut open, &mut closed, tol);
            log::trace!(
                "round {}: {} open, {} closed, {} promoted",
                round,
                open.len(),
                closed.len(),
                promoted
            );
            if promoted > 0 {
                // New rings join the next merge before anything else.
                continue;
            }

            if open.is_empty() {
                log::debug!("merge settled after {} round(s) with {} polygon(s)", round, closed.len());
                return Ok(closed);
            }

            if stitch_first(&mut open, tol) {
                continue;
            }

            if absorb_contained(&mut open, &mut closed) {
                continue;
            }

            if let Some(polygon) = resolve_leftovers(&mut open, tol, self.fallback)? {
                closed.push(polygon);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(MergeError::InvalidTolerance(self.tolerance));
        }
        let ratio = self.nested_coverage_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(MergeError::InvalidCoverageRatio(ratio));
        }
        Ok(())
    }
}

/// Merges `parts` with default settings.
pub fn merge_parts(parts: Vec<PolygonPart>, tolerance: f64) -> Result<Vec<ClosedPolygon>> {
    PartMerger::new(tolerance).merge(parts)
}
