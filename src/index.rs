use crate::shape::Shape;
use crate::sphere::Point;
use rstar::RTree;
use std::mem;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;
use tracing::debug;

/// A queryable set of boundary shapes.
///
/// Shapes are staged during construction, then bulk-loaded into an R-tree
/// over their unit-vector envelopes. [`ShapeIndex::build`] pays that cost
/// up front (around a second for the largest shipped dataset); otherwise
/// the first query pays it, exactly once, behind a one-shot barrier. Once
/// built, the index is read-only and queries need no locking.
#[derive(Debug, Default)]
pub struct ShapeIndex {
    staged: Mutex<Vec<Shape>>,
    tree: OnceLock<RTree<Shape>>,
}

impl ShapeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, mut shape: Shape) {
        let staged = self.staged.get_mut().expect("shape index lock poisoned");
        shape.seq = staged.len();
        staged.push(shape);
    }

    /// Materializes the query structure now instead of on the first query.
    pub fn build(&self) {
        self.tree();
    }

    fn tree(&self) -> &RTree<Shape> {
        self.tree.get_or_init(|| {
            let staged = mem::take(&mut *self.staged.lock().expect("shape index lock poisoned"));
            let started = Instant::now();
            let tree = RTree::bulk_load(staged);
            debug!(shapes = tree.size(), elapsed = ?started.elapsed(), "built shape index");
            tree
        })
    }

    /// Every shape whose polygon contains `point`.
    ///
    /// The R-tree narrows the candidates by envelope; the spherical
    /// containment test decides. Iteration order is unspecified but stable
    /// for a given build.
    pub fn containing(&self, point: Point) -> impl Iterator<Item = &Shape> + '_ {
        let query = [point.x, point.y, point.z];
        self.tree()
            .locate_all_at_point(&query)
            .filter(move |shape| shape.contains(point))
    }

    pub fn len(&self) -> usize {
        match self.tree.get() {
            Some(tree) => tree.size(),
            None => self
                .staged
                .lock()
                .expect("shape index lock poisoned")
                .len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
