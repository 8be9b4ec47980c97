use burnout_common::GridRect;
use std::collections::HashSet;

/// The static collidable cells of a map.
///
/// Keeps the registration order for inspection and a corner index for
/// lookups. Built once during setup; there is no way to add or remove
/// obstacles afterwards.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    rects: Vec<GridRect>,
    corners: HashSet<(i32, i32)>,
}

impl ObstacleSet {
    pub fn new(rects: Vec<GridRect>) -> Self {
        let corners = rects.iter().map(GridRect::leading_corner).collect();
        Self { rects, corners }
    }

    /// Obstacles in registration order.
    pub fn rects(&self) -> &[GridRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// True if `candidate`'s leading corner matches some obstacle's.
    ///
    /// With unit cells and one-cell moves, a corner match is the same as
    /// region overlap.
    pub fn blocks(&self, candidate: &GridRect) -> bool {
        self.corners.contains(&candidate.leading_corner())
    }
}

impl FromIterator<GridRect> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = GridRect>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Linear-scan collision test against the obstacle list.
///
/// Gives the same answer as [`ObstacleSet::blocks`].
pub fn was_bumped(candidate: &GridRect, obstacles: &ObstacleSet) -> bool {
    let corner = candidate.leading_corner();
    obstacles
        .rects()
        .iter()
        .any(|o| o.leading_corner() == corner)
}
