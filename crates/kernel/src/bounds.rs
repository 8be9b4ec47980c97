use burnout_common::{GridExtent, GridRect};
use serde::{Deserialize, Serialize};

/// What happens when a move would leave the declared map.
///
/// Clamping is not offered: with one-cell moves a clamped move is the same
/// as a rejected one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Moves are never checked against the map extents.
    #[default]
    Unbounded,
    /// Candidates outside `0..rows` x `0..cols` are rejected like collisions.
    Reject,
}

impl BoundsPolicy {
    /// True if `candidate` may be entered on `map` under this policy.
    pub fn admits(self, map: &GridExtent, candidate: &GridRect) -> bool {
        match self {
            BoundsPolicy::Unbounded => true,
            BoundsPolicy::Reject => map.contains(candidate),
        }
    }
}
