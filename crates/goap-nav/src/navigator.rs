use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec3>,
}

impl NavPath {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// A navigation backend (grid, navmesh, ...).
pub trait Navigator {
    fn find_path(&self, start: Vec3, goal: Vec3) -> Option<NavPath>;

    /// Project a point onto the nearest navigable surface.
    ///
    /// Backends that don't support projection may return `None`.
    fn nearest_point(&self, _point: Vec3) -> Option<Vec3> {
        None
    }

    /// Path-completeness query: `true` iff a full path from `start` to `goal` exists.
    fn can_reach(&self, start: Vec3, goal: Vec3) -> bool {
        self.find_path(start, goal).is_some()
    }
}
