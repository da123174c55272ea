use goap_nav::{NavWorld, Vec3};

/// Everything an [`Agent`](crate::Agent) needs from its host besides sensing callbacks.
pub trait GoapWorld: NavWorld {
    /// Direct lookup of an entity carrying `tag`, for actions that know their target.
    fn find_by_tag(&self, agent: Self::Agent, tag: &str) -> Option<Self::Entity>;

    /// Closest point on `entity` to `from`, or `None` if the entity is gone.
    fn closest_point(&self, entity: Self::Entity, from: Vec3) -> Option<Vec3>;
}
