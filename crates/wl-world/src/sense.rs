//! Perception and navigation capability traits.

use wl_core::Vec3;

/// How strictly a destination must be reachable.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathRequirement {
    /// The destination itself must be walkable.
    Exact,
    /// Some walkable point within the given distance of the destination is
    /// enough (e.g. a target standing on a rock).
    Nearby(f32),
}

/// Line-of-sight and field-of-view queries.
pub trait Visibility {
    /// `true` if `to` is within `range` metres of `from` on the horizontal
    /// plane, inside the `fov_deg` cone around `forward`, within
    /// `height_tolerance` metres vertically, and not occluded.
    fn is_visible(
        &self,
        from:             Vec3,
        forward:          Vec3,
        to:               Vec3,
        range:            f32,
        fov_deg:          f32,
        height_tolerance: f32,
    ) -> bool;
}

/// Navigation queries.
pub trait Pathfinder {
    fn can_reach_position(&self, from: Vec3, to: Vec3, requirement: PathRequirement) -> bool;

    /// Begin moving toward `to` at `speed`.  `false` when no path exists.
    fn start_path(&self, from: Vec3, to: Vec3, speed: f32) -> bool;
}
