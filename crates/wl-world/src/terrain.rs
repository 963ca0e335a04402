//! `OpenTerrain` — a bounded flat area with round, sight-blocking obstacles.
//!
//! Paths are straight lines; an obstacle only makes its own interior
//! unreachable.  Good enough for scenarios that do not need a navmesh.

use wl_core::Vec3;

use crate::{PathRequirement, Pathfinder, Visibility};

/// A rock, tree trunk or cliff face, modelled as a vertical cylinder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
}

impl Obstacle {
    #[inline]
    fn contains(&self, p: Vec3) -> bool {
        self.center.flat_distance(p) < self.radius
    }

    /// Does the horizontal segment `a → b` pass through this obstacle?
    fn blocks(&self, a: Vec3, b: Vec3) -> bool {
        let (dx, dz) = (b.x - a.x, b.z - a.z);
        let len_sq = dx * dx + dz * dz;
        let t = if len_sq <= f32::EPSILON {
            0.0
        } else {
            (((self.center.x - a.x) * dx + (self.center.z - a.z) * dz) / len_sq).clamp(0.0, 1.0)
        };
        let closest = Vec3::new(a.x + dx * t, 0.0, a.z + dz * t);
        closest.flat_distance(Vec3::new(self.center.x, 0.0, self.center.z)) < self.radius
    }
}

/// Axis-aligned walkable rectangle on the (x, z) plane.
#[derive(Clone, Debug, PartialEq)]
pub struct OpenTerrain {
    pub min_x:     f32,
    pub min_z:     f32,
    pub max_x:     f32,
    pub max_z:     f32,
    pub obstacles: Vec<Obstacle>,
}

impl OpenTerrain {
    /// A square of side `2 * half_extent` centred on the origin.
    pub fn square(half_extent: f32) -> Self {
        Self {
            min_x:     -half_extent,
            min_z:     -half_extent,
            max_x:     half_extent,
            max_z:     half_extent,
            obstacles: Vec::new(),
        }
    }

    pub fn with_obstacle(mut self, center: Vec3, radius: f32) -> Self {
        self.obstacles.push(Obstacle { center, radius });
        self
    }

    #[inline]
    pub fn in_bounds(&self, p: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_z..=self.max_z).contains(&p.z)
    }

    /// Distance from `p` to the nearest walkable point (0 if `p` is walkable).
    fn distance_to_walkable(&self, p: Vec3) -> f32 {
        let cx = p.x.clamp(self.min_x, self.max_x);
        let cz = p.z.clamp(self.min_z, self.max_z);
        let out = Vec3::new(cx, p.y, cz).flat_distance(p);
        let inside = self
            .obstacles
            .iter()
            .filter(|o| o.contains(p))
            .map(|o| o.radius - o.center.flat_distance(p))
            .fold(0.0f32, f32::max);
        out.max(inside)
    }
}

impl Default for OpenTerrain {
    fn default() -> Self {
        Self::square(500.0)
    }
}

impl Visibility for OpenTerrain {
    fn is_visible(
        &self,
        from:             Vec3,
        forward:          Vec3,
        to:               Vec3,
        range:            f32,
        fov_deg:          f32,
        height_tolerance: f32,
    ) -> bool {
        if from.flat_distance(to) > range {
            return false;
        }
        if (to.y - from.y).abs() > height_tolerance {
            return false;
        }
        if from.flat_angle_to(forward, to) > fov_deg * 0.5 {
            return false;
        }
        !self.obstacles.iter().any(|o| o.blocks(from, to))
    }
}

impl Pathfinder for OpenTerrain {
    fn can_reach_position(&self, from: Vec3, to: Vec3, requirement: PathRequirement) -> bool {
        if self.distance_to_walkable(from) > 0.0 {
            return false;
        }
        let slack = match requirement {
            PathRequirement::Exact      => 0.0,
            PathRequirement::Nearby(r)  => r.max(0.0),
        };
        self.distance_to_walkable(to) <= slack
    }

    fn start_path(&self, from: Vec3, to: Vec3, speed: f32) -> bool {
        speed > 0.0 && self.can_reach_position(from, to, PathRequirement::Exact)
    }
}
