//! World-space vector type.
//!
//! Y is up.  Threat and detection ranges are measured on the horizontal
//! (x, z) plane; the vertical component only matters for the height tolerance
//! of visibility checks.

use serde::{Deserialize, Serialize};

/// A point or direction in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    pub fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[inline]
    pub fn scale(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Full 3-D distance in metres.
    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        self.sub(other).length()
    }

    /// Distance on the horizontal plane, ignoring height.
    #[inline]
    pub fn flat_distance(self, other: Vec3) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec3::ZERO
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Linear interpolation; `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        self.add(other.sub(self).scale(t))
    }

    /// Angle in degrees between `forward` and the direction to `target`,
    /// measured on the horizontal plane.  Returns 0 for coincident points.
    pub fn flat_angle_to(self, forward: Vec3, target: Vec3) -> f32 {
        let to = Vec3::new(target.x - self.x, 0.0, target.z - self.z).normalized();
        let fwd = Vec3::new(forward.x, 0.0, forward.z).normalized();
        if to == Vec3::ZERO || fwd == Vec3::ZERO {
            return 0.0;
        }
        let dot = (to.x * fwd.x + to.z * fwd.z).clamp(-1.0, 1.0);
        dot.acos().to_degrees()
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
