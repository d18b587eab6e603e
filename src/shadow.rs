//! Orbiting shadow sources.
//!
//! Two dim spots orbit the ring, diametrically opposite each other, and the
//! shading stage darkens fragments near them. The controller is the only
//! stateful piece of the per-frame pipeline besides the clock: a single
//! angle, advanced once per tick, running for the effect's lifetime.

use glam::Vec3;

/// Angle increment per tick is `shadow_speed * SHADOW_STEP_SCALE`.
pub const SHADOW_STEP_SCALE: f32 = 0.02;

/// Shadow orbit state: one monotonically advancing angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowOrbit {
    angle: f32,
}

impl ShadowOrbit {
    /// Start at angle zero (first shadow on the +x axis).
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the orbit by one tick.
    pub fn advance(&mut self, shadow_speed: f32) {
        self.angle += shadow_speed * SHADOW_STEP_SCALE;
    }

    /// Current orbit angle in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// The two shadow positions on the ring circle at z = 0.
    ///
    /// The second is always the antipode of the first:
    /// `positions[1] == -positions[0]` in x/y for every angle.
    pub fn positions(&self, ring_radius: f32) -> [Vec3; 2] {
        let opposite = self.angle + std::f32::consts::PI;
        [
            Vec3::new(
                ring_radius * self.angle.cos(),
                ring_radius * self.angle.sin(),
                0.0,
            ),
            Vec3::new(
                ring_radius * opposite.cos(),
                ring_radius * opposite.sin(),
                0.0,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_antipodal() {
        let mut orbit = ShadowOrbit::new();
        for _ in 0..500 {
            orbit.advance(0.7);
            let [a, b] = orbit.positions(3.474);
            assert!((a.x + b.x).abs() < 1e-4);
            assert!((a.y + b.y).abs() < 1e-4);
            assert_eq!(a.z, 0.0);
            assert_eq!(b.z, 0.0);
        }
    }

    #[test]
    fn test_positions_on_ring_circle() {
        let mut orbit = ShadowOrbit::new();
        orbit.advance(1.3);
        for pos in orbit.positions(5.0) {
            assert!((pos.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_angle_advances_monotonically() {
        let mut orbit = ShadowOrbit::new();
        let mut last = orbit.angle();
        for _ in 0..10 {
            orbit.advance(0.5);
            assert!(orbit.angle() > last);
            assert!((orbit.angle() - last - 0.5 * SHADOW_STEP_SCALE).abs() < 1e-7);
            last = orbit.angle();
        }
    }
}
