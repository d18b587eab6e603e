//! Particle field generation.
//!
//! Builds the static per-particle attributes for the ring: a stochastic
//! torus-shell placement plus an outward drift direction per shard. The
//! buffer is immutable after generation and is regenerated wholesale
//! whenever a geometry-affecting tunable changes; appearance tunables never
//! touch it.
//!
//! Layout is structure-of-arrays so each attribute can be uploaded as its
//! own instanced vertex buffer.

use crate::config::RingConfig;
use crate::noise::normalize_or_fallback;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// One particle's static attributes, as generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Spawn position on the toroidal shell.
    pub position: Vec3,
    /// Unit outward drift direction.
    pub direction: Vec3,
    /// Base size multiplier in [0.5, 1.0).
    pub base_scale: f32,
    /// Per-particle random seeds in [0, 1); `.x` drives the twinkle phase.
    pub randomness: Vec3,
    /// Phase offset into the repeating life cycle, in [0, 1).
    pub life_offset: f32,
}

/// Static per-particle attribute buffers (structure-of-arrays).
///
/// All arrays share the same length. Instances are immutable once built;
/// regeneration produces a fresh `ParticleBuffer` which the host swaps in
/// atomically, so a render pass never observes a partial buffer.
#[derive(Debug, Clone, Default)]
pub struct ParticleBuffer {
    pub positions: Vec<Vec3>,
    pub directions: Vec<Vec3>,
    pub base_scales: Vec<f32>,
    pub randomness: Vec<Vec3>,
    pub life_offsets: Vec<f32>,
}

impl ParticleBuffer {
    /// Generate a buffer from the geometry-affecting fields of `config`.
    ///
    /// Deterministic in distribution only: each call draws fresh randoms.
    /// The config is assumed validated.
    pub fn generate(config: &RingConfig) -> Self {
        Self::generate_with(config, &mut SmallRng::from_entropy())
    }

    /// Generate with a caller-supplied RNG, for reproducible tests.
    pub fn generate_with(config: &RingConfig, rng: &mut SmallRng) -> Self {
        let count = config.particles as usize;
        let mut buffer = Self {
            positions: Vec::with_capacity(count),
            directions: Vec::with_capacity(count),
            base_scales: Vec::with_capacity(count),
            randomness: Vec::with_capacity(count),
            life_offsets: Vec::with_capacity(count),
        };

        let ring_radius = config.ring_radius;
        for _ in 0..count {
            let u = rng.gen::<f32>() * TAU;
            let v = rng.gen::<f32>() * TAU;

            // Bias the dispersal shell: outward-facing cross-section angles
            // (cos v near 1) reach dispersal_outer, inward-facing ones stay
            // at dispersal_inner.
            let t = (v.cos() + 1.0) / 2.0;
            let max_r = config.dispersal_inner + t * (config.dispersal_outer - config.dispersal_inner);
            let r = rng.gen::<f32>() * max_r;

            let center = Vec3::new(ring_radius * u.cos(), ring_radius * u.sin(), 0.0);
            let position = Vec3::new(
                (ring_radius + r * v.cos()) * u.cos(),
                (ring_radius + r * v.cos()) * u.sin(),
                r * v.sin(),
            );

            let jitter = Vec3::new(
                (rng.gen::<f32>() - 0.5) * config.direction_spread,
                (rng.gen::<f32>() - 0.5) * config.direction_spread,
                (rng.gen::<f32>() - 0.5) * config.direction_spread,
            );
            // With zero dispersal and zero spread the offset degenerates to
            // zero length; the shared fallback keeps the direction unit.
            let direction = normalize_or_fallback(position - center + jitter);

            buffer.positions.push(position);
            buffer.directions.push(direction);
            buffer.base_scales.push(0.5 + rng.gen::<f32>() * 0.5);
            buffer.randomness.push(Vec3::new(rng.gen(), rng.gen(), rng.gen()));
            buffer.life_offsets.push(rng.gen());
        }

        buffer
    }

    /// Number of particles in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the buffer holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Assemble the `i`-th particle's attributes.
    #[inline]
    pub fn particle(&self, i: usize) -> Particle {
        Particle {
            position: self.positions[i],
            direction: self.directions[i],
            base_scale: self.base_scales[i],
            randomness: self.randomness[i],
            life_offset: self.life_offsets[i],
        }
    }

    /// Iterate over all particles.
    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).map(move |i| self.particle(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_generated_length_matches_count() {
        let config = RingConfig {
            particles: 128,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate_with(&config, &mut test_rng());
        assert_eq!(buffer.len(), 128);
        assert_eq!(buffer.directions.len(), 128);
        assert_eq!(buffer.base_scales.len(), 128);
        assert_eq!(buffer.randomness.len(), 128);
        assert_eq!(buffer.life_offsets.len(), 128);
    }

    #[test]
    fn test_directions_are_unit() {
        let config = RingConfig {
            particles: 500,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate_with(&config, &mut test_rng());
        for dir in &buffer.directions {
            assert!((dir.length() - 1.0).abs() < 1e-4, "non-unit {dir:?}");
            assert!(dir.is_finite());
        }
    }

    #[test]
    fn test_attribute_ranges() {
        let config = RingConfig {
            particles: 500,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate_with(&config, &mut test_rng());
        for &s in &buffer.base_scales {
            assert!((0.5..1.0).contains(&s));
        }
        for &o in &buffer.life_offsets {
            assert!((0.0..1.0).contains(&o));
        }
        for r in &buffer.randomness {
            assert!(r.min_element() >= 0.0 && r.max_element() < 1.0);
        }
    }

    #[test]
    fn test_zero_dispersal_sits_on_ring_circle() {
        // All particles exactly on the ring circle at z = 0, at distance
        // ring_radius from the origin.
        let config = RingConfig {
            particles: 3,
            ring_radius: 1.0,
            dispersal_inner: 0.0,
            dispersal_outer: 0.0,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate_with(&config, &mut test_rng());
        assert_eq!(buffer.len(), 3);
        for pos in &buffer.positions {
            assert!(pos.z.abs() < 1e-6);
            assert!((pos.length() - 1.0).abs() < 1e-5, "off circle: {pos:?}");
        }
    }

    #[test]
    fn test_zero_dispersal_zero_spread_uses_fallback() {
        let config = RingConfig {
            particles: 8,
            dispersal_inner: 0.0,
            dispersal_outer: 0.0,
            direction_spread: 0.0,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate_with(&config, &mut test_rng());
        for dir in &buffer.directions {
            assert_eq!(*dir, crate::noise::FALLBACK_DIRECTION);
        }
    }

    #[test]
    fn test_positions_within_dispersal_shell() {
        let config = RingConfig {
            particles: 500,
            ring_radius: 3.0,
            dispersal_inner: 0.1,
            dispersal_outer: 0.5,
            ..Default::default()
        };
        let buffer = ParticleBuffer::generate_with(&config, &mut test_rng());
        for pos in &buffer.positions {
            // Distance from the ring circle (minor radius of the torus).
            let planar = Vec3::new(pos.x, pos.y, 0.0);
            let ring_point = planar.normalize() * config.ring_radius;
            let minor = (*pos - ring_point).length();
            assert!(minor <= config.dispersal_outer + 1e-4, "minor {minor}");
        }
    }
}
