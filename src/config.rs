//! Effect configuration.
//!
//! [`RingConfig`] is the full set of tunables for the ring effect, taken as
//! an immutable snapshot per frame. Fields split into two groups:
//!
//! - **Geometry-affecting** - changing any of these invalidates the static
//!   particle buffers and triggers a full regeneration
//!   ([`RingConfig::geometry_differs`]).
//! - **Appearance-only** - consumed fresh every frame by the transform and
//!   shading stages; changing them never touches the buffers.
//!
//! Bloom and the external-asset fields are pass-through: the core never
//! consumes them, it only hands them to the external post-process stage and
//! sub-scene renderer.

use crate::error::ConfigError;
use glam::Vec3;

/// Minimum accepted particle count.
pub const MIN_PARTICLES: u32 = 1;
/// Maximum accepted particle count.
pub const MAX_PARTICLES: u32 = 20_000;

/// All tunables for the ring effect.
///
/// Defaults give a cyan-to-deep-blue ring of 5000 shards drifting outward
/// with two orbiting dim spots.
#[derive(Debug, Clone, PartialEq)]
pub struct RingConfig {
    // ---- geometry-affecting (regenerates particle buffers) ----
    /// Number of shards. Range [`MIN_PARTICLES`]..=[`MAX_PARTICLES`].
    pub particles: u32,
    /// Radius of the ring circle in world units.
    pub ring_radius: f32,
    /// Dispersal shell radius where the torus cross-section faces inward.
    pub dispersal_inner: f32,
    /// Dispersal shell radius where the cross-section faces outward.
    pub dispersal_outer: f32,
    /// Uniform jitter (full width) added to each drift-direction axis.
    pub direction_spread: f32,
    /// Shard cone base radius.
    pub shard_thickness: f32,
    /// Shard cone height.
    pub shard_length: f32,

    // ---- appearance-only ----
    /// Overall shard scale multiplier.
    pub shard_size: f32,
    /// Gradient color at the bottom of the vertical span.
    pub color1: Vec3,
    /// Gradient color at the top of the vertical span.
    pub color2: Vec3,
    /// Lifecycle speed: life cycles per second.
    pub outward_speed: f32,
    /// How far a shard drifts along its direction over one life cycle.
    pub outward_distance: f32,
    /// Life fraction over which a shard fades in.
    pub life_fade_in: f32,
    /// Life fraction at which fade-out begins.
    pub life_fade_out: f32,
    /// Magnitude of the curl-noise displacement.
    pub noise_strength: f32,
    /// Ring roll speed (applied as 0.01 radians per tick per unit).
    pub rotation_speed: f32,
    /// Shadow orbit speed (scaled by the fixed 0.02 step per tick).
    pub shadow_speed: f32,
    /// Distance over which a shadow's dimming falls off.
    pub shadow_radius: f32,
    /// How strongly occluded fragments are darkened: 0 = no color change,
    /// 1 = fully occluded fragments go black.
    pub shadow_darkness: f32,
    /// Spatial frequency of the fragmentation noise.
    pub fragment_scale: f32,
    /// Temporal frequency of the fragmentation noise.
    pub fragment_speed: f32,
    /// Blend toward fragmentation alpha: 0 = solid, 1 = fully fragmented.
    pub fragment_amount: f32,

    // ---- pass-through: external post-process stage ----
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,

    // ---- pass-through: external asset slot ----
    /// Opaque asset path handed to the sub-scene renderer. Never loaded or
    /// validated here.
    pub model_path: Option<String>,
    pub model_scale: f32,
    pub model_position: Vec3,
    pub model_rotation: Vec3,
    pub model_color: Vec3,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            particles: 5000,
            ring_radius: 3.474,
            dispersal_inner: 0.0,
            dispersal_outer: 0.5,
            direction_spread: 0.15,
            shard_thickness: 0.03,
            shard_length: 0.65,

            shard_size: 0.65,
            color1: Vec3::new(0.0, 0.824, 1.0),   // #00d2ff
            color2: Vec3::new(0.0, 0.259, 0.62),  // #00429e
            outward_speed: 1.0,
            outward_distance: 1.68,
            life_fade_in: 0.3,
            life_fade_out: 1.0,
            noise_strength: 0.0,
            rotation_speed: 0.2,
            shadow_speed: 0.5,
            shadow_radius: 5.0,
            shadow_darkness: 1.0,
            fragment_scale: 5.0,
            fragment_speed: 0.2,
            fragment_amount: 0.3,

            bloom_strength: 1.5,
            bloom_radius: 0.5,
            bloom_threshold: 0.05,

            model_path: None,
            model_scale: 1.0,
            model_position: Vec3::new(0.0, -0.5, 0.0),
            model_rotation: Vec3::ZERO,
            model_color: Vec3::ONE,
        }
    }
}

impl RingConfig {
    /// Validate the configuration.
    ///
    /// Runs before any live state is touched: a failing config is rejected
    /// wholesale and the previous snapshot stays in effect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles < MIN_PARTICLES || self.particles > MAX_PARTICLES {
            return Err(ConfigError::ParticleCount {
                got: self.particles,
                min: MIN_PARTICLES,
                max: MAX_PARTICLES,
            });
        }

        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }
        for (name, v) in self.vec_fields() {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        if self.dispersal_outer < self.dispersal_inner {
            return Err(ConfigError::DispersalRange {
                inner: self.dispersal_inner,
                outer: self.dispersal_outer,
            });
        }

        for (name, value) in [
            ("ring_radius", self.ring_radius),
            ("dispersal_inner", self.dispersal_inner),
            ("direction_spread", self.direction_spread),
            ("shard_thickness", self.shard_thickness),
            ("shard_length", self.shard_length),
            ("shard_size", self.shard_size),
            ("outward_speed", self.outward_speed),
            ("outward_distance", self.outward_distance),
            ("shadow_radius", self.shadow_radius),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative(name));
            }
        }

        Ok(())
    }

    /// Whether switching from `self` to `other` changes any field that the
    /// particle buffers were generated from.
    pub fn geometry_differs(&self, other: &RingConfig) -> bool {
        self.particles != other.particles
            || self.ring_radius != other.ring_radius
            || self.dispersal_inner != other.dispersal_inner
            || self.dispersal_outer != other.dispersal_outer
            || self.direction_spread != other.direction_spread
            || self.shard_thickness != other.shard_thickness
            || self.shard_length != other.shard_length
    }

    fn float_fields(&self) -> [(&'static str, f32); 23] {
        [
            ("ring_radius", self.ring_radius),
            ("dispersal_inner", self.dispersal_inner),
            ("dispersal_outer", self.dispersal_outer),
            ("direction_spread", self.direction_spread),
            ("shard_thickness", self.shard_thickness),
            ("shard_length", self.shard_length),
            ("shard_size", self.shard_size),
            ("outward_speed", self.outward_speed),
            ("outward_distance", self.outward_distance),
            ("life_fade_in", self.life_fade_in),
            ("life_fade_out", self.life_fade_out),
            ("noise_strength", self.noise_strength),
            ("rotation_speed", self.rotation_speed),
            ("shadow_speed", self.shadow_speed),
            ("shadow_radius", self.shadow_radius),
            ("shadow_darkness", self.shadow_darkness),
            ("fragment_scale", self.fragment_scale),
            ("fragment_speed", self.fragment_speed),
            ("fragment_amount", self.fragment_amount),
            ("bloom_strength", self.bloom_strength),
            ("bloom_radius", self.bloom_radius),
            ("bloom_threshold", self.bloom_threshold),
            ("model_scale", self.model_scale),
        ]
    }

    fn vec_fields(&self) -> [(&'static str, Vec3); 5] {
        [
            ("color1", self.color1),
            ("color2", self.color2),
            ("model_position", self.model_position),
            ("model_rotation", self.model_rotation),
            ("model_color", self.model_color),
        ]
    }
}
