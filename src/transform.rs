//! Per-frame shard transform.
//!
//! [`transform_particle`] is the vertex-stage math: a pure function from
//! (elapsed time, static particle attributes, config) to the shard's world
//! placement and the varyings the shading stage consumes. There is no
//! integration and no state - position is a closed-form function of time -
//! so every particle can be evaluated independently and in parallel, on a
//! CPU loop or a compiled shading stage alike.

use crate::config::RingConfig;
use crate::noise;
use crate::spawn::{Particle, ParticleBuffer};
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// Reference axis the shard mesh is authored along; orientation aligns this
/// to the flow direction.
const SHARD_AXIS: Vec3 = Vec3::Y;

/// Squared-length threshold under which a rotation axis counts as
/// degenerate and the orientation stays identity.
const AXIS_EPSILON_SQ: f32 = 1e-6;

/// World placement plus shading varyings for one shard at one instant.
#[derive(Debug, Clone, Copy)]
pub struct ShardTransform {
    /// Instance center after drift, turbulence and breathing.
    pub center: Vec3,
    /// Rotation aligning the shard mesh's +Y axis to the flow direction.
    pub rotation: Mat3,
    /// Uniform local scale (`shard_size * base_scale * twinkle`).
    pub scale: f32,
    /// Life phase in [0, 1).
    pub life: f32,
    /// Oscillating brightness/scale factor in [0.4, 1.2].
    pub twinkle: f32,
    /// Fragmentation noise sample, carried to the shading stage untouched.
    pub frag_noise: f32,
}

impl ShardTransform {
    /// Map a vertex of the local shard mesh to world space.
    #[inline]
    pub fn world_vertex(&self, local: Vec3) -> Vec3 {
        self.center + self.rotation * (local * self.scale)
    }

    /// GPU-ready instance data for upload as an instanced vertex buffer.
    pub fn to_raw(&self) -> ShardInstanceRaw {
        let mut model = Mat4::from_mat3(self.rotation * Mat3::from_diagonal(Vec3::splat(self.scale)));
        model.w_axis = self.center.extend(1.0);
        ShardInstanceRaw {
            model: model.to_cols_array_2d(),
            center: self.center.to_array(),
            life: self.life,
            twinkle: self.twinkle,
            frag_noise: self.frag_noise,
            _pad: [0.0; 2],
        }
    }
}

/// `#[repr(C)]` mirror of [`ShardTransform`] for direct buffer upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ShardInstanceRaw {
    pub model: [[f32; 4]; 4],
    pub center: [f32; 3],
    pub life: f32,
    pub twinkle: f32,
    pub frag_noise: f32,
    pub _pad: [f32; 2],
}

/// Evaluate one shard at elapsed time `t` (seconds).
pub fn transform_particle(t: f32, particle: &Particle, config: &RingConfig) -> ShardTransform {
    // 1. Repeating life phase.
    let life = (t * config.outward_speed + particle.life_offset).fract();

    // 2. Outward drift.
    let mut center = particle.position + particle.direction * (life * config.outward_distance);

    // 3-4. Curl turbulence, sampled in a frame that slides along z over time
    // so the flow pattern itself evolves.
    let curl = noise::curl(center * 0.5 - Vec3::new(0.0, 0.0, t * 0.2));
    center += curl * config.noise_strength;

    // 5. Breathing: slow uniform pulsation of the whole ring.
    let breath = 1.0 + t.sin() * 0.02;
    center *= breath;

    // 6. Fragmentation channel, a varying only.
    let frag_noise = noise::frag_noise(center, t, config.fragment_scale, config.fragment_speed);

    // 7. Orient the shard along the blended flow direction.
    let orient_dir = noise::normalize_or_fallback(particle.direction + curl * 0.5);
    let rotation = align_axis_to(orient_dir);

    // 8. Twinkle.
    let twinkle = 0.8 + 0.4 * (t * 3.0 + particle.randomness.x * 10.0).sin();

    // 9. Final local scale.
    let scale = config.shard_size * particle.base_scale * twinkle;

    ShardTransform {
        center,
        rotation,
        scale,
        life,
        twinkle,
        frag_noise,
    }
}

/// Evaluate every particle in the buffer at elapsed time `t`.
pub fn transform_all(t: f32, buffer: &ParticleBuffer, config: &RingConfig) -> Vec<ShardTransform> {
    buffer
        .iter()
        .map(|particle| transform_particle(t, &particle, config))
        .collect()
}

/// Rotation aligning [`SHARD_AXIS`] to `dir` (Rodrigues' formula via
/// axis-angle). `dir` must be unit length.
///
/// When `dir` is within epsilon of the axis (parallel or anti-parallel) the
/// cross product degenerates and the rotation stays identity rather than
/// producing NaN.
fn align_axis_to(dir: Vec3) -> Mat3 {
    let axis = SHARD_AXIS.cross(dir);
    if axis.length_squared() < AXIS_EPSILON_SQ {
        return Mat3::IDENTITY;
    }
    let angle = SHARD_AXIS.dot(dir).clamp(-1.0, 1.0).acos();
    Mat3::from_axis_angle(axis.normalize(), angle)
}
