//! # ringshard
//!
//! A procedurally generated ring of drifting, fragmenting particle shards:
//! torus-shell stochastic placement, curl-noise turbulence, lifecycle
//! fading, fragmentation alpha and dual orbiting shadow occlusion.
//!
//! The crate is renderer-agnostic. Per-particle and per-fragment evaluation
//! are pure functions over explicit structure-of-arrays buffers, so the
//! same math can drive a CPU loop or be ported to a shading stage
//! one-to-one. Compositing (additive blending, no depth write), asset
//! loading and the bloom post-process all live outside, behind the seams
//! in [`scene`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use ringshard::prelude::*;
//!
//! let mut effect = RingEffect::new(RingConfig {
//!     particles: 8000,
//!     noise_strength: 0.4,
//!     ..Default::default()
//! })?;
//!
//! // Once: upload the static meshes.
//! let shard = effect.shard_mesh();
//! let accent = effect.accent_mesh();
//!
//! // Per frame: one tick, then evaluate in parallel.
//! let frame = effect.tick();
//! let instances = frame.instances_raw();
//! ```
//!
//! ## Pipeline
//!
//! [`spawn::ParticleBuffer`] holds the static attributes, regenerated
//! atomically when a geometry tunable changes. Each frame,
//! [`transform::transform_particle`] maps (time, attributes, config) to a
//! world placement plus varyings, and [`appearance::shade_fragment`] maps
//! those varyings to the final premultiplied color/alpha. The only mutable
//! state is the frame clock, the shadow orbit angle and the ring roll,
//! all owned by [`ring::RingEffect`].

pub mod appearance;
pub mod config;
pub mod error;
pub mod mesh;
pub mod noise;
pub mod ring;
pub mod scene;
pub mod shadow;
pub mod spawn;
pub mod time;
pub mod transform;

pub use bytemuck;

pub use appearance::{shade_fragment, FragmentInput};
pub use config::{RingConfig, MAX_PARTICLES, MIN_PARTICLES};
pub use error::ConfigError;
pub use glam::{Vec2, Vec3};
pub use mesh::{accent_torus, shard_cone, Mesh};
pub use ring::{Frame, RingEffect};
pub use scene::{AssetRenderer, AssetTransform, BloomSettings, ConfigSource};
pub use shadow::ShadowOrbit;
pub use spawn::{Particle, ParticleBuffer};
pub use time::FrameClock;
pub use transform::{transform_all, transform_particle, ShardInstanceRaw, ShardTransform};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use ringshard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::appearance::{shade_fragment, FragmentInput};
    pub use crate::config::RingConfig;
    pub use crate::error::ConfigError;
    pub use crate::mesh::Mesh;
    pub use crate::ring::{Frame, RingEffect};
    pub use crate::scene::{AssetRenderer, AssetTransform, BloomSettings, ConfigSource};
    pub use crate::spawn::ParticleBuffer;
    pub use crate::transform::{ShardInstanceRaw, ShardTransform};
    pub use crate::{Vec2, Vec3};
}
