//! Host-side effect state and per-frame assembly.
//!
//! [`RingEffect`] owns everything the per-frame math is a function of: the
//! validated configuration snapshot, the shared particle buffer, the shadow
//! orbit, the accumulated ring roll and the frame clock. One logical tick
//! per rendered frame advances the clock and the orbit, then hands out an
//! immutable [`Frame`] for the parallel evaluation stage. Frames are
//! atomic: a `Frame` holds its own `Arc` to the buffer and its own config
//! snapshot, so a concurrent regeneration can never tear it.
//!
//! ```ignore
//! use ringshard::prelude::*;
//!
//! let mut effect = RingEffect::new(RingConfig::default())?;
//! loop {
//!     let frame = effect.tick();
//!     let instances = frame.instances();
//!     // upload instances, draw with additive blending, no depth write
//! }
//! ```

use crate::appearance::{self, FragmentInput};
use crate::config::RingConfig;
use crate::error::ConfigError;
use crate::mesh::{self, Mesh};
use crate::scene::{AssetTransform, BloomSettings};
use crate::shadow::ShadowOrbit;
use crate::spawn::ParticleBuffer;
use crate::time::FrameClock;
use crate::transform::{self, ShardInstanceRaw, ShardTransform};
use glam::Vec3;
use std::sync::Arc;

/// Ring roll advances by `rotation_speed * ROLL_STEP_SCALE` per tick.
const ROLL_STEP_SCALE: f32 = 0.01;

/// Per-tick spin of the external asset about its y axis.
const ASSET_SPIN_STEP: f32 = 0.01;

/// The ring effect: configuration, particle buffers and orbit state.
pub struct RingEffect {
    config: RingConfig,
    buffer: Arc<ParticleBuffer>,
    shadow: ShadowOrbit,
    ring_roll: f32,
    asset_yaw: f32,
    clock: FrameClock,
}

impl RingEffect {
    /// Validate `config` and generate the initial particle field.
    pub fn new(config: RingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let buffer = Arc::new(ParticleBuffer::generate(&config));
        log::debug!("generated particle field: {} shards", buffer.len());
        Ok(Self {
            config,
            buffer,
            shadow: ShadowOrbit::new(),
            ring_roll: 0.0,
            asset_yaw: 0.0,
            clock: FrameClock::new(),
        })
    }

    /// Replace the configuration snapshot.
    ///
    /// Validation runs first; a rejected config leaves every piece of live
    /// state untouched and the effect keeps rendering its previous snapshot.
    /// If any geometry-affecting field changed, a fresh buffer is built
    /// off to the side and swapped in whole - in-flight frames keep their
    /// old `Arc`.
    pub fn set_config(&mut self, config: RingConfig) -> Result<(), ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("rejected configuration: {err}");
            return Err(err);
        }
        if self.config.geometry_differs(&config) {
            let buffer = Arc::new(ParticleBuffer::generate(&config));
            log::debug!("regenerated particle field: {} shards", buffer.len());
            self.buffer = buffer;
        }
        self.config = config;
        Ok(())
    }

    /// The active configuration snapshot.
    #[inline]
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// The live particle buffer.
    #[inline]
    pub fn buffer(&self) -> &Arc<ParticleBuffer> {
        &self.buffer
    }

    /// Advance one tick using the internal wall clock and assemble a frame.
    pub fn tick(&mut self) -> Frame {
        let (elapsed, _) = self.clock.tick();
        self.step(elapsed)
    }

    /// Advance one tick with caller-supplied elapsed seconds.
    ///
    /// For hosts that own the clock (offline rendering, tests). `elapsed`
    /// must be monotonically non-decreasing across calls.
    pub fn frame_at(&mut self, elapsed: f32) -> Frame {
        self.step(elapsed)
    }

    fn step(&mut self, elapsed: f32) -> Frame {
        self.shadow.advance(self.config.shadow_speed);
        self.ring_roll -= self.config.rotation_speed * ROLL_STEP_SCALE;
        self.asset_yaw += ASSET_SPIN_STEP;
        Frame {
            elapsed,
            shadow_positions: self.shadow.positions(self.config.ring_radius),
            ring_roll: self.ring_roll,
            buffer: Arc::clone(&self.buffer),
            config: self.config.clone(),
        }
    }

    /// Local shard mesh matching the current geometry settings.
    pub fn shard_mesh(&self) -> Mesh {
        mesh::shard_cone(self.config.shard_thickness, self.config.shard_length)
    }

    /// Emissive accent torus matching the current ring radius.
    pub fn accent_mesh(&self) -> Mesh {
        mesh::accent_torus(self.config.ring_radius)
    }

    /// Transform for the optional external asset, including its
    /// accumulated spin. The asset itself is rendered by an external
    /// [`AssetRenderer`](crate::scene::AssetRenderer).
    pub fn asset_transform(&self) -> AssetTransform {
        AssetTransform {
            position: self.config.model_position,
            rotation: self.config.model_rotation + Vec3::new(0.0, self.asset_yaw, 0.0),
            scale: self.config.model_scale,
            tint: self.config.model_color,
        }
    }

    /// Bloom parameters for the external post-process stage.
    pub fn bloom(&self) -> BloomSettings {
        BloomSettings::from_config(&self.config)
    }
}

/// Immutable inputs for one frame's parallel evaluation stage.
#[derive(Clone)]
pub struct Frame {
    /// Elapsed seconds since the effect started.
    pub elapsed: f32,
    /// The two orbiting shadow positions for this frame.
    pub shadow_positions: [Vec3; 2],
    /// Accumulated roll of the whole ring about z, radians.
    pub ring_roll: f32,
    /// Particle buffer this frame renders from.
    pub buffer: Arc<ParticleBuffer>,
    /// Configuration snapshot this frame renders with.
    pub config: RingConfig,
}

impl Frame {
    /// Evaluate every shard's transform for this frame.
    pub fn instances(&self) -> Vec<ShardTransform> {
        transform::transform_all(self.elapsed, &self.buffer, &self.config)
    }

    /// Evaluate every shard and pack GPU-ready instance data.
    pub fn instances_raw(&self) -> Vec<ShardInstanceRaw> {
        self.instances().iter().map(ShardTransform::to_raw).collect()
    }

    /// Shade one fragment against this frame's shadow positions.
    pub fn shade(&self, input: &FragmentInput) -> (Vec3, f32) {
        appearance::shade_fragment(input, &self.config, self.shadow_positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(particles: u32) -> RingConfig {
        RingConfig {
            particles,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RingConfig {
            particles: 0,
            ..Default::default()
        };
        assert!(RingEffect::new(config).is_err());
    }

    #[test]
    fn test_regeneration_replaces_whole_buffer() {
        let mut effect = RingEffect::new(small_config(100)).unwrap();
        assert_eq!(effect.buffer().len(), 100);

        effect.set_config(small_config(40)).unwrap();
        assert_eq!(effect.buffer().len(), 40);
    }

    #[test]
    fn test_appearance_change_keeps_buffer() {
        let mut effect = RingEffect::new(small_config(50)).unwrap();
        let before = Arc::clone(effect.buffer());

        let mut config = small_config(50);
        config.noise_strength = 3.0;
        config.shadow_darkness = 0.2;
        effect.set_config(config).unwrap();

        assert!(Arc::ptr_eq(&before, effect.buffer()));
    }

    #[test]
    fn test_rejected_config_keeps_previous_state() {
        let mut effect = RingEffect::new(small_config(50)).unwrap();
        let before_buffer = Arc::clone(effect.buffer());
        let before_config = effect.config().clone();

        let bad = RingConfig {
            dispersal_inner: 1.0,
            dispersal_outer: 0.5,
            ..small_config(50)
        };
        assert!(effect.set_config(bad).is_err());
        assert!(Arc::ptr_eq(&before_buffer, effect.buffer()));
        assert_eq!(*effect.config(), before_config);
    }

    #[test]
    fn test_frames_hold_their_buffer_across_regeneration() {
        let mut effect = RingEffect::new(small_config(30)).unwrap();
        let frame = effect.frame_at(1.0);

        effect.set_config(small_config(60)).unwrap();

        // The in-flight frame still sees the buffer it was built from.
        assert_eq!(frame.buffer.len(), 30);
        assert_eq!(frame.instances().len(), 30);
        assert_eq!(effect.buffer().len(), 60);
    }

    #[test]
    fn test_frame_shadow_positions_antipodal() {
        let mut effect = RingEffect::new(small_config(10)).unwrap();
        for i in 0..20 {
            let frame = effect.frame_at(i as f32 * 0.016);
            let [a, b] = frame.shadow_positions;
            assert!((a.x + b.x).abs() < 1e-4);
            assert!((a.y + b.y).abs() < 1e-4);
        }
    }

    #[test]
    fn test_ring_roll_accumulates() {
        let mut effect = RingEffect::new(small_config(10)).unwrap();
        let first = effect.frame_at(0.0).ring_roll;
        let second = effect.frame_at(0.016).ring_roll;
        assert!(second < first, "roll should decrease each tick");
    }

    #[test]
    fn test_asset_transform_spins() {
        let mut effect = RingEffect::new(small_config(10)).unwrap();
        let before = effect.asset_transform();
        effect.frame_at(0.016);
        let after = effect.asset_transform();
        assert!(after.rotation.y > before.rotation.y);
        assert_eq!(after.position, effect.config().model_position);
    }
}
