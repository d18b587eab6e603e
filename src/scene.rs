//! Capability seams for external collaborators.
//!
//! The core computes; rendering, asset loading and parameter UIs live
//! outside. These traits and transfer structs are the whole contract:
//!
//! - [`AssetRenderer`] - an opaque sub-scene that accepts a transform and
//!   renders itself. The core never loads or validates the asset.
//! - [`ConfigSource`] - anything that can hand back a named, typed
//!   configuration snapshot (a tuning panel, a preset file, a test).
//! - [`BloomSettings`] - parameters for the external post-process stage;
//!   the core only forwards them.

use crate::config::RingConfig;
use glam::Vec3;

/// Placement and tint for the optional external 3D asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetTransform {
    pub position: Vec3,
    /// Euler rotation in radians (applied XYZ).
    pub rotation: Vec3,
    pub scale: f32,
    pub tint: Vec3,
}

/// An external sub-scene renderer: accepts a transform, renders itself.
pub trait AssetRenderer {
    fn render(&mut self, transform: &AssetTransform);
}

/// A supplier of configuration snapshots, polled between frames.
pub trait ConfigSource {
    fn snapshot(&self) -> RingConfig;
}

impl ConfigSource for RingConfig {
    fn snapshot(&self) -> RingConfig {
        self.clone()
    }
}

/// Bloom parameters handed to the external post-process stage. Never
/// consumed by the core itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl BloomSettings {
    /// Extract the bloom slice of a configuration.
    pub fn from_config(config: &RingConfig) -> Self {
        Self {
            strength: config.bloom_strength,
            radius: config.bloom_radius,
            threshold: config.bloom_threshold,
        }
    }
}
