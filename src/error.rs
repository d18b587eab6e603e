//! Error types for ringshard.
//!
//! Configuration is the only fallible surface: per-frame math resolves its
//! degeneracies through fixed fallbacks and never returns errors.

use std::fmt;

/// Errors produced when validating a [`RingConfig`](crate::RingConfig).
///
/// A rejected configuration never mutates live state; the effect keeps
/// rendering its last valid snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Particle count outside the supported range.
    ParticleCount { got: u32, min: u32, max: u32 },
    /// `dispersal_outer` is smaller than `dispersal_inner`.
    DispersalRange { inner: f32, outer: f32 },
    /// A float field is NaN or infinite.
    NonFinite(&'static str),
    /// A field that must be non-negative is negative.
    Negative(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParticleCount { got, min, max } => write!(
                f,
                "particle count {} outside supported range {}..={}",
                got, min, max
            ),
            ConfigError::DispersalRange { inner, outer } => write!(
                f,
                "dispersal_outer ({}) must be >= dispersal_inner ({})",
                outer, inner
            ),
            ConfigError::NonFinite(field) => {
                write!(f, "configuration field `{}` is not finite", field)
            }
            ConfigError::Negative(field) => {
                write!(f, "configuration field `{}` must be non-negative", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
