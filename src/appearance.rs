//! Fragment shading for shards.
//!
//! [`shade_fragment`] is the fragment-stage math: a pure function from the
//! interpolated varyings and the appearance tunables to a premultiplied-
//! friendly `(color, alpha)` pair, intended for additive blending with
//! depth writes disabled. Like the transform stage it has no shared state
//! and is safe to evaluate massively in parallel.

use crate::config::RingConfig;
use glam::{Vec2, Vec3};

/// Vertical world-space span of the two-color gradient: `color1` at
/// y = -5, `color2` at y = +5.
const GRADIENT_HALF_SPAN: f32 = 5.0;

/// Interpolated varyings for one fragment, produced by the transform stage
/// and the mesh UVs.
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput {
    /// Untransformed instance center (world space, pre-mesh-offset).
    pub center: Vec3,
    /// Life phase in [0, 1).
    pub life: f32,
    /// Twinkle alpha scale.
    pub twinkle: f32,
    /// Fragmentation noise sample in roughly [-1, 1].
    pub frag_noise: f32,
    /// Mesh UV; `u` runs across the shard, 0.5 at the longitudinal
    /// center line.
    pub uv: Vec2,
}

/// Shade one fragment.
///
/// `shadow_positions` are the two orbiting dim spots from
/// [`ShadowOrbit::positions`](crate::shadow::ShadowOrbit::positions).
pub fn shade_fragment(
    input: &FragmentInput,
    config: &RingConfig,
    shadow_positions: [Vec3; 2],
) -> (Vec3, f32) {
    // 1. Lifecycle fade: ramp in over [0, fade_in], ramp out over
    // [fade_out, 1].
    let life_fade = smoothstep(0.0, config.life_fade_in, input.life)
        * (1.0 - smoothstep(config.life_fade_out, 1.0, input.life));
    let mut alpha = life_fade;

    // 2. Fragmentation: blend toward the noise channel remapped to [0, 1].
    let integrity = lerp(1.0, input.frag_noise * 0.5 + 0.5, config.fragment_amount);
    alpha *= integrity;

    // 3. Vertical gradient plus rim brightness toward the shard's
    // longitudinal center line.
    let gradient = ((input.center.y + GRADIENT_HALF_SPAN) / (2.0 * GRADIENT_HALF_SPAN))
        .clamp(0.0, 1.0);
    let mut color = config.color1.lerp(config.color2, gradient);
    let core = 1.0 - (input.uv.x - 0.5).abs() * 2.0;
    color += Vec3::splat(0.5) * core;

    // 4. Dual orbiting shadow occlusion: full dimming at a shadow center,
    // none beyond shadow_radius.
    let factor1 = smoothstep(0.0, config.shadow_radius, input.center.distance(shadow_positions[0]));
    let factor2 = smoothstep(0.0, config.shadow_radius, input.center.distance(shadow_positions[1]));
    let combined = factor1 * factor2;
    alpha *= combined;
    let dimmed = color * (1.0 - config.shadow_darkness);
    color = dimmed.lerp(color, combined);

    // 5. Twinkle modulates the final alpha.
    (color, alpha * input.twinkle)
}

/// Hermite smoothstep, clamped. A zero-width edge behaves as a step.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
