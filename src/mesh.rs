//! Static meshes for the render contract.
//!
//! Two pieces of geometry accompany the per-frame instance data:
//!
//! - [`shard_cone`] - the local mesh every particle instances: a slim
//!   three-sided cone whose base sits at the instance origin, pointing +Y
//!   so the transform stage can align it with the flow direction.
//! - [`accent_torus`] - the emissive ring that traces the particle circle.
//!   Purely cosmetic; the host renders it with `color1` as emissive.
//!
//! Vertex positions and UVs only - normals are irrelevant to the additive,
//! unlit shading model.

use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

/// Tube radius of the accent torus.
const ACCENT_TUBE_RADIUS: f32 = 0.05;
/// Cross-section segments of the accent torus.
const ACCENT_RADIAL_SEGMENTS: u32 = 16;
/// Segments around the accent torus ring.
const ACCENT_TUBULAR_SEGMENTS: u32 = 100;

/// Indexed triangle mesh with UVs.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Local shard mesh: a cone with 3 radial segments.
///
/// `thickness` is the base radius, `length` the height. The base ring lies
/// at y = 0 and the tip at y = `length`, so the instance origin is the
/// shard's root. UV `u` runs around the circumference (0.5 on a side
/// face's center line feeds the rim-brightness term); `v` runs root to tip.
pub fn shard_cone(thickness: f32, length: f32) -> Mesh {
    const SEGMENTS: u32 = 3;
    let mut mesh = Mesh::default();

    // Base ring, seam vertex duplicated so UVs stay continuous.
    for i in 0..=SEGMENTS {
        let frac = i as f32 / SEGMENTS as f32;
        let angle = frac * TAU;
        mesh.positions
            .push(Vec3::new(thickness * angle.cos(), 0.0, thickness * angle.sin()));
        mesh.uvs.push(Vec2::new(frac, 0.0));
    }

    // One apex vertex per side face, centered in u.
    for i in 0..SEGMENTS {
        let frac = (i as f32 + 0.5) / SEGMENTS as f32;
        mesh.positions.push(Vec3::new(0.0, length, 0.0));
        mesh.uvs.push(Vec2::new(frac, 1.0));
    }

    // Side faces.
    let apex_base = SEGMENTS + 1;
    for i in 0..SEGMENTS {
        mesh.indices.extend_from_slice(&[i, apex_base + i, i + 1]);
    }

    // Base cap fan around a center vertex.
    let center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::ZERO);
    mesh.uvs.push(Vec2::new(0.5, 0.0));
    for i in 0..SEGMENTS {
        mesh.indices.extend_from_slice(&[center, i, i + 1]);
    }

    mesh
}

/// Emissive accent torus tracing the ring circle in the z = 0 plane.
pub fn accent_torus(ring_radius: f32) -> Mesh {
    let mut mesh = Mesh::default();
    let (radial, tubular) = (ACCENT_RADIAL_SEGMENTS, ACCENT_TUBULAR_SEGMENTS);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let arm = ring_radius + ACCENT_TUBE_RADIUS * v.cos();
            mesh.positions.push(Vec3::new(
                arm * u.cos(),
                arm * u.sin(),
                ACCENT_TUBE_RADIUS * v.sin(),
            ));
            mesh.uvs.push(Vec2::new(
                i as f32 / tubular as f32,
                j as f32 / radial as f32,
            ));
        }
    }

    let stride = tubular + 1;
    for j in 0..radial {
        for i in 0..tubular {
            let a = j * stride + i;
            let b = (j + 1) * stride + i;
            mesh.indices.extend_from_slice(&[a, b, a + 1]);
            mesh.indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_cone_shape() {
        let mesh = shard_cone(0.03, 0.65);
        assert_eq!(mesh.positions.len(), mesh.uvs.len());
        // 3 side + 3 cap triangles.
        assert_eq!(mesh.triangle_count(), 6);

        let min_y = mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let max_y = mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert_eq!(min_y, 0.0);
        assert!((max_y - 0.65).abs() < 1e-6);

        // Base vertices stay within the thickness radius.
        for p in &mesh.positions {
            let planar = Vec2::new(p.x, p.z).length();
            assert!(planar <= 0.03 + 1e-6);
        }
    }

    #[test]
    fn test_shard_cone_indices_valid() {
        let mesh = shard_cone(0.03, 0.65);
        for &i in &mesh.indices {
            assert!((i as usize) < mesh.positions.len());
        }
    }

    #[test]
    fn test_accent_torus_lies_on_shell() {
        let ring_radius = 3.474;
        let mesh = accent_torus(ring_radius);
        assert_eq!(mesh.positions.len(), mesh.uvs.len());
        assert_eq!(
            mesh.positions.len(),
            ((ACCENT_RADIAL_SEGMENTS + 1) * (ACCENT_TUBULAR_SEGMENTS + 1)) as usize
        );
        for p in &mesh.positions {
            // Distance from the ring circle equals the tube radius.
            let planar = Vec2::new(p.x, p.y).length();
            let minor = Vec2::new(planar - ring_radius, p.z).length();
            assert!((minor - ACCENT_TUBE_RADIUS).abs() < 1e-5);
        }
    }
}
