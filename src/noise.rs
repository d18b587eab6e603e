//! Curl noise field for shard turbulence.
//!
//! The field is built in three layers:
//!
//! 1. [`noise`] - deterministic simplex lattice noise in roughly [-1, 1]
//! 2. [`potential`] - a vector potential assembled from three decorrelated
//!    noise samples
//! 3. [`curl`] - central finite difference of the potential, normalized
//!
//! Because the flow direction is the curl of a potential it is
//! divergence-free: shards swirl without bunching up or draining toward a
//! point. [`frag_noise`] is an independent scalar channel used only for
//! fragmentation alpha; it never feeds back into position or orientation.
//!
//! Everything here is a pure function of its inputs. Same point in, same
//! value out, across runs and platforms.

use glam::Vec3;

/// Finite-difference step for the curl estimate.
const CURL_EPSILON: f32 = 0.1;

/// Below this magnitude a vector is considered degenerate and
/// [`normalize_or_fallback`] substitutes [`FALLBACK_DIRECTION`].
const DEGENERATE_EPSILON: f32 = 1e-3;

/// Unit vector returned whenever a normalization would divide by
/// (near-)zero. Keeps NaN/Inf out of shared per-frame state.
pub const FALLBACK_DIRECTION: Vec3 = Vec3::Y;

/// Gradient directions for simplex noise (midpoints of cube edges).
const GRAD3: [[f32; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Ken Perlin's reference permutation table. Fixed so the field is
/// reproducible everywhere.
const PERM_BASE: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209,
    76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198,
    173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44,
    154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79,
    113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12,
    191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29,
    24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Table doubled so `PERM[i + PERM[j]]` never needs a wrap.
const PERM: [u8; 512] = {
    let mut table = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        table[i] = PERM_BASE[i & 255];
        i += 1;
    }
    table
};

#[inline]
fn grad_dot(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let g = GRAD3[(hash % 12) as usize];
    g[0] * x + g[1] * y + g[2] * z
}

/// 3D simplex noise.
///
/// Continuous, band-limited, zero-mean, output in roughly [-1, 1].
/// Deterministic: driven entirely by the fixed permutation table.
pub fn noise(p: Vec3) -> f32 {
    const F3: f32 = 1.0 / 3.0;
    const G3: f32 = 1.0 / 6.0;

    // Skew input space to find the containing simplex cell.
    let s = (p.x + p.y + p.z) * F3;
    let i = (p.x + s).floor();
    let j = (p.y + s).floor();
    let k = (p.z + s).floor();

    let t = (i + j + k) * G3;
    // Distances from the cell origin, unskewed.
    let x0 = p.x - (i - t);
    let y0 = p.y - (j - t);
    let z0 = p.z - (k - t);

    // Rank the coordinates to pick the simplex corner traversal order.
    let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
        if y0 >= z0 {
            (1, 0, 0, 1, 1, 0) // X Y Z
        } else if x0 >= z0 {
            (1, 0, 0, 1, 0, 1) // X Z Y
        } else {
            (0, 0, 1, 1, 0, 1) // Z X Y
        }
    } else if y0 < z0 {
        (0, 0, 1, 0, 1, 1) // Z Y X
    } else if x0 < z0 {
        (0, 1, 0, 0, 1, 1) // Y Z X
    } else {
        (0, 1, 0, 1, 1, 0) // Y X Z
    };

    let x1 = x0 - i1 as f32 + G3;
    let y1 = y0 - j1 as f32 + G3;
    let z1 = z0 - k1 as f32 + G3;
    let x2 = x0 - i2 as f32 + 2.0 * G3;
    let y2 = y0 - j2 as f32 + 2.0 * G3;
    let z2 = z0 - k2 as f32 + 2.0 * G3;
    let x3 = x0 - 1.0 + 3.0 * G3;
    let y3 = y0 - 1.0 + 3.0 * G3;
    let z3 = z0 - 1.0 + 3.0 * G3;

    let ii = (i as i32 & 255) as usize;
    let jj = (j as i32 & 255) as usize;
    let kk = (k as i32 & 255) as usize;

    let gi0 = PERM[ii + PERM[jj + PERM[kk] as usize] as usize];
    let gi1 = PERM[ii + i1 + PERM[jj + j1 + PERM[kk + k1] as usize] as usize];
    let gi2 = PERM[ii + i2 + PERM[jj + j2 + PERM[kk + k2] as usize] as usize];
    let gi3 = PERM[ii + 1 + PERM[jj + 1 + PERM[kk + 1] as usize] as usize];

    let mut n = 0.0;

    let t0 = 0.6 - x0 * x0 - y0 * y0 - z0 * z0;
    if t0 > 0.0 {
        n += t0 * t0 * t0 * t0 * grad_dot(gi0, x0, y0, z0);
    }
    let t1 = 0.6 - x1 * x1 - y1 * y1 - z1 * z1;
    if t1 > 0.0 {
        n += t1 * t1 * t1 * t1 * grad_dot(gi1, x1, y1, z1);
    }
    let t2 = 0.6 - x2 * x2 - y2 * y2 - z2 * z2;
    if t2 > 0.0 {
        n += t2 * t2 * t2 * t2 * grad_dot(gi2, x2, y2, z2);
    }
    let t3 = 0.6 - x3 * x3 - y3 * y3 - z3 * z3;
    if t3 > 0.0 {
        n += t3 * t3 * t3 * t3 * grad_dot(gi3, x3, y3, z3);
    }

    // Scale so the result fits [-1, 1].
    32.0 * n
}

/// Vector potential: three decorrelated noise samples.
///
/// The offsets shift each component into an unrelated region of the lattice
/// so the components read as independent channels.
pub fn potential(p: Vec3) -> Vec3 {
    Vec3::new(
        noise(p),
        noise(Vec3::new(p.y - 19.1, p.z + 33.4, p.x + 47.2)),
        noise(Vec3::new(p.z + 74.2, p.x - 124.5, p.y + 99.4)),
    )
}

/// Curl of the noise potential, normalized to unit length.
///
/// Central finite difference with step [`CURL_EPSILON`] along each axis
/// (6 potential samples), combined with the standard curl formula. The
/// result is usable directly as a flow direction; a degenerate raw curl
/// falls back to [`FALLBACK_DIRECTION`] instead of producing NaN.
pub fn curl(p: Vec3) -> Vec3 {
    let dx = Vec3::new(CURL_EPSILON, 0.0, 0.0);
    let dy = Vec3::new(0.0, CURL_EPSILON, 0.0);
    let dz = Vec3::new(0.0, 0.0, CURL_EPSILON);

    let p_x0 = potential(p - dx);
    let p_x1 = potential(p + dx);
    let p_y0 = potential(p - dy);
    let p_y1 = potential(p + dy);
    let p_z0 = potential(p - dz);
    let p_z1 = potential(p + dz);

    let x = p_y1.z - p_y0.z - p_z1.y + p_z0.y;
    let y = p_z1.x - p_z0.x - p_x1.z + p_x0.z;
    let z = p_x1.y - p_x0.y - p_y1.x + p_y0.x;

    let divisor = 1.0 / (2.0 * CURL_EPSILON);
    normalize_or_fallback(Vec3::new(x, y, z) * divisor)
}

/// Fragmentation noise channel.
///
/// `noise(p * fragment_scale + t * fragment_speed * 0.5)` - a secondary
/// scalar sample feeding fragmentation alpha only. It must not influence
/// position or orientation.
pub fn frag_noise(p: Vec3, t: f32, fragment_scale: f32, fragment_speed: f32) -> f32 {
    noise(p * fragment_scale + Vec3::splat(t * fragment_speed * 0.5))
}

/// Normalize `v`, or return [`FALLBACK_DIRECTION`] when `v` is too short
/// to normalize safely.
pub fn normalize_or_fallback(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < DEGENERATE_EPSILON {
        FALLBACK_DIRECTION
    } else {
        v / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_deterministic() {
        let p = Vec3::new(1.3, -2.7, 0.4);
        assert_eq!(noise(p), noise(p));
    }

    #[test]
    fn test_noise_bounded() {
        for i in 0..500 {
            let f = i as f32;
            let p = Vec3::new(f * 0.173, f * -0.091 + 3.0, f * 0.037 - 7.0);
            let n = noise(p);
            assert!(n.is_finite());
            assert!(n.abs() <= 1.05, "noise({p:?}) = {n} out of band");
        }
    }

    #[test]
    fn test_noise_continuous() {
        // C1 continuity is hard to assert directly; check that tiny input
        // steps produce tiny output steps.
        let p = Vec3::new(0.5, 1.5, -0.8);
        let step = 1e-4;
        let d = (noise(p + Vec3::splat(step)) - noise(p)).abs();
        assert!(d < 0.01, "noise jumped by {d} over a {step} step");
    }

    #[test]
    fn test_curl_deterministic_and_unit() {
        for i in 0..100 {
            let f = i as f32;
            let p = Vec3::new(f * 0.31, f * -0.17, f * 0.23);
            let c = curl(p);
            assert_eq!(c, curl(p));
            assert!((c.length() - 1.0).abs() < 1e-4, "curl not unit: {c:?}");
        }
    }

    #[test]
    fn test_frag_noise_independent_of_curl_inputs() {
        // Same point, different fragmentation params: only frag_noise moves.
        let p = Vec3::new(2.0, 0.5, -1.0);
        let a = frag_noise(p, 1.0, 5.0, 0.2);
        let b = frag_noise(p, 1.0, 2.0, 0.2);
        assert_ne!(a, b);
        assert_eq!(curl(p), curl(p));
    }

    #[test]
    fn test_normalize_fallback() {
        assert_eq!(normalize_or_fallback(Vec3::ZERO), FALLBACK_DIRECTION);
        assert_eq!(normalize_or_fallback(Vec3::splat(1e-6)), FALLBACK_DIRECTION);
        let n = normalize_or_fallback(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(n, Vec3::X);
    }
}
