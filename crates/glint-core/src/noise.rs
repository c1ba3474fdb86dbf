//! Deterministic hash and noise functions
//!
//! Everything here is pure: the same arguments always produce the same bits,
//! on every platform and across restarts. Integer mixing uses fixed-width
//! `u32` wrapping arithmetic only, so large seeds wrap instead of overflowing.
//!
//! - [`hash`] - 1D keyed random in [0, 1), used to sample spawn parameters
//! - [`cell_random`] - 2D keyed random in [0, 1), stable per grid cell
//! - [`noise2d`] / [`fbm`] - smooth value noise over a fixed permutation table

/// Fixed permutation table. Never reseeded at runtime.
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const GOLDEN: u32 = 0x9E37_79B9;

/// 2^-24: maps the top 24 bits of a hash exactly onto [0, 1)
const UNIT: f32 = 1.0 / 16_777_216.0;

/// Final avalanche: every input bit affects every output bit
#[inline]
fn avalanche(mut h: u32) -> u32 {
    h ^= h >> 15;
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^ (h >> 16)
}

#[inline]
fn to_unit(h: u32) -> f32 {
    (h >> 8) as f32 * UNIT
}

/// Raw 32-bit mix behind [`hash`]
pub fn hash_u32(seed: i32, index: i32) -> u32 {
    let h = (seed as u32)
        .wrapping_mul(0x27D4_EB2D)
        .wrapping_add((index as u32).wrapping_mul(668_265_263))
        .wrapping_add(GOLDEN);
    avalanche(h)
}

/// Raw 32-bit mix behind [`cell_random`]
pub fn cell_hash_u32(x: i32, y: i32, seed: i32) -> u32 {
    let h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263))
        .wrapping_add((seed as u32).wrapping_mul(1_274_126_177))
        .wrapping_add(GOLDEN);
    avalanche(h)
}

/// Keyed random in [0, 1)
pub fn hash(seed: i32, index: i32) -> f32 {
    to_unit(hash_u32(seed, index))
}

/// Keyed random mapped onto [min, max)
pub fn hash_range(seed: i32, index: i32, min: f32, max: f32) -> f32 {
    min + hash(seed, index) * (max - min)
}

/// Stable per-cell random in [0, 1)
///
/// Use a distinct `seed` (salt) per feature so unrelated decisions on the
/// same cell do not correlate.
pub fn cell_random(x: i32, y: i32, seed: i32) -> f32 {
    to_unit(cell_hash_u32(x, y, seed))
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn lattice(ix: i32, iy: i32) -> f32 {
    let xi = (ix & 255) as usize;
    let yi = (iy & 255) as usize;
    PERM[(PERM[xi] as usize + yi) & 255] as f32 / 255.0
}

/// Smooth value noise in [0, 1], period 256 on both axes
pub fn noise2d(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let u = fade(x - x0);
    let v = fade(y - y0);

    let n00 = lattice(ix, iy);
    let n10 = lattice(ix.wrapping_add(1), iy);
    let n01 = lattice(ix, iy.wrapping_add(1));
    let n11 = lattice(ix.wrapping_add(1), iy.wrapping_add(1));

    lerp(lerp(n00, n10, u), lerp(n01, n11, u), v)
}

/// Multi-octave fractal noise, normalized to [0, 1]
pub fn fbm(x: f32, y: f32, octaves: u32) -> f32 {
    if octaves == 0 {
        return 0.5;
    }
    let mut value = 0.0;
    let mut total = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 1.0;
    for _ in 0..octaves {
        value += amplitude * noise2d(x * frequency, y * frequency);
        total += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    value / total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_table_is_a_permutation() {
        let mut seen = [false; 256];
        for &p in PERM.iter() {
            assert!(!seen[p as usize], "duplicate entry {p}");
            seen[p as usize] = true;
        }
    }

    #[test]
    fn hash_is_bit_exact() {
        assert_eq!(hash_u32(0, 0), 0xF322_A0DD);
        assert_eq!(hash_u32(7, 3), 0x4BF8_A50D);
        assert_eq!(hash_u32(-1, i32::MAX), 0xB320_0218);
        assert_eq!(cell_hash_u32(5, -3, 11), 0x1B95_C64D);
        assert_eq!(cell_hash_u32(i32::MAX, i32::MIN, -1), 0x721C_F76D);
    }

    #[test]
    fn hash_stays_in_unit_interval() {
        for seed in -50..50 {
            for index in 0..50 {
                let v = hash(seed, index);
                assert!((0.0..1.0).contains(&v));
            }
        }
        assert!(hash_u32(0, 0) >> 8 < (1 << 24));
        let v = hash_range(3, 4, 10.0, 20.0);
        assert!((10.0..20.0).contains(&v));
    }

    #[test]
    fn hash_is_roughly_uniform() {
        let n = 10_000;
        let mean: f32 = (0..n).map(|i| hash(12345, i)).sum::<f32>() / n as f32;
        assert!((mean - 0.5).abs() < 0.02, "mean {mean}");
    }

    #[test]
    fn cell_random_is_pure() {
        for y in -8..8 {
            for x in -8..8 {
                let a = cell_random(x, y, 42);
                let b = cell_random(x, y, 42);
                assert_eq!(a.to_bits(), b.to_bits());
                assert!((0.0..1.0).contains(&a));
            }
        }
    }

    #[test]
    fn adjacent_seeds_do_not_correlate() {
        let samples: Vec<(f32, f32)> = (0..40)
            .flat_map(|y| (0..40).map(move |x| (cell_random(x, y, 7), cell_random(x, y, 8))))
            .collect();
        let n = samples.len() as f32;
        let (ma, mb) = samples
            .iter()
            .fold((0.0, 0.0), |(sa, sb), (a, b)| (sa + a / n, sb + b / n));
        let mut cov = 0.0;
        let mut va = 0.0;
        let mut vb = 0.0;
        for (a, b) in &samples {
            cov += (a - ma) * (b - mb);
            va += (a - ma) * (a - ma);
            vb += (b - mb) * (b - mb);
        }
        let corr = cov / (va.sqrt() * vb.sqrt());
        assert!(corr.abs() < 0.15, "correlation {corr}");

        let differing = samples.iter().filter(|(a, b)| a != b).count();
        assert!(differing > samples.len() * 9 / 10);
    }

    #[test]
    fn noise2d_matches_lattice_at_integer_points() {
        for (x, y) in [(0, 0), (3, 9), (-4, 17), (255, 255)] {
            let n = noise2d(x as f32, y as f32);
            assert!((n - lattice(x, y)).abs() < 1e-6);
        }
    }

    #[test]
    fn noise2d_is_bounded_and_continuous() {
        let mut prev = noise2d(0.0, 0.5);
        for i in 1..2000 {
            let x = i as f32 * 0.01;
            let n = noise2d(x, 0.5);
            assert!((0.0..=1.0).contains(&n));
            assert!((n - prev).abs() < 0.05, "jump at x={x}");
            prev = n;
        }
    }

    #[test]
    fn noise2d_tiles_every_256_units() {
        let a = noise2d(3.25, 7.5);
        let b = noise2d(3.25 + 256.0, 7.5 - 256.0);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn fbm_is_normalized() {
        assert_eq!(fbm(1.0, 2.0, 0), 0.5);
        for i in 0..200 {
            let v = fbm(i as f32 * 0.37, i as f32 * 0.11, 5);
            assert!((0.0..=1.0).contains(&v));
        }
        // One octave is plain noise
        assert!((fbm(2.3, 4.1, 1) - noise2d(2.3, 4.1)).abs() < 1e-6);
    }
}
