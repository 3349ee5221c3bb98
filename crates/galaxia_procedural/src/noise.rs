//! # Simplex Noise Implementation
//!
//! Deterministic coherent noise, the Perlin-family base of every field.
//!
//! ## Determinism Guarantee
//!
//! Given the same `NoiseSeed`, this implementation produces **exactly**
//! the same values on any platform, any time. No global state, no
//! per-call mutation: a `SimplexNoise` is immutable after construction.

use galaxia_shared::FractalKind;

/// Seed for deterministic generation.
///
/// Every stochastic stage derives its own stream from one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoiseSeed(u64);

impl NoiseSeed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Adds a fixed offset (used for the macro/meso/micro and warp layers).
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: u64) -> Self {
        Self(self.0.wrapping_add(delta))
    }

    /// Derives a sub-seed for a specific purpose (e.g. clump placement).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a style mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl From<u64> for NoiseSeed {
    fn from(seed: u64) -> Self {
        Self(seed)
    }
}

/// SplitMix64 finalizer. Guarantees a non-zero xorshift state for any seed.
#[inline]
const fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seeded lattice hash: a shuffled 0..=255, stored twice so that
/// `perm[i + perm[j]]` never needs wrapping.
#[derive(Clone)]
struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    /// Eight directions; the axis-aligned ones repeat to fill twelve slots.
    const GRADIENTS: [[i8; 2]; 12] = [
        [1, 0], [1, 1], [0, 1], [-1, 1],
        [-1, 0], [-1, -1], [0, -1], [1, -1],
        [1, 0], [0, 1], [-1, 0], [0, -1],
    ];

    fn new(seed: NoiseSeed) -> Self {
        let mut base: [u8; 256] = std::array::from_fn(|i| i as u8);

        // Fisher-Yates driven by xorshift64
        let mut state = splitmix64(seed.value()) | 1;
        for i in (1..base.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            base.swap(i, (state % (i as u64 + 1)) as usize);
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&base);
        perm[256..].copy_from_slice(&base);
        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    #[inline]
    fn gradient(hash: u8) -> [i8; 2] {
        Self::GRADIENTS[(hash % 12) as usize]
    }
}

/// 2D Simplex noise generator.
///
/// Produces smooth, continuous noise values in the range [-1, 1].
///
/// # Example
///
/// ```rust
/// use galaxia_procedural::noise::{NoiseSeed, SimplexNoise};
///
/// let noise = SimplexNoise::new(NoiseSeed::new(42));
/// let value = noise.sample(100.5, 200.3);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
#[derive(Clone)]
pub struct SimplexNoise {
    perm_table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for 2D simplex grid: (sqrt(3) - 1) / 2.
    const F2: f64 = 0.366_025_403_784_438_6;
    /// Unskewing factor for 2D simplex grid: (3 - sqrt(3)) / 6.
    const G2: f64 = 0.211_324_865_405_187_1;

    /// Creates a new simplex noise generator from a seed.
    #[must_use]
    pub fn new(seed: NoiseSeed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples 2D simplex noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Skew input coordinates to simplex grid
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        // Unskew to get first corner in simplex
        let unskew = f64::from(i + j) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Upper or lower triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1 as u8) + Self::G2;
        let y1 = y0 - f64::from(j1 as u8) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;

        let table = &self.perm_table;
        let gi0 = table.get(ii + table.get(jj) as usize);
        let gi1 = table.get(ii + i1 + table.get(jj + j1) as usize);
        let gi2 = table.get(ii + 1 + table.get(jj + 1) as usize);

        let n0 = Self::contribution(x0, y0, gi0);
        let n1 = Self::contribution(x1, y1, gi1);
        let n2 = Self::contribution(x2, y2, gi2);

        // 70 scales the corner sum to [-1, 1]
        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Calculates the contribution from one corner of the simplex.
    #[inline]
    fn contribution(x: f64, y: f64, gradient_index: u8) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let grad = PermutationTable::gradient(gradient_index);
            let t2 = t * t;
            t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
        }
    }

    /// Sums `octaves` layers of `shape(sample)`, each `lacunarity` times
    /// finer and `persistence` times weaker, divided by the total weight.
    #[inline]
    fn stack(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
        shape: impl Fn(f64) -> f64,
    ) -> f64 {
        let (mut sum, mut weight_sum) = (0.0, 0.0);
        let (mut weight, mut freq) = (1.0, 1.0);
        for _ in 0..octaves {
            sum += weight * shape(self.sample(x * freq, y * freq));
            weight_sum += weight;
            weight *= persistence;
            freq *= lacunarity;
        }
        if weight_sum > 0.0 { sum / weight_sum } else { 0.0 }
    }

    /// Fractal Brownian motion, in [-1, 1].
    #[must_use]
    pub fn fbm(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        self.stack(x, y, octaves, persistence, lacunarity, |n| n)
    }

    /// Ridged multifractal, in [0, 1]. Each octave is `(1 - |n|)²`, which
    /// turns zero crossings into sharp bright filaments.
    #[must_use]
    pub fn ridged(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        self.stack(x, y, octaves, persistence, lacunarity, |n| {
            let ridge = 1.0 - n.abs();
            ridge * ridge
        })
    }

    /// Octave stack selected by `kind`.
    #[inline]
    #[must_use]
    pub fn fractal(
        &self,
        kind: FractalKind,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> f64 {
        match kind {
            FractalKind::Fbm => self.fbm(x, y, octaves, persistence, lacunarity),
            FractalKind::Ridged => self.ridged(x, y, octaves, persistence, lacunarity),
        }
    }
}

#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi - 1 } else { xi }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let seed = NoiseSeed::new(12345);
        let noise1 = SimplexNoise::new(seed);
        let noise2 = SimplexNoise::new(seed);

        for i in 0..100 {
            let x = f64::from(i) * 0.1;
            let y = f64::from(i) * 0.17;
            assert_eq!(noise1.sample(x, y), noise2.sample(x, y), "Noise should be deterministic");
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        let noise1 = SimplexNoise::new(NoiseSeed::new(1));
        let noise2 = SimplexNoise::new(NoiseSeed::new(2));

        let differs = (0..50).any(|i| {
            let x = f64::from(i) * 0.37 + 0.1;
            noise1.sample(x, x * 0.5) != noise2.sample(x, x * 0.5)
        });
        assert!(differs, "Different seeds should produce different results");
    }

    #[test]
    fn test_zero_seed_still_shuffles() {
        let zero = SimplexNoise::new(NoiseSeed::new(0));
        let identity_like = (0..256).all(|i| zero.perm_table.get(i) == i as u8);
        assert!(!identity_like, "Seed 0 must not leave the permutation unshuffled");
    }

    #[test]
    fn test_range() {
        let noise = SimplexNoise::new(NoiseSeed::new(42));

        for i in 0..10_000 {
            let x = (f64::from(i) * 0.1) - 500.0;
            let y = (f64::from(i) * 0.13) - 650.0;
            let value = noise.sample(x, y);
            assert!((-1.0..=1.0).contains(&value), "Value {value} out of range at ({x}, {y})");
        }
    }

    #[test]
    fn test_continuity() {
        let noise = SimplexNoise::new(NoiseSeed::new(42));

        let v1 = noise.sample(100.0, 100.0);
        let v2 = noise.sample(100.001, 100.0);
        let v3 = noise.sample(100.0, 100.001);

        assert!((v1 - v2).abs() < 0.01, "Noise should be continuous");
        assert!((v1 - v3).abs() < 0.01, "Noise should be continuous");
    }

    #[test]
    fn test_fractal_ranges() {
        let noise = SimplexNoise::new(NoiseSeed::new(42));

        for i in 0..1000 {
            let x = f64::from(i) * 0.731;
            let y = f64::from(i) * 0.377;
            let fbm = noise.fbm(x, y, 6, 0.5, 2.0);
            let ridged = noise.ridged(x, y, 4, 0.5, 2.0);
            assert!((-1.0..=1.0).contains(&fbm), "fbm {fbm} out of range");
            assert!((0.0..=1.0).contains(&ridged), "ridged {ridged} out of range");
        }
    }

    #[test]
    fn test_seed_derivation() {
        let base = NoiseSeed::new(42);
        let derived1 = base.derive(1);
        let derived2 = base.derive(2);

        assert_ne!(derived1, derived2, "Different purposes should give different seeds");
        assert_eq!(derived1, base.derive(1), "Same purpose should give same seed");
        assert_ne!(derived1, base, "Derived seed should differ from base");
        assert_eq!(base.offset(1000).value(), 1042);
        assert_eq!(NoiseSeed::new(u64::MAX).offset(1).value(), 0);
    }
}
