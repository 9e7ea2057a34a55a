//! Sub-pixel sample placement for anti-aliasing.

use glam::DVec2;
use rand::Rng;

/// Strategy for placing samples inside a pixel.
///
/// Offsets are in `[0, 1)²`, measured from the pixel's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sampler {
    /// Cell centers of a regular grid; deterministic
    Uniform,
    /// One random point per grid cell (stratified)
    #[default]
    Jittered,
}

impl Sampler {
    /// Generate exactly `max(n, 1)` sample offsets.
    ///
    /// Both strategies use a `floor(sqrt(n))` square grid. A single sample is
    /// always the pixel center. Samples that do not fit the grid are placed at
    /// the center (uniform) or uniformly at random (jittered).
    pub fn offsets<R: Rng>(&self, n: u32, rng: &mut R) -> Vec<DVec2> {
        let n = n.max(1) as usize;
        if n == 1 {
            return vec![DVec2::splat(0.5)];
        }

        let grid = (n as f64).sqrt().floor() as usize;
        let step = 1.0 / grid as f64;

        let mut samples = Vec::with_capacity(n);
        for j in 0..grid {
            for i in 0..grid {
                let cell = DVec2::new(i as f64, j as f64);
                let within = match self {
                    Sampler::Uniform => DVec2::splat(0.5),
                    Sampler::Jittered => DVec2::new(rng.gen(), rng.gen()),
                };
                samples.push((cell + within) * step);
            }
        }

        while samples.len() < n {
            let extra = match self {
                Sampler::Uniform => DVec2::splat(0.5),
                Sampler::Jittered => DVec2::new(rng.gen(), rng.gen()),
            };
            samples.push(extra);
        }

        samples
    }
}
