//! Deterministic star placement for the background point cloud.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Placement parameters for the star cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFieldParams {
    /// Number of stars to place.
    pub count: u32,
    /// Stars span `[-half_extent, half_extent)` on x and y.
    pub half_extent: f32,
    /// Stars span `(-depth, 0]` on z, i.e. behind the globe as seen by the camera.
    pub depth: f32,
    /// RNG seed. The same seed always yields the same cloud.
    pub seed: u64,
}

impl Default for StarFieldParams {
    fn default() -> Self {
        Self {
            count: 2500,
            half_extent: 100.0,
            depth: 500.0,
            seed: 42,
        }
    }
}

/// Generate star positions. Deterministic for a given seed.
pub fn generate_star_positions(params: &StarFieldParams) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let span = params.half_extent * 2.0;

    let positions: Vec<Vec3> = (0..params.count)
        .map(|_| {
            let x = (rng.random::<f32>() - 0.5) * span;
            let y = (rng.random::<f32>() - 0.5) * span;
            let z = -rng.random::<f32>() * params.depth;
            Vec3::new(x, y, z)
        })
        .collect();

    log::debug!(
        "Placed {} stars (seed {}, half-extent {}, depth {})",
        positions.len(),
        params.seed,
        params.half_extent,
        params.depth
    );
    positions
}
