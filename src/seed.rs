use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::color::{Color, PALETTE};
use crate::error::{Result, WorldError};
use crate::hex::{self, Hex};
use crate::world::World;

fn check_density(density: f64) -> Result<()> {
    if (0.0..=1.0).contains(&density) {
        Ok(())
    } else {
        Err(WorldError::DensityOutOfRange(density))
    }
}

/// Number of cells to pick out of `candidates` at `density`.
fn sample_size(density: f64, candidates: usize) -> usize {
    ((density * candidates as f64).round() as usize).min(candidates)
}

fn palette_color<R: Rng>(rng: &mut R) -> Color {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

impl World {
    /// Seed `round(density * candidates)` cells, sampled without replacement
    /// from the disc of `initial_radius` around the origin. Each cell gets a
    /// random palette color.
    ///
    /// Arguments are checked before the world is cleared, so an error leaves
    /// the previous population in place.
    pub fn random(&mut self, density: f64, initial_radius: u32) -> Result<()> {
        check_density(density)?;
        if initial_radius >= self.map_radius() {
            return Err(WorldError::InitialRadiusOutOfRange {
                initial_radius,
                map_radius: self.map_radius(),
            });
        }

        self.clear();
        let candidates: Vec<Hex> = hex::hexagon(initial_radius).collect();
        let k = sample_size(density, candidates.len());
        let picked: Vec<Hex> = candidates.choose_multiple(&mut self.rng, k).copied().collect();
        let mut seeded = Vec::with_capacity(k);
        for cell in picked {
            if let Some(i) = self.grid().index_of(cell) {
                seeded.push((i, palette_color(&mut self.rng)));
            }
        }
        self.seed_indices(seeded);

        debug!(
            density,
            initial_radius,
            population = self.population(),
            "seeded random disc"
        );
        Ok(())
    }

    /// Seed `number` clusters of roughly `seed_radius`, each with one color.
    ///
    /// A cluster's radius varies by up to `seed_radius / 2` either way and
    /// its center is drawn from the interior where the largest possible
    /// cluster still fits. Overlapping clusters overwrite earlier colors.
    /// Validation happens before the world is cleared, as in [`World::random`].
    pub fn cluster(&mut self, number: usize, seed_radius: u32, density: f64) -> Result<()> {
        let radius_variation = seed_radius / 2;
        let upper_bound =
            i64::from(self.map_radius()) - i64::from(seed_radius) - i64::from(radius_variation);
        if radius_variation >= seed_radius || i64::from(seed_radius) >= upper_bound {
            return Err(WorldError::ClusterRadiusOutOfRange {
                seed_radius,
                radius_variation,
                upper_bound,
                map_radius: self.map_radius(),
            });
        }
        check_density(density)?;

        self.clear();
        let centers: Vec<Hex> = hex::hexagon(upper_bound as u32).collect();
        let mut seeded = Vec::new();
        for _ in 0..number {
            let color = palette_color(&mut self.rng);
            let radius = self
                .rng
                .gen_range(seed_radius - radius_variation..=seed_radius + radius_variation);
            let center = centers[self.rng.gen_range(0..centers.len())];
            let candidates: Vec<Hex> = hex::hexagon(radius).collect();
            let k = sample_size(density, candidates.len());
            let picked: Vec<Hex> = candidates.choose_multiple(&mut self.rng, k).copied().collect();
            for offset in picked {
                if let Some(i) = self.grid().index_of(center + offset) {
                    seeded.push((i, color));
                }
            }
        }
        self.seed_indices(seeded);

        debug!(
            number,
            seed_radius,
            density,
            population = self.population(),
            "seeded clusters"
        );
        Ok(())
    }
}
