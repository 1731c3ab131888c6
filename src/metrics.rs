use crate::color::{Color, PALETTE};
use crate::world::World;

/// Compute the high-order entropy (HOE) of a byte slice.
///
/// HOE = compressed_size / raw_size, where compression uses brotli at quality 2.
/// Applied to [`World::occupancy_bytes`] it tracks how structured the live
/// pattern is: ~1.0 for noise, well below 1.0 for regular or sparse patterns.
pub fn high_order_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut compressed = Vec::new();
    let params = brotli::enc::BrotliEncoderParams {
        quality: 2,
        ..Default::default()
    };
    brotli::BrotliCompress(&mut &data[..], &mut compressed, &params)
        .expect("brotli compression into a Vec cannot fail");

    compressed.len() as f64 / data.len() as f64
}

/// Fraction of grid cells that are alive.
pub fn density(world: &World) -> f64 {
    world.population() as f64 / world.cell_count() as f64
}

/// Count colors per hue bucket; `bins` equal slices of the color wheel.
/// Returns an empty histogram when `bins` is 0.
pub fn hue_histogram(colors: impl IntoIterator<Item = Color>, bins: usize) -> Vec<usize> {
    let mut hist = vec![0usize; bins];
    if bins == 0 {
        return hist;
    }
    for c in colors {
        hist[usize::from(c.hue % 360) * bins / 360] += 1;
    }
    hist
}

/// Mean saturation, or `None` when there are no colors.
pub fn mean_saturation(colors: impl IntoIterator<Item = Color>) -> Option<f64> {
    let (sum, n) = colors
        .into_iter()
        .fold((0u64, 0u64), |(sum, n), c| (sum + u64::from(c.saturation), n + 1));
    (n > 0).then(|| sum as f64 / n as f64)
}

/// Hue buckets used to count lineages, one per palette color.
pub const LINEAGE_BINS: usize = PALETTE.len();

/// Per-cycle summary of a world.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleMetrics {
    pub cycle: u64,
    pub population: usize,
    pub density: f64,
    pub frontier: usize,
    /// Non-empty hue buckets out of [`LINEAGE_BINS`].
    pub lineages: usize,
    pub mean_saturation: Option<f64>,
    pub hoe: f64,
}

impl CycleMetrics {
    pub fn capture(world: &World) -> Self {
        let colors = || world.colors().map(|(_, c)| c);
        Self {
            cycle: world.cycles(),
            population: world.population(),
            density: density(world),
            frontier: world.frontier_len(),
            lineages: hue_histogram(colors(), LINEAGE_BINS)
                .iter()
                .filter(|&&n| n > 0)
                .count(),
            mean_saturation: mean_saturation(colors()),
            hoe: high_order_entropy(&world.occupancy_bytes()),
        }
    }
}
