use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::color::Color;
use crate::error::{Result, WorldError};
use crate::grid::Grid;
use crate::hex::Hex;
use crate::rules::Rules;

/// Configuration for a hexagonal world.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Radius of the bounded hexagon.
    pub map_radius: u32,
    /// Survival and birth rules.
    pub rules: Rules,
    /// Add the extended-neighbor bonus to the count used for rule lookup.
    pub use_extended_neighbors: bool,
    /// Divisor for the extended-neighbor bonus (0 disables the bonus).
    pub extended_neighbors_factor: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            map_radius: 32,
            rules: Rules::default(),
            use_extended_neighbors: true,
            extended_neighbors_factor: 3,
        }
    }
}

/// A cellular automaton on a bounded hexagonal grid.
///
/// Liveness and color share one dense buffer: a cell is alive exactly when
/// it carries a color. `live` and `frontier` are ascending index lists; the
/// frontier always covers every live cell together with its direct and
/// extended neighbors.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    pub(crate) rules: Rules,
    pub(crate) use_extended_neighbors: bool,
    pub(crate) extended_neighbors_factor: usize,
    /// Per-cell state, indexed like the grid: `Some(color)` for live cells.
    pub(crate) state: Vec<Option<Color>>,
    pub(crate) live: Vec<u32>,
    pub(crate) frontier: Vec<u32>,
    pub(crate) cycles: u64,
    pub(crate) rng: SmallRng,
}

impl World {
    /// Create an empty world with default rules and an entropy-seeded RNG.
    pub fn new(map_radius: u32) -> Self {
        let config = WorldConfig {
            map_radius,
            ..Default::default()
        };
        Self::from_parts(config, SmallRng::from_entropy())
    }

    /// Create an empty world whose seeding is reproducible from `seed`.
    pub fn with_seed(config: WorldConfig, seed: u64) -> Self {
        Self::from_parts(config, SmallRng::seed_from_u64(seed))
    }

    fn from_parts(config: WorldConfig, rng: SmallRng) -> Self {
        let grid = Grid::new(config.map_radius);
        let state = vec![None; grid.len()];
        debug!(map_radius = config.map_radius, cells = grid.len(), "built neighbor index");
        Self {
            grid,
            rules: config.rules,
            use_extended_neighbors: config.use_extended_neighbors,
            extended_neighbors_factor: config.extended_neighbors_factor,
            state,
            live: Vec::new(),
            frontier: Vec::new(),
            cycles: 0,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn map_radius(&self) -> u32 {
        self.grid.radius()
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Number of generations evolved since the last clear or seed.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Mutable access for in-place edits such as toggling a single count.
    pub fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }

    /// Replace both rule sets; takes effect on the next `evolve`.
    pub fn set_rules(
        &mut self,
        environment: impl IntoIterator<Item = usize>,
        fertility: impl IntoIterator<Item = usize>,
    ) {
        self.rules = Rules::new(environment, fertility);
    }

    pub fn use_extended_neighbors(&self) -> bool {
        self.use_extended_neighbors
    }

    pub fn set_use_extended_neighbors(&mut self, enabled: bool) {
        self.use_extended_neighbors = enabled;
    }

    pub fn toggle_extended_neighbors(&mut self) {
        self.use_extended_neighbors = !self.use_extended_neighbors;
    }

    pub fn extended_neighbors_factor(&self) -> usize {
        self.extended_neighbors_factor
    }

    pub fn set_extended_neighbors_factor(&mut self, factor: usize) {
        self.extended_neighbors_factor = factor;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.live.len()
    }

    pub fn is_alive(&self, hex: Hex) -> bool {
        self.color(hex).is_some()
    }

    /// Color of a live cell; `None` for dead or out-of-grid cells.
    pub fn color(&self, hex: Hex) -> Option<Color> {
        self.grid.index_of(hex).and_then(|i| self.state[i as usize])
    }

    /// Live cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Hex> + '_ {
        self.live.iter().map(|&i| self.grid.hex_at(i))
    }

    /// Live cells with their colors, in index order.
    pub fn colors(&self) -> impl Iterator<Item = (Hex, Color)> + '_ {
        self.live.iter().filter_map(|&i| {
            self.state[i as usize].map(|color| (self.grid.hex_at(i), color))
        })
    }

    /// Cells that will be re-evaluated by the next `evolve`.
    pub fn frontier(&self) -> impl Iterator<Item = Hex> + '_ {
        self.frontier.iter().map(|&i| self.grid.hex_at(i))
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Live cell indices, ascending.
    pub fn live_indices(&self) -> &[u32] {
        &self.live
    }

    /// Frontier cell indices, ascending.
    pub fn frontier_indices(&self) -> &[u32] {
        &self.frontier
    }

    /// Empty the live set, colors and frontier, and reset the cycle counter.
    pub fn clear(&mut self) {
        for &i in &self.live {
            self.state[i as usize] = None;
        }
        self.live.clear();
        self.frontier.clear();
        self.cycles = 0;
    }

    /// Replace the population with `cells`.
    ///
    /// Every cell is checked against the grid first, so an error leaves the
    /// world unchanged. Later duplicates overwrite earlier colors.
    pub fn populate<I>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = (Hex, Color)>,
    {
        let seeded = cells
            .into_iter()
            .map(|(cell, color)| match self.grid.index_of(cell) {
                Some(i) => Ok((i, color)),
                None => Err(WorldError::CellOutOfGrid {
                    cell,
                    map_radius: self.map_radius(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        self.clear();
        self.seed_indices(seeded);
        debug!(population = self.population(), "populated world");
        Ok(())
    }

    /// Mark `cells` alive and rebuild the live list and frontier from them.
    /// Expects a cleared world.
    pub(crate) fn seed_indices(&mut self, cells: impl IntoIterator<Item = (u32, Color)>) {
        for (i, color) in cells {
            if self.state[i as usize].replace(color).is_none() {
                self.live.push(i);
            }
        }
        self.live.sort_unstable();
        self.frontier = expand_frontier(&self.grid, self.live.iter().copied());
    }

    /// The live set packed as a bitmap in grid index order.
    pub fn occupancy_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.grid.len().div_ceil(8)];
        for &i in &self.live {
            bytes[i as usize / 8] |= 1 << (i % 8);
        }
        bytes
    }

    /// Live cells as an ordered set; convenient for comparing generations.
    pub fn cell_set(&self) -> BTreeSet<Hex> {
        self.cells().collect()
    }
}

/// Ascending, de-duplicated union of `cells` with their direct and extended neighbors.
pub(crate) fn expand_frontier(grid: &Grid, cells: impl IntoIterator<Item = u32>) -> Vec<u32> {
    let mut frontier = Vec::new();
    for i in cells {
        frontier.push(i);
        frontier.extend_from_slice(grid.direct(i));
        frontier.extend_from_slice(grid.extended(i));
    }
    frontier.sort_unstable();
    frontier.dedup();
    frontier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex;

    #[test]
    fn test_defaults() {
        let world = World::new(4);
        assert_eq!(world.map_radius(), 4);
        assert_eq!(world.cell_count(), 61);
        assert_eq!(world.cycles(), 0);
        assert_eq!(world.population(), 0);
        assert_eq!(world.frontier_len(), 0);
        assert_eq!(world.rules(), &Rules::default());
        assert!(world.use_extended_neighbors());
        assert_eq!(world.extended_neighbors_factor(), 3);
    }

    #[test]
    fn test_cell_count_formula() {
        for radius in 0..15u32 {
            let world = World::new(radius);
            let r = radius as usize;
            assert_eq!(world.cell_count(), 3 * r * r + 3 * r + 1);
        }
    }

    #[test]
    fn test_populate_sets_cells_colors_frontier() {
        let mut world = World::new(3);
        let red = Color::new(0, 100);
        world.populate([(Hex::ORIGIN, red)]).unwrap();
        assert_eq!(world.population(), 1);
        assert!(world.is_alive(Hex::ORIGIN));
        assert_eq!(world.color(Hex::ORIGIN), Some(red));
        // Origin plus 6 direct plus 12 extended neighbors.
        assert_eq!(world.frontier_len(), 19);
        assert!(world.frontier().all(|h| h.length() <= 2));
    }

    #[test]
    fn test_populate_rejects_out_of_grid_without_side_effects() {
        let mut world = World::new(2);
        let c = Color::new(90, 100);
        world.populate([(Hex::ORIGIN, c)]).unwrap();
        let err = world
            .populate([(Hex::new(1, 0), c), (Hex::new(3, 0), c)])
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::CellOutOfGrid {
                cell: Hex::new(3, 0),
                map_radius: 2
            }
        );
        assert_eq!(world.cell_set(), BTreeSet::from([Hex::ORIGIN]));
    }

    #[test]
    fn test_populate_rejects_extreme_coordinates() {
        let mut world = World::new(3);
        let c = Color::new(0, 100);
        let err = world.populate([(Hex::new(i32::MIN, 0), c)]).unwrap_err();
        assert_eq!(
            err,
            WorldError::CellOutOfGrid {
                cell: Hex::new(i32::MIN, 0),
                map_radius: 3
            }
        );
        assert!(!world.is_alive(Hex::new(i32::MAX, i32::MAX)));
        assert_eq!(world.color(Hex::new(0, i32::MIN)), None);
        assert_eq!(world.neighbor_score(Hex::new(i32::MIN, i32::MIN)), None);
    }

    #[test]
    fn test_populate_duplicates() {
        let mut world = World::new(2);
        world
            .populate([(Hex::ORIGIN, Color::new(0, 100)), (Hex::ORIGIN, Color::new(90, 100))])
            .unwrap();
        assert_eq!(world.population(), 1);
        assert_eq!(world.color(Hex::ORIGIN), Some(Color::new(90, 100)));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut world = World::new(3);
        let cells: Vec<(Hex, Color)> = hex::hexagon(1).map(|h| (h, Color::new(45, 100))).collect();
        world.populate(cells).unwrap();
        world.cycles = 9;

        world.clear();
        let once = (world.cell_set(), world.frontier_len(), world.cycles(), world.colors().count());
        world.clear();
        let twice = (world.cell_set(), world.frontier_len(), world.cycles(), world.colors().count());
        assert_eq!(once, twice);
        assert_eq!(once, (BTreeSet::new(), 0, 0, 0));
        assert!(world.state.iter().all(Option::is_none));
    }

    #[test]
    fn test_set_rules_accepts_empty() {
        let mut world = World::new(1);
        world.set_rules([], [1, 7]);
        assert!(world.rules().environment.is_empty());
        assert_eq!(world.rules().fertility, BTreeSet::from([1, 7]));
    }

    #[test]
    fn test_toggles() {
        let mut world = World::new(1);
        world.toggle_extended_neighbors();
        assert!(!world.use_extended_neighbors());
        world.set_use_extended_neighbors(true);
        assert!(world.use_extended_neighbors());
        world.rules_mut().toggle_fertility(4);
        assert!(world.rules().is_born(4));
    }

    #[test]
    fn test_occupancy_bytes() {
        let mut world = World::new(1);
        assert_eq!(world.occupancy_bytes(), vec![0]);
        // Index 3 is the origin in a radius-1 grid.
        world.populate([(Hex::ORIGIN, Color::new(0, 100))]).unwrap();
        assert_eq!(world.occupancy_bytes(), vec![0b0000_1000]);
    }

    #[test]
    fn test_out_of_grid_queries() {
        let world = World::new(1);
        assert!(!world.is_alive(Hex::new(5, 5)));
        assert_eq!(world.color(Hex::new(-2, 0)), None);
    }
}
