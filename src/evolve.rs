use rayon::prelude::*;
use tracing::trace;

use crate::color::Color;
use crate::hex::Hex;
use crate::world::{World, expand_frontier};

impl World {
    /// Advance the world by exactly one generation.
    ///
    /// Only frontier cells are evaluated. Outcomes are computed in parallel
    /// against the frozen current generation, then the live set, colors and
    /// frontier are replaced together and the cycle counter is incremented.
    pub fn evolve(&mut self) {
        let this = &*self;
        let outcomes: Vec<Option<Color>> = this
            .frontier
            .par_iter()
            .map(|&i| this.next_state(i))
            .collect();

        for &i in &self.live {
            self.state[i as usize] = None;
        }
        let mut next_live = Vec::with_capacity(self.live.len());
        for (&i, outcome) in self.frontier.iter().zip(outcomes) {
            if let Some(color) = outcome {
                self.state[i as usize] = Some(color);
                next_live.push(i);
            }
        }

        self.frontier = expand_frontier(self.grid(), next_live.iter().copied());
        self.live = next_live;
        self.cycles += 1;

        trace!(
            cycle = self.cycles,
            population = self.live.len(),
            frontier = self.frontier.len(),
            "evolved"
        );
    }

    /// Count used for rule lookup at `hex`, or `None` outside the grid.
    pub fn neighbor_score(&self, hex: Hex) -> Option<usize> {
        self.grid().index_of(hex).map(|i| self.score(self.live_direct(i)))
    }

    /// Live direct neighbors of cell `i`.
    fn live_direct(&self, i: u32) -> usize {
        self.grid()
            .direct(i)
            .iter()
            .filter(|&&n| self.state[n as usize].is_some())
            .count()
    }

    // The bonus is derived from the direct count again; the extended-neighbor
    // set itself is never counted. Suspect, but kept for compatibility.
    fn score(&self, live_direct: usize) -> usize {
        if !self.use_extended_neighbors {
            return live_direct;
        }
        live_direct + live_direct.checked_div(self.extended_neighbors_factor).unwrap_or(0)
    }

    /// State of cell `i` in the next generation.
    fn next_state(&self, i: u32) -> Option<Color> {
        let score = self.score(self.live_direct(i));
        match self.state[i as usize] {
            Some(color) => self.rules.survives(score).then(|| color.aged()),
            None => self.rules.is_born(score).then(|| self.newborn_color(i)),
        }
    }

    /// Inherit from the first two live direct neighbors in direction order.
    fn newborn_color(&self, i: u32) -> Color {
        let mut parents = [Color::new(0, 0); 2];
        let mut found = 0;
        let live = self
            .grid()
            .direct(i)
            .iter()
            .filter_map(|&n| self.state[n as usize]);
        for color in live.take(2) {
            parents[found] = color;
            found += 1;
        }
        Color::inherit(&parents[..found])
    }
}
