use crate::hex::{self, Hex};

/// A bounded hexagon of cells with precomputed neighbor tables.
///
/// Cells are linearized in [`hex::hexagon`] order, so a cell is addressed
/// by a dense `u32` index. Neighbor lists are stored in two flat buffers
/// with per-cell `(start, end)` ranges and only contain in-grid cells;
/// edges are clipped, never wrapped. Built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Grid {
    radius: u32,
    /// Index of the first cell of each row `q`, offset by `radius`.
    row_offsets: Vec<usize>,
    cells: Vec<Hex>,
    direct_indices: Vec<u32>,
    direct_ranges: Vec<(u32, u32)>,
    extended_indices: Vec<u32>,
    extended_ranges: Vec<(u32, u32)>,
}

impl Grid {
    pub fn new(radius: u32) -> Self {
        let r = radius as i32;
        let cells: Vec<Hex> = hex::hexagon(radius).collect();
        let total = cells.len();

        let mut row_offsets = Vec::with_capacity(2 * radius as usize + 1);
        let mut offset = 0;
        for q in -r..=r {
            row_offsets.push(offset);
            offset += (hex::row_end(r, q) - hex::row_start(r, q) + 1) as usize;
        }

        let mut grid = Self {
            radius,
            row_offsets,
            cells,
            direct_indices: Vec::with_capacity(total * 6),
            direct_ranges: Vec::with_capacity(total),
            extended_indices: Vec::with_capacity(total * 12),
            extended_ranges: Vec::with_capacity(total),
        };

        for i in 0..total {
            let cell = grid.cells[i];

            let start = grid.direct_indices.len() as u32;
            for n in cell.neighbors() {
                if let Some(idx) = grid.index_of(n) {
                    grid.direct_indices.push(idx);
                }
            }
            grid.direct_ranges.push((start, grid.direct_indices.len() as u32));

            let start = grid.extended_indices.len() as u32;
            for n in hex::ring(cell, 2) {
                if let Some(idx) = grid.index_of(n) {
                    grid.extended_indices.push(idx);
                }
            }
            grid.extended_ranges.push((start, grid.extended_indices.len() as u32));
        }

        grid
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Total number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A grid always holds at least the origin.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        hex.length() <= u64::from(self.radius)
    }

    /// Dense index of `hex`, or `None` if it lies outside the grid.
    pub fn index_of(&self, hex: Hex) -> Option<u32> {
        if !self.contains(hex) {
            return None;
        }
        let r = self.radius as i32;
        let row = (hex.q + r) as usize;
        let col = (hex.r - hex::row_start(r, hex.q)) as usize;
        Some((self.row_offsets[row] + col) as u32)
    }

    pub fn hex_at(&self, index: u32) -> Hex {
        self.cells[index as usize]
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Hex] {
        &self.cells
    }

    /// In-grid direct neighbors of cell `index`, in direction order.
    #[inline]
    pub fn direct(&self, index: u32) -> &[u32] {
        let (start, end) = self.direct_ranges[index as usize];
        &self.direct_indices[start as usize..end as usize]
    }

    /// In-grid ring-2 neighbors of cell `index`, in ring-walk order.
    #[inline]
    pub fn extended(&self, index: u32) -> &[u32] {
        let (start, end) = self.extended_ranges[index as usize];
        &self.extended_indices[start as usize..end as usize]
    }

    /// Direct neighbors of `hex` as coordinates; empty when out of grid.
    pub fn direct_neighbors(&self, hex: Hex) -> Vec<Hex> {
        self.index_of(hex)
            .map(|i| self.direct(i).iter().map(|&n| self.hex_at(n)).collect())
            .unwrap_or_default()
    }

    /// Extended neighbors of `hex` as coordinates; empty when out of grid.
    pub fn extended_neighbors(&self, hex: Hex) -> Vec<Hex> {
        self.index_of(hex)
            .map(|i| self.extended(i).iter().map(|&n| self.hex_at(n)).collect())
            .unwrap_or_default()
    }
}
