use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, Mul, Neg, Sub};

/// Axial coordinate of a hexagonal cell.
///
/// The cube form (x, y, z) with x + y + z = 0 is derived as x = q, z = r,
/// y = -x - z and is used for distances. It is computed in `i64`, so every
/// representable `Hex` has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

/// Cube coordinate; always satisfies x + y + z = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Hex {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// The six neighbor offsets. Consumers that take "the first N live
    /// neighbors" rely on this order.
    pub const DIRECTIONS: [Self; 6] = [
        Self { q: 1, r: 0 },
        Self { q: 1, r: -1 },
        Self { q: 0, r: -1 },
        Self { q: -1, r: 0 },
        Self { q: -1, r: 1 },
        Self { q: 0, r: 1 },
    ];

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn to_cube(self) -> Cube {
        let x = self.q as i64;
        let z = self.r as i64;
        Cube { x, y: -x - z, z }
    }

    /// Distance in cube space: max(|dx|, |dy|, |dz|).
    pub fn distance(self, other: Self) -> u64 {
        let a = self.to_cube();
        let b = other.to_cube();
        a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)).max(a.z.abs_diff(b.z))
    }

    /// Distance to the origin.
    pub fn length(self) -> u64 {
        self.distance(Self::ORIGIN)
    }

    /// Adjacent cell in `direction` (taken modulo 6).
    pub fn neighbor(self, direction: usize) -> Self {
        self + Self::DIRECTIONS[direction % 6]
    }

    /// All six adjacent cells, in `DIRECTIONS` order.
    pub fn neighbors(self) -> [Self; 6] {
        Self::DIRECTIONS.map(|d| self + d)
    }
}

impl Add for Hex {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Hex {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.q - other.q, self.r - other.r)
    }
}

impl Neg for Hex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }
}

impl Mul<i32> for Hex {
    type Output = Self;

    #[inline]
    fn mul(self, k: i32) -> Self {
        Self::new(self.q * k, self.r * k)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Free-function form of [`Hex::to_cube`].
pub const fn to_cube(hex: Hex) -> Cube {
    hex.to_cube()
}

/// Free-function form of [`Hex::distance`].
pub fn distance(a: Hex, b: Hex) -> u64 {
    a.distance(b)
}

/// The six cells adjacent to `cell`, in direction order.
pub fn direct_neighbors(cell: Hex) -> [Hex; 6] {
    cell.neighbors()
}

/// The 6 * radius cells at exactly `radius` from `center`.
///
/// Starts at `center + DIRECTIONS[4] * radius` and walks `radius` steps along
/// each direction in turn. A radius of 0 yields no cells.
pub fn ring(center: Hex, radius: u32) -> Vec<Hex> {
    let steps = radius as i32;
    let mut cells = Vec::with_capacity(6 * radius as usize);
    let mut cell = center + Hex::DIRECTIONS[4] * steps;
    for direction in 0..6 {
        for _ in 0..steps {
            cells.push(cell);
            cell = cell.neighbor(direction);
        }
    }
    cells
}

/// Number of cells within `radius` of the origin: 3r² + 3r + 1.
pub const fn hex_count(radius: u32) -> usize {
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Every cell within `radius` of the origin, `q` ascending then `r` ascending.
pub fn hexagon(radius: u32) -> Hexagon {
    Hexagon::new(radius)
}

/// Lazy enumeration of a hexagon of cells. Holds no state beyond its
/// position, so calling [`hexagon`] again restarts the sequence.
#[derive(Debug, Clone)]
pub struct Hexagon {
    radius: i32,
    q: i32,
    r: i32,
    remaining: usize,
}

impl Hexagon {
    fn new(radius: u32) -> Self {
        let radius = radius as i32;
        Self {
            radius,
            q: -radius,
            r: row_start(radius, -radius),
            remaining: hex_count(radius as u32),
        }
    }
}

/// Lowest `r` in row `q` of a hexagon of `radius`.
pub(crate) fn row_start(radius: i32, q: i32) -> i32 {
    (-radius).max(-q - radius)
}

/// Highest `r` in row `q` of a hexagon of `radius`.
pub(crate) fn row_end(radius: i32, q: i32) -> i32 {
    radius.min(-q + radius)
}

impl Iterator for Hexagon {
    type Item = Hex;

    fn next(&mut self) -> Option<Hex> {
        if self.remaining == 0 {
            return None;
        }
        let cell = Hex::new(self.q, self.r);
        self.remaining -= 1;
        if self.r < row_end(self.radius, self.q) {
            self.r += 1;
        } else {
            self.q += 1;
            self.r = row_start(self.radius, self.q);
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Hexagon {}

impl FusedIterator for Hexagon {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_sums_to_zero() {
        let c = Hex::new(3, -7).to_cube();
        assert_eq!(c, Cube { x: 3, y: 4, z: -7 });
        assert_eq!(c.x + c.y + c.z, 0);
    }

    #[test]
    fn test_extreme_coordinates() {
        let far = Hex::new(i32::MIN, 0);
        assert_eq!(far.to_cube(), Cube { x: i32::MIN as i64, y: -(i32::MIN as i64), z: 0 });
        assert_eq!(far.length(), 1 << 31);
        let corner = Hex::new(i32::MAX, i32::MAX);
        assert_eq!(corner.length(), 2 * i32::MAX as u64);
        assert_eq!(far.distance(Hex::new(i32::MAX, 0)), u32::MAX as u64);
    }

    #[test]
    fn test_distance_basic() {
        assert_eq!(distance(Hex::ORIGIN, Hex::ORIGIN), 0);
        assert_eq!(distance(Hex::ORIGIN, Hex::new(2, -1)), 2);
        assert_eq!(distance(Hex::new(-2, 0), Hex::new(2, 0)), 4);
        assert_eq!(distance(Hex::new(1, 1), Hex::new(-1, -1)), 4);
    }

    #[test]
    fn test_neighbors_are_adjacent_and_ordered() {
        let c = Hex::new(4, -2);
        let n = direct_neighbors(c);
        assert_eq!(n[0], Hex::new(5, -2));
        assert_eq!(n[1], Hex::new(5, -3));
        assert_eq!(n[2], Hex::new(4, -3));
        assert_eq!(n[3], Hex::new(3, -2));
        assert_eq!(n[4], Hex::new(3, -1));
        assert_eq!(n[5], Hex::new(4, -1));
        for h in n {
            assert_eq!(c.distance(h), 1);
        }
    }

    #[test]
    fn test_ring_sizes_and_distances() {
        let center = Hex::new(1, 2);
        assert!(ring(center, 0).is_empty());
        for radius in 1..6 {
            let cells = ring(center, radius);
            assert_eq!(cells.len(), 6 * radius as usize);
            let mut dedup = cells.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), cells.len());
            for h in cells {
                assert_eq!(center.distance(h), u64::from(radius));
            }
        }
    }

    #[test]
    fn test_ring_starting_cell() {
        let cells = ring(Hex::ORIGIN, 2);
        assert_eq!(cells[0], Hex::new(-2, 2));
        assert_eq!(cells[1], Hex::new(-1, 2));
    }

    #[test]
    fn test_hexagon_counts() {
        for radius in 0..10 {
            let cells: Vec<Hex> = hexagon(radius).collect();
            assert_eq!(cells.len(), hex_count(radius));
            assert_eq!(hexagon(radius).len(), hex_count(radius));
            assert!(cells.iter().all(|h| h.length() <= u64::from(radius)));
        }
    }

    #[test]
    fn test_hexagon_order_and_restart() {
        let first: Vec<Hex> = hexagon(1).collect();
        assert_eq!(
            first,
            vec![
                Hex::new(-1, 0),
                Hex::new(-1, 1),
                Hex::new(0, -1),
                Hex::new(0, 0),
                Hex::new(0, 1),
                Hex::new(1, -1),
                Hex::new(1, 0),
            ]
        );
        let second: Vec<Hex> = hexagon(1).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hexagon_radius_zero() {
        let cells: Vec<Hex> = hexagon(0).collect();
        assert_eq!(cells, vec![Hex::ORIGIN]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Hex::new(-3, 5).to_string(), "(-3, 5)");
    }
}
