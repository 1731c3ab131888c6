use thiserror::Error;

use crate::hex::Hex;

/// Errors reported by seeding and configuration calls.
///
/// Every variant is a caller-input mistake; the world is left untouched
/// when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// `random` was asked to seed a disc that does not fit strictly inside the map.
    #[error("initial radius {initial_radius} is out of range: must be smaller than map radius {map_radius}")]
    InitialRadiusOutOfRange { initial_radius: u32, map_radius: u32 },

    /// `cluster` radius constraints were violated.
    #[error(
        "cluster seed radius {seed_radius} is out of range: need {radius_variation} < seed radius < {upper_bound} for map radius {map_radius}"
    )]
    ClusterRadiusOutOfRange {
        seed_radius: u32,
        radius_variation: u32,
        upper_bound: i64,
        map_radius: u32,
    },

    /// Density must lie in `[0, 1]`.
    #[error("density {0} is out of range: must be within [0, 1]")]
    DensityOutOfRange(f64),

    /// A cell handed to the world lies outside the map.
    #[error("cell {cell} lies outside a map of radius {map_radius}")]
    CellOutOfGrid { cell: Hex, map_radius: u32 },

    /// Rule text was not of the form `<environment>/<fertility>`.
    #[error("invalid rule notation '{0}': expected digits '<environment>/<fertility>', e.g. 23/2")]
    InvalidRuleNotation(String),
}

/// Result type for world operations.
pub type Result<T> = std::result::Result<T, WorldError>;
