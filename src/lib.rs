pub mod hex;
pub mod grid;
pub mod color;
pub mod rules;
pub mod error;
pub mod world;
pub mod seed;
pub mod evolve;
pub mod metrics;

pub use color::Color;
pub use error::{Result, WorldError};
pub use hex::Hex;
pub use rules::Rules;
pub use world::{World, WorldConfig};
