//! Foxes and rabbits on a grid: a predator-prey simulation with regrowing grass.

pub mod animal;
pub mod config;
pub mod error;
pub mod grass;
pub mod position;
pub mod stats;
pub mod world;

pub use animal::{Animal, Species};
pub use config::Config;
pub use error::{ConfigError, WorldError};
pub use position::Position;
pub use world::World;
