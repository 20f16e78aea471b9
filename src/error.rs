use thiserror::Error;

use crate::position::Position;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot place {requested} animals, only {free} free cells left")]
    Overcrowded { requested: usize, free: usize },
    #[error("cell ({}, {}) is occupied or out of bounds", .0.x, .0.y)]
    Occupied(Position),
}
