use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::SpeciesConfig;
use crate::position::Position;
use crate::world::Occupancy;

const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Fox,
    Rabbit,
}

impl Species {
    pub fn name(self) -> &'static str {
        match self {
            Species::Fox => "fox",
            Species::Rabbit => "rabbit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub species: Species,
    pub position: Position,
    /// Not floored; an animal below zero is removed at the end of the tick.
    pub energy: i32,
    pub turns_since_eaten: u32,
    pub turns_since_reproduction: u32,
}

impl Animal {
    pub fn new(species: Species, position: Position, config: &SpeciesConfig) -> Self {
        Animal {
            species,
            position,
            energy: config.initial_energy,
            turns_since_eaten: 0,
            turns_since_reproduction: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.energy <= 0
    }

    pub fn can_eat(&self, cooldown: u32) -> bool {
        self.turns_since_eaten >= cooldown
    }

    pub fn can_reproduce(&self, cooldown: u32) -> bool {
        self.turns_since_reproduction >= cooldown
    }

    /// Try the four unit steps in a fresh random order and return the first free one.
    pub fn random_step(&self, occupancy: &Occupancy<'_>, rng: &mut impl Rng) -> Option<Position> {
        let mut directions = DIRECTIONS;
        directions.shuffle(rng);
        directions
            .iter()
            .map(|&(dx, dy)| self.position.offset(dx, dy))
            .find(|&cell| !occupancy.is_occupied(cell))
    }

    pub fn step_toward(&self, target: Position, occupancy: &Occupancy<'_>) -> Option<Position> {
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        directed_step(self.position, dx, dy, occupancy)
    }

    /// Step that increases the distance to `target`, unless the animal hesitates.
    /// Hesitation is rolled once, before any cell is looked at.
    pub fn step_away(
        &self,
        target: Position,
        occupancy: &Occupancy<'_>,
        hesitation_chance: f64,
        rng: &mut impl Rng,
    ) -> Option<Position> {
        if rng.random_bool(hesitation_chance) {
            return None;
        }
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        directed_step(self.position, -dx, -dy, occupancy)
    }
}

// Horizontal is only tried when it dominates; vertical is always the fallback.
fn directed_step(from: Position, dx: i32, dy: i32, occupancy: &Occupancy<'_>) -> Option<Position> {
    if dx.abs() >= dy.abs() && dx != 0 {
        let cell = from.offset(dx.signum(), 0);
        if !occupancy.is_occupied(cell) {
            return Some(cell);
        }
    }
    if dy != 0 {
        let cell = from.offset(0, dy.signum());
        if !occupancy.is_occupied(cell) {
            return Some(cell);
        }
    }
    None
}

/// Index of the closest candidate within `max_range` (Manhattan). The earliest
/// candidate wins ties.
pub fn find_nearest(from: Position, candidates: &[Animal], max_range: i32) -> Option<usize> {
    let mut nearest: Option<(usize, i32)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let distance = from.manhattan(candidate.position);
        if distance > max_range {
            continue;
        }
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((idx, distance)),
        }
    }
    nearest.map(|(idx, _)| idx)
}

/// Whether another member of `herd` stands within the box of half-width `range`.
/// Entries sharing `position` are taken to be the asking animal itself.
pub fn has_nearby(position: Position, herd: &[Animal], range: i32) -> bool {
    herd.iter()
        .filter(|other| other.position != position)
        .any(|other| position.within_box(other.position, range))
}

/// Random probe of the 3x3 neighbourhood, `attempts` draws at most. Can miss a
/// free cell that exists.
pub fn find_empty_adjacent(
    position: Position,
    occupancy: &Occupancy<'_>,
    attempts: u32,
    rng: &mut impl Rng,
) -> Option<Position> {
    for _ in 0..attempts {
        let dx = rng.random_range(-1..=1);
        let dy = rng.random_range(-1..=1);
        let cell = position.offset(dx, dy);
        if !occupancy.is_occupied(cell) {
            return Some(cell);
        }
    }
    None
}
