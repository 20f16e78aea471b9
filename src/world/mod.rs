//! The world grid and the tick engine.
//!
//! A tick runs foxes, then rabbits, then releases newborns, removes the
//! starved and finally regrows grass. Every phase reads the state left by the
//! previous one, so the order is part of the model.

mod phases;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::animal::{Animal, Species};
use crate::config::Config;
use crate::error::WorldError;
use crate::grass::Grass;
use crate::position::Position;
use crate::stats::SimulationStats;

/// Random draws per grid cell before seeding falls back to listing free cells.
const SEED_ATTEMPTS_PER_CELL: usize = 4;

/// Read-only view of which cells are taken, including newborns still waiting
/// to join their herd.
pub struct Occupancy<'a> {
    width: i32,
    height: i32,
    foxes: &'a [Animal],
    rabbits: &'a [Animal],
    nursery: &'a [Animal],
}

impl<'a> Occupancy<'a> {
    pub fn new(
        width: i32,
        height: i32,
        foxes: &'a [Animal],
        rabbits: &'a [Animal],
        nursery: &'a [Animal],
    ) -> Self {
        Occupancy {
            width,
            height,
            foxes,
            rabbits,
            nursery,
        }
    }

    /// Out-of-bounds cells count as occupied.
    pub fn is_occupied(&self, cell: Position) -> bool {
        !cell.in_bounds(self.width, self.height)
            || self
                .foxes
                .iter()
                .chain(self.rabbits)
                .chain(self.nursery)
                .any(|animal| animal.position == cell)
    }
}

pub struct World {
    config: Config,
    width: i32,
    height: i32,
    foxes: Vec<Animal>,
    rabbits: Vec<Animal>,
    /// Offspring born this tick; they occupy cells but are not yet part of a herd.
    nursery: Vec<Animal>,
    /// Row-major, `width * height` cells.
    grass: Vec<Grass>,
    rng: ChaCha8Rng,
    seed: u64,
    pub stats: SimulationStats,
}

impl World {
    /// Empty world with a random seed.
    pub fn new(config: Config) -> Result<Self, WorldError> {
        let seed = rand::rng().random();
        Self::with_seed(config, seed)
    }

    /// Empty world whose every random draw is derived from `seed`.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, WorldError> {
        config.validate()?;
        let width = config.world.width;
        let height = config.world.height;
        let grass = vec![Grass::new(&config.grass); config.cell_count()];
        let stats = SimulationStats::new(config.display.chart_history);

        log::info!("World created: {}x{} grid, seed = {}", width, height, seed);

        Ok(World {
            config,
            width,
            height,
            foxes: Vec::new(),
            rabbits: Vec::new(),
            nursery: Vec::new(),
            grass,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            stats,
        })
    }

    /// Place `num_foxes` foxes and then `num_rabbits` rabbits on random free cells.
    pub fn initialize(&mut self, num_foxes: usize, num_rabbits: usize) -> Result<(), WorldError> {
        let requested = num_foxes + num_rabbits;
        let free = self.free_cells().len();
        if requested > free {
            return Err(WorldError::Overcrowded { requested, free });
        }

        let plan = std::iter::repeat_n(Species::Fox, num_foxes)
            .chain(std::iter::repeat_n(Species::Rabbit, num_rabbits));
        for species in plan {
            let cell = self.random_empty_position()?;
            let animal = Animal::new(species, cell, self.config.species(species));
            self.herd_mut(species).push(animal);
        }

        log::info!(
            "World seeded: foxes = {}, rabbits = {}",
            self.foxes.len(),
            self.rabbits.len()
        );
        self.stats
            .record_population(self.foxes.len(), self.rabbits.len());
        Ok(())
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        self.nursery.clear();

        // Eaten rabbits leave immediately, so later foxes see the thinned herd.
        for idx in 0..self.foxes.len() {
            if self.foxes[idx].is_dead() {
                continue;
            }
            self.move_fox(idx);
            self.feed_fox(idx);
            self.breed(Species::Fox, idx);
        }

        for idx in 0..self.rabbits.len() {
            if self.rabbits[idx].is_dead() {
                continue;
            }
            self.move_rabbit(idx);
            self.feed_rabbit(idx);
            self.breed(Species::Rabbit, idx);
        }

        self.release_newborns();
        self.remove_dead();
        self.grow_grass();

        self.stats.tick += 1;
        self.stats
            .record_population(self.foxes.len(), self.rabbits.len());
        log::debug!("{}", self.stats.summary());
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.update();
        }
    }

    pub fn is_position_occupied(&self, x: i32, y: i32) -> bool {
        self.occupancy().is_occupied(Position::new(x, y))
    }

    /// Drop a new animal onto a free cell.
    pub fn spawn(&mut self, species: Species, position: Position) -> Result<(), WorldError> {
        if self.occupancy().is_occupied(position) {
            return Err(WorldError::Occupied(position));
        }
        let animal = Animal::new(species, position, self.config.species(species));
        self.herd_mut(species).push(animal);
        log::debug!("Spawned {} at ({}, {})", species.name(), position.x, position.y);
        Ok(())
    }

    pub fn foxes(&self) -> &[Animal] {
        &self.foxes
    }

    pub fn rabbits(&self) -> &[Animal] {
        &self.rabbits
    }

    pub fn herd(&self, species: Species) -> &[Animal] {
        match species {
            Species::Fox => &self.foxes,
            Species::Rabbit => &self.rabbits,
        }
    }

    /// All grass cells, row-major.
    pub fn grass(&self) -> &[Grass] {
        &self.grass
    }

    pub fn grass_at(&self, position: Position) -> Option<&Grass> {
        self.grass_index(position).map(|idx| &self.grass[idx])
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn population(&self) -> usize {
        self.foxes.len() + self.rabbits.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.foxes.is_empty() && self.rabbits.is_empty()
    }

    fn herd_mut(&mut self, species: Species) -> &mut Vec<Animal> {
        match species {
            Species::Fox => &mut self.foxes,
            Species::Rabbit => &mut self.rabbits,
        }
    }

    fn occupancy(&self) -> Occupancy<'_> {
        Occupancy::new(
            self.width,
            self.height,
            &self.foxes,
            &self.rabbits,
            &self.nursery,
        )
    }

    // Split borrow so movement code can read the grid while drawing random numbers.
    fn occupancy_and_rng(&mut self) -> (Occupancy<'_>, &mut ChaCha8Rng) {
        (
            Occupancy::new(
                self.width,
                self.height,
                &self.foxes,
                &self.rabbits,
                &self.nursery,
            ),
            &mut self.rng,
        )
    }

    fn grass_index(&self, position: Position) -> Option<usize> {
        if !position.in_bounds(self.width, self.height) {
            return None;
        }
        Some(position.y as usize * self.width as usize + position.x as usize)
    }

    fn free_cells(&self) -> Vec<Position> {
        let occupancy = self.occupancy();
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
            .filter(|&cell| !occupancy.is_occupied(cell))
            .collect()
    }

    fn random_empty_position(&mut self) -> Result<Position, WorldError> {
        let attempts = self.grass.len() * SEED_ATTEMPTS_PER_CELL;
        for _ in 0..attempts {
            let cell = Position::new(
                self.rng.random_range(0..self.width),
                self.rng.random_range(0..self.height),
            );
            if !self.occupancy().is_occupied(cell) {
                return Ok(cell);
            }
        }

        let free = self.free_cells();
        log::warn!(
            "Random placement gave up after {} draws, picking among {} free cells",
            attempts,
            free.len()
        );
        if free.is_empty() {
            return Err(WorldError::Overcrowded {
                requested: 1,
                free: 0,
            });
        }
        let pick = self.rng.random_range(0..free.len());
        Ok(free[pick])
    }

    fn release_newborns(&mut self) {
        for newborn in self.nursery.drain(..) {
            match newborn.species {
                Species::Fox => self.foxes.push(newborn),
                Species::Rabbit => self.rabbits.push(newborn),
            }
        }
    }

    fn remove_dead(&mut self) {
        for species in [Species::Fox, Species::Rabbit] {
            let herd = self.herd_mut(species);
            let before = herd.len();
            herd.retain(|animal| !animal.is_dead());
            let starved = before - herd.len();
            if starved > 0 {
                self.stats.record_deaths(species, starved);
            }
        }
    }
}
