use serde::Serialize;
use std::collections::VecDeque;

use crate::animal::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopulationSample {
    pub foxes: usize,
    pub rabbits: usize,
}

/// Running counters kept by the world, plus a bounded population history for charting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationStats {
    pub tick: u64,
    pub fox_births: usize,
    pub rabbit_births: usize,
    /// Starvation only; eaten rabbits are counted in `rabbits_eaten`.
    pub fox_deaths: usize,
    pub rabbit_deaths: usize,
    pub rabbits_eaten: usize,
    pub grass_eaten: u64,
    pub max_population: usize,
    pub population_history: VecDeque<PopulationSample>,
    history_limit: usize,
}

impl SimulationStats {
    pub fn new(history_limit: usize) -> Self {
        SimulationStats {
            population_history: VecDeque::with_capacity(history_limit),
            history_limit,
            ..Default::default()
        }
    }

    pub fn record_birth(&mut self, species: Species) {
        match species {
            Species::Fox => self.fox_births += 1,
            Species::Rabbit => self.rabbit_births += 1,
        }
    }

    pub fn record_deaths(&mut self, species: Species, count: usize) {
        match species {
            Species::Fox => self.fox_deaths += count,
            Species::Rabbit => self.rabbit_deaths += count,
        }
    }

    pub fn record_population(&mut self, foxes: usize, rabbits: usize) {
        self.max_population = self.max_population.max(foxes + rabbits);
        self.population_history
            .push_back(PopulationSample { foxes, rabbits });
        while self.population_history.len() > self.history_limit {
            self.population_history.pop_front();
        }
    }

    pub fn latest(&self) -> PopulationSample {
        self.population_history
            .back()
            .copied()
            .unwrap_or(PopulationSample { foxes: 0, rabbits: 0 })
    }

    pub fn summary(&self) -> String {
        let now = self.latest();
        format!(
            "tick {:>6} | foxes {:>4} rabbits {:>5} | births F:{} R:{} | starved F:{} R:{} | eaten {} | grass {}",
            self.tick,
            now.foxes,
            now.rabbits,
            self.fox_births,
            self.rabbit_births,
            self.fox_deaths,
            self.rabbit_deaths,
            self.rabbits_eaten,
            self.grass_eaten,
        )
    }
}
