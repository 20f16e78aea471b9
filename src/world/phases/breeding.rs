use super::super::World;
use super::BIRTH_PLACEMENT_ATTEMPTS;
use crate::animal::{Animal, Species, find_empty_adjacent, has_nearby};

impl World {
    /// Pay for offspring when off cooldown, fed enough and a mate is close.
    /// The cost is paid even if no free cell turns up for the newborn.
    pub(in crate::world) fn breed(&mut self, species: Species, idx: usize) -> bool {
        let config = *self.config.species(species);
        let parent = &mut self.herd_mut(species)[idx];
        parent.turns_since_reproduction += 1;
        if !parent.can_reproduce(config.reproduction_cooldown)
            || parent.energy < config.reproduction_cost
        {
            return false;
        }

        let position = parent.position;
        if !has_nearby(position, self.herd(species), config.reproduction_range) {
            return false;
        }

        let parent = &mut self.herd_mut(species)[idx];
        parent.energy = parent.energy.saturating_sub(config.reproduction_cost);
        parent.turns_since_reproduction = 0;

        let birthplace = {
            let (occupancy, rng) = self.occupancy_and_rng();
            find_empty_adjacent(position, &occupancy, BIRTH_PLACEMENT_ATTEMPTS, rng)
        };
        let Some(cell) = birthplace else {
            return false;
        };

        self.nursery.push(Animal::new(species, cell, &config));
        self.stats.record_birth(species);
        true
    }
}
