use super::super::World;
use crate::animal::find_nearest;

impl World {
    /// Flee the nearest fox in sight; wander when there is none, when the
    /// rabbit hesitates, or when every escape step is blocked.
    pub(in crate::world) fn move_rabbit(&mut self, idx: usize) -> bool {
        let config = self.config.rabbit;
        let hesitation = self.config.world.hesitation_chance;
        let rabbit = self.rabbits[idx];
        let threat = find_nearest(rabbit.position, &self.foxes, config.sensing_range)
            .map(|fox| self.foxes[fox].position);

        let destination = {
            let (occupancy, rng) = self.occupancy_and_rng();
            let escape = match threat {
                Some(threat) => rabbit.step_away(threat, &occupancy, hesitation, rng),
                None => None,
            };
            escape.or_else(|| rabbit.random_step(&occupancy, rng))
        };

        let rabbit = &mut self.rabbits[idx];
        if let Some(cell) = destination {
            rabbit.position = cell;
        }
        rabbit.energy = rabbit.energy.saturating_sub(config.energy_loss_per_move);
        destination.is_some()
    }

    /// Graze one unit from the cell the rabbit stands on.
    pub(in crate::world) fn feed_rabbit(&mut self, idx: usize) -> bool {
        let config = self.config.rabbit;
        let rabbit = &mut self.rabbits[idx];
        rabbit.turns_since_eaten += 1;
        if !rabbit.can_eat(config.eating_cooldown) {
            return false;
        }

        let Some(cell) = self.grass_index(self.rabbits[idx].position) else {
            return false;
        };
        if self.grass[cell].is_empty() {
            return false;
        }

        self.grass[cell].consume(1);
        let rabbit = &mut self.rabbits[idx];
        rabbit.energy = rabbit.energy.saturating_add(config.energy_gain);
        rabbit.turns_since_eaten = 0;
        self.stats.grass_eaten += 1;
        true
    }
}
