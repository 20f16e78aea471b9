use super::super::World;
use crate::animal::find_nearest;

impl World {
    /// Chase the nearest rabbit in sight, otherwise wander. Moving costs energy
    /// even when the fox is boxed in.
    pub(in crate::world) fn move_fox(&mut self, idx: usize) -> bool {
        let config = self.config.fox;
        let fox = self.foxes[idx];
        let target = find_nearest(fox.position, &self.rabbits, config.sensing_range)
            .map(|prey| self.rabbits[prey].position);

        let destination = {
            let (occupancy, rng) = self.occupancy_and_rng();
            target
                .and_then(|target| fox.step_toward(target, &occupancy))
                .or_else(|| fox.random_step(&occupancy, rng))
        };

        let fox = &mut self.foxes[idx];
        if let Some(cell) = destination {
            fox.position = cell;
        }
        fox.energy = fox.energy.saturating_sub(config.energy_loss_per_move);
        destination.is_some()
    }

    /// Catch the nearest rabbit within reach. The rabbit is taken out of the
    /// herd straight away.
    pub(in crate::world) fn feed_fox(&mut self, idx: usize) -> bool {
        let config = self.config.fox;
        let fox = &mut self.foxes[idx];
        fox.turns_since_eaten += 1;
        if !fox.can_eat(config.eating_cooldown) {
            return false;
        }

        let position = fox.position;
        let Some(prey) = find_nearest(position, &self.rabbits, config.eating_range) else {
            return false;
        };

        let fox = &mut self.foxes[idx];
        fox.energy = fox.energy.saturating_add(config.energy_gain);
        fox.turns_since_eaten = 0;
        self.rabbits.remove(prey);
        self.stats.rabbits_eaten += 1;
        true
    }
}
