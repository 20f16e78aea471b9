use serde::{Deserialize, Serialize};

use crate::config::GrassConfig;

/// Grazeable ground cover on a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grass {
    pub amount: u32,
    pub growth_rate: u32,
    pub max_amount: u32,
    pub regrowth_timer: u32,
}

impl Grass {
    pub fn new(config: &GrassConfig) -> Self {
        Grass {
            amount: config.initial_amount,
            growth_rate: config.growth_rate,
            max_amount: config.max_amount,
            regrowth_timer: 0,
        }
    }

    /// Advance the regrowth timer of a depleted cell. After `regrowth_ticks`
    /// ticks a full `growth_rate` is added, which may overshoot `max_amount`.
    pub fn grow(&mut self, regrowth_ticks: u32) {
        if self.amount < self.max_amount {
            self.regrowth_timer += 1;

            if self.regrowth_timer >= regrowth_ticks {
                self.amount += self.growth_rate;
                self.regrowth_timer = 0;
            }
        }
    }

    pub fn consume(&mut self, units: u32) {
        self.amount = self.amount.saturating_sub(units);
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }

    /// Fill level in `[0, 1]` for shading.
    pub fn fullness(&self) -> f32 {
        if self.max_amount == 0 {
            return 0.0;
        }
        (self.amount.min(self.max_amount) as f32) / self.max_amount as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(amount: u32) -> Grass {
        Grass {
            amount,
            growth_rate: 3,
            max_amount: 2,
            regrowth_timer: 0,
        }
    }

    #[test]
    fn full_cell_does_not_tick() {
        let mut grass = cell(2);
        grass.grow(1);
        assert_eq!(grass.amount, 2);
        assert_eq!(grass.regrowth_timer, 0);
    }

    #[test]
    fn regrowth_waits_for_timer_then_overshoots() {
        let mut grass = cell(0);
        for _ in 0..4 {
            grass.grow(5);
        }
        assert_eq!(grass.amount, 0);
        assert_eq!(grass.regrowth_timer, 4);

        grass.grow(5);
        assert_eq!(grass.amount, 3);
        assert_eq!(grass.regrowth_timer, 0);

        // above max now, timer stays parked
        grass.grow(5);
        assert_eq!(grass.amount, 3);
        assert_eq!(grass.regrowth_timer, 0);
    }

    #[test]
    fn consume_floors_at_zero() {
        let mut grass = cell(2);
        grass.consume(1);
        assert_eq!(grass.amount, 1);
        grass.consume(5);
        assert_eq!(grass.amount, 0);
        assert!(grass.is_empty());
    }

    #[test]
    fn fullness_clamps_overshoot() {
        assert_eq!(cell(1).fullness(), 0.5);
        assert_eq!(cell(3).fullness(), 1.0);
    }
}
