use super::super::World;

impl World {
    pub(in crate::world) fn grow_grass(&mut self) {
        let regrowth_ticks = self.config.grass.regrowth_ticks;
        for cell in &mut self.grass {
            cell.grow(regrowth_ticks);
        }
    }
}
