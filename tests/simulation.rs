//! End-to-end checks of the tick engine through the public API.

use foxes_rabbits::{Config, Position, Species, World, WorldError};
use std::collections::HashSet;

fn small_config(width: i32, height: i32) -> Config {
    let mut config = Config::default();
    config.world.width = width;
    config.world.height = height;
    config.world.initial_foxes = 0;
    config.world.initial_rabbits = 0;
    config
}

fn assert_no_shared_cells(world: &World) {
    let mut seen = HashSet::new();
    for animal in world.foxes().iter().chain(world.rabbits()) {
        assert!(
            animal.position.in_bounds(world.width(), world.height()),
            "{:?} left the grid",
            animal.position
        );
        assert!(
            seen.insert(animal.position),
            "two animals share {:?} at tick {}",
            animal.position,
            world.stats.tick
        );
    }
}

#[test]
fn default_world_keeps_invariants() {
    let config = Config::default();
    let mut world = World::with_seed(config.clone(), 2024).unwrap();
    world
        .initialize(config.world.initial_foxes, config.world.initial_rabbits)
        .unwrap();
    assert_eq!(world.foxes().len(), 10);
    assert_eq!(world.rabbits().len(), 40);
    assert_no_shared_cells(&world);

    let ceiling = config.grass.max_amount + config.grass.growth_rate - 1;
    for _ in 0..300 {
        world.update();
        assert_no_shared_cells(&world);
        assert!(world.foxes().iter().chain(world.rabbits()).all(|a| a.energy > 0));
        assert!(world.grass().iter().all(|cell| cell.amount <= ceiling));
    }
    assert_eq!(world.stats.tick, 300);
}

#[test]
fn crowded_breeding_never_stacks_newborns() {
    let mut config = small_config(12, 12);
    config.rabbit.initial_energy = 60;
    config.rabbit.reproduction_cost = 1;
    config.rabbit.reproduction_cooldown = 0;
    config.rabbit.reproduction_range = 2;
    config.fox.initial_energy = 400;
    config.fox.reproduction_cost = 1;
    config.fox.reproduction_cooldown = 0;

    let mut world = World::with_seed(config, 9).unwrap();
    world.initialize(10, 40).unwrap();

    for _ in 0..40 {
        world.update();
        assert_no_shared_cells(&world);
        assert!(world.population() <= 144);
    }
    assert!(world.stats.rabbit_births > 0);
}

#[test]
fn energy_drains_one_move_at_a_time() {
    let mut config = small_config(15, 15);
    config.rabbit.eating_cooldown = 1_000;
    let mut world = World::with_seed(config, 5).unwrap();
    world.spawn(Species::Rabbit, Position::new(7, 7)).unwrap();

    for tick in 1..=14 {
        world.update();
        assert_eq!(world.rabbits()[0].energy, 15 - tick);
    }
    world.update();
    assert!(world.rabbits().is_empty());
    assert_eq!(world.stats.rabbit_deaths, 1);
}

#[test]
fn overcrowded_seeding_is_reported() {
    let mut world = World::with_seed(small_config(4, 4), 1).unwrap();
    world.spawn(Species::Fox, Position::new(0, 0)).unwrap();
    match world.initialize(10, 6) {
        Err(WorldError::Overcrowded { requested, free }) => {
            assert_eq!(requested, 16);
            assert_eq!(free, 15);
        }
        other => panic!("expected overcrowding, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn injection_only_on_free_cells() {
    let mut world = World::with_seed(small_config(6, 6), 3).unwrap();
    world.spawn(Species::Rabbit, Position::new(2, 2)).unwrap();
    assert!(world.is_position_occupied(2, 2));
    assert!(world.spawn(Species::Fox, Position::new(2, 2)).is_err());
    assert!(world.spawn(Species::Fox, Position::new(6, 2)).is_err());
    assert_eq!(world.population(), 1);
}

#[test]
fn config_file_drives_world() {
    let path = std::env::temp_dir().join("foxes_rabbits_integration.yaml");
    std::fs::write(
        &path,
        "world:\n  width: 25\n  height: 15\n  initial_foxes: 3\n  initial_rabbits: 12\n  hesitation_chance: 0.5\n",
    )
    .unwrap();
    let config = Config::from_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let mut world = World::with_seed(config.clone(), 77).unwrap();
    world
        .initialize(config.world.initial_foxes, config.world.initial_rabbits)
        .unwrap();
    assert_eq!((world.width(), world.height()), (25, 15));
    assert_eq!(world.grass().len(), 25 * 15);
    assert_eq!(world.population(), 15);
    assert_eq!(world.stats.population_history.len(), 1);

    world.run(10);
    assert_eq!(world.stats.population_history.len(), 11);
}
