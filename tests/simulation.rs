mod common;

use common::{snapshot, WorldBuilder};
use hinterland_lib::app::App;
use hinterland_lib::model::config::AppConfig;
use hinterland_lib::model::data::{BehaviourKind, CreatureTemplate, Health, Position, Side};
use hinterland_lib::model::events::WorldEvent;
use hinterland_lib::model::scheduler::Simulation;
use hinterland_lib::model::terrain::Cell;
use hinterland_lib::model::world::World;

fn only(mut template: CreatureTemplate, behaviours: &[BehaviourKind]) -> CreatureTemplate {
    template.behaviours = behaviours.to_vec();
    template
}

#[test]
fn test_creature_acts_again_after_paying_its_cost() {
    // Grazing costs 1.0; at 0.25 s per tick the grazer acts on ticks 1, 5, 9.
    let mut sim = WorldBuilder::new(10, 10)
        .with_creature(only(CreatureTemplate::grazer("deer"), &[BehaviourKind::Graze]), 5, 5)
        .build_simulation();

    let actions: Vec<usize> = (0..12).map(|_| sim.tick(0.25).actions).collect();
    assert_eq!(actions, vec![1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]);
    assert_eq!(sim.metrics.tick_count(), 12);
}

#[test]
fn test_seeded_worlds_evolve_identically() {
    let mut config = AppConfig::default();
    config.world.width = 48;
    config.world.height = 32;
    config.world.seed = Some(2024);

    let mut a = Simulation::new(World::new(config.clone()).unwrap());
    let mut b = Simulation::new(World::new(config).unwrap());
    assert_eq!(snapshot(&a.world), snapshot(&b.world));

    for _ in 0..150 {
        a.tick(0.04);
        b.tick(0.04);
    }
    assert_eq!(snapshot(&a.world), snapshot(&b.world));
    assert_eq!(a.world.drain_events(), b.world.drain_events());
}

#[test]
fn test_player_fells_tree_then_walks_through() {
    let mut sim = WorldBuilder::new(8, 8).build_simulation();
    let player = sim
        .world
        .spawn_player(&CreatureTemplate::grazer("you"), Position::new(2, 2))
        .unwrap();
    let tree = sim.world.spawn_tree(3, 2).unwrap();
    assert!(sim.world.terrain.is_obstacle(3, 2));

    let harvest = sim.world.config.actions.harvest_cost;
    for _ in 0..5 {
        assert_eq!(sim.bump(player, Side::E), harvest);
    }
    assert!(!sim.world.is_alive(tree));
    assert!(!sim.world.terrain.is_obstructed(3, 2));
    assert!(sim
        .world
        .drain_events()
        .iter()
        .any(|e| matches!(e, WorldEvent::Felled { by, .. } if *by == player)));

    assert!(sim.bump(player, Side::E) > 0.0);
    assert_eq!(sim.world.position(player), Some(Position::new(3, 2)));
    assert_eq!(sim.metrics.counter("player_actions"), 6);
}

#[test]
fn test_player_crushes_boulder_and_throws_a_stone() {
    let mut sim = WorldBuilder::new(10, 6)
        .with_creature(only(CreatureTemplate::grazer("rabbit"), &[]), 7, 2)
        .build_simulation();
    let player = sim
        .world
        .spawn_player(&CreatureTemplate::grazer("you"), Position::new(2, 2))
        .unwrap();
    let rabbit = sim.world.creatures.get(7, 2).unwrap();
    sim.world.spawn_boulder(3, 2).unwrap();

    let actions = sim.world.config.actions.clone();
    assert_eq!(sim.bump(player, Side::E), actions.crush_cost);
    assert_eq!(sim.world.items.all(3, 2).len(), actions.stones_per_boulder as usize);
    assert!(sim.bump(player, Side::E) > 0.0);
    assert_eq!(sim.pick_up(player), actions.pick_up_cost);
    assert_eq!(sim.throw_at(player, Position::new(7, 2)), actions.throw_cost);

    let health = sim.world.component::<Health>(rabbit).unwrap();
    assert_eq!(health.value, health.max - actions.stone_damage);
    assert_eq!(sim.world.items.all(7, 2).len(), 1);
    assert_eq!(sim.metrics.counter("player_actions"), 4);
    let kinds: Vec<&str> = sim.world.drain_events().iter().map(WorldEvent::kind).collect();
    assert_eq!(kinds, vec!["crushed", "thrown", "damage"]);
}

#[test]
fn test_hunter_kills_and_leaves_corpse() {
    let mut sim = WorldBuilder::new(12, 12)
        .with_creature(only(CreatureTemplate::hunter("wolf"), &[BehaviourKind::Chase]), 5, 5)
        .with_creature(only(CreatureTemplate::grazer("rabbit"), &[]), 6, 5)
        .build_simulation();

    for _ in 0..5 {
        sim.tick(1.0);
    }
    assert!(sim.world.creatures.get(6, 5).is_none());
    assert_eq!(sim.world.items.all(6, 5).len(), 1);
    let events = sim.world.drain_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, WorldEvent::Death { name, .. } if name == "rabbit")));
}

#[test]
fn test_prey_runs_from_predator() {
    let mut sim = WorldBuilder::new(12, 12)
        .with_creature(only(CreatureTemplate::hunter("wolf"), &[BehaviourKind::Scavenge]), 3, 5)
        .with_creature(only(CreatureTemplate::grazer("rabbit"), &[BehaviourKind::Flee]), 5, 5)
        .build_simulation();

    let report = sim.tick(0.25);
    assert_eq!(report.actions, 1);
    let rabbit = sim.world.creatures.get(6, 5);
    assert!(rabbit.is_some());
    assert!(sim.world.creatures.is_empty(5, 5));
}

#[test]
fn test_fish_stay_in_water() {
    let fish = CreatureTemplate {
        underwater: true,
        ..only(CreatureTemplate::grazer("fish"), &[BehaviourKind::Underwater])
    };
    let mut sim = WorldBuilder::new(6, 6)
        .filled_with(Cell::Sand)
        .with_map(&["", " ~~", " ~~"])
        .with_creature(fish, 1, 1)
        .build_simulation();

    for _ in 0..40 {
        sim.tick(1.0);
        let pos = sim.world.ecs.query::<&Position>().iter().map(|(_, p)| *p).next();
        let pos = pos.unwrap();
        assert_eq!(sim.world.terrain.get(pos.x, pos.y), Cell::Water);
    }
}

#[test]
fn test_headless_app_runs_to_limit() {
    let mut config = AppConfig::default();
    config.world.width = 48;
    config.world.height = 32;
    config.world.seed = Some(8);
    let mut app = App::new(config).unwrap();
    app.tick_limit = Some(60);
    let summary = app.run_fast();
    assert_eq!(summary.ticks, 60);
    assert!(summary.decisions > 0);
}
