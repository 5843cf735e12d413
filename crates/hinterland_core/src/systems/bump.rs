use super::interaction::{Attack, Crush, Harvest, Interaction, MoveHandler, Movement};
use crate::config::ActionConfig;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Position, Side, Sight};

/// Turns "act toward that cell" into a move, an interaction or nothing.
///
/// Interactions are tried in registration order; the first that applies
/// to the occupant performs.
pub struct BumpResolver {
    movement: Box<dyn MoveHandler>,
    interactions: Vec<Box<dyn Interaction>>,
}

impl BumpResolver {
    pub fn new(movement: impl MoveHandler + 'static) -> Self {
        Self {
            movement: Box::new(movement),
            interactions: Vec::new(),
        }
    }

    pub fn register(&mut self, interaction: impl Interaction + 'static) -> &mut Self {
        self.interactions.push(Box::new(interaction));
        self
    }

    /// Movement, then harvesting, crushing and attacking.
    #[must_use]
    pub fn standard(actions: &ActionConfig) -> Self {
        let mut resolver = Self::new(Movement::new(actions));
        resolver
            .register(Harvest::new(actions))
            .register(Crush::new(actions))
            .register(Attack::new(actions));
        resolver
    }

    /// Acts on the neighbour of `actor` on `side`. Returns the action cost.
    pub fn bump(&self, world: &mut World, actor: Entity, side: Side) -> f32 {
        if side == Side::Here {
            return 0.0;
        }
        let Some(pos) = world.position(actor) else {
            return 0.0;
        };
        let dest = pos.offset(side.dx(), side.dy());
        if !world.terrain.contains(dest.x, dest.y) {
            return 0.0;
        }

        let Some(target) = world.creatures.get(dest.x, dest.y) else {
            return self.movement.step(world, actor, side);
        };
        for interaction in &self.interactions {
            if interaction.applies(world, actor, target) {
                let cost = interaction.perform(world, actor, target);
                tracing::debug!(
                    interaction = interaction.name(),
                    actor = ?actor,
                    target = ?target,
                    cost,
                    "Bump"
                );
                return cost;
            }
        }
        0.0
    }

    /// Acts one step along the way to `target`.
    ///
    /// Adjacent targets are bumped directly; farther ones are reached through
    /// a path bounded by the actor's sight.
    pub fn bump_toward(&self, world: &mut World, actor: Entity, target: Position) -> f32 {
        let Some(pos) = world.position(actor) else {
            return 0.0;
        };
        match pos.chebyshev(target) {
            0 => 0.0,
            1 => self.bump(world, actor, Side::between(pos.x, pos.y, target.x, target.y)),
            _ => {
                let sight = world.component::<Sight>(actor).map_or(0, |s| s.0);
                match world.find_path(pos, target, sight) {
                    Some(path) if path.len() >= 2 => {
                        let next = path[1];
                        self.bump(world, actor, Side::between(pos.x, pos.y, next.x, next.y))
                    }
                    _ => 0.0,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::terrain::{Cell, TerrainGrid};
    use hinterland_data::{CreatureTemplate, Health};

    fn world() -> World {
        let mut config = AppConfig::default();
        config.ai.initial_delay_jitter = 0.0;
        World::with_terrain(config, TerrainGrid::new(12, 12).unwrap(), 1)
    }

    #[test]
    fn test_bump_into_empty_moves() {
        let mut world = world();
        let bump = BumpResolver::standard(&world.config.actions);
        let rabbit = world
            .spawn_creature(&CreatureTemplate::grazer("rabbit"), Position::new(5, 5))
            .unwrap();
        let cost = bump.bump(&mut world, rabbit, Side::E);
        assert!(cost > 0.0);
        assert_eq!(world.position(rabbit), Some(Position::new(6, 5)));
        assert!(world.creatures.is_empty(5, 5));
        assert_eq!(world.creatures.get(6, 5), Some(rabbit));
    }

    #[test]
    fn test_bump_here_and_outside_cost_nothing() {
        let mut world = world();
        let bump = BumpResolver::standard(&world.config.actions);
        let rabbit = world
            .spawn_creature(&CreatureTemplate::grazer("rabbit"), Position::new(0, 0))
            .unwrap();
        assert_eq!(bump.bump(&mut world, rabbit, Side::Here), 0.0);
        assert_eq!(bump.bump(&mut world, rabbit, Side::W), 0.0);
        assert_eq!(world.position(rabbit), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_bump_into_wall_costs_nothing() {
        let mut world = world();
        world.terrain.set(6, 5, Cell::Wall);
        let bump = BumpResolver::standard(&world.config.actions);
        let rabbit = world
            .spawn_creature(&CreatureTemplate::grazer("rabbit"), Position::new(5, 5))
            .unwrap();
        assert_eq!(bump.bump(&mut world, rabbit, Side::E), 0.0);
    }

    #[test]
    fn test_bump_attacks_occupant() {
        let mut world = world();
        let bump = BumpResolver::standard(&world.config.actions);
        let wolf = world
            .spawn_creature(&CreatureTemplate::hunter("wolf"), Position::new(5, 5))
            .unwrap();
        let rabbit = world
            .spawn_creature(&CreatureTemplate::grazer("rabbit"), Position::new(6, 5))
            .unwrap();
        let cost = bump.bump(&mut world, wolf, Side::E);
        assert!(cost > 0.0);
        assert_eq!(world.position(wolf), Some(Position::new(5, 5)));
        let health = world.component::<Health>(rabbit).unwrap();
        assert!(health.value < health.max);
    }

    #[test]
    fn test_bump_toward_follows_path() {
        let mut world = world();
        let bump = BumpResolver::standard(&world.config.actions);
        let rabbit = world
            .spawn_creature(&CreatureTemplate::grazer("rabbit"), Position::new(2, 2))
            .unwrap();
        let cost = bump.bump_toward(&mut world, rabbit, Position::new(6, 2));
        assert!(cost > 0.0);
        assert_eq!(world.position(rabbit), Some(Position::new(3, 2)));
        assert_eq!(bump.bump_toward(&mut world, rabbit, Position::new(3, 2)), 0.0);
    }

    #[test]
    fn test_player_bump_crushes_boulder() {
        let mut world = world();
        let bump = BumpResolver::standard(&world.config.actions);
        let player = world
            .spawn_player(&CreatureTemplate::hunter("you"), Position::new(5, 5))
            .unwrap();
        let wolf = world
            .spawn_creature(&CreatureTemplate::hunter("wolf"), Position::new(7, 6))
            .unwrap();
        world.spawn_boulder(6, 6).unwrap();

        assert_eq!(bump.bump(&mut world, wolf, Side::W), 0.0);
        assert!(world.terrain.is_obstacle(6, 6));

        let cost = bump.bump(&mut world, player, Side::SE);
        assert_eq!(cost, world.config.actions.crush_cost);
        assert!(world.creatures.is_empty(6, 6));
        assert_eq!(world.position(player), Some(Position::new(5, 5)));
        assert!(!world.items.is_empty(6, 6));
    }
}
