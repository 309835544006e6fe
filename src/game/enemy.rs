//! Enemy archetypes and their turn driver
//!
//! Enemies have no pathfinding: each one drifts a single cell in a random
//! cardinal direction per tick and lets the movement resolver sort out the
//! consequences. Bumping the player attacks, bumping a fellow enemy or a
//! wall wastes the turn (enemies never push).

use rand::Rng;

use crate::game::particles::Particle;
use crate::world::{Actor, World};

pub const GOBLIN: Actor = Actor {
    is_enemy: true,
    health: 20,
    max_health: 20,
    damage: 10,
    shield: 0,
    texture_index: 1,
};

pub const GHOST: Actor = Actor {
    is_enemy: true,
    health: 20,
    max_health: 20,
    damage: 10,
    shield: 5,
    texture_index: 2,
};

pub const SNAKE: Actor = Actor {
    is_enemy: true,
    health: 30,
    max_health: 30,
    damage: 20,
    shield: 0,
    texture_index: 3,
};

pub const ARCHETYPES: [Actor; 3] = [GOBLIN, GHOST, SNAKE];

const CARDINALS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Gives every living enemy one random step. The set of enemies is
/// snapshotted up front so kills during the pass cannot skew iteration.
pub fn take_turns(world: &mut World, particles: &mut Vec<Particle>, rng: &mut impl Rng) {
    for enemy in world.enemies() {
        let (delta_x, delta_y) = CARDINALS[rng.gen_range(0..CARDINALS.len())];
        world.move_entity(delta_x, delta_y, enemy, particles, false);
    }
}
