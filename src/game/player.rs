//! Player control
//!
//! Turns held movement keys into grid steps on a repeat cooldown, with a
//! tie-break for diagonals: whichever axis was pressed most recently wins.
//! The player is the only mover with push rights.

use crate::game::particles::Particle;
use crate::input::Input;
use crate::render::Renderer;
use crate::world::{Actor, Entity, MoveOutcome, World, TILE_SIZE};

/// Seconds between grid steps while a direction is held.
const MOVE_COOLDOWN: f32 = 0.2;

/// Damage the player starts with, before any red-light bonuses.
pub const BASE_DAMAGE: i32 = 10;

pub fn starting_actor() -> Actor {
    Actor {
        is_enemy: false,
        health: 100,
        max_health: 100,
        damage: BASE_DAMAGE,
        shield: 0,
        texture_index: 0,
    }
}

#[derive(Default)]
pub struct PlayerController {
    last_pressed_horizontal: bool,
    move_timer: f32,
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            last_pressed_horizontal: false,
            move_timer: 0.0,
        }
    }

    pub fn update(
        &mut self,
        input: &Input,
        world: &mut World,
        particles: &mut Vec<Particle>,
        player: Entity,
        delta_time: f32,
    ) -> MoveOutcome {
        let step = self.resolve(
            input.horizontal_axis(),
            input.vertical_axis(),
            input.horizontal_pressed(),
            input.vertical_pressed(),
            delta_time,
        );
        match step {
            Some((delta_x, delta_y)) => world.move_entity(delta_x, delta_y, player, particles, true),
            None => MoveOutcome::Idle,
        }
    }

    /// Applies the cooldown and the diagonal tie-break to this tick's raw
    /// input, returning the step to take, if any.
    fn resolve(
        &mut self,
        mut delta_x: i32,
        mut delta_y: i32,
        horizontal_pressed: bool,
        vertical_pressed: bool,
        delta_time: f32,
    ) -> Option<(i32, i32)> {
        if horizontal_pressed {
            self.last_pressed_horizontal = true;
        }
        if vertical_pressed {
            self.last_pressed_horizontal = false;
        }

        self.move_timer -= delta_time;
        if delta_x == 0 && delta_y == 0 {
            // Releasing everything re-arms the next press instantly.
            self.move_timer = 0.0;
            return None;
        }
        if self.move_timer > 0.0 {
            return None;
        }
        self.move_timer = MOVE_COOLDOWN;

        if delta_x != 0 && delta_y != 0 {
            if self.last_pressed_horizontal {
                delta_y = 0;
            } else {
                delta_x = 0;
            }
        }
        Some((delta_x, delta_y))
    }
}

/// Two-pixel bar under the player: dark backing with a green fill
/// proportional to remaining health.
pub fn draw_healthbar(renderer: &mut Renderer, actor: &Actor, x: i32, y: i32) {
    renderer.draw_rect(x, y, TILE_SIZE, 2, 88, 24, 32);
    let filled = TILE_SIZE * actor.health.max(0) / actor.max_health.max(1);
    renderer.draw_rect(x, y, filled, 2, 94, 189, 62);
}
