//! Game states and tick orchestration
//!
//! One `Game` owns the world, the player, the bonus tally and the particle
//! list, and walks the fixed tick order: player step, exit check, enemy
//! turns, particle aging. Level clears pause the action for a short
//! transition before the next floor is generated; losing the player ends
//! the run until any key is released.

pub mod enemy;
pub mod particles;
pub mod player;

use macroquad::color::WHITE;
use macroquad::prelude::get_time;
use macroquad::text::{draw_text, measure_text};
use macroquad::window::{screen_height, screen_width};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::audio::Sounds;
use crate::config::GameConfig;
use crate::input::Input;
use crate::render::{atlas, Renderer, Texture, VIEW_HEIGHT, VIEW_WIDTH};
use crate::world::{tile::Tile, Actor, Bonuses, Entity, MoveOutcome, World, TILE_SIZE};

use particles::Particle;

pub const VIEW_TILES_WIDTH: i32 = VIEW_WIDTH / TILE_SIZE;
pub const VIEW_TILES_HEIGHT: i32 = VIEW_HEIGHT / TILE_SIZE;

enum GameState {
    Playing,
    /// Short pause after stepping on the exit, fireworks still playing.
    Transition { timer: f32 },
    GameOver,
}

pub struct Game {
    world: World,
    player: Entity,
    controller: player::PlayerController,
    bonuses: Bonuses,
    particles: Vec<Particle>,
    state: GameState,
    level: u32,
    config: GameConfig,
    sounds: Sounds,
    rng: ChaCha8Rng,
    draw_log_timer: f32,
}

impl Game {
    pub fn new(config: GameConfig, sounds: Sounds, rng: ChaCha8Rng) -> Self {
        let mut game = Self {
            world: World::new(VIEW_TILES_WIDTH, VIEW_TILES_HEIGHT),
            player: Entity::NULL,
            controller: player::PlayerController::new(),
            bonuses: Bonuses::default(),
            particles: Vec::new(),
            state: GameState::Playing,
            level: 1,
            config,
            sounds,
            rng,
            draw_log_timer: 0.0,
        };
        game.start_level(player::starting_actor());
        game
    }

    /// Regenerates the floor and repopulates it. The player's stats carry
    /// over between floors through `actor`.
    fn start_level(&mut self, actor: Actor) {
        self.world.generate(&self.config.generator, &mut self.rng);

        // The player lands on a random cell that is flattened to floor,
        // whatever was there before.
        let x = self.rng.gen_range(0..self.world.width());
        let y = self.rng.gen_range(0..self.world.height());
        self.world.set_tile(x, y, Tile::StoneFloor);
        self.player = self.world.spawn(actor);
        self.world.set_entity(x, y, Some(self.player));

        for _ in 0..self.config.enemy_count {
            for _ in 0..self.config.enemy_spawn_retries {
                let x = self.rng.gen_range(0..self.world.width());
                let y = self.rng.gen_range(0..self.world.height());
                if self.world.is_occupied(x, y) {
                    continue;
                }
                let archetype = enemy::ARCHETYPES[self.rng.gen_range(0..enemy::ARCHETYPES.len())];
                let spawned = self.world.spawn(archetype);
                self.world.set_entity(x, y, Some(spawned));
                break;
            }
        }
    }

    pub fn update(&mut self, input: &Input, delta_time: f32) {
        match self.state {
            GameState::Playing => self.update_playing(input, delta_time),
            GameState::Transition { .. } => self.update_transition(delta_time),
            GameState::GameOver => self.update_game_over(input),
        }
        self.particles.retain_mut(|particle| !particle.update(delta_time));
    }

    fn update_playing(&mut self, input: &Input, delta_time: f32) {
        let outcome = self.controller.update(
            input,
            &mut self.world,
            &mut self.particles,
            self.player,
            delta_time,
        );
        match outcome {
            MoveOutcome::Moved | MoveOutcome::Pushed => self.sounds.step(),
            MoveOutcome::Attacked => self.sounds.hit(),
            MoveOutcome::Idle => {}
        }

        let Some(position) = self.world.entity_position(self.player) else {
            self.game_over();
            return;
        };
        if self.world.get_tile(position.x, position.y).is_exit() {
            self.clear_level();
            return;
        }

        enemy::take_turns(&mut self.world, &mut self.particles, &mut self.rng);
        if self.world.entity_position(self.player).is_none() {
            self.game_over();
        }
    }

    /// Exit reached: tally the lit lights into the running bonuses, apply
    /// them to the player and pause for the transition.
    fn clear_level(&mut self) {
        self.world.calculate_bonuses(&mut self.bonuses, &mut self.particles);
        if let Some(actor) = self.world.actor_mut(self.player) {
            actor.heal(self.bonuses.health * self.config.health_per_bonus);
            actor.damage = player::BASE_DAMAGE + self.bonuses.damage * self.config.damage_per_bonus;
            actor.shield = self.bonuses.shield * self.config.shield_per_bonus;
        }
        self.sounds.success();
        self.state = GameState::Transition { timer: 0.0 };
    }

    fn update_transition(&mut self, delta_time: f32) {
        let GameState::Transition { timer } = &mut self.state else {
            return;
        };
        *timer += delta_time;
        if *timer < self.config.transition_time {
            return;
        }
        self.level += 1;
        println!("descending to level {}", self.level);
        let actor = self
            .world
            .actor(self.player)
            .copied()
            .unwrap_or_else(player::starting_actor);
        self.state = GameState::Playing;
        self.start_level(actor);
    }

    fn game_over(&mut self) {
        println!("game over on level {}", self.level);
        self.state = GameState::GameOver;
    }

    fn update_game_over(&mut self, input: &Input) {
        if input.any_released() {
            self.restart();
        }
    }

    /// Fresh run: bonuses, level counter and player stats all reset.
    fn restart(&mut self) {
        self.bonuses = Bonuses::default();
        self.level = 1;
        self.state = GameState::Playing;
        self.start_level(player::starting_actor());
    }

    /// Paints the whole frame into the offscreen buffer: world, particles,
    /// player health bar, bonus icon rows.
    pub fn draw(&mut self, renderer: &mut Renderer, texture: &Texture, delta_time: f32) {
        let start = get_time();

        self.world.draw(renderer, texture);
        for particle in &self.particles {
            particle.draw(renderer, texture);
        }

        if let (Some(position), Some(actor)) =
            (self.world.entity_position(self.player), self.world.actor(self.player))
        {
            player::draw_healthbar(
                renderer,
                actor,
                position.x * TILE_SIZE,
                (position.y + 1) * TILE_SIZE + 1,
            );
        }

        for i in 0..self.bonuses.damage {
            renderer.draw_sprite(4 + i * 8, 4, 8, 8, texture, 0, atlas::ICON_ROW_Y);
        }
        for i in 0..self.bonuses.shield {
            renderer.draw_sprite(4 + i * 8, 12, 8, 8, texture, 8, atlas::ICON_ROW_Y);
        }

        // Report the software draw cost about once a second.
        self.draw_log_timer += delta_time;
        if self.draw_log_timer > 1.0 {
            self.draw_log_timer = 0.0;
            println!("frame drawn in {:.2} ms", (get_time() - start) * 1000.0);
        }
    }

    /// Text drawn on top of the scaled frame, in screen space.
    pub fn draw_overlay(&self) {
        match self.state {
            GameState::Playing => {}
            GameState::Transition { .. } => {
                draw_centered_text(
                    "floor cleared",
                    screen_width() / 2.0,
                    screen_height() / 2.0 - 24.0,
                    48.0,
                );
            }
            GameState::GameOver => {
                let center_x = screen_width() / 2.0;
                let center_y = screen_height() / 2.0;
                draw_centered_text("the dungeon claims you", center_x, center_y - 24.0, 48.0);
                draw_centered_text("press any key to delve again", center_x, center_y + 24.0, 24.0);
            }
        }
    }
}

fn draw_centered_text(text: &str, x: f32, y: f32, font_size: f32) {
    let size = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, x - size.width / 2.0, y, font_size, WHITE);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn test_game(seed: u64) -> Game {
        Game::new(
            GameConfig::default(),
            Sounds::silent(),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_new_game_places_the_player() {
        for seed in 0..6 {
            let game = test_game(seed);
            let position = game.world.entity_position(game.player).expect("player placed");
            assert!(game.world.get_tile(position.x, position.y).walkable());
            let actor = game.world.actor(game.player).expect("player stats");
            assert!(!actor.is_enemy);
            assert_eq!(actor.health, 100);
        }
    }

    #[test]
    fn test_new_game_spawns_enemies_on_free_cells() {
        let mut spawned_total = 0;
        for seed in 0..5 {
            let game = test_game(seed);
            let enemies = game.world.enemies();
            assert!(enemies.len() <= game.config.enemy_count);
            spawned_total += enemies.len();
            for enemy in enemies {
                let position = game.world.entity_position(enemy).expect("enemy placed");
                assert!(game.world.get_tile(position.x, position.y).walkable());
            }
        }
        // Spawning retries a few times per enemy; across several levels
        // at least some attempts must land.
        assert!(spawned_total > 0);
    }

    #[test]
    fn test_clear_level_applies_bonuses() {
        let mut game = test_game(5);
        // Flatten the level so no generated lights interfere, then
        // hand-build one lit pair of each color.
        for y in 0..VIEW_TILES_HEIGHT {
            for x in 0..VIEW_TILES_WIDTH {
                game.world.set_tile(x, y, Tile::StoneFloor);
            }
        }
        game.world.set_entity(10, 9, Some(game.player));
        for (row, tile) in [(0, Tile::RedLight), (2, Tile::GreenLight), (4, Tile::BlueLight)] {
            game.world.set_tile(0, row, tile);
            game.world.set_tile(1, row, tile);
            game.world.remove_entity_at(0, row);
            game.world.remove_entity_at(1, row);
        }

        game.clear_level();

        assert_eq!(game.bonuses.damage, 2);
        assert_eq!(game.bonuses.health, 2);
        assert_eq!(game.bonuses.shield, 2);
        let actor = game.world.actor(game.player).unwrap();
        assert_eq!(actor.damage, player::BASE_DAMAGE + 2 * 5);
        assert_eq!(actor.shield, 2 * 5);
        assert!(matches!(game.state, GameState::Transition { .. }));
    }

    #[test]
    fn test_transition_regenerates_and_carries_stats() {
        let mut game = test_game(6);
        if let Some(actor) = game.world.actor_mut(game.player) {
            actor.damage = 35;
            actor.health = 60;
        }
        game.state = GameState::Transition { timer: 0.0 };

        game.update_transition(game.config.transition_time + 0.1);

        assert!(matches!(game.state, GameState::Playing));
        assert_eq!(game.level, 2);
        let actor = game.world.actor(game.player).expect("player respawned");
        assert_eq!(actor.damage, 35);
        assert_eq!(actor.health, 60);
        assert!(game.world.entity_position(game.player).is_some());
    }

    #[test]
    fn test_restart_resets_the_run() {
        let mut game = test_game(7);
        game.bonuses.damage = 4;
        game.level = 9;
        game.state = GameState::GameOver;
        game.world.despawn(game.player);

        game.restart();

        assert!(matches!(game.state, GameState::Playing));
        assert_eq!(game.level, 1);
        assert_eq!(game.bonuses.damage, 0);
        let actor = game.world.actor(game.player).expect("player respawned");
        assert_eq!(actor.damage, player::BASE_DAMAGE);
    }
}
