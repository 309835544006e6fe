//! Run-time configuration
//!
//! Tuning knobs live in `assets/config.ron`; the file and every field in
//! it are optional, so a partial override like `(enemy_count: 12)` works.
//! A missing or unparsable file falls back to the built-in defaults with
//! a note on stdout.

use macroquad::file::load_string;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub room_count: usize,
    pub room_min_size: i32,
    pub room_size_variance: i32,
    /// Chance for each floor cell to become a colored light.
    pub light_chance: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_count: 10,
            room_min_size: 3,
            room_size_variance: 4,
            light_chance: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generator: GeneratorConfig,
    pub enemy_count: usize,
    /// Placement attempts per enemy before giving up on it.
    pub enemy_spawn_retries: usize,
    /// Seconds the level-clear pause lasts.
    pub transition_time: f32,
    pub health_per_bonus: i32,
    pub damage_per_bonus: i32,
    pub shield_per_bonus: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            enemy_count: 7,
            enemy_spawn_retries: 3,
            transition_time: 1.5,
            health_per_bonus: 5,
            damage_per_bonus: 5,
            shield_per_bonus: 5,
        }
    }
}

pub async fn load() -> GameConfig {
    match load_string("assets/config.ron").await {
        Ok(text) => match ron::from_str(&text) {
            Ok(config) => {
                println!("config: assets/config.ron");
                config
            }
            Err(error) => {
                println!("config: assets/config.ron is invalid ({error}), using defaults");
                GameConfig::default()
            }
        },
        Err(_) => {
            println!("config: no assets/config.ron, using defaults");
            GameConfig::default()
        }
    }
}
