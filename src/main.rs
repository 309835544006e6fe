//! shiftdelve
//!
//! A tiny keyboard dungeon crawler with one twist: bumping into a wall
//! shoves the entire row or column you stand on one cell over, wrapping
//! around the edge, you riding along. Reach the stairs, clear floor after
//! floor, and light up matching pairs of colored lights on the way down
//! for permanent damage, health and shield bonuses.
//!
//! Move with WASD or the arrow keys. Everything renders into a 320x176
//! software framebuffer that is scaled up to the window.

mod audio;
mod config;
mod game;
mod input;
mod render;
mod world;

use macroquad::prelude::{get_frame_time, next_frame, Conf};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use game::Game;
use input::Input;
use render::Renderer;

fn window_conf() -> Conf {
    Conf {
        window_title: "shiftdelve".to_owned(),
        window_width: render::VIEW_WIDTH * 3,
        window_height: render::VIEW_HEIGHT * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config::load().await;
    let texture = render::atlas::load().await;
    let sounds = audio::Sounds::load().await;

    // Wall-clock seed; printed so an interesting run can be replayed by
    // hardcoding it while debugging.
    let seed = macroquad::miniquad::date::now() as u64;
    println!("seed {seed}");
    let mut game = Game::new(config, sounds, ChaCha8Rng::seed_from_u64(seed));

    let input = Input::new();
    let mut renderer = Renderer::new();

    loop {
        let delta_time = get_frame_time();
        game.update(&input, delta_time);
        game.draw(&mut renderer, &texture, delta_time);
        renderer.present();
        game.draw_overlay();
        next_frame().await;
    }
}
