//! One-shot tile-sized effects
//!
//! A particle sits on a grid cell and plays one row of animation frames
//! from the atlas, then reports itself expired. Combat sparks and the
//! fireworks on kills and level clears both go through here.

use crate::render::{atlas, Renderer, Texture};
use crate::world::TILE_SIZE;

/// Seconds each animation frame stays up.
const FRAME_TIME: f32 = 0.05;

/// Animation row in the atlas plus its frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleKind {
    pub tex_y: i32,
    pub frames: i32,
}

/// Small flash on a landed hit.
pub const SPARK: ParticleKind = ParticleKind {
    tex_y: atlas::SPARK_ROW_Y,
    frames: 4,
};

/// Bigger burst on a kill or a lit light at level clear.
pub const FIREWORK: ParticleKind = ParticleKind {
    tex_y: atlas::FIREWORK_ROW_Y,
    frames: 5,
};

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub kind: ParticleKind,
    frame: i32,
    frame_timer: f32,
}

impl Particle {
    pub fn new(x: i32, y: i32, kind: ParticleKind) -> Self {
        Self {
            x,
            y,
            kind,
            frame: 0,
            frame_timer: 0.0,
        }
    }

    /// Advances the animation. Returns true once the last frame has
    /// played and the particle should be dropped.
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.frame_timer += delta_time;
        if self.frame_timer > FRAME_TIME {
            self.frame_timer -= FRAME_TIME;
            self.frame += 1;
        }
        self.frame >= self.kind.frames
    }

    pub fn draw(&self, renderer: &mut Renderer, texture: &Texture) {
        renderer.draw_sprite(
            self.x * TILE_SIZE,
            self.y * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
            texture,
            self.frame * TILE_SIZE,
            self.kind.tex_y,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_advance_on_the_clock() {
        let mut particle = Particle::new(0, 0, SPARK);
        assert!(!particle.update(0.03));
        assert_eq!(particle.frame, 0);
        assert!(!particle.update(0.03));
        assert_eq!(particle.frame, 1);
    }

    #[test]
    fn test_expires_after_last_frame() {
        let mut particle = Particle::new(2, 3, SPARK);
        let mut ticks = 0;
        while !particle.update(FRAME_TIME + 0.001) {
            ticks += 1;
            assert!(ticks < 100, "particle never expired");
        }
        assert_eq!(particle.frame, SPARK.frames);
    }

    #[test]
    fn test_leftover_time_carries_into_the_next_frame() {
        let mut particle = Particle::new(0, 0, FIREWORK);
        // One big step only ever advances a single frame; the surplus
        // stays banked for the next update.
        particle.update(0.12);
        assert_eq!(particle.frame, 1);
        particle.update(0.0);
        assert_eq!(particle.frame, 2);
    }
}
