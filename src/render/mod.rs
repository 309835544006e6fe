//! Software renderer
//!
//! Everything is composited CPU-side into one fixed 320x176 RGBA buffer,
//! which is uploaded as a texture once per frame and scaled to the window
//! with nearest-neighbor filtering and letterboxing. Transparency is
//! binary: any source pixel with alpha below 255 is skipped, everything
//! else lands fully opaque.

pub mod atlas;

use macroquad::color::{Color, WHITE};
use macroquad::math::vec2;
use macroquad::texture::{draw_texture_ex, DrawTextureParams, FilterMode, Texture2D};
use macroquad::window::{clear_background, screen_height, screen_width};

/// Fixed logical resolution of the frame, in pixels.
pub const VIEW_WIDTH: i32 = 320;
pub const VIEW_HEIGHT: i32 = 176;

/// CPU-side RGBA image, used for the sprite atlas.
pub struct Texture {
    pub width: i32,
    pub height: i32,
    pub data: Vec<u8>,
}

impl Texture {
    /// Blank fully-transparent image.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, String> {
        let image = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .map_err(|error| format!("failed to decode png: {error}"))?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width: width as i32,
            height: height as i32,
            data: rgba.into_raw(),
        })
    }
}

pub struct Renderer {
    /// RGBA, row-major, always `VIEW_WIDTH * VIEW_HEIGHT * 4` bytes. Alpha
    /// stays 255 everywhere; sprites and rects only ever write RGB.
    pub pixels: Vec<u8>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            pixels: vec![255; (VIEW_WIDTH * VIEW_HEIGHT * 4) as usize],
        }
    }

    /// Blits a `width` x `height` block of `texture` starting at
    /// `(tex_x, tex_y)` to `(x, y)`. The destination is clipped to the
    /// view; source coordinates are not adjusted by the clip, so callers
    /// keep them in-bounds. Pixels with alpha below 255 are skipped.
    pub fn draw_sprite(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        texture: &Texture,
        tex_x: i32,
        tex_y: i32,
    ) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = (x + width).min(VIEW_WIDTH);
        let end_y = (y + height).min(VIEW_HEIGHT);

        for row in 0..end_y - start_y {
            for column in 0..end_x - start_x {
                let src_x = tex_x + column;
                let src_y = tex_y + row;
                if src_x < 0 || src_y < 0 || src_x >= texture.width || src_y >= texture.height {
                    continue;
                }
                let src = (4 * (src_x + src_y * texture.width)) as usize;
                if texture.data[src + 3] < 255 {
                    continue;
                }
                let dst = (4 * (start_x + column + (start_y + row) * VIEW_WIDTH)) as usize;
                self.pixels[dst..dst + 3].copy_from_slice(&texture.data[src..src + 3]);
            }
        }
    }

    /// Fills a solid rectangle, clipped to the view.
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, r: u8, g: u8, b: u8) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = (x + width).min(VIEW_WIDTH);
        let end_y = (y + height).min(VIEW_HEIGHT);

        for row in start_y..end_y {
            for column in start_x..end_x {
                let dst = (4 * (column + row * VIEW_WIDTH)) as usize;
                self.pixels[dst] = r;
                self.pixels[dst + 1] = g;
                self.pixels[dst + 2] = b;
            }
        }
    }

    /// Uploads the buffer and draws it scaled to the window, preserving
    /// aspect ratio with letterbox bars.
    pub fn present(&self) {
        let texture = Texture2D::from_rgba8(VIEW_WIDTH as u16, VIEW_HEIGHT as u16, &self.pixels);
        texture.set_filter(FilterMode::Nearest);

        let view_aspect = VIEW_WIDTH as f32 / VIEW_HEIGHT as f32;
        let screen_aspect = screen_width() / screen_height();
        let (draw_width, draw_height) = if view_aspect > screen_aspect {
            (screen_width(), screen_width() / view_aspect)
        } else {
            (screen_height() * view_aspect, screen_height())
        };
        let draw_x = (screen_width() - draw_width) / 2.0;
        let draw_y = (screen_height() - draw_height) / 2.0;

        clear_background(Color::from_rgba(13, 11, 14, 255));
        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(draw_width, draw_height)),
                ..Default::default()
            },
        );
    }
}
