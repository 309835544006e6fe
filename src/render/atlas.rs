//! Texture atlas
//!
//! All art lives in one 256x256 RGBA sheet with a fixed row layout:
//!
//!   y   0..24   six 40x24 tile strips (5x3 subtile pieces each), in
//!               tile texture-index order
//!   y  24..40   16x16 entity sprites, by entity texture index
//!   y  40..56   16x16 glow overlays for the three lit light colors
//!   y  56..72   16x16 spark animation frames
//!   y  72..88   16x16 firework animation frames
//!   y 104..112  8x8 HUD icons: damage, then shield
//!
//! A hand-drawn `assets/tiles.png` with the same layout is used when
//! present; otherwise the sheet is painted procedurally so the game always
//! has something to show.

use macroquad::file::load_file;

use super::Texture;

pub const ATLAS_SIZE: i32 = 256;

pub const ENTITY_ROW_Y: i32 = 24;
pub const GLOW_ROW_Y: i32 = 40;
pub const SPARK_ROW_Y: i32 = 56;
pub const FIREWORK_ROW_Y: i32 = 72;
pub const ICON_ROW_Y: i32 = 104;

/// Side of one subtile piece, in pixels.
pub const SUBTILE_SIZE: i32 = 8;
/// Width of one tile kind's strip: the 3x3 edge/center block plus the
/// 2x2 concave corner block.
pub const TILE_STRIP_WIDTH: i32 = SUBTILE_SIZE * 5;

pub async fn load() -> Texture {
    match load_file("assets/tiles.png").await {
        Ok(bytes) => match Texture::from_png_bytes(&bytes) {
            Ok(texture) => {
                println!("atlas: assets/tiles.png");
                return texture;
            }
            Err(error) => println!("atlas: {error}, using built-in art"),
        },
        Err(_) => println!("atlas: no assets/tiles.png, using built-in art"),
    }
    builtin()
}

/// Procedurally painted stand-in art, same layout as the PNG.
pub fn builtin() -> Texture {
    let mut texture = Texture::new(ATLAS_SIZE, ATLAS_SIZE);

    // Tile strips, in texture-index order.
    paint_strip(&mut texture, 0, [88, 80, 96], [70, 63, 78], [103, 95, 112]); // stone floor
    paint_strip(&mut texture, 1, [38, 34, 48], [24, 21, 32], [52, 48, 64]); // stone wall
    paint_strip(&mut texture, 2, [172, 58, 68], [128, 38, 50], [224, 96, 100]); // red light
    paint_strip(&mut texture, 3, [62, 160, 82], [40, 118, 60], [120, 212, 130]); // green light
    paint_strip(&mut texture, 4, [64, 112, 190], [44, 80, 146], [120, 168, 235]); // blue light
    paint_strip(&mut texture, 5, [196, 158, 62], [150, 114, 38], [240, 214, 120]); // exit

    paint_entity(&mut texture, 0, [226, 222, 214], [52, 48, 64]); // player
    paint_entity(&mut texture, 1, [98, 160, 70], [30, 52, 24]); // goblin
    paint_entity(&mut texture, 2, [176, 186, 210], [72, 80, 110]); // ghost
    paint_entity(&mut texture, 3, [188, 196, 72], [70, 74, 26]); // snake

    paint_glow(&mut texture, 0, [255, 120, 130]);
    paint_glow(&mut texture, 1, [150, 255, 160]);
    paint_glow(&mut texture, 2, [150, 190, 255]);

    for frame in 0..4 {
        paint_spark(&mut texture, frame);
    }
    for frame in 0..5 {
        paint_firework(&mut texture, frame);
    }

    paint_damage_icon(&mut texture);
    paint_shield_icon(&mut texture);

    texture
}

fn put(texture: &mut Texture, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= texture.width || y >= texture.height {
        return;
    }
    let i = (4 * (x + y * texture.width)) as usize;
    texture.data[i] = color[0];
    texture.data[i + 1] = color[1];
    texture.data[i + 2] = color[2];
    texture.data[i + 3] = 255;
}

fn fill(texture: &mut Texture, x: i32, y: i32, width: i32, height: i32, color: [u8; 3]) {
    for row in y..y + height {
        for column in x..x + width {
            put(texture, column, row, color);
        }
    }
}

/// One tile kind's 5x3 strip: a 3x3 block of center/edge pieces with dark
/// bands on the outward sides, then the 2x2 block of concave corners with
/// a notch pointing at the mismatched diagonal.
fn paint_strip(texture: &mut Texture, index: i32, base: [u8; 3], dark: [u8; 3], accent: [u8; 3]) {
    let origin_x = index * TILE_STRIP_WIDTH;
    fill(texture, origin_x, 0, TILE_STRIP_WIDTH, 3 * SUBTILE_SIZE, base);

    for cell_y in 0..3 {
        for cell_x in 0..3 {
            let x0 = origin_x + cell_x * SUBTILE_SIZE;
            let y0 = cell_y * SUBTILE_SIZE;
            fill(texture, x0, y0, SUBTILE_SIZE, SUBTILE_SIZE, base);
            if cell_x == 0 {
                fill(texture, x0, y0, 2, SUBTILE_SIZE, dark);
            }
            if cell_x == 2 {
                fill(texture, x0 + 6, y0, 2, SUBTILE_SIZE, dark);
            }
            if cell_y == 0 {
                fill(texture, x0, y0, SUBTILE_SIZE, 2, dark);
            }
            if cell_y == 2 {
                fill(texture, x0, y0 + 6, SUBTILE_SIZE, 2, dark);
            }
        }
    }
    // A little grain on the seamless center piece.
    put(texture, origin_x + 10, 11, accent);
    put(texture, origin_x + 13, 13, accent);
    put(texture, origin_x + 11, 14, dark);

    for piece_y in 0..2 {
        for piece_x in 0..2 {
            let x0 = origin_x + (3 + piece_x) * SUBTILE_SIZE;
            let y0 = piece_y * SUBTILE_SIZE;
            fill(texture, x0, y0, SUBTILE_SIZE, SUBTILE_SIZE, base);
            // The piece at (4, 1) serves the top-left quadrant, so its
            // notch sits top-left; the rest mirror accordingly.
            let notch_x = if piece_x == 1 { x0 } else { x0 + 5 };
            let notch_y = if piece_y == 1 { y0 } else { y0 + 5 };
            fill(texture, notch_x, notch_y, 3, 3, dark);
        }
    }
}

/// Squat 16x16 critter on a transparent background; palette is all that
/// tells the kinds apart.
fn paint_entity(texture: &mut Texture, index: i32, body: [u8; 3], trim: [u8; 3]) {
    let x0 = index * 16;
    let y0 = ENTITY_ROW_Y;
    fill(texture, x0 + 4, y0 + 3, 8, 10, body);
    fill(texture, x0 + 3, y0 + 5, 10, 6, body);
    // eyes
    put(texture, x0 + 6, y0 + 6, trim);
    put(texture, x0 + 9, y0 + 6, trim);
    // feet
    fill(texture, x0 + 4, y0 + 13, 3, 2, trim);
    fill(texture, x0 + 9, y0 + 13, 3, 2, trim);
}

/// Corner brackets overlaid on a lit light tile.
fn paint_glow(texture: &mut Texture, index: i32, color: [u8; 3]) {
    let x0 = index * 16;
    let y0 = GLOW_ROW_Y;
    for d in 0..4 {
        put(texture, x0 + d, y0, color);
        put(texture, x0, y0 + d, color);
        put(texture, x0 + 15 - d, y0, color);
        put(texture, x0 + 15, y0 + d, color);
        put(texture, x0 + d, y0 + 15, color);
        put(texture, x0, y0 + 15 - d, color);
        put(texture, x0 + 15 - d, y0 + 15, color);
        put(texture, x0 + 15, y0 + 15 - d, color);
    }
}

/// Growing cross of bright pixels.
fn paint_spark(texture: &mut Texture, frame: i32) {
    let x0 = frame * 16 + 8;
    let y0 = SPARK_ROW_Y + 8;
    let color = [255, 238, 160];
    let radius = 1 + frame;
    for d in -radius..=radius {
        put(texture, x0 + d, y0, color);
        put(texture, x0, y0 + d, color);
    }
    if frame >= 2 {
        let d = radius - 1;
        put(texture, x0 + d, y0 + d, color);
        put(texture, x0 - d, y0 + d, color);
        put(texture, x0 + d, y0 - d, color);
        put(texture, x0 - d, y0 - d, color);
    }
}

/// Expanding eight-point ring.
fn paint_firework(texture: &mut Texture, frame: i32) {
    let x0 = frame * 16 + 8;
    let y0 = FIREWORK_ROW_Y + 8;
    let colors = [
        [255, 220, 120],
        [255, 160, 90],
        [255, 120, 130],
        [200, 140, 255],
        [160, 170, 200],
    ];
    let color = colors[frame as usize % colors.len()];
    let radius = 2 + frame;
    let diagonal = (radius * 7) / 10;
    for (dx, dy) in [
        (radius, 0),
        (-radius, 0),
        (0, radius),
        (0, -radius),
        (diagonal, diagonal),
        (diagonal, -diagonal),
        (-diagonal, diagonal),
        (-diagonal, -diagonal),
    ] {
        put(texture, x0 + dx, y0 + dy, color);
        put(texture, x0 + dx, y0 + dy + 1, color);
    }
}

/// 8x8 sword for the damage bonus row.
fn paint_damage_icon(texture: &mut Texture) {
    let blade = [210, 214, 224];
    let hilt = [150, 90, 50];
    for d in 0..5 {
        put(texture, 1 + d, ICON_ROW_Y + 5 - d, blade);
        put(texture, 2 + d, ICON_ROW_Y + 5 - d, blade);
    }
    put(texture, 1, ICON_ROW_Y + 6, hilt);
    put(texture, 2, ICON_ROW_Y + 7, hilt);
    put(texture, 0, ICON_ROW_Y + 7, hilt);
}

/// 8x8 shield for the shield bonus row.
fn paint_shield_icon(texture: &mut Texture) {
    let rim = [70, 90, 150];
    let face = [120, 160, 230];
    let x0 = 8;
    fill(texture, x0 + 1, ICON_ROW_Y, 6, 6, rim);
    fill(texture, x0 + 2, ICON_ROW_Y + 1, 4, 4, face);
    fill(texture, x0 + 2, ICON_ROW_Y + 6, 4, 1, rim);
    fill(texture, x0 + 3, ICON_ROW_Y + 7, 2, 1, rim);
}
