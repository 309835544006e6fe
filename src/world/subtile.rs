//! Autotiler
//!
//! Each tile is drawn as four 8x8 quadrants picked from a 5x3 grid of
//! subtile pieces in the atlas: a 3x3 block of edge/center pieces plus a
//! 2x2 block of concave corner pieces to its right. Which piece a quadrant
//! uses depends only on whether the neighbors on that quadrant's side hold
//! the same tile kind, so the selection can be cached and recomputed for
//! a 3x3 neighborhood whenever a tile changes.

use crate::render::atlas::{SUBTILE_SIZE, TILE_STRIP_WIDTH};

use super::tile::Tile;

const CENTER_X: i32 = 1;
const CENTER_Y: i32 = 1;
const CORNER_X: i32 = 4;
const CORNER_Y: i32 = 1;

/// Cached atlas offset of one 8x8 quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubTile {
    pub tex_x: i32,
    pub tex_y: i32,
}

/// Select the subtile piece for quadrant `(rel_x, rel_y)` (each 0 or 1) of
/// a tile of kind `tile`. `neighbor(dx, dy)` must return the kind at the
/// cell offset by `(dx, dy)` from the tile, with out-of-bounds reads
/// already resolved to walls.
pub fn quadrant(tile: Tile, rel_x: i32, rel_y: i32, neighbor: impl Fn(i32, i32) -> Tile) -> SubTile {
    let mut sub_x = CENTER_X;
    let mut sub_y = CENTER_Y;

    // Direction this quadrant faces: -1 for the left/top half, 1 for the
    // right/bottom half.
    let direction_x = rel_x * 2 - 1;
    let direction_y = rel_y * 2 - 1;

    if neighbor(direction_x, 0) != tile {
        sub_x += direction_x;
    }
    if neighbor(0, direction_y) != tile {
        sub_y += direction_y;
    }

    // Both orthogonal neighbors match but the diagonal does not: concave
    // corner, mirrored into place per quadrant.
    if sub_x == CENTER_X && sub_y == CENTER_Y && neighbor(direction_x, direction_y) != tile {
        sub_x = CORNER_X - rel_x;
        sub_y = CORNER_Y - rel_y;
    }

    SubTile {
        tex_x: TILE_STRIP_WIDTH * tile.texture_index() + sub_x * SUBTILE_SIZE,
        tex_y: sub_y * SUBTILE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_neighborhood_is_center() {
        for rel_y in 0..2 {
            for rel_x in 0..2 {
                let sub = quadrant(Tile::StoneFloor, rel_x, rel_y, |_, _| Tile::StoneFloor);
                assert_eq!(sub, SubTile { tex_x: SUBTILE_SIZE, tex_y: SUBTILE_SIZE });
            }
        }
    }

    #[test]
    fn test_isolated_tile_uses_outer_edges() {
        // Every neighbor differs, so each quadrant picks its outermost
        // edge piece from the 3x3 block.
        let sub = quadrant(Tile::StoneFloor, 0, 0, |_, _| Tile::StoneWall);
        assert_eq!(sub, SubTile { tex_x: 0, tex_y: 0 });
        let sub = quadrant(Tile::StoneFloor, 1, 1, |_, _| Tile::StoneWall);
        assert_eq!(sub, SubTile { tex_x: 2 * SUBTILE_SIZE, tex_y: 2 * SUBTILE_SIZE });
    }

    #[test]
    fn test_diagonal_mismatch_picks_corner_piece() {
        // Orthogonal neighbors match, only the diagonal differs.
        let neighbor = |dx: i32, dy: i32| {
            if dx != 0 && dy != 0 {
                Tile::StoneWall
            } else {
                Tile::StoneFloor
            }
        };
        let sub = quadrant(Tile::StoneFloor, 0, 0, neighbor);
        assert_eq!(sub, SubTile { tex_x: CORNER_X * SUBTILE_SIZE, tex_y: CORNER_Y * SUBTILE_SIZE });
        let sub = quadrant(Tile::StoneFloor, 1, 1, neighbor);
        assert_eq!(sub, SubTile { tex_x: (CORNER_X - 1) * SUBTILE_SIZE, tex_y: (CORNER_Y - 1) * SUBTILE_SIZE });
    }

    #[test]
    fn test_strip_offset_by_texture_index() {
        let sub = quadrant(Tile::StoneWall, 0, 0, |_, _| Tile::StoneWall);
        assert_eq!(sub.tex_x, TILE_STRIP_WIDTH + SUBTILE_SIZE);
        let sub = quadrant(Tile::Exit, 0, 0, |_, _| Tile::Exit);
        assert_eq!(sub.tex_x, 5 * TILE_STRIP_WIDTH + SUBTILE_SIZE);
    }
}
