//! Dungeon generation
//!
//! Rooms are stamped at random positions, chained together with L-shaped
//! corridors in the order they were placed, then floor cells are sprinkled
//! with colored lights and a single exit is forced onto a random cell.
//! Rooms may overlap and may hang off the grid edge; the closed-world tile
//! writes simply clip them.

use rand::Rng;

use crate::config::GeneratorConfig;

use super::tile::Tile;
use super::World;

struct Room {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl World {
    /// Replaces the whole level: terrain, lights and exit. Every entity,
    /// placed or not, is dropped first.
    pub fn generate(&mut self, config: &GeneratorConfig, rng: &mut impl Rng) {
        self.clear_entities();
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_tile(x, y, Tile::StoneWall);
            }
        }

        let rooms = self.carve_rooms(config, rng);
        self.carve_corridors(&rooms, rng);
        self.scatter_lights(config, rng);

        let exit_x = rng.gen_range(0..self.width());
        let exit_y = rng.gen_range(0..self.height());
        self.set_tile(exit_x, exit_y, Tile::Exit);
    }

    fn carve_rooms(&mut self, config: &GeneratorConfig, rng: &mut impl Rng) -> Vec<Room> {
        let variance = config.room_size_variance.max(1);
        let mut rooms = Vec::with_capacity(config.room_count);
        for _ in 0..config.room_count {
            let room = Room {
                x: rng.gen_range(0..self.width()),
                y: rng.gen_range(0..self.height()),
                width: config.room_min_size + rng.gen_range(0..variance),
                height: config.room_min_size + rng.gen_range(0..variance),
            };
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    self.set_tile(x, y, Tile::StoneFloor);
                }
            }
            rooms.push(room);
        }
        rooms
    }

    /// Connects each room to the one placed before it with a horizontal
    /// leg at a random row of the previous room, then a vertical leg that
    /// pivots at the current room's corner column.
    fn carve_corridors(&mut self, rooms: &[Room], rng: &mut impl Rng) {
        for pair in rooms.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            let corridor_y = previous.y + rng.gen_range(0..previous.height.max(1));

            let (start_x, end_x) = if previous.x <= current.x {
                (previous.x, current.x)
            } else {
                (current.x, previous.x)
            };
            for x in start_x..=end_x {
                self.set_tile(x, corridor_y, Tile::StoneFloor);
            }

            let (start_y, end_y) = if corridor_y <= current.y {
                (corridor_y, current.y)
            } else {
                (current.y, corridor_y)
            };
            for y in start_y..=end_y {
                self.set_tile(current.x, y, Tile::StoneFloor);
            }
        }
    }

    fn scatter_lights(&mut self, config: &GeneratorConfig, rng: &mut impl Rng) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_tile(x, y) != Tile::StoneFloor {
                    continue;
                }
                if rng.gen::<f32>() >= config.light_chance {
                    continue;
                }
                let light = Tile::LIGHTS[rng.gen_range(0..Tile::LIGHTS.len())];
                self.set_tile(x, y, light);
            }
        }
    }
}
