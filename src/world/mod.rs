//! Grid world
//!
//! Owns the tile grid, the derived subtile cache and the entity placement
//! index. Terrain and placement only ever change through the operations
//! here, which keep the derived state consistent: subtiles are recomputed
//! for the 3x3 neighborhood of every tile write, and the cell array and
//! the entity-to-position map always mirror each other.

pub mod tile;

mod gen;
mod subtile;

use std::collections::{BTreeMap, HashMap};

use crate::game::particles::{self, Particle};
use crate::render::{atlas, Renderer, Texture};

use subtile::SubTile;
use tile::Tile;

/// Side of one grid cell, in pixels.
pub const TILE_SIZE: i32 = 16;

/// Opaque handle to a spawned actor. Ids are never reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Handle that no spawn ever returns; lookups with it miss.
    pub const NULL: Entity = Entity(u32::MAX);
}

/// Combat stats attached to a spawned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub is_enemy: bool,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub shield: i32,
    /// Column of the entity row in the texture atlas.
    pub texture_index: i32,
}

impl Actor {
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

/// What a movement attempt turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing happened: no input, cooldown, friendly block or blocked
    /// without push rights.
    Idle,
    Moved,
    Attacked,
    Pushed,
}

/// Tally of lit lights by color, accumulated across levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bonuses {
    pub damage: i32,
    pub health: i32,
    pub shield: i32,
}

pub struct World {
    width: i32,
    height: i32,
    subtiles_width: i32,
    tiles: Vec<Tile>,
    subtiles: Vec<SubTile>,
    /// One slot per cell; the forward half of the placement index.
    entities: Vec<Option<Entity>>,
    /// The inverse half: where each placed entity currently stands.
    positions: HashMap<Entity, GridPos>,
    /// Stats for every spawned entity, placed or not. Ordered so that
    /// iteration order is stable across runs.
    actors: BTreeMap<Entity, Actor>,
    next_id: u32,
}

impl World {
    /// Creates a world filled with stone walls.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "world dimensions must be positive");
        let mut world = Self {
            width,
            height,
            subtiles_width: width * 2,
            tiles: vec![Tile::StoneWall; (width * height) as usize],
            subtiles: vec![SubTile::default(); (width * height * 4) as usize],
            entities: vec![None; (width * height) as usize],
            positions: HashMap::new(),
            actors: BTreeMap::new(),
            next_id: 0,
        };
        for y in 0..height {
            for x in 0..width {
                world.calculate_subtiles(x, y);
            }
        }
        world
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (x + y * self.width) as usize
    }

    /// Tile at `(x, y)`. Everything outside the grid reads as wall, so
    /// neighbor checks never need bounds handling.
    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::StoneWall;
        }
        self.tiles[self.index(x, y)]
    }

    /// Writes a tile and recomputes the subtile cache for its 3x3
    /// neighborhood. Out of bounds is a no-op.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x, y);
        self.tiles[i] = tile;

        let start_x = (x - 1).max(0);
        let start_y = (y - 1).max(0);
        let end_x = (x + 1).min(self.width - 1);
        let end_y = (y + 1).min(self.height - 1);
        for tile_y in start_y..=end_y {
            for tile_x in start_x..=end_x {
                self.calculate_subtiles(tile_x, tile_y);
            }
        }
    }

    fn calculate_subtiles(&mut self, x: i32, y: i32) {
        let tile = self.get_tile(x, y);
        for rel_y in 0..2 {
            for rel_x in 0..2 {
                let sub = subtile::quadrant(tile, rel_x, rel_y, |dx, dy| {
                    self.get_tile(x + dx, y + dy)
                });
                let i = ((x * 2 + rel_x) + (y * 2 + rel_y) * self.subtiles_width) as usize;
                self.subtiles[i] = sub;
            }
        }
    }

    pub fn get_entity(&self, x: i32, y: i32) -> Option<Entity> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.entities[self.index(x, y)]
    }

    /// Places `entity` at `(x, y)`, pulling it out of its previous cell
    /// and displacing whatever already occupies the target. `None` only
    /// performs the displacement, clearing the cell. Out of bounds is a
    /// no-op.
    pub fn set_entity(&mut self, x: i32, y: i32, entity: Option<Entity>) {
        if !self.in_bounds(x, y) {
            return;
        }
        // Single occupancy both ways: the mover leaves its old cell and
        // the target cell loses whoever stood there.
        if let Some(entity) = entity {
            self.remove_entity(entity);
        }
        self.remove_entity_at(x, y);
        if let Some(entity) = entity {
            let i = self.index(x, y);
            self.entities[i] = Some(entity);
            self.positions.insert(entity, GridPos { x, y });
        }
        debug_assert!(self.index_consistent());
    }

    /// Clears the placement of `entity`, if any. Stats are untouched.
    pub fn remove_entity(&mut self, entity: Entity) {
        if let Some(position) = self.positions.get(&entity).copied() {
            self.remove_entity_at(position.x, position.y);
        }
    }

    /// Clears whatever occupies `(x, y)`, if anything. Stats are untouched.
    pub fn remove_entity_at(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x, y);
        if let Some(entity) = self.entities[i] {
            self.positions.remove(&entity);
            self.entities[i] = None;
        }
        debug_assert!(self.index_consistent());
    }

    pub fn entity_position(&self, entity: Entity) -> Option<GridPos> {
        self.positions.get(&entity).copied()
    }

    /// A cell is occupied when an entity stands on it or its tile is not
    /// walkable. Out of bounds counts as occupied through the wall rule.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get_entity(x, y).is_some() || !self.get_tile(x, y).walkable()
    }

    /// Registers a new actor and returns its handle. The actor is not
    /// placed on the grid until `set_entity`.
    pub fn spawn(&mut self, actor: Actor) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.actors.insert(entity, actor);
        entity
    }

    /// Removes an actor from the grid and drops its stats.
    pub fn despawn(&mut self, entity: Entity) {
        self.remove_entity(entity);
        self.actors.remove(&entity);
    }

    pub fn actor(&self, entity: Entity) -> Option<&Actor> {
        self.actors.get(&entity)
    }

    pub fn actor_mut(&mut self, entity: Entity) -> Option<&mut Actor> {
        self.actors.get_mut(&entity)
    }

    /// Snapshot of every living enemy, in spawn order.
    pub fn enemies(&self) -> Vec<Entity> {
        self.actors
            .iter()
            .filter(|(_, actor)| actor.is_enemy)
            .map(|(&entity, _)| entity)
            .collect()
    }

    /// Drops every entity, placed or not. Terrain is untouched.
    pub fn clear_entities(&mut self) {
        self.entities.fill(None);
        self.positions.clear();
        self.actors.clear();
    }

    /// Resolves one movement attempt for `entity` by `(delta_x, delta_y)`.
    ///
    /// An occupant at the destination is attacked (or blocks, when on the
    /// same side). An unwalkable destination either stops the move or,
    /// with `can_push`, shifts the whole row or column the mover stands
    /// on; the push replaces the move, carrying the mover with its row.
    pub fn move_entity(
        &mut self,
        delta_x: i32,
        delta_y: i32,
        entity: Entity,
        particles: &mut Vec<Particle>,
        can_push: bool,
    ) -> MoveOutcome {
        let Some(position) = self.entity_position(entity) else {
            return MoveOutcome::Idle;
        };
        let target_x = position.x + delta_x;
        let target_y = position.y + delta_y;

        if let Some(target) = self.get_entity(target_x, target_y) {
            return self.attack(entity, target, particles);
        }

        if !self.get_tile(target_x, target_y).walkable() {
            if !can_push {
                return MoveOutcome::Idle;
            }
            if delta_x < 0 {
                self.push_row_left(position.y);
            } else if delta_x > 0 {
                self.push_row_right(position.y);
            } else if delta_y < 0 {
                self.push_column_up(position.x);
            } else if delta_y > 0 {
                self.push_column_down(position.x);
            }
            return MoveOutcome::Pushed;
        }

        self.set_entity(target_x, target_y, Some(entity));
        MoveOutcome::Moved
    }

    fn attack(&mut self, attacker: Entity, target: Entity, particles: &mut Vec<Particle>) -> MoveOutcome {
        let Some(&Actor { is_enemy: attacker_is_enemy, damage, .. }) = self.actors.get(&attacker)
        else {
            return MoveOutcome::Idle;
        };
        let Some(target_actor) = self.actors.get_mut(&target) else {
            return MoveOutcome::Idle;
        };
        // Same side blocks instead of fighting. Bumping into yourself
        // (a zero-delta move) lands here too.
        if target_actor.is_enemy == attacker_is_enemy {
            return MoveOutcome::Idle;
        }

        target_actor.health -= (damage - target_actor.shield).max(0);
        let dead = target_actor.health <= 0;

        // Every landed hit sparks; a kill bursts on top of it.
        if let Some(position) = self.positions.get(&target).copied() {
            particles.push(Particle::new(position.x, position.y, particles::SPARK));
            if dead {
                particles.push(Particle::new(position.x, position.y, particles::FIREWORK));
            }
        }
        if dead {
            self.despawn(target);
        }
        MoveOutcome::Attacked
    }

    /// Cyclically shifts row `y` one cell left, tiles and entities
    /// together; column 0 wraps around to the right edge.
    pub fn push_row_left(&mut self, y: i32) {
        let looped_tile = self.get_tile(0, y);
        let looped_entity = self.get_entity(0, y);
        for x in 1..self.width {
            let tile = self.get_tile(x, y);
            let entity = self.get_entity(x, y);
            self.set_tile(x - 1, y, tile);
            self.set_entity(x - 1, y, entity);
        }
        self.set_tile(self.width - 1, y, looped_tile);
        self.set_entity(self.width - 1, y, looped_entity);
    }

    pub fn push_row_right(&mut self, y: i32) {
        let looped_tile = self.get_tile(self.width - 1, y);
        let looped_entity = self.get_entity(self.width - 1, y);
        for x in (0..self.width - 1).rev() {
            let tile = self.get_tile(x, y);
            let entity = self.get_entity(x, y);
            self.set_tile(x + 1, y, tile);
            self.set_entity(x + 1, y, entity);
        }
        self.set_tile(0, y, looped_tile);
        self.set_entity(0, y, looped_entity);
    }

    pub fn push_column_up(&mut self, x: i32) {
        let looped_tile = self.get_tile(x, 0);
        let looped_entity = self.get_entity(x, 0);
        for y in 1..self.height {
            let tile = self.get_tile(x, y);
            let entity = self.get_entity(x, y);
            self.set_tile(x, y - 1, tile);
            self.set_entity(x, y - 1, entity);
        }
        self.set_tile(x, self.height - 1, looped_tile);
        self.set_entity(x, self.height - 1, looped_entity);
    }

    pub fn push_column_down(&mut self, x: i32) {
        let looped_tile = self.get_tile(x, self.height - 1);
        let looped_entity = self.get_entity(x, self.height - 1);
        for y in (0..self.height - 1).rev() {
            let tile = self.get_tile(x, y);
            let entity = self.get_entity(x, y);
            self.set_tile(x, y + 1, tile);
            self.set_entity(x, y + 1, entity);
        }
        self.set_tile(x, 0, looped_tile);
        self.set_entity(x, 0, looped_entity);
    }

    /// A light is lit when at least one orthogonal neighbor holds the
    /// exact same light kind. Non-lights are never lit.
    pub fn is_tile_lit(&self, x: i32, y: i32) -> bool {
        let tile = self.get_tile(x, y);
        if !tile.is_light() {
            return false;
        }
        self.get_tile(x - 1, y) == tile
            || self.get_tile(x + 1, y) == tile
            || self.get_tile(x, y - 1) == tile
            || self.get_tile(x, y + 1) == tile
    }

    /// Tallies every lit light into `bonuses` and bursts a firework on
    /// each one. Called once when the level is cleared.
    pub fn calculate_bonuses(&self, bonuses: &mut Bonuses, particles: &mut Vec<Particle>) {
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_tile_lit(x, y) {
                    continue;
                }
                let Some(kind) = self.get_tile(x, y).bonus() else {
                    continue;
                };
                particles.push(Particle::new(x, y, particles::FIREWORK));
                match kind {
                    tile::BonusKind::Damage => bonuses.damage += 1,
                    tile::BonusKind::Health => bonuses.health += 1,
                    tile::BonusKind::Shield => bonuses.shield += 1,
                }
            }
        }
    }

    /// Draws every cell: the entity sprite where one stands, otherwise
    /// the four cached subtile quadrants plus a glow overlay on lit
    /// lights.
    pub fn draw(&self, renderer: &mut Renderer, texture: &Texture) {
        for x in 0..self.width {
            for y in 0..self.height {
                if let Some(entity) = self.get_entity(x, y) {
                    let texture_index =
                        self.actors.get(&entity).map(|actor| actor.texture_index).unwrap_or(0);
                    renderer.draw_sprite(
                        x * TILE_SIZE,
                        y * TILE_SIZE,
                        TILE_SIZE,
                        TILE_SIZE,
                        texture,
                        texture_index * TILE_SIZE,
                        atlas::ENTITY_ROW_Y,
                    );
                    continue;
                }
                for rel_y in 0..2 {
                    for rel_x in 0..2 {
                        let sub_x = x * 2 + rel_x;
                        let sub_y = y * 2 + rel_y;
                        let sub = self.subtiles[(sub_x + sub_y * self.subtiles_width) as usize];
                        renderer.draw_sprite(
                            sub_x * atlas::SUBTILE_SIZE,
                            sub_y * atlas::SUBTILE_SIZE,
                            atlas::SUBTILE_SIZE,
                            atlas::SUBTILE_SIZE,
                            texture,
                            sub.tex_x,
                            sub.tex_y,
                        );
                    }
                }
                if self.is_tile_lit(x, y) {
                    let glow_index = self.get_tile(x, y).texture_index() - Tile::RedLight.texture_index();
                    renderer.draw_sprite(
                        x * TILE_SIZE,
                        y * TILE_SIZE,
                        TILE_SIZE,
                        TILE_SIZE,
                        texture,
                        glow_index * TILE_SIZE,
                        atlas::GLOW_ROW_Y,
                    );
                }
            }
        }
    }

    /// Both halves of the placement index agree: every occupied cell maps
    /// back to itself and every known position points at its entity.
    fn index_consistent(&self) -> bool {
        for (i, slot) in self.entities.iter().enumerate() {
            if let Some(entity) = slot {
                let expected = GridPos {
                    x: i as i32 % self.width,
                    y: i as i32 / self.width,
                };
                if self.positions.get(entity) != Some(&expected) {
                    return false;
                }
            }
        }
        for (entity, position) in &self.positions {
            if self.entities[self.index(position.x, position.y)] != Some(*entity) {
                return false;
            }
        }
        true
    }
}
