//! The farm grid: a flat, row-major array of tiles and every operation
//! that is allowed to change one.
//!
//! All commands fail closed: out-of-bounds coordinates, wrong tile state,
//! or missing seeds return false/None and leave the grid untouched.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

use super::biome::scatter_dry_grass;
use super::harvest::roll_harvest_amount;
use super::tile::{GrowingCrop, Tile, TileState};

#[derive(Resource, Debug, Clone)]
pub struct FarmField {
    width: i32,
    height: i32,
    tile_size: f32,
    stage_time: f32,
    tiles: Vec<Tile>,
}

impl Default for FarmField {
    fn default() -> Self {
        Self::blank(GRID_WIDTH, GRID_HEIGHT, TILE_SIZE)
    }
}

impl FarmField {
    /// All-grass field with no biome patches.
    pub fn blank(width: i32, height: i32, tile_size: f32) -> Self {
        let width = width.clamp(0, MAX_GRID_DIM);
        let height = height.clamp(0, MAX_GRID_DIM);
        Self {
            width,
            height,
            tile_size,
            stage_time: GROWTH_STAGE_TIME,
            tiles: vec![Tile::new(GroundBiome::Grass); width as usize * height as usize],
        }
    }

    /// Field with dry-grass patches scattered from `rng`.
    pub fn generate(width: i32, height: i32, tile_size: f32, rng: &mut impl Rng) -> Self {
        let mut field = Self::blank(width, height, tile_size);
        scatter_dry_grass(&mut field.tiles, field.width, field.height, rng);
        field
    }

    pub fn from_config(config: &FarmConfig, rng: &mut impl Rng) -> Self {
        Self::generate(config.grid_width, config.grid_height, config.tile_size, rng)
            .with_stage_time(config.growth_stage_time)
    }

    pub fn with_stage_time(mut self, stage_time: f32) -> Self {
        self.stage_time = stage_time;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn width_px(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn height_px(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    // ─── tile access ────────────────────────────────────────────────────

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y * self.width + x) as usize)
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        let i = self.index(x, y)?;
        self.tiles.get(i)
    }

    fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let i = self.index(x, y)?;
        self.tiles.get_mut(i)
    }

    /// Every tile with its grid position, row by row.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (((i as i32) % width, (i as i32) / width), tile))
    }

    // ─── predicates ─────────────────────────────────────────────────────

    pub fn can_dig(&self, x: i32, y: i32) -> bool {
        matches!(self.tile(x, y), Some(tile) if tile.state == TileState::Bare)
    }

    /// Soil with nothing growing, and at least one seed of `kind`.
    pub fn can_plant(&self, x: i32, y: i32, kind: CropKind, inventory: &Inventory) -> bool {
        matches!(self.tile(x, y), Some(tile) if tile.state == TileState::Soil)
            && inventory.can_plant(kind)
    }

    pub fn can_harvest(&self, x: i32, y: i32) -> bool {
        matches!(self.tile(x, y), Some(tile) if tile.is_mature())
    }

    // ─── commands ───────────────────────────────────────────────────────

    /// Bare → Soil.
    pub fn dig(&mut self, x: i32, y: i32) -> bool {
        if !self.can_dig(x, y) {
            return false;
        }
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        tile.state = TileState::Soil;
        true
    }

    /// Soil → Crop(stage 1), consuming exactly one seed of `kind`.
    pub fn plant(&mut self, x: i32, y: i32, kind: CropKind, inventory: &mut Inventory) -> bool {
        if !self.can_plant(x, y, kind, inventory) {
            return false;
        }
        let Some(tile) = self.tile_mut(x, y) else {
            return false;
        };
        if !inventory.use_seed(kind) {
            return false;
        }
        tile.state = TileState::Crop(GrowingCrop {
            kind,
            stage: 1,
            timer: 0.0,
        });
        true
    }

    /// Mature crop → Soil, crediting a rolled yield to `inventory`.
    /// Returns the amount harvested.
    pub fn harvest(
        &mut self,
        x: i32,
        y: i32,
        inventory: &mut Inventory,
        rng: &mut impl Rng,
    ) -> Option<u32> {
        if !self.can_harvest(x, y) {
            return None;
        }
        let tile = self.tile_mut(x, y)?;
        let kind = tile.crop_kind()?;
        let amount = roll_harvest_amount(rng);
        inventory.add_harvest(kind, amount);
        tile.reset_crop();
        Some(amount)
    }

    /// Advance every growing crop by `dt` seconds, at most one stage per
    /// call. Returns positions whose stage changed.
    pub fn update(&mut self, dt: f32) -> Vec<(i32, i32)> {
        let width = self.width;
        let stage_time = self.stage_time;
        let mut advanced = Vec::new();
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            if tile.grow(dt, stage_time) {
                advanced.push(((i as i32) % width, (i as i32) / width));
            }
        }
        advanced
    }
}
