//! Shared components, resources, events, and states for Farmstead.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain's systems directly; the
//! presentation layer talks to the simulation through `FarmIntent` events.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

/// Per-frame simulation order. Chained in `Update` by `ActionsPlugin`.
///
/// Intents → Clock → Movement → Action → Growth.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Intents,
    Clock,
    Movement,
    Action,
    Growth,
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS & GROUND
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Wheat,
    Tomato,
}

impl CropKind {
    pub const ALL: [CropKind; 2] = [CropKind::Wheat, CropKind::Tomato];

    pub fn display_name(self) -> &'static str {
        match self {
            CropKind::Wheat => "Wheat",
            CropKind::Tomato => "Tomato",
        }
    }
}

/// Ground biome of a tile. Fixed at world generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroundBiome {
    #[default]
    Grass,
    DryGrass,
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Seed and harvest counts per crop, plus the HUD's selected seed.
///
/// Counts only change through `use_seed` and `add_harvest`.
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    seeds: HashMap<CropKind, u32>,
    harvested: HashMap<CropKind, u32>,
    /// Which seed the generic "plant" UI action uses. No simulation effect.
    pub selected_seed: CropKind,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_seeds(STARTING_SEEDS)
    }
}

impl Inventory {
    /// Inventory holding `per_crop` seeds of every crop and no harvest.
    pub fn with_seeds(per_crop: u32) -> Self {
        Self {
            seeds: CropKind::ALL.iter().map(|&k| (k, per_crop)).collect(),
            harvested: CropKind::ALL.iter().map(|&k| (k, 0)).collect(),
            selected_seed: CropKind::Wheat,
        }
    }

    pub fn seeds(&self, kind: CropKind) -> u32 {
        self.seeds.get(&kind).copied().unwrap_or(0)
    }

    pub fn harvested(&self, kind: CropKind) -> u32 {
        self.harvested.get(&kind).copied().unwrap_or(0)
    }

    pub fn can_plant(&self, kind: CropKind) -> bool {
        self.seeds(kind) > 0
    }

    /// Take one seed. Returns false (and changes nothing) when none are left.
    pub fn use_seed(&mut self, kind: CropKind) -> bool {
        match self.seeds.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn add_harvest(&mut self, kind: CropKind, amount: u32) {
        let entry = self.harvested.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// Continuous world-space position in pixels. The sprite `Transform`
/// is synced from this in PostUpdate; simulation code only reads this.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LogicalPosition(pub Vec2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    pub speed: f32,
    /// Seconds spent walking; drives the walk bob.
    pub anim_time: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            is_moving: false,
            speed: PLAYER_SPEED,
            anim_time: 0.0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Hardware input translated into game terms once per frame (PreUpdate).
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    /// Right mouse button: open the context action menu.
    pub open_menu: bool,
    /// Left mouse button.
    pub primary_click: bool,
    /// Plant the selected seed on the hovered tile.
    pub quick_plant: bool,
    pub select_seed: Option<CropKind>,
    /// Wheel notches this frame, positive = zoom in.
    pub zoom_steps: f32,
    pub toggle_fullscreen: bool,
    pub cancel: bool,
    pub cursor_screen: Option<Vec2>,
    pub cursor_world: Option<Vec2>,
}

// ═══════════════════════════════════════════════════════════════════════
// TIME
// ═══════════════════════════════════════════════════════════════════════

/// Simulation clock. `time_of_day` wraps at `day_length` and only feeds
/// the day/night tint.
#[derive(Resource, Debug, Clone)]
pub struct DayClock {
    pub global_time: f32,
    pub time_of_day: f32,
    pub day_length: f32,
}

impl Default for DayClock {
    fn default() -> Self {
        Self {
            global_time: 0.0,
            time_of_day: 0.0,
            day_length: DAY_LENGTH,
        }
    }
}

impl DayClock {
    pub fn new(day_length: f32) -> Self {
        Self {
            day_length,
            ..default()
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.global_time += dt;
        if self.day_length > 0.0 {
            self.time_of_day = (self.time_of_day + dt).rem_euclid(self.day_length);
        }
    }

    /// Fraction of the day cycle in [0, 1).
    pub fn day_fraction(&self) -> f32 {
        if self.day_length <= 0.0 {
            return 0.0;
        }
        self.time_of_day / self.day_length
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RANDOMNESS
// ═══════════════════════════════════════════════════════════════════════

/// The one random source for biome layout and harvest yields.
#[derive(Resource, Debug)]
pub struct FarmRng(pub StdRng);

impl FarmRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl Default for FarmRng {
    fn default() -> Self {
        Self::from_seed(None)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════

/// Tunables for the whole game. Defaults are the shipped values;
/// `farm_config.ron` may override any subset of them.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub tile_size: f32,
    pub dig_duration: f32,
    pub harvest_duration: f32,
    pub interact_range_tiles: f32,
    pub growth_stage_time: f32,
    pub day_length: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    pub player_speed: f32,
    pub starting_seeds: u32,
    pub window_width: f32,
    pub window_height: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            tile_size: TILE_SIZE,
            dig_duration: DIG_DURATION,
            harvest_duration: HARVEST_DURATION,
            interact_range_tiles: INTERACT_RANGE_TILES,
            growth_stage_time: GROWTH_STAGE_TIME,
            day_length: DAY_LENGTH,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            player_speed: PLAYER_SPEED,
            starting_seeds: STARTING_SEEDS,
            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            seed: None,
        }
    }
}

impl FarmConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.grid_width > MAX_GRID_DIM || self.grid_height > MAX_GRID_DIM {
            return Err(format!(
                "grid may be at most {}x{}, got {}x{}",
                MAX_GRID_DIM, MAX_GRID_DIM, self.grid_width, self.grid_height
            ));
        }
        let positive = [
            ("tile_size", self.tile_size),
            ("dig_duration", self.dig_duration),
            ("harvest_duration", self.harvest_duration),
            ("growth_stage_time", self.growth_stage_time),
            ("day_length", self.day_length),
            ("zoom_min", self.zoom_min),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if self.interact_range_tiles < 0.0 {
            return Err(format!(
                "interact_range_tiles must not be negative, got {}",
                self.interact_range_tiles
            ));
        }
        if self.zoom_min > self.zoom_max {
            return Err(format!(
                "zoom bounds inverted: [{}, {}]",
                self.zoom_min, self.zoom_max
            ));
        }
        Ok(())
    }

    pub fn world_width_px(&self) -> f32 {
        self.grid_width as f32 * self.tile_size
    }

    pub fn world_height_px(&self) -> f32 {
        self.grid_height as f32 * self.tile_size
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Dig,
    Plant(CropKind),
    Harvest,
}

/// A request from the presentation layer to act on a tile. Bounds are
/// checked by the sender; range and tile state are re-checked on receipt.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarmIntent {
    pub tile_x: i32,
    pub tile_y: i32,
    pub kind: IntentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Dig,
    Harvest,
}

/// A timed action ran to completion. `applied` is false when the tile no
/// longer accepted the mutation.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCompletedEvent {
    pub kind: ActionKind,
    pub tile_x: i32,
    pub tile_y: i32,
    pub applied: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropHarvestedEvent {
    pub crop: CropKind,
    pub amount: u32,
    pub tile_x: i32,
    pub tile_y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// World pixel position → tile index. Floors, so negative positions map
/// to negative (out-of-bounds) tiles.
pub fn world_to_tile(pos: Vec2, tile_size: f32) -> (i32, i32) {
    (
        (pos.x / tile_size).floor() as i32,
        (pos.y / tile_size).floor() as i32,
    )
}

/// Centre of a tile in world pixels.
pub fn tile_center(tile_x: i32, tile_y: i32, tile_size: f32) -> Vec2 {
    Vec2::new(
        (tile_x as f32 + 0.5) * tile_size,
        (tile_y as f32 + 0.5) * tile_size,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GRID_WIDTH: i32 = 50;
pub const GRID_HEIGHT: i32 = 50;
/// Largest grid dimension a config may ask for.
pub const MAX_GRID_DIM: i32 = 1024;
pub const TILE_SIZE: f32 = 48.0;
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

pub const MAX_GROWTH_STAGE: u8 = 5;
pub const GROWTH_STAGE_TIME: f32 = 12.0;

pub const DIG_DURATION: f32 = 1.5;
pub const HARVEST_DURATION: f32 = 2.0;
pub const INTERACT_RANGE_TILES: f32 = 3.0;

pub const DAY_LENGTH: f32 = 120.0;

pub const ZOOM_MIN: f32 = 0.6;
pub const ZOOM_MAX: f32 = 2.0;
pub const ZOOM_STEP: f32 = 0.1;

pub const PLAYER_SPEED: f32 = 180.0;
pub const STARTING_SEEDS: u32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_starts_with_four_seeds_each() {
        let inv = Inventory::default();
        assert_eq!(inv.seeds(CropKind::Wheat), 4);
        assert_eq!(inv.seeds(CropKind::Tomato), 4);
        assert_eq!(inv.harvested(CropKind::Wheat), 0);
        assert_eq!(inv.selected_seed, CropKind::Wheat);
    }

    #[test]
    fn test_use_seed_fails_at_zero() {
        let mut inv = Inventory::with_seeds(1);
        assert!(inv.use_seed(CropKind::Tomato));
        assert_eq!(inv.seeds(CropKind::Tomato), 0);
        assert!(!inv.use_seed(CropKind::Tomato));
        assert_eq!(inv.seeds(CropKind::Tomato), 0);
        // Other crop untouched.
        assert_eq!(inv.seeds(CropKind::Wheat), 1);
    }

    #[test]
    fn test_add_harvest_accumulates() {
        let mut inv = Inventory::default();
        inv.add_harvest(CropKind::Wheat, 2);
        inv.add_harvest(CropKind::Wheat, 3);
        assert_eq!(inv.harvested(CropKind::Wheat), 5);
        assert_eq!(inv.harvested(CropKind::Tomato), 0);
    }

    #[test]
    fn test_day_clock_wraps() {
        let mut clock = DayClock::new(120.0);
        clock.advance(100.0);
        clock.advance(30.0);
        assert!((clock.global_time - 130.0).abs() < 1e-4);
        assert!((clock.time_of_day - 10.0).abs() < 1e-4);
        assert!(clock.day_fraction() < 0.1);
    }

    #[test]
    fn test_default_config_is_valid() {
        let cfg = FarmConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.grid_width, 50);
        assert_eq!(cfg.world_width_px(), 2400.0);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let cfg = FarmConfig { grid_width: 0, ..default() };
        assert!(cfg.validate().is_err());

        let cfg = FarmConfig { dig_duration: 0.0, ..default() };
        assert!(cfg.validate().is_err());

        let cfg = FarmConfig { zoom_min: 3.0, ..default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_world_to_tile_floors() {
        assert_eq!(world_to_tile(Vec2::new(47.9, 48.0), 48.0), (0, 1));
        assert_eq!(world_to_tile(Vec2::new(-1.0, 0.0), 48.0), (-1, 0));
        assert_eq!(tile_center(2, 3, 48.0), Vec2::new(120.0, 168.0));
    }
}
