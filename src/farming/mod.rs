//! Farming domain — the tile grid, digging, planting, crop growth, harvest.
//!
//! The grid itself (`FarmField`) is plain data with no ECS dependency beyond
//! being a `Resource`; the systems here only drive it once per frame and
//! mirror it into sprites.

use bevy::prelude::*;
use crate::shared::*;

pub mod tile;
pub mod field;
pub mod biome;
pub mod harvest;
mod render;

pub use field::FarmField;
pub use tile::{Cultivation, GrowingCrop, Tile, TileState};

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmField>()
            .add_systems(
                Update,
                grow_crops
                    .in_set(SimSet::Growth)
                    .run_if(in_state(GameState::Playing)),
            )
            // ------------------------------------------------------------------
            // Visual sync, after all state mutations
            // ------------------------------------------------------------------
            .add_systems(OnEnter(GameState::Playing), render::spawn_tile_sprites)
            .add_systems(
                PostUpdate,
                render::sync_tile_sprites.run_if(in_state(GameState::Playing)),
            );
    }
}

/// Advance crop growth by the frame's delta. Runs every frame, whether or
/// not the player is busy.
///
/// Change detection is only raised when a stage actually advanced, so the
/// sprite sync doesn't rebuild every frame while timers tick.
pub fn grow_crops(time: Res<Time>, mut field: ResMut<FarmField>) {
    let advanced = field.bypass_change_detection().update(time.delta_secs());
    if !advanced.is_empty() {
        debug!("[Farming] {} crop(s) advanced a stage", advanced.len());
        field.set_changed();
    }
}

/// Convert a grid position to a world-space translation (centre of tile).
pub fn grid_to_world(x: i32, y: i32, tile_size: f32) -> Vec3 {
    tile_center(x, y, tile_size).extend(0.0)
}

/// Placeholder colour for a crop at `stage` (1 = seedling, max = ripe).
pub fn crop_stage_color(kind: CropKind, stage: u8) -> Color {
    let progress = stage.saturating_sub(1) as f32 / (MAX_GROWTH_STAGE - 1) as f32;
    // Lerp from pale green seedling to the crop's ripe colour.
    let (r, g, b) = match kind {
        CropKind::Wheat => (0.90, 0.78, 0.30),
        CropKind::Tomato => (0.85, 0.20, 0.15),
    };
    let lerp = |from: f32, to: f32| from + (to - from) * progress;
    Color::srgb(lerp(0.45, r), lerp(0.75, g), lerp(0.30, b))
}
