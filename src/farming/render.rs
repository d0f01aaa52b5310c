//! Keeps tile and crop sprites in sync with the field.

use bevy::prelude::*;
use crate::shared::*;
use super::{crop_stage_color, grid_to_world, FarmField, Tile, TileState};

/// Ground/soil sprite for one grid cell.
#[derive(Component, Debug, Clone)]
pub struct TileSprite {
    pub grid_x: i32,
    pub grid_y: i32,
}

/// Crop sprite drawn over a tile; hidden while nothing grows there.
#[derive(Component, Debug, Clone)]
pub struct CropSprite {
    pub grid_x: i32,
    pub grid_y: i32,
}

/// Spawn one ground sprite and one (hidden) crop sprite per tile.
/// The grid never changes shape, so this runs once.
pub fn spawn_tile_sprites(
    mut commands: Commands,
    field: Res<FarmField>,
    existing: Query<Entity, With<TileSprite>>,
) {
    if !existing.is_empty() {
        return;
    }
    let ts = field.tile_size();
    for ((x, y), tile) in field.iter() {
        let translation = grid_to_world(x, y, ts);
        commands.spawn((
            Sprite {
                color: ground_color(tile),
                custom_size: Some(Vec2::splat(ts)),
                ..default()
            },
            Transform::from_translation(translation),
            TileSprite { grid_x: x, grid_y: y },
        ));
        commands.spawn((
            Sprite {
                color: Color::NONE,
                custom_size: Some(Vec2::splat(ts * 0.3)),
                ..default()
            },
            // Crop sprites at z=1, above the ground.
            Transform::from_translation(translation.with_z(1.0)),
            Visibility::Hidden,
            CropSprite { grid_x: x, grid_y: y },
        ));
    }
    info!("[Farming] Spawned sprites for {}x{} field", field.width(), field.height());
}

pub fn sync_tile_sprites(
    field: Res<FarmField>,
    mut ground_query: Query<(&TileSprite, &mut Sprite), Without<CropSprite>>,
    mut crop_query: Query<(&CropSprite, &mut Sprite, &mut Visibility), Without<TileSprite>>,
) {
    if !field.is_changed() {
        return;
    }
    let ts = field.tile_size();

    for (cell, mut sprite) in ground_query.iter_mut() {
        if let Some(tile) = field.tile(cell.grid_x, cell.grid_y) {
            sprite.color = ground_color(tile);
        }
    }

    for (cell, mut sprite, mut visibility) in crop_query.iter_mut() {
        let Some(tile) = field.tile(cell.grid_x, cell.grid_y) else {
            continue;
        };
        match tile.state {
            TileState::Crop(crop) => {
                sprite.color = crop_stage_color(crop.kind, crop.stage);
                // Grow from a sprout to most of the tile.
                let scale = 0.3 + 0.6 * (crop.stage as f32 / MAX_GROWTH_STAGE as f32);
                sprite.custom_size = Some(Vec2::splat(ts * scale));
                *visibility = Visibility::Inherited;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// Placeholder colour for a tile's ground layer.
fn ground_color(tile: &Tile) -> Color {
    match (tile.state, tile.ground) {
        (TileState::Bare, GroundBiome::Grass) => Color::srgb(0.30, 0.62, 0.28),
        (TileState::Bare, GroundBiome::DryGrass) => Color::srgb(0.62, 0.60, 0.32),
        // Tilled soil looks the same on either biome.
        (TileState::Soil | TileState::Crop(_), _) => Color::srgb(0.45, 0.32, 0.20),
    }
}
