use bevy::prelude::*;
use crate::shared::*;

/// Spawn the player entity at the centre of the map.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<FarmConfig>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    let start = Vec2::new(config.world_width_px() / 2.0, config.world_height_px() / 2.0);

    commands.spawn((
        // Tag
        Player,
        // Movement state
        PlayerMovement {
            speed: config.player_speed,
            ..default()
        },
        LogicalPosition(start),
        // Placeholder sprite
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::new(config.tile_size * 0.6, config.tile_size * 0.9)),
            ..default()
        },
        // World-space transform. Z = 10 so the player draws above terrain.
        Transform::from_translation(start.extend(10.0)),
        // Required for rendering
        Visibility::default(),
    ));
    info!("[Player] Spawned at ({:.0}, {:.0})", start.x, start.y);
}
