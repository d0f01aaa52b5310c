use bevy::prelude::*;
use crate::actions::CurrentAction;
use crate::shared::*;

/// Core movement system. Reads the move axis, applies
/// velocity, updates facing, and clamps to the map.
///
/// Only scheduled while no action is in progress.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    config: Res<FarmConfig>,
    mut query: Query<(&mut LogicalPosition, &mut PlayerMovement), With<Player>>,
) {
    let Ok((mut pos, mut movement)) = query.get_single_mut() else {
        return;
    };

    let dir = input.move_axis;
    if dir == Vec2::ZERO {
        movement.is_moving = false;
        return;
    }

    // Prioritise vertical facing on diagonals.
    if dir.y.abs() >= dir.x.abs() {
        movement.facing = if dir.y > 0.0 { Facing::Up } else { Facing::Down };
    } else {
        movement.facing = if dir.x > 0.0 { Facing::Right } else { Facing::Left };
    }

    let dt = time.delta_secs();
    let bounds = Vec2::new(config.world_width_px(), config.world_height_px());
    pos.0 = step_position(pos.0, dir, movement.speed, dt, bounds);
    movement.is_moving = true;
    movement.anim_time += dt;
}

/// Move `pos` along `dir` (normalised here) and clamp to `[0, bounds - 1]`.
pub fn step_position(pos: Vec2, dir: Vec2, speed: f32, dt: f32, bounds: Vec2) -> Vec2 {
    let next = pos + dir.normalize_or_zero() * speed * dt;
    let max = (bounds - Vec2::ONE).max(Vec2::ZERO);
    next.clamp(Vec2::ZERO, max)
}

/// Mirror the logical position into the sprite transform, with a small
/// walk bob, and tint the player while an action is running.
pub fn sync_player_sprite(
    current: Res<CurrentAction>,
    mut query: Query<(&LogicalPosition, &PlayerMovement, &mut Transform, &mut Sprite), With<Player>>,
) {
    let Ok((pos, movement, mut transform, mut sprite)) = query.get_single_mut() else {
        return;
    };

    let bob = if movement.is_moving {
        (movement.anim_time * 12.0).sin().abs() * 2.0
    } else {
        0.0
    };
    transform.translation.x = pos.0.x;
    transform.translation.y = pos.0.y + bob;

    sprite.color = match current.get().map(|a| a.kind) {
        Some(ActionKind::Dig) => Color::srgb(0.55, 0.45, 0.75),
        Some(ActionKind::Harvest) => Color::srgb(0.35, 0.70, 0.45),
        None => Color::srgb(0.2, 0.5, 0.8),
    };
}
