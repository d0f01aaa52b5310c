//! Progress bar for the timed action, drawn in world space above the
//! target tile.

use bevy::prelude::*;
use crate::actions::CurrentAction;
use crate::shared::*;

const BAR_Z: f32 = 20.0;
const BAR_HEIGHT: f32 = 6.0;

#[derive(Component)]
pub struct ProgressBarBackground;

#[derive(Component)]
pub struct ProgressBarFill;

pub fn spawn_progress_bar(
    mut commands: Commands,
    config: Res<FarmConfig>,
    existing: Query<Entity, With<ProgressBarBackground>>,
) {
    if !existing.is_empty() {
        return;
    }
    let width = config.tile_size;
    commands
        .spawn((
            ProgressBarBackground,
            Sprite {
                color: Color::srgba(0.0, 0.0, 0.0, 0.7),
                custom_size: Some(Vec2::new(width + 2.0, BAR_HEIGHT + 2.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, BAR_Z),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                ProgressBarFill,
                Sprite {
                    color: Color::srgb(0.95, 0.85, 0.3),
                    custom_size: Some(Vec2::new(0.0, BAR_HEIGHT)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
        });
}

pub fn despawn_progress_bar(
    mut commands: Commands,
    query: Query<Entity, With<ProgressBarBackground>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Width and x offset (from the bar's centre) of the fill for `progress`.
/// The fill grows from the left edge.
pub fn fill_geometry(bar_width: f32, progress: f32) -> (f32, f32) {
    let width = bar_width * progress.clamp(0.0, 1.0);
    (width, (width - bar_width) / 2.0)
}

pub fn update_progress_bar(
    current: Res<CurrentAction>,
    config: Res<FarmConfig>,
    mut bar_query: Query<(&mut Transform, &mut Visibility), (With<ProgressBarBackground>, Without<ProgressBarFill>)>,
    mut fill_query: Query<(&mut Transform, &mut Sprite), (With<ProgressBarFill>, Without<ProgressBarBackground>)>,
) {
    let Ok((mut bar_tf, mut visibility)) = bar_query.get_single_mut() else {
        return;
    };
    let Some(action) = current.get() else {
        *visibility = Visibility::Hidden;
        return;
    };

    let ts = config.tile_size;
    let above = tile_center(action.tile_x, action.tile_y, ts) + Vec2::new(0.0, ts * 0.65);
    bar_tf.translation = above.extend(BAR_Z);
    *visibility = Visibility::Inherited;

    if let Ok((mut fill_tf, mut sprite)) = fill_query.get_single_mut() {
        let (width, offset) = fill_geometry(ts, action.progress());
        sprite.custom_size = Some(Vec2::new(width, BAR_HEIGHT));
        fill_tf.translation.x = offset;
    }
}
