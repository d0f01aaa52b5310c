use bevy::prelude::*;
use crate::shared::*;

/// Current camera zoom. 1.0 = one world pixel per screen pixel; larger
/// values zoom in.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraZoom {
    pub level: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { level: 1.0 }
    }
}

/// Apply `steps` wheel notches of `step` each, clamped to `[min, max]`.
pub fn zoom_by(level: f32, steps: f32, step: f32, min: f32, max: f32) -> f32 {
    (level + step * steps).clamp(min, max)
}

/// Clamp a camera centre so a view of `half_view` half-extents never shows
/// past the map. Axes where the map is smaller than the view are centred.
pub fn clamp_camera_center(target: Vec2, half_view: Vec2, map_size: Vec2) -> Vec2 {
    let axis = |t: f32, half: f32, size: f32| {
        if size <= half * 2.0 {
            size / 2.0
        } else {
            t.clamp(half, size - half)
        }
    };
    Vec2::new(
        axis(target.x, half_view.x, map_size.x),
        axis(target.y, half_view.y, map_size.y),
    )
}

pub fn apply_zoom_input(
    input: Res<PlayerInput>,
    config: Res<FarmConfig>,
    mut zoom: ResMut<CameraZoom>,
    mut projection_query: Query<&mut OrthographicProjection, With<Camera2d>>,
) {
    if input.zoom_steps != 0.0 {
        zoom.level = zoom_by(
            zoom.level,
            input.zoom_steps,
            config.zoom_step,
            config.zoom_min,
            config.zoom_max,
        );
    }
    if !zoom.is_changed() {
        return;
    }
    for mut projection in &mut projection_query {
        projection.scale = 1.0 / zoom.level;
    }
}

/// Centre the camera on the player, clamped to map bounds.
pub fn camera_follow_player(
    config: Res<FarmConfig>,
    player_query: Query<&LogicalPosition, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<(&mut Transform, &OrthographicProjection), (With<Camera2d>, Without<Player>)>,
) {
    let Ok(logical_pos) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, projection)) = camera_query.get_single_mut() else {
        return;
    };

    // `area` is already in world units (viewport × scale).
    let half_view = Vec2::new(projection.area.width(), projection.area.height()) / 2.0;
    let map_size = Vec2::new(config.world_width_px(), config.world_height_px());
    let center = clamp_camera_center(logical_pos.0, half_view, map_size);

    cam_tf.translation.x = center.x.round();
    cam_tf.translation.y = center.y.round();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped() {
        assert!((zoom_by(1.0, 1.0, 0.1, 0.6, 2.0) - 1.1).abs() < 1e-6);
        assert_eq!(zoom_by(1.95, 3.0, 0.1, 0.6, 2.0), 2.0);
        assert_eq!(zoom_by(0.7, -5.0, 0.1, 0.6, 2.0), 0.6);
    }

    #[test]
    fn test_camera_clamps_to_map_edges() {
        let map = Vec2::splat(2400.0);
        let half = Vec2::new(640.0, 360.0);
        assert_eq!(clamp_camera_center(Vec2::new(10.0, 10.0), half, map), half);
        assert_eq!(
            clamp_camera_center(Vec2::new(2390.0, 1200.0), half, map),
            Vec2::new(1760.0, 1200.0)
        );
    }

    #[test]
    fn test_small_map_is_centred() {
        let map = Vec2::new(480.0, 2400.0);
        let half = Vec2::new(640.0, 360.0);
        let c = clamp_camera_center(Vec2::new(100.0, 1000.0), half, map);
        assert_eq!(c, Vec2::new(240.0, 1000.0));
    }
}
