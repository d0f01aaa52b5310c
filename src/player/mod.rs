mod movement;
mod spawn;
pub mod camera;

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use crate::actions::no_action_in_progress;
use crate::shared::*;

pub use camera::CameraZoom;
pub use movement::{player_movement, step_position};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraZoom>();

        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Locomotion is part of the simulation tick and is suspended
        //    for as long as a timed action is in progress --
        app.add_systems(
            Update,
            movement::player_movement
                .in_set(SimSet::Movement)
                .run_if(no_action_in_progress)
                .run_if(in_state(GameState::Playing)),
        );

        // -- Presentation: sprite, pose, camera --
        app.add_systems(
            PostUpdate,
            (
                movement::sync_player_sprite,
                camera::apply_zoom_input,
                camera::camera_follow_player,
            )
                .chain()
                .before(TransformSystem::TransformPropagate)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Spawn the main 2D camera. Runs at Startup so UI has a target even
/// while loading.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
