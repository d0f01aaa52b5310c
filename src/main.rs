mod shared;
mod input;
mod calendar;
mod player;
mod farming;
mod actions;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Farmstead".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources; DataPlugin replaces them from config on Loading
        .init_resource::<Inventory>()
        .init_resource::<FarmRng>()
        // Config first: everything below reads it
        .add_plugins(data::DataPlugin)
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(actions::ActionsPlugin)
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, player::setup_camera)
        .run();
}
