use bevy::input::mouse::MouseWheel;
use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use crate::farming::FarmField;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(
                PreUpdate,
                (reset_and_read_input, read_cursor)
                    .chain()
                    .after(InputSystem),
            )
            .add_systems(
                Update,
                (
                    toggle_fullscreen,
                    select_seed,
                    emit_quick_plant_intent.before(SimSet::Intents),
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    // Left unnormalised; movement normalises so diagonals aren't faster.
    input.move_axis = axis;

    input.open_menu = mouse.just_pressed(MouseButton::Right);
    input.primary_click = mouse.just_pressed(MouseButton::Left);
    input.quick_plant = keys.just_pressed(KeyCode::KeyF);
    input.toggle_fullscreen = fullscreen_pressed(&keys);
    input.cancel = keys.just_pressed(KeyCode::Escape);

    if keys.just_pressed(KeyCode::Digit1) {
        input.select_seed = Some(CropKind::Wheat);
    } else if keys.just_pressed(KeyCode::Digit2) {
        input.select_seed = Some(CropKind::Tomato);
    }

    // One zoom step per wheel notch, whatever the scroll unit.
    input.zoom_steps = wheel
        .read()
        .filter(|ev| ev.y != 0.0)
        .map(|ev| ev.y.signum())
        .sum();
}

/// `F11`, or `Alt+Enter`.
fn fullscreen_pressed(keys: &ButtonInput<KeyCode>) -> bool {
    let alt = keys.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]);
    keys.just_pressed(KeyCode::F11) || (alt && keys.just_pressed(KeyCode::Enter))
}

/// Cursor in screen space and, through the camera, in world space.
fn read_cursor(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut input: ResMut<PlayerInput>,
) {
    let Ok(window) = window_query.get_single() else {
        return;
    };
    input.cursor_screen = window.cursor_position();
    let (Some(cursor), Ok((camera, cam_tf))) = (input.cursor_screen, camera_query.get_single())
    else {
        return;
    };
    input.cursor_world = camera.viewport_to_world_2d(cam_tf, cursor).ok();
}

fn toggle_fullscreen(
    input: Res<PlayerInput>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !input.toggle_fullscreen {
        return;
    }
    let Ok(mut window) = window_query.get_single_mut() else {
        return;
    };
    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    };
    info!("[Input] Window mode -> {:?}", window.mode);
}

fn select_seed(input: Res<PlayerInput>, mut inventory: ResMut<Inventory>) {
    if let Some(kind) = input.select_seed {
        if inventory.selected_seed != kind {
            inventory.selected_seed = kind;
            debug!("[Input] Selected {} seeds", kind.display_name());
        }
    }
}

/// `F` plants the selected seed on the hovered tile. Only bounds are checked
/// here; range and tile state are the action core's job.
fn emit_quick_plant_intent(
    input: Res<PlayerInput>,
    inventory: Res<Inventory>,
    field: Res<FarmField>,
    mut intents: EventWriter<FarmIntent>,
) {
    if !input.quick_plant {
        return;
    }
    let Some(cursor) = input.cursor_world else {
        return;
    };
    let (tile_x, tile_y) = world_to_tile(cursor, field.tile_size());
    if !field.in_bounds(tile_x, tile_y) {
        return;
    }
    intents.send(FarmIntent {
        tile_x,
        tile_y,
        kind: IntentKind::Plant(inventory.selected_seed),
    });
}
