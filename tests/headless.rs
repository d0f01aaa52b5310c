//! Headless integration tests for Farmstead.
//!
//! These tests exercise the simulation's ECS wiring without a window or
//! GPU. They use Bevy's `MinimalPlugins` with a fixed 250 ms frame so
//! timers land exactly, register only the pure-logic systems (skipping
//! all rendering/UI), and drive the game through `FarmIntent` events the
//! way the context menu does.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use farmstead::actions::{no_action_in_progress, ActionsPlugin, CurrentAction};
use farmstead::calendar::tick_day_clock;
use farmstead::data::DataPlugin;
use farmstead::farming::{grow_crops, Cultivation, FarmField};
use farmstead::player::player_movement;
use farmstead::shared::*;

/// Seconds per test frame.
const FRAME: f32 = 0.25;

/// Frames for one growth stage at the default stage time.
const FRAMES_PER_STAGE: usize = 48;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

fn test_config() -> FarmConfig {
    FarmConfig {
        grid_width: 20,
        grid_height: 20,
        seed: Some(42),
        ..default()
    }
}

/// Builds a minimal Bevy app with the simulation systems registered but
/// NO rendering, windowing, or input polling. `PlayerInput` is written
/// directly by the tests.
fn build_test_app(config: FarmConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.insert_resource(config)
        .init_resource::<PlayerInput>()
        .init_resource::<Inventory>()
        .init_resource::<FarmRng>()
        .init_resource::<DayClock>()
        .init_resource::<FarmField>();

    // ── Simulation ───────────────────────────────────────────────────────
    app.add_plugins((DataPlugin, ActionsPlugin));
    app.add_systems(
        Update,
        (
            tick_day_clock.in_set(SimSet::Clock),
            player_movement
                .in_set(SimSet::Movement)
                .run_if(no_action_in_progress),
            grow_crops.in_set(SimSet::Growth),
        )
            .run_if(in_state(GameState::Playing)),
    );

    app
}

/// Ticks through Loading into Playing and drops the player on the centre
/// of `tile`.
fn boot_with_player_at(app: &mut App, tile: (i32, i32)) -> Entity {
    // First update enters Loading and builds the world; second applies NextState.
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing,
        "Expected to reach Playing after bootstrap"
    );

    let ts = app.world().resource::<FarmConfig>().tile_size;
    app.world_mut()
        .spawn((
            Player,
            PlayerMovement::default(),
            LogicalPosition(tile_center(tile.0, tile.1, ts)),
        ))
        .id()
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn send_intent(app: &mut App, tile_x: i32, tile_y: i32, kind: IntentKind) {
    app.world_mut().send_event(FarmIntent {
        tile_x,
        tile_y,
        kind,
    });
}

fn cultivation_at(app: &App, x: i32, y: i32) -> Option<Cultivation> {
    app.world()
        .resource::<FarmField>()
        .tile(x, y)
        .map(|t| t.cultivation())
}

fn stage_at(app: &App, x: i32, y: i32) -> u8 {
    app.world()
        .resource::<FarmField>()
        .tile(x, y)
        .map_or(0, |t| t.growth_stage())
}

fn action_active(app: &App) -> bool {
    app.world().resource::<CurrentAction>().is_active()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boot_builds_world_from_config() {
    let mut app = build_test_app(FarmConfig {
        grid_width: 30,
        grid_height: 12,
        starting_seeds: 7,
        ..test_config()
    });
    boot_with_player_at(&mut app, (0, 0));

    let field = app.world().resource::<FarmField>();
    assert_eq!((field.width(), field.height()), (30, 12));
    assert!(field.iter().all(|(_, t)| t.cultivation() == Cultivation::Bare));

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.seeds(CropKind::Wheat), 7);
    assert_eq!(inventory.seeds(CropKind::Tomato), 7);
    assert_eq!(inventory.harvested(CropKind::Wheat), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Full lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_dig_plant_grow_harvest_replant() {
    let mut app = build_test_app(test_config());
    boot_with_player_at(&mut app, (10, 10));

    // ── Dig: 1.5 s = 6 frames ──
    send_intent(&mut app, 11, 10, IntentKind::Dig);
    run_frames(&mut app, 5);
    assert!(action_active(&app));
    assert_eq!(cultivation_at(&app, 11, 10), Some(Cultivation::Bare));
    run_frames(&mut app, 1);
    assert!(!action_active(&app));
    assert_eq!(cultivation_at(&app, 11, 10), Some(Cultivation::Soil));

    // ── Plant: instant ──
    send_intent(&mut app, 11, 10, IntentKind::Plant(CropKind::Wheat));
    run_frames(&mut app, 1);
    assert!(!action_active(&app), "Planting must not start a timed action");
    assert_eq!(cultivation_at(&app, 11, 10), Some(Cultivation::Crop));
    assert_eq!(stage_at(&app, 11, 10), 1);
    assert_eq!(app.world().resource::<Inventory>().seeds(CropKind::Wheat), 3);

    // The planting frame already counts towards the first stage.
    run_frames(&mut app, FRAMES_PER_STAGE - 2);
    assert_eq!(stage_at(&app, 11, 10), 1);
    run_frames(&mut app, 1);
    assert_eq!(stage_at(&app, 11, 10), 2);

    // Three more stages to maturity.
    run_frames(&mut app, FRAMES_PER_STAGE * 3 - 1);
    assert_eq!(stage_at(&app, 11, 10), 4);
    run_frames(&mut app, 1);
    assert_eq!(stage_at(&app, 11, 10), MAX_GROWTH_STAGE);

    // Mature crops stay put.
    run_frames(&mut app, FRAMES_PER_STAGE);
    assert_eq!(stage_at(&app, 11, 10), MAX_GROWTH_STAGE);

    // ── Harvest: 2.0 s = 8 frames ──
    send_intent(&mut app, 11, 10, IntentKind::Harvest);
    run_frames(&mut app, 7);
    assert!(action_active(&app));
    assert_eq!(cultivation_at(&app, 11, 10), Some(Cultivation::Crop));
    run_frames(&mut app, 1);
    assert!(!action_active(&app));
    assert_eq!(cultivation_at(&app, 11, 10), Some(Cultivation::Soil));

    let harvested = app.world().resource::<Inventory>().harvested(CropKind::Wheat);
    assert!(
        (1..=3).contains(&harvested),
        "Harvest yield {} outside 1..=3",
        harvested
    );

    // ── Replant on the same soil without digging ──
    send_intent(&mut app, 11, 10, IntentKind::Plant(CropKind::Tomato));
    run_frames(&mut app, 1);
    assert_eq!(stage_at(&app, 11, 10), 1);
    assert_eq!(app.world().resource::<Inventory>().seeds(CropKind::Tomato), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Range gate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_out_of_range_dig_is_ignored() {
    let mut app = build_test_app(test_config());
    boot_with_player_at(&mut app, (2, 2));

    send_intent(&mut app, 15, 15, IntentKind::Dig);
    run_frames(&mut app, 1);
    assert!(!action_active(&app));

    run_frames(&mut app, 10);
    assert_eq!(cultivation_at(&app, 15, 15), Some(Cultivation::Bare));
}

#[test]
fn test_out_of_range_plant_keeps_seed() {
    let mut app = build_test_app(test_config());
    boot_with_player_at(&mut app, (2, 2));
    app.world_mut().resource_mut::<FarmField>().dig(15, 15);

    send_intent(&mut app, 15, 15, IntentKind::Plant(CropKind::Wheat));
    run_frames(&mut app, 1);
    assert_eq!(cultivation_at(&app, 15, 15), Some(Cultivation::Soil));
    assert_eq!(app.world().resource::<Inventory>().seeds(CropKind::Wheat), 4);
}

#[test]
fn test_out_of_range_harvest_is_ignored() {
    let mut app = build_test_app(test_config());
    boot_with_player_at(&mut app, (2, 2));
    app.world_mut()
        .resource_scope(|world, mut field: Mut<FarmField>| {
            let mut inventory = world.resource_mut::<Inventory>();
            assert!(field.dig(15, 15));
            assert!(field.plant(15, 15, CropKind::Wheat, &mut inventory));
            for _ in 0..4 {
                field.update(12.0);
            }
        });
    assert_eq!(stage_at(&app, 15, 15), MAX_GROWTH_STAGE);

    send_intent(&mut app, 15, 15, IntentKind::Harvest);
    run_frames(&mut app, 1);
    assert!(!action_active(&app));

    run_frames(&mut app, 10);
    assert_eq!(stage_at(&app, 15, 15), MAX_GROWTH_STAGE);
    assert_eq!(app.world().resource::<Inventory>().harvested(CropKind::Wheat), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Action / movement interplay
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_movement_suspended_while_acting() {
    let mut app = build_test_app(test_config());
    let player = boot_with_player_at(&mut app, (10, 10));
    let start = app.world().get::<LogicalPosition>(player).map(|p| p.0);

    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::X;
    send_intent(&mut app, 10, 11, IntentKind::Dig);

    // Includes the completion frame: movement runs before the action advances.
    run_frames(&mut app, 6);
    assert!(!action_active(&app));
    assert_eq!(app.world().get::<LogicalPosition>(player).map(|p| p.0), start);

    run_frames(&mut app, 1);
    let moved = app.world().get::<LogicalPosition>(player).map(|p| p.0);
    let expected = start.map(|s| s + Vec2::new(PLAYER_SPEED * FRAME, 0.0));
    assert_eq!(moved, expected);
}

#[test]
fn test_growth_continues_during_action() {
    let mut app = build_test_app(FarmConfig {
        dig_duration: 20.0,
        ..test_config()
    });
    boot_with_player_at(&mut app, (10, 10));

    app.world_mut()
        .resource_scope(|world, mut field: Mut<FarmField>| {
            let mut inventory = world.resource_mut::<Inventory>();
            assert!(field.dig(9, 10));
            assert!(field.plant(9, 10, CropKind::Tomato, &mut inventory));
        });

    send_intent(&mut app, 11, 10, IntentKind::Dig);
    run_frames(&mut app, FRAMES_PER_STAGE);
    assert!(action_active(&app), "A 20 s dig should still be running");
    assert_eq!(stage_at(&app, 9, 10), 2);
}

#[test]
fn test_new_intent_replaces_running_action() {
    let mut app = build_test_app(test_config());
    boot_with_player_at(&mut app, (10, 10));

    send_intent(&mut app, 10, 11, IntentKind::Dig);
    run_frames(&mut app, 3);
    send_intent(&mut app, 11, 10, IntentKind::Dig);
    run_frames(&mut app, 5);
    // The first dig would have finished by now had it not been replaced.
    assert_eq!(cultivation_at(&app, 10, 11), Some(Cultivation::Bare));
    assert!(action_active(&app));

    run_frames(&mut app, 1);
    assert_eq!(cultivation_at(&app, 11, 10), Some(Cultivation::Soil));
    assert_eq!(cultivation_at(&app, 10, 11), Some(Cultivation::Bare));
}

// ─────────────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_day_clock_wraps() {
    let mut app = build_test_app(test_config());
    boot_with_player_at(&mut app, (0, 0));
    app.world_mut().insert_resource(DayClock::new(2.0));

    run_frames(&mut app, 9);
    let clock = app.world().resource::<DayClock>();
    assert_eq!(clock.global_time, 2.25);
    assert_eq!(clock.time_of_day, 0.25);
}
