//! Day/night cycle ambient tint overlay system.
//!
//! Spawns a full-screen UI overlay that tints the scene based on the
//! current fraction of the day read from the `DayClock` resource.
//! Smoothly interpolates between keyframed tint values.

use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker component for the full-screen day/night overlay entity.
#[derive(Component, Debug)]
pub struct DayNightOverlay;

// ═══════════════════════════════════════════════════════════════════════
// KEYFRAME DATA
// ═══════════════════════════════════════════════════════════════════════

/// A single keyframe for the day/night tint cycle.
struct TintKeyframe {
    tint: (f32, f32, f32),
    /// Overlay alpha (0.0 = invisible).
    alpha: f32,
}

/// Morning, day, evening, night, and morning again so the cycle wraps
/// smoothly. Keyframes are evenly spaced over the day.
static KEYFRAMES: [TintKeyframe; 5] = [
    TintKeyframe { tint: (1.0, 0.88, 0.75), alpha: 80.0 / 255.0 },   // morning
    TintKeyframe { tint: (1.0, 1.0, 1.0), alpha: 0.0 },              // day
    TintKeyframe { tint: (1.0, 0.67, 0.51), alpha: 100.0 / 255.0 },  // evening
    TintKeyframe { tint: (0.08, 0.16, 0.31), alpha: 160.0 / 255.0 }, // night
    TintKeyframe { tint: (1.0, 0.88, 0.75), alpha: 80.0 / 255.0 },   // morning
];

/// Linearly interpolate between two floats.
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample the tint for a day fraction in [0, 1). Returns (rgb, alpha).
pub fn sample_tint(day_fraction: f32) -> ((f32, f32, f32), f32) {
    let segments = (KEYFRAMES.len() - 1) as f32;
    let pos = day_fraction.rem_euclid(1.0) * segments;
    let i = (pos.floor() as usize).min(KEYFRAMES.len() - 2);
    let frac = pos - i as f32;

    let (a, b) = (&KEYFRAMES[i], &KEYFRAMES[i + 1]);
    let tint = (
        lerp_f32(a.tint.0, b.tint.0, frac),
        lerp_f32(a.tint.1, b.tint.1, frac),
        lerp_f32(a.tint.2, b.tint.2, frac),
    );
    (tint, lerp_f32(a.alpha, b.alpha, frac))
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Spawn the full-screen day/night overlay when entering Playing state.
pub fn spawn_day_night_overlay(mut commands: Commands) {
    commands.spawn((
        DayNightOverlay,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        // Start fully transparent
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        // Below the HUD and menus, above the world.
        ZIndex(-1),
        // Don't block mouse input
        PickingBehavior::IGNORE,
    ));
}

/// Despawn the overlay when leaving Playing state.
pub fn despawn_day_night_overlay(
    mut commands: Commands,
    query: Query<Entity, With<DayNightOverlay>>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

/// Every frame, update the overlay colour from the clock.
pub fn update_day_night_tint(
    clock: Res<DayClock>,
    mut overlay_query: Query<&mut BackgroundColor, With<DayNightOverlay>>,
) {
    let ((r, g, b), alpha) = sample_tint(clock.day_fraction());
    for mut bg in &mut overlay_query {
        *bg = BackgroundColor(Color::srgba(r, g, b, alpha));
    }
}
