//! Calendar domain — the simulation clock.
//!
//! Responsible for:
//! - Advancing `global_time` every simulated frame
//! - Wrapping `time_of_day` around the day length
//! - Driving the day/night tint overlay (see `lighting`)
//!
//! The clock never feeds back into farming; crops grow on frame deltas,
//! not on the time of day.

pub mod lighting;

use bevy::prelude::*;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayClock>()
            .add_systems(
                Update,
                tick_day_clock
                    .in_set(SimSet::Clock)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::Playing), lighting::spawn_day_night_overlay)
            .add_systems(OnExit(GameState::Playing), lighting::despawn_day_night_overlay)
            .add_systems(
                PostUpdate,
                lighting::update_day_night_tint.run_if(in_state(GameState::Playing)),
            );
    }
}

// ─── Main time-tick system ────────────────────────────────────────────────────

/// Advances the clock by the frame's real delta.
pub fn tick_day_clock(time: Res<Time>, mut clock: ResMut<DayClock>) {
    let was = clock.time_of_day;
    clock.advance(time.delta_secs());
    if clock.time_of_day < was {
        info!("[Calendar] New day after {:.0}s of play", clock.global_time);
    }
}
