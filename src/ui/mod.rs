mod hud;
mod action_menu;
mod toast;
mod progress;

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use crate::shared::*;

pub use action_menu::ActionMenu;
pub use hud::clock_label;
pub use toast::harvest_toast_message;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionMenu>().add_event::<ToastEvent>();

        // ─── HUD — visible during Playing state ───
        app.add_systems(
            OnEnter(GameState::Playing),
            (
                hud::spawn_hud,
                toast::spawn_toast_container,
                progress::spawn_progress_bar,
            ),
        );
        app.add_systems(
            OnExit(GameState::Playing),
            (
                hud::despawn_hud,
                toast::despawn_toast_container,
                progress::despawn_progress_bar,
                action_menu::close_action_menu,
            ),
        );
        app.add_systems(
            Update,
            (
                hud::handle_seed_buttons,
                hud::update_inventory_display,
                hud::update_seed_buttons,
                hud::update_clock_display,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

        // ─── CONTEXT MENU — intents must land before the simulation reads them ───
        app.add_systems(
            Update,
            (
                action_menu::handle_menu_buttons,
                action_menu::close_menu_on_click,
                action_menu::open_action_menu,
                action_menu::close_menu_or_quit,
            )
                .chain()
                .before(SimSet::Intents)
                .run_if(in_state(GameState::Playing)),
        );

        // ─── TOASTS ───
        app.add_systems(
            Update,
            (
                toast::wire_harvest_toasts,
                toast::handle_toast_events,
                toast::update_toasts,
            )
                .chain()
                .after(SimSet::Growth)
                .run_if(in_state(GameState::Playing)),
        );

        // ─── ACTION PROGRESS — world-space, follows the simulation ───
        app.add_systems(
            PostUpdate,
            progress::update_progress_bar
                .before(TransformSystem::TransformPropagate)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
