use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS — used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudClockText;

/// Seed and harvest counts for one crop.
#[derive(Component)]
pub struct HudCropText {
    pub kind: CropKind,
}

/// Clickable seed selector.
#[derive(Component)]
pub struct SeedButton {
    pub kind: CropKind,
}

const PANEL_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
const BUTTON_IDLE: Color = Color::srgba(0.15, 0.12, 0.1, 0.85);
const BUTTON_HOVER: Color = Color::srgba(0.22, 0.18, 0.14, 0.9);
const BUTTON_SELECTED: Color = Color::srgba(0.3, 0.25, 0.15, 0.95);
const BORDER_IDLE: Color = Color::srgba(0.4, 0.35, 0.3, 0.8);
const BORDER_SELECTED: Color = Color::srgb(1.0, 0.84, 0.0);

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, existing: Query<Entity, With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    // Full-screen root; never blocks clicks
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ─── TOP BAR: clock + counts ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(40.0),
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(24.0),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(PANEL_BG),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|top_bar| {
                    top_bar.spawn((
                        HudClockText,
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.95, 0.8)),
                        PickingBehavior::IGNORE,
                    ));
                    for kind in CropKind::ALL {
                        top_bar.spawn((
                            HudCropText { kind },
                            Text::new(""),
                            TextFont {
                                font_size: 15.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                            PickingBehavior::IGNORE,
                        ));
                    }
                });

            // ─── BOTTOM: seed selector ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::Center,
                        column_gap: Val::Px(8.0),
                        padding: UiRect::all(Val::Px(10.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    for (i, kind) in CropKind::ALL.into_iter().enumerate() {
                        spawn_seed_button(bar, i + 1, kind);
                    }
                });
        });
}

fn spawn_seed_button(parent: &mut ChildBuilder, hotkey: usize, kind: CropKind) {
    parent
        .spawn((
            SeedButton { kind },
            Button,
            Node {
                width: Val::Px(120.0),
                height: Val::Px(34.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            BorderColor(BORDER_IDLE),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(format!("[{}] {}", hotkey, kind.display_name())),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PickingBehavior::IGNORE,
            ));
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_seed_buttons(
    buttons: Query<(&Interaction, &SeedButton), Changed<Interaction>>,
    mut inventory: ResMut<Inventory>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed && inventory.selected_seed != button.kind {
            inventory.selected_seed = button.kind;
            debug!("[Ui] Selected {} seeds", button.kind.display_name());
        }
    }
}

pub fn update_inventory_display(
    inventory: Res<Inventory>,
    mut query: Query<(&HudCropText, &mut Text)>,
) {
    if !inventory.is_changed() {
        return;
    }
    for (crop_text, mut text) in &mut query {
        let kind = crop_text.kind;
        **text = format!(
            "{}: {} seeds, {} harvested",
            kind.display_name(),
            inventory.seeds(kind),
            inventory.harvested(kind)
        );
    }
}

/// Highlight the selected seed's button.
pub fn update_seed_buttons(
    inventory: Res<Inventory>,
    mut query: Query<(&SeedButton, &Interaction, &mut BackgroundColor, &mut BorderColor)>,
) {
    for (button, interaction, mut bg, mut border) in &mut query {
        let selected = button.kind == inventory.selected_seed;
        bg.0 = match (selected, interaction) {
            (true, _) => BUTTON_SELECTED,
            (false, Interaction::Hovered) => BUTTON_HOVER,
            (false, _) => BUTTON_IDLE,
        };
        border.0 = if selected { BORDER_SELECTED } else { BORDER_IDLE };
    }
}

pub fn update_clock_display(clock: Res<DayClock>, mut query: Query<&mut Text, With<HudClockText>>) {
    for mut text in &mut query {
        **text = clock_label(&clock);
    }
}

/// "Day N  HH:MM", with the day starting at 06:00.
pub fn clock_label(clock: &DayClock) -> String {
    let day = (clock.global_time / clock.day_length.max(f32::EPSILON)).floor() as u32 + 1;
    let minutes = ((clock.day_fraction() * 24.0 * 60.0) as u32 + 6 * 60) % (24 * 60);
    format!("Day {}  {:02}:{:02}", day, minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_label_starts_at_six() {
        let clock = DayClock::new(120.0);
        assert_eq!(clock_label(&clock), "Day 1  06:00");
    }

    #[test]
    fn test_clock_label_wraps_past_midnight() {
        let mut clock = DayClock::new(120.0);
        // 3/4 of the day: 06:00 + 18h = 00:00.
        clock.advance(90.0);
        assert_eq!(clock_label(&clock), "Day 1  00:00");
        clock.advance(30.0);
        assert_eq!(clock_label(&clock), "Day 2  06:00");
    }
}
