//! Right-click context menu: lists the actions legal on the clicked tile
//! and turns a click on one of them into a `FarmIntent`.

use bevy::prelude::*;
use crate::actions::{build_menu_options, MenuOption};
use crate::farming::FarmField;
use crate::shared::*;

/// The open menu, if any. `options` is fixed when the menu opens.
#[derive(Resource, Debug, Default)]
pub struct ActionMenu {
    pub root: Option<Entity>,
    pub options: Vec<MenuOption>,
}

impl ActionMenu {
    pub fn is_open(&self) -> bool {
        self.root.is_some()
    }
}

#[derive(Component)]
pub struct ActionMenuButton {
    pub index: usize,
}

const MENU_BG: Color = Color::srgba(0.08, 0.07, 0.06, 0.92);
const OPTION_IDLE: Color = Color::srgba(0.18, 0.15, 0.12, 1.0);
const OPTION_HOVER: Color = Color::srgba(0.32, 0.27, 0.18, 1.0);

pub fn open_action_menu(
    mut commands: Commands,
    input: Res<PlayerInput>,
    field: Res<FarmField>,
    inventory: Res<Inventory>,
    config: Res<FarmConfig>,
    player_query: Query<&LogicalPosition, With<Player>>,
    mut menu: ResMut<ActionMenu>,
) {
    if !input.open_menu {
        return;
    }
    let (Some(cursor_world), Some(cursor_screen)) = (input.cursor_world, input.cursor_screen)
    else {
        return;
    };
    let Ok(player_pos) = player_query.get_single() else {
        return;
    };

    despawn_menu(&mut commands, &mut menu);

    let (x, y) = world_to_tile(cursor_world, field.tile_size());
    let options = build_menu_options(&field, &inventory, player_pos.0, x, y, &config);
    if options.is_empty() {
        debug!("[Ui] Nothing to do at ({}, {})", x, y);
        return;
    }

    let root = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(cursor_screen.x),
                top: Val::Px(cursor_screen.y),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(2.0),
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(MENU_BG),
            ZIndex(10),
        ))
        .with_children(|parent| {
            for (index, option) in options.iter().enumerate() {
                parent
                    .spawn((
                        ActionMenuButton { index },
                        Button,
                        Node {
                            min_width: Val::Px(130.0),
                            padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
                            ..default()
                        },
                        BackgroundColor(OPTION_IDLE),
                    ))
                    .with_children(|btn| {
                        btn.spawn((
                            Text::new(option.label),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                            PickingBehavior::IGNORE,
                        ));
                    });
            }
        })
        .id();

    menu.root = Some(root);
    menu.options = options;
}

/// A pressed option sends its intent. The menu closes on the same click.
pub fn handle_menu_buttons(
    menu: Res<ActionMenu>,
    mut buttons: Query<(&Interaction, &ActionMenuButton, &mut BackgroundColor), Changed<Interaction>>,
    mut intents: EventWriter<FarmIntent>,
) {
    for (interaction, button, mut bg) in &mut buttons {
        match interaction {
            Interaction::Pressed => {
                if let Some(option) = menu.options.get(button.index) {
                    intents.send(option.intent);
                }
            }
            Interaction::Hovered => bg.0 = OPTION_HOVER,
            Interaction::None => bg.0 = OPTION_IDLE,
        }
    }
}

pub fn close_menu_on_click(
    mut commands: Commands,
    input: Res<PlayerInput>,
    mut menu: ResMut<ActionMenu>,
) {
    if input.primary_click && menu.is_open() {
        despawn_menu(&mut commands, &mut menu);
    }
}

/// `Esc` closes the menu when one is open, otherwise quits.
pub fn close_menu_or_quit(
    mut commands: Commands,
    input: Res<PlayerInput>,
    mut menu: ResMut<ActionMenu>,
    mut exit: EventWriter<AppExit>,
) {
    if !input.cancel {
        return;
    }
    if menu.is_open() {
        despawn_menu(&mut commands, &mut menu);
    } else {
        info!("[Ui] Quit requested");
        exit.send(AppExit::Success);
    }
}

pub fn close_action_menu(mut commands: Commands, mut menu: ResMut<ActionMenu>) {
    despawn_menu(&mut commands, &mut menu);
}

fn despawn_menu(commands: &mut Commands, menu: &mut ActionMenu) {
    if let Some(root) = menu.root.take() {
        commands.entity(root).despawn_recursive();
    }
    menu.options.clear();
}
