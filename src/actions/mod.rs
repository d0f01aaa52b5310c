//! Action core — turns tile intents into world mutations.
//!
//! Every request is range-gated against the player's position and then
//! checked against the field. Planting resolves immediately; digging and
//! harvesting become a single timed `Action` that blocks movement until it
//! finishes. Only one action exists at a time: starting another replaces it.

use bevy::prelude::*;
use rand::Rng;

use crate::farming::FarmField;
use crate::shared::*;

pub mod menu;

pub use menu::{build_menu_options, MenuOption};

pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentAction>()
            .add_event::<FarmIntent>()
            .add_event::<ActionCompletedEvent>()
            .add_event::<CropHarvestedEvent>()
            .configure_sets(
                Update,
                (
                    SimSet::Intents,
                    SimSet::Clock,
                    SimSet::Movement,
                    SimSet::Action,
                    SimSet::Growth,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    handle_farm_intents.in_set(SimSet::Intents),
                    advance_current_action.in_set(SimSet::Action),
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ACTION STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub tile_x: i32,
    pub tile_y: i32,
    pub elapsed: f32,
    pub duration: f32,
}

impl Action {
    pub fn new(kind: ActionKind, tile_x: i32, tile_y: i32, duration: f32) -> Self {
        Self {
            kind,
            tile_x,
            tile_y,
            elapsed: 0.0,
            duration,
        }
    }

    /// Completion fraction in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration.max(0.001)).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// What a finished action did to the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub tile_x: i32,
    pub tile_y: i32,
    pub applied: bool,
    /// Crop and amount credited, for harvests that went through.
    pub harvest: Option<(CropKind, u32)>,
}

/// The player's single in-flight action, if any.
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentAction {
    pub action: Option<Action>,
}

impl CurrentAction {
    pub fn is_active(&self) -> bool {
        self.action.is_some()
    }

    pub fn get(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Begin digging (x, y). Rejected when out of range or the tile isn't bare.
    pub fn start_dig(
        &mut self,
        field: &FarmField,
        player_pos: Vec2,
        x: i32,
        y: i32,
        config: &FarmConfig,
    ) -> bool {
        if !tile_in_range(player_pos, x, y, config) || !field.can_dig(x, y) {
            return false;
        }
        self.begin(Action::new(ActionKind::Dig, x, y, config.dig_duration));
        true
    }

    /// Begin harvesting (x, y). Rejected when out of range or not mature.
    pub fn start_harvest(
        &mut self,
        field: &FarmField,
        player_pos: Vec2,
        x: i32,
        y: i32,
        config: &FarmConfig,
    ) -> bool {
        if !tile_in_range(player_pos, x, y, config) || !field.can_harvest(x, y) {
            return false;
        }
        self.begin(Action::new(ActionKind::Harvest, x, y, config.harvest_duration));
        true
    }

    fn begin(&mut self, action: Action) {
        if let Some(previous) = self.action.replace(action) {
            debug!(
                "[Actions] {:?} at ({}, {}) replaced after {:.2}s",
                previous.kind, previous.tile_x, previous.tile_y, previous.elapsed
            );
        }
    }

    /// Tick the active action. When its timer runs out the matching field
    /// command is applied and the slot is cleared.
    ///
    /// Start-time validation is trusted; the field command re-checks the
    /// tile anyway, so a tile that changed meanwhile is left as it is and
    /// reported with `applied: false`.
    pub fn advance(
        &mut self,
        dt: f32,
        field: &mut FarmField,
        inventory: &mut Inventory,
        rng: &mut impl Rng,
    ) -> Option<ActionOutcome> {
        let action = self.action.as_mut()?;
        action.elapsed += dt;
        if !action.is_finished() {
            return None;
        }
        let action = self.action.take()?;
        let (x, y) = (action.tile_x, action.tile_y);

        let outcome = match action.kind {
            ActionKind::Dig => ActionOutcome {
                kind: action.kind,
                tile_x: x,
                tile_y: y,
                applied: field.dig(x, y),
                harvest: None,
            },
            ActionKind::Harvest => {
                let crop = field.tile(x, y).and_then(|t| t.crop_kind());
                let harvest = crop.zip(field.harvest(x, y, inventory, rng));
                ActionOutcome {
                    kind: action.kind,
                    tile_x: x,
                    tile_y: y,
                    applied: harvest.is_some(),
                    harvest,
                }
            }
        };
        Some(outcome)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RANGE GATE & INSTANT ACTIONS
// ═══════════════════════════════════════════════════════════════════════

/// Euclidean distance from the player to the tile's centre must be within
/// `interact_range_tiles` tiles.
pub fn tile_in_range(player_pos: Vec2, x: i32, y: i32, config: &FarmConfig) -> bool {
    let center = tile_center(x, y, config.tile_size);
    player_pos.distance(center) <= config.interact_range_tiles * config.tile_size
}

/// Plant `kind` at (x, y) immediately. Range-gated, then delegated to the field.
pub fn start_plant(
    field: &mut FarmField,
    inventory: &mut Inventory,
    player_pos: Vec2,
    x: i32,
    y: i32,
    kind: CropKind,
    config: &FarmConfig,
) -> bool {
    if !tile_in_range(player_pos, x, y, config) {
        return false;
    }
    field.plant(x, y, kind, inventory)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Run condition: true while the player is free to move.
pub fn no_action_in_progress(current: Res<CurrentAction>) -> bool {
    !current.is_active()
}

pub fn handle_farm_intents(
    mut intents: EventReader<FarmIntent>,
    player_query: Query<&LogicalPosition, With<Player>>,
    config: Res<FarmConfig>,
    mut current: ResMut<CurrentAction>,
    mut field: ResMut<FarmField>,
    mut inventory: ResMut<Inventory>,
) {
    let Ok(player_pos) = player_query.get_single().map(|p| p.0) else {
        intents.clear();
        return;
    };

    for intent in intents.read() {
        let (x, y) = (intent.tile_x, intent.tile_y);
        let accepted = match intent.kind {
            IntentKind::Dig => current.start_dig(&field, player_pos, x, y, &config),
            IntentKind::Harvest => current.start_harvest(&field, player_pos, x, y, &config),
            IntentKind::Plant(kind) => {
                start_plant(&mut field, &mut inventory, player_pos, x, y, kind, &config)
            }
        };
        if accepted {
            info!("[Actions] {:?} started at ({}, {})", intent.kind, x, y);
        } else {
            debug!("[Actions] {:?} at ({}, {}) rejected", intent.kind, x, y);
        }
    }
}

pub fn advance_current_action(
    time: Res<Time>,
    mut current: ResMut<CurrentAction>,
    mut field: ResMut<FarmField>,
    mut inventory: ResMut<Inventory>,
    mut rng: ResMut<FarmRng>,
    mut completed_events: EventWriter<ActionCompletedEvent>,
    mut harvested_events: EventWriter<CropHarvestedEvent>,
) {
    if !current.is_active() {
        return;
    }
    let Some(outcome) = current.advance(time.delta_secs(), &mut field, &mut inventory, &mut rng.0)
    else {
        return;
    };

    info!(
        "[Actions] {:?} at ({}, {}) finished (applied: {})",
        outcome.kind, outcome.tile_x, outcome.tile_y, outcome.applied
    );
    completed_events.send(ActionCompletedEvent {
        kind: outcome.kind,
        tile_x: outcome.tile_x,
        tile_y: outcome.tile_y,
        applied: outcome.applied,
    });
    if let Some((crop, amount)) = outcome.harvest {
        info!("[Actions] Harvested {} {}", amount, crop.display_name());
        harvested_events.send(CropHarvestedEvent {
            crop,
            amount,
            tile_x: outcome.tile_x,
            tile_y: outcome.tile_y,
        });
    }
}
