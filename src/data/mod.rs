//! Data layer — configuration and world bootstrap.
//!
//! `FarmConfig` is read from `farm_config.ron` (when present) while the
//! plugin is built, unless the app already carries one. On
//! `OnEnter(GameState::Loading)` the field, inventory, clock and RNG are
//! built from that config and the game moves on to `Playing`.
//!
//! Loading never fails the game: a missing, unreadable or invalid config
//! file is logged and the defaults are used instead.

use bevy::prelude::*;
use crate::farming::FarmField;
use crate::shared::*;

/// Looked up in the working directory.
pub const CONFIG_PATH: &str = "farm_config.ron";

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<FarmConfig>() {
            app.insert_resource(load_farm_config());
        }
        app.add_systems(Startup, apply_window_size)
            .add_systems(OnEnter(GameState::Loading), bootstrap_world);
    }
}

/// Parse and validate a RON config. Fields the file doesn't name keep
/// their defaults.
pub fn parse_config(source: &str) -> Result<FarmConfig, String> {
    let config: FarmConfig =
        ron::from_str(source).map_err(|e| format!("Parse failed: {}", e))?;
    config
        .validate()
        .map_err(|e| format!("Invalid config: {}", e))?;
    Ok(config)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_file() -> Result<Option<String>, String> {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(format!("Read failed for {}: {}", CONFIG_PATH, e)),
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_file() -> Result<Option<String>, String> {
    Ok(None)
}

/// Load `farm_config.ron`, falling back to defaults on any problem.
pub fn load_farm_config() -> FarmConfig {
    let text = match read_config_file() {
        Ok(Some(text)) => text,
        Ok(None) => {
            info!("[Data] No {} found, using default config", CONFIG_PATH);
            return FarmConfig::default();
        }
        Err(e) => {
            warn!("[Data] {}; using default config", e);
            return FarmConfig::default();
        }
    };
    match parse_config(&text) {
        Ok(config) => {
            info!("[Data] Loaded config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("[Data] {} in {}; using default config", e, CONFIG_PATH);
            FarmConfig::default()
        }
    }
}

fn apply_window_size(
    config: Res<FarmConfig>,
    mut window_query: Query<&mut Window, With<bevy::window::PrimaryWindow>>,
) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window
            .resolution
            .set(config.window_width, config.window_height);
    }
}

/// Build every piece of simulation state from the config, then start play.
fn bootstrap_world(
    mut commands: Commands,
    config: Res<FarmConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut rng = FarmRng::from_seed(config.seed);
    let field = FarmField::from_config(&config, &mut rng.0);
    let dry = field
        .iter()
        .filter(|(_, tile)| tile.ground == GroundBiome::DryGrass)
        .count();

    info!(
        "[Data] Field {}x{} ({} dry-grass tiles), seed {}",
        field.width(),
        field.height(),
        dry,
        config
            .seed
            .map_or_else(|| "from entropy".to_string(), |s| s.to_string()),
    );

    commands.insert_resource(field);
    commands.insert_resource(rng);
    commands.insert_resource(Inventory::with_seeds(config.starting_seeds));
    commands.insert_resource(DayClock::new(config.day_length));

    next_state.set(GameState::Playing);
}
