//! Context-menu options: the list of actions currently legal on a tile.

use bevy::prelude::*;

use crate::farming::FarmField;
use crate::shared::*;

use super::tile_in_range;

/// One validated entry of the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: &'static str,
    pub intent: FarmIntent,
}

/// Build the options for (x, y). Empty when the tile is out of bounds, out
/// of range, or nothing can be done there.
pub fn build_menu_options(
    field: &FarmField,
    inventory: &Inventory,
    player_pos: Vec2,
    x: i32,
    y: i32,
    config: &FarmConfig,
) -> Vec<MenuOption> {
    if !field.in_bounds(x, y) || !tile_in_range(player_pos, x, y, config) {
        return Vec::new();
    }

    let option = |label, kind| MenuOption {
        label,
        intent: FarmIntent {
            tile_x: x,
            tile_y: y,
            kind,
        },
    };

    let mut options = Vec::new();
    if field.can_dig(x, y) {
        options.push(option("Dig a bed", IntentKind::Dig));
    }
    for kind in CropKind::ALL {
        if field.can_plant(x, y, kind, inventory) {
            options.push(option(plant_label(kind), IntentKind::Plant(kind)));
        }
    }
    if field.can_harvest(x, y) {
        options.push(option("Harvest", IntentKind::Harvest));
    }
    options
}

fn plant_label(kind: CropKind) -> &'static str {
    match kind {
        CropKind::Wheat => "Plant wheat",
        CropKind::Tomato => "Plant tomato",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(options: &[MenuOption]) -> Vec<IntentKind> {
        options.iter().map(|o| o.intent.kind).collect()
    }

    #[test]
    fn test_bare_tile_offers_dig_only() {
        let field = FarmField::blank(10, 10, TILE_SIZE);
        let inv = Inventory::default();
        let pos = tile_center(5, 5, TILE_SIZE);
        let options = build_menu_options(&field, &inv, pos, 5, 5, &FarmConfig::default());
        assert_eq!(kinds(&options), vec![IntentKind::Dig]);
        assert_eq!(options[0].intent.tile_x, 5);
    }

    #[test]
    fn test_soil_offers_plant_per_available_seed() {
        let mut field = FarmField::blank(10, 10, TILE_SIZE);
        let mut inv = Inventory::with_seeds(1);
        field.dig(5, 5);
        let pos = tile_center(5, 5, TILE_SIZE);
        let cfg = FarmConfig::default();

        let options = build_menu_options(&field, &inv, pos, 5, 5, &cfg);
        assert_eq!(
            kinds(&options),
            vec![
                IntentKind::Plant(CropKind::Wheat),
                IntentKind::Plant(CropKind::Tomato)
            ]
        );

        inv.use_seed(CropKind::Wheat);
        let options = build_menu_options(&field, &inv, pos, 5, 5, &cfg);
        assert_eq!(kinds(&options), vec![IntentKind::Plant(CropKind::Tomato)]);
    }

    #[test]
    fn test_mature_crop_offers_harvest() {
        let mut field = FarmField::blank(10, 10, TILE_SIZE);
        let mut inv = Inventory::default();
        field.dig(2, 2);
        field.plant(2, 2, CropKind::Wheat, &mut inv);
        let pos = tile_center(2, 2, TILE_SIZE);
        let cfg = FarmConfig::default();
        assert!(build_menu_options(&field, &inv, pos, 2, 2, &cfg).is_empty());
        for _ in 0..4 {
            field.update(12.0);
        }
        let options = build_menu_options(&field, &inv, pos, 2, 2, &cfg);
        assert_eq!(kinds(&options), vec![IntentKind::Harvest]);
    }

    #[test]
    fn test_out_of_range_or_bounds_is_empty() {
        let field = FarmField::blank(10, 10, TILE_SIZE);
        let inv = Inventory::default();
        let cfg = FarmConfig::default();
        let pos = tile_center(0, 0, TILE_SIZE);
        assert!(build_menu_options(&field, &inv, pos, 9, 9, &cfg).is_empty());
        assert!(build_menu_options(&field, &inv, pos, -1, 0, &cfg).is_empty());
    }
}
