//! One-time dry-grass patch scatter, run when the field is built.

use rand::Rng;

use crate::shared::*;

use super::tile::Tile;

const MIN_PATCHES: i32 = 4;
/// One patch per this many tiles, above the minimum.
const TILES_PER_PATCH: i32 = 150;
const MIN_RADIUS: i32 = 3;
const MAX_RADIUS: i32 = 7;

/// Number of patches stamped for a grid of the given size.
pub fn patch_count(width: i32, height: i32) -> i32 {
    let tiles = i64::from(width.max(0)) * i64::from(height.max(0));
    let count = i32::try_from(tiles / i64::from(TILES_PER_PATCH)).unwrap_or(i32::MAX);
    MIN_PATCHES.max(count)
}

/// Stamp circular dry-grass patches onto a row-major tile grid.
pub fn scatter_dry_grass(tiles: &mut [Tile], width: i32, height: i32, rng: &mut impl Rng) {
    if width <= 0 || height <= 0 {
        return;
    }
    for _ in 0..patch_count(width, height) {
        let cx = rng.gen_range(0..width);
        let cy = rng.gen_range(0..height);
        let radius = rng.gen_range(MIN_RADIUS..=MAX_RADIUS);
        stamp_circle(tiles, width, height, cx, cy, radius);
    }
}

fn stamp_circle(tiles: &mut [Tile], width: i32, height: i32, cx: i32, cy: i32, radius: i32) {
    for y in (cy - radius).max(0)..(cy + radius + 1).min(height) {
        for x in (cx - radius).max(0)..(cx + radius + 1).min(width) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            if let Some(tile) = tiles.get_mut((y * width + x) as usize) {
                tile.ground = GroundBiome::DryGrass;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_patch_count() {
        assert_eq!(patch_count(50, 50), 16);
        assert_eq!(patch_count(10, 10), 4);
        assert_eq!(patch_count(100_000, 100_000), 66_666_666);
    }

    #[test]
    fn test_stamp_is_circular_and_clipped() {
        let (w, h) = (10, 10);
        let mut tiles = vec![Tile::default(); (w * h) as usize];
        stamp_circle(&mut tiles, w, h, 0, 0, 3);
        let dry = |x: i32, y: i32| tiles[(y * w + x) as usize].ground == GroundBiome::DryGrass;
        assert!(dry(0, 0));
        assert!(dry(3, 0));
        assert!(dry(2, 2));
        // (3,3) is outside radius 3.
        assert!(!dry(3, 3));
        assert!(!dry(4, 0));
    }

    #[test]
    fn test_scatter_only_touches_ground() {
        let (w, h) = (50, 50);
        let mut tiles = vec![Tile::default(); (w * h) as usize];
        let mut rng = StdRng::seed_from_u64(99);
        scatter_dry_grass(&mut tiles, w, h, &mut rng);
        let dry = tiles.iter().filter(|t| t.ground == GroundBiome::DryGrass).count();
        assert!(dry > 0);
        assert!(tiles.iter().all(|t| t.growth_stage() == 0 && t.crop_kind().is_none()));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let (w, h) = (30, 20);
        let mut a = vec![Tile::default(); (w * h) as usize];
        let mut b = a.clone();
        scatter_dry_grass(&mut a, w, h, &mut StdRng::seed_from_u64(5));
        scatter_dry_grass(&mut b, w, h, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
