//! Harvest yield roll.

use rand::Rng;

/// Cumulative probability thresholds and the amount each bucket yields:
/// 50% → 1, 35% → 2, 15% → 3.
pub const HARVEST_DISTRIBUTION: [(f64, u32); 3] = [(0.50, 1), (0.85, 2), (1.00, 3)];

/// Draw a harvest amount: the first bucket whose cumulative threshold
/// covers a uniform draw in [0, 1).
pub fn roll_harvest_amount(rng: &mut impl Rng) -> u32 {
    let r: f64 = rng.gen();
    amount_for_draw(r)
}

fn amount_for_draw(r: f64) -> u32 {
    HARVEST_DISTRIBUTION
        .iter()
        .find(|(threshold, _)| r <= *threshold)
        .map(|&(_, amount)| amount)
        .unwrap_or(3)
}
