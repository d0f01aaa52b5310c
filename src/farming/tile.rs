//! Single-cell tile state.
//!
//! Cultivation is a tagged variant so a crop's kind, stage, and timer only
//! exist while the tile is actually growing something.

use crate::shared::*;

/// Coarse cultivation state, for callers that don't care about crop fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cultivation {
    Bare,
    Soil,
    Crop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowingCrop {
    pub kind: CropKind,
    /// 1..=MAX_GROWTH_STAGE while planted.
    pub stage: u8,
    /// Seconds since the last stage advance.
    pub timer: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TileState {
    #[default]
    Bare,
    Soil,
    Crop(GrowingCrop),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tile {
    pub ground: GroundBiome,
    pub state: TileState,
}

impl Tile {
    pub fn new(ground: GroundBiome) -> Self {
        Self {
            ground,
            state: TileState::Bare,
        }
    }

    pub fn cultivation(&self) -> Cultivation {
        match self.state {
            TileState::Bare => Cultivation::Bare,
            TileState::Soil => Cultivation::Soil,
            TileState::Crop(_) => Cultivation::Crop,
        }
    }

    pub fn crop_kind(&self) -> Option<CropKind> {
        match self.state {
            TileState::Crop(crop) => Some(crop.kind),
            _ => None,
        }
    }

    /// 0 when nothing is planted.
    pub fn growth_stage(&self) -> u8 {
        match self.state {
            TileState::Crop(crop) => crop.stage,
            _ => 0,
        }
    }

    pub fn growth_timer(&self) -> f32 {
        match self.state {
            TileState::Crop(crop) => crop.timer,
            _ => 0.0,
        }
    }

    pub fn is_mature(&self) -> bool {
        self.growth_stage() >= MAX_GROWTH_STAGE
    }

    /// Back to tilled soil after a harvest. Ground biome is kept.
    pub fn reset_crop(&mut self) {
        self.state = TileState::Soil;
    }

    /// Add `dt` to a growing crop's timer and advance at most one stage.
    /// Returns true when the stage changed.
    pub fn grow(&mut self, dt: f32, stage_time: f32) -> bool {
        let TileState::Crop(crop) = &mut self.state else {
            return false;
        };
        if crop.stage == 0 || crop.stage >= MAX_GROWTH_STAGE {
            return false;
        }
        crop.timer += dt;
        if crop.timer < stage_time {
            return false;
        }
        crop.timer = 0.0;
        crop.stage = (crop.stage + 1).min(MAX_GROWTH_STAGE);
        true
    }
}
