//! Biome and seasonal color palettes, plus the node-state color tables.
//!
//! A seasonal palette is a pure function of (biome, season): a
//! season-specific per-channel tint applied over the base biome palette.
//! Nothing is cached; the tables are tiny.

use crate::foundation::core::Rgb;
use crate::model::contract::{Biome, NodeState, Season};

/// The four scene colors a biome contributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Terrain wash.
    pub ground: Rgb,
    /// Connecting path.
    pub path: Rgb,
    /// Ponds and water props.
    pub water: Rgb,
    /// Trees, buildings, biome accents.
    pub accent: Rgb,
}

/// Base palette for a biome, before seasonal tinting.
pub fn biome_palette(biome: Biome) -> Palette {
    match biome {
        Biome::Wilderness => Palette {
            ground: Rgb(0x4A7C3F),
            path: Rgb(0xC4A882),
            water: Rgb(0x4A90D9),
            accent: Rgb(0x2D5A1E),
        },
        Biome::Town => Palette {
            ground: Rgb(0x6B9E5A),
            path: Rgb(0xD4B896),
            water: Rgb(0x5BA3E6),
            accent: Rgb(0x8B4513),
        },
        Biome::Suburbs => Palette {
            ground: Rgb(0x7FB069),
            path: Rgb(0xE0C8A8),
            water: Rgb(0x6DB3F2),
            accent: Rgb(0x708090),
        },
        Biome::City => Palette {
            ground: Rgb(0x808080),
            path: Rgb(0xD0D0D0),
            water: Rgb(0x7BC3FF),
            accent: Rgb(0x2C2C2C),
        },
    }
}

fn season_tint(season: Season) -> (f64, f64, f64) {
    match season {
        Season::Spring => (0.0, 0.05, -0.05),
        Season::Summer => (0.05, 0.0, -0.08),
        Season::Fall => (0.1, -0.05, -0.12),
        Season::Winter => (-0.05, -0.03, 0.08),
    }
}

/// Palette for (biome, season): the seasonal tint applied per channel,
/// each channel clamped to [0, 255].
pub fn seasonal_palette(biome: Biome, season: Season) -> Palette {
    let base = biome_palette(biome);
    let (tr, tg, tb) = season_tint(season);
    Palette {
        ground: base.ground.tint(tr, tg, tb),
        path: base.path.tint(tr, tg, tb),
        water: base.water.tint(tr, tg, tb),
        accent: base.accent.tint(tr, tg, tb),
    }
}

/// Node circle fill per state.
pub fn node_fill(state: NodeState) -> Rgb {
    match state {
        NodeState::Locked => Rgb(0xD1D1D1),
        NodeState::Unlocked => Rgb(0xFFFFFF),
        NodeState::InProgress => Rgb(0xFFB200),
        NodeState::Completed => Rgb(0x34C759),
        NodeState::Skipped => Rgb(0xA0A0A0),
    }
}

/// Node circle border per state.
pub fn node_border(state: NodeState) -> Rgb {
    match state {
        NodeState::Locked => Rgb(0x999999),
        NodeState::Unlocked => Rgb(0x0A84FF),
        NodeState::InProgress => Rgb(0xFF8C00),
        NodeState::Completed => Rgb(0x228B22),
        NodeState::Skipped => Rgb(0x808080),
    }
}

/// Path stroke for segments whose start node is completed.
pub const PATH_COMPLETED: Rgb = Rgb(0x8B7355);

#[cfg(test)]
#[path = "../../tests/unit/theme/palette.rs"]
mod tests;
