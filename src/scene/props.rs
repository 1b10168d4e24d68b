//! Deterministic scatter of decorative scenery along path segments.
//!
//! Placements are ephemeral: regenerated on every scene rebuild from
//! `(nodes, biome, seed)` through the crate's LCG, so the same journey
//! always grows the same forest.

use crate::display::container::Container;
use crate::display::graphics::Graphics;
use crate::display::pool::GraphicsPool;
use crate::foundation::core::Rgb;
use crate::foundation::rng::SeededRng;
use crate::model::contract::{Biome, PathNode, Season};
use crate::theme::palette::seasonal_palette;

/// Decoration kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    /// Trunk + canopy.
    Tree,
    /// Low shrub.
    Bush,
    /// Grey boulder.
    Rock,
    /// Five-petal flower.
    Flower,
    /// Multi-story facade.
    Building,
    /// Water ellipse.
    Pond,
    /// Park bench.
    Bench,
    /// Street lamp.
    Lamp,
}

/// One placed decoration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropPlacement {
    /// World x.
    pub x: f64,
    /// World y.
    pub y: f64,
    /// What to draw.
    pub kind: PropKind,
    /// Uniform scale, > 0.
    pub scale: f64,
}

/// Prop palette for a biome.
pub fn biome_props(biome: Biome) -> [PropKind; 5] {
    use PropKind::*;
    match biome {
        Biome::Wilderness => [Tree, Bush, Rock, Flower, Pond],
        Biome::Town => [Tree, Bush, Bench, Lamp, Flower],
        Biome::Suburbs => [Tree, Bush, Building, Bench, Flower],
        Biome::City => [Building, Lamp, Bench, Tree, Bush],
    }
}

/// Scatter 2–4 props beside every consecutive node pair, plus 4 extra
/// around the first and last node. Bit-identical for identical inputs.
pub fn generate_props(nodes: &[PathNode], biome: Biome, seed: u64) -> Vec<PropPlacement> {
    let kinds = biome_props(biome);
    let mut rng = SeededRng::new(seed);
    let mut props = Vec::new();

    for pair in nodes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);

        let count = 2 + (rng.next_f64() * 3.0) as usize;
        for _ in 0..count {
            let t = 0.15 + rng.next_f64() * 0.7;
            let px = a.x + (b.x - a.x) * t;
            let py = a.y + (b.y - a.y) * t;
            let side = if rng.next_bool() { 1.0 } else { -1.0 };
            let offset = 50.0 + rng.next_f64() * 60.0;
            let kind = kinds[rng.next_index(kinds.len())];

            props.push(PropPlacement {
                x: px + side * offset,
                y: py + (rng.next_f64() - 0.5) * 30.0,
                kind,
                scale: 0.6 + rng.next_f64() * 0.5,
            });
        }
    }

    for i in 0..4usize {
        let node = if i < 2 { nodes.first() } else { nodes.last() };
        let Some(node) = node else { continue };
        props.push(PropPlacement {
            x: node.x + (rng.next_f64() - 0.5) * 160.0,
            y: node.y + (rng.next_f64() - 0.5) * 100.0,
            kind: kinds[rng.next_index(kinds.len())],
            scale: 0.5 + rng.next_f64() * 0.6,
        });
    }

    props
}

/// Append one drawable per placement to `container`, colored from the
/// seasonal palette. Props render at alpha 0.6 so they recede behind
/// the interactive nodes.
pub fn render_props(
    container: &mut Container,
    placements: &[PropPlacement],
    biome: Biome,
    season: Season,
    pool: &mut GraphicsPool,
) {
    let palette = seasonal_palette(biome, season);

    for prop in placements {
        let mut g = pool.acquire("prop-");
        g.label.push_str(kind_label(prop.kind));

        match prop.kind {
            PropKind::Tree => draw_tree(&mut g, palette.accent, prop.scale),
            PropKind::Bush => draw_bush(&mut g, palette.ground, prop.scale),
            PropKind::Rock => draw_rock(&mut g, prop.scale),
            PropKind::Flower => draw_flower(&mut g, prop.scale),
            PropKind::Building => draw_building(&mut g, palette.accent, prop.scale),
            PropKind::Pond => draw_pond(&mut g, palette.water, prop.scale),
            PropKind::Bench => draw_bench(&mut g, prop.scale),
            PropKind::Lamp => draw_lamp(&mut g, prop.scale),
        }

        g.x = prop.x;
        g.y = prop.y;
        g.alpha = 0.6;
        container.add_graphics(g);
    }
}

fn kind_label(kind: PropKind) -> &'static str {
    match kind {
        PropKind::Tree => "tree",
        PropKind::Bush => "bush",
        PropKind::Rock => "rock",
        PropKind::Flower => "flower",
        PropKind::Building => "building",
        PropKind::Pond => "pond",
        PropKind::Bench => "bench",
        PropKind::Lamp => "lamp",
    }
}

fn draw_tree(g: &mut Graphics, accent: Rgb, s: f64) {
    g.fill_round_rect(-3.0 * s, -2.0 * s, 6.0 * s, 14.0 * s, 1.0, Rgb(0x8B6914), 1.0);
    g.fill_circle(0.0, -10.0 * s, 12.0 * s, accent, 0.8);
    g.fill_circle(-4.0 * s, -6.0 * s, 8.0 * s, accent, 0.6);
}

fn draw_bush(g: &mut Graphics, ground: Rgb, s: f64) {
    g.fill_ellipse(0.0, 0.0, 10.0 * s, 7.0 * s, ground, 0.7);
    g.fill_ellipse(-3.0 * s, -2.0 * s, 7.0 * s, 5.0 * s, ground, 0.5);
}

fn draw_rock(g: &mut Graphics, s: f64) {
    g.fill_ellipse(0.0, 2.0 * s, 8.0 * s, 5.0 * s, Rgb(0x999999), 1.0);
    g.fill_ellipse(-2.0 * s, 0.0, 6.0 * s, 4.0 * s, Rgb(0xAAAAAA), 1.0);
}

fn draw_flower(g: &mut Graphics, s: f64) {
    const COLORS: [Rgb; 5] = [
        Rgb(0xFF69B4),
        Rgb(0xFFD700),
        Rgb(0xFF6347),
        Rgb(0x9370DB),
        Rgb(0xFF8C00),
    ];
    let color = COLORS[((s * 100.0).abs() as usize) % COLORS.len()];

    g.fill_rect(-1.0, 0.0, 2.0, 8.0 * s, Rgb(0x228B22), 1.0);
    for i in 0..5 {
        let angle = std::f64::consts::TAU * f64::from(i) / 5.0;
        g.fill_circle(
            angle.cos() * 3.0 * s,
            angle.sin() * 3.0 * s - 2.0 * s,
            2.5 * s,
            color,
            1.0,
        );
    }
    g.fill_circle(0.0, -2.0 * s, 2.0 * s, Rgb(0xFFD700), 1.0);
}

fn draw_building(g: &mut Graphics, accent: Rgb, s: f64) {
    g.fill_round_rect(-8.0 * s, -16.0 * s, 16.0 * s, 20.0 * s, 2.0, accent, 0.5);
    g.fill_rect(-4.0 * s, -12.0 * s, 3.0 * s, 3.0 * s, Rgb(0xFFFF99), 0.6);
    g.fill_rect(1.0 * s, -12.0 * s, 3.0 * s, 3.0 * s, Rgb(0xFFFF99), 0.6);
    g.fill_round_rect(-2.0 * s, -2.0 * s, 4.0 * s, 6.0 * s, 1.0, Rgb(0x8B4513), 0.6);
}

fn draw_pond(g: &mut Graphics, water: Rgb, s: f64) {
    g.fill_ellipse(0.0, 0.0, 14.0 * s, 8.0 * s, water, 0.4);
    g.fill_ellipse(-2.0 * s, -1.0 * s, 10.0 * s, 6.0 * s, water, 0.3);
}

fn draw_bench(g: &mut Graphics, s: f64) {
    g.fill_round_rect(-8.0 * s, -2.0 * s, 16.0 * s, 4.0 * s, 1.0, Rgb(0x8B6914), 1.0);
    g.fill_rect(-6.0 * s, 2.0 * s, 2.0 * s, 4.0 * s, Rgb(0x666666), 1.0);
    g.fill_rect(4.0 * s, 2.0 * s, 2.0 * s, 4.0 * s, Rgb(0x666666), 1.0);
}

fn draw_lamp(g: &mut Graphics, s: f64) {
    g.fill_rect(-1.0 * s, -14.0 * s, 2.0 * s, 18.0 * s, Rgb(0x555555), 1.0);
    g.fill_circle(0.0, -16.0 * s, 4.0 * s, Rgb(0xFFE4B5), 0.7);
    g.fill_circle(0.0, -16.0 * s, 6.0 * s, Rgb(0xFFE4B5), 0.2);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/props.rs"]
mod tests;
