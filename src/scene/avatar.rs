//! The journey avatar: a finite-state animated actor that idles,
//! walks node-to-node along the path, and celebrates completions.
//!
//! Animation completions surface as returned [`AvatarEvent`]s from
//! [`AvatarController::update`] / [`AvatarController::walk_to`]; the
//! scene maps them onto the host callbacks.

use smallvec::SmallVec;

use crate::assets::store::TextureStore;
use crate::display::container::Container;
use crate::display::graphics::{Graphics, StrokeStyle};
use crate::foundation::core::{Point, Rgb};
use crate::model::contract::PathNode;

const SKIN: Rgb = Rgb(0xFFD4A3);
const SHIRT: Rgb = Rgb(0x0A84FF);
const SHIRT_DARK: Rgb = Rgb(0x0060CC);
const PANTS: Rgb = Rgb(0x4A4A4A);
const SHOE: Rgb = Rgb(0x333333);
const HAIR: Rgb = Rgb(0x5C3A1E);
const EYE: Rgb = Rgb(0x333333);
const CHEEK: Rgb = Rgb(0xFFB5A3);
const MOUTH: Rgb = Rgb(0xCC8866);
const SPARKLE: Rgb = Rgb(0xFFD700);

/// Avatar animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarState {
    /// Standing with a breathing bob.
    Idle,
    /// Following the current waypoint list.
    Walking,
    /// Bouncing in place for a fixed duration.
    Celebrating,
}

/// Animation completion reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvatarEvent {
    /// The walk reached (or trivially resolved to) the target node.
    Arrived(String),
    /// The celebration bounce finished.
    CelebrationDone,
}

/// How poses are drawn: bitmap frames when the texture store has a full
/// frame set, otherwise fully procedural vector poses. Chosen once at
/// construction, never re-evaluated per frame.
#[derive(Clone, Debug)]
pub enum PoseStyle {
    /// Layered primitive humanoid.
    Procedural,
    /// Texture-key frame sets per animation.
    Sprite {
        /// Idle cycle frames.
        idle: Vec<String>,
        /// Walk cycle frames.
        walk: Vec<String>,
        /// Celebrate cycle frames.
        celebrate: Vec<String>,
    },
}

/// Procedurally-animated path-following actor.
#[derive(Clone, Debug)]
pub struct AvatarController {
    state: AvatarState,
    x: f64,
    y: f64,
    facing: f64,

    walk_path: SmallVec<[Point; 8]>,
    walk_index: usize,
    walk_progress: f64,
    walk_frame: u64,
    target_node_id: String,

    celebrate_frame: u64,
    celebrate_base_y: f64,

    clock: u64,
    pose: PoseStyle,
}

impl AvatarController {
    /// Walk speed in world pixels per tick.
    pub const WALK_SPEED: f64 = 2.5;
    /// Celebration bounce duration in ticks.
    pub const CELEBRATE_DURATION: u64 = 60;
    /// Vertical offset so the avatar's feet, not the node center, sit
    /// on the path.
    pub const FOOT_OFFSET: f64 = 38.0;

    /// Build an avatar, selecting the pose style from what the texture
    /// store actually loaded.
    pub fn new(store: &TextureStore) -> Self {
        let idle = store.frame_keys("avatar/idle", 4);
        let walk = store.frame_keys("avatar/walk", 6);
        let celebrate = store.frame_keys("avatar/celebrate", 6);

        let pose = if !idle.is_empty() && !walk.is_empty() && !celebrate.is_empty() {
            PoseStyle::Sprite {
                idle,
                walk,
                celebrate,
            }
        } else {
            PoseStyle::Procedural
        };

        Self {
            state: AvatarState::Idle,
            x: 0.0,
            y: 0.0,
            facing: 1.0,
            walk_path: SmallVec::new(),
            walk_index: 0,
            walk_progress: 0.0,
            walk_frame: 0,
            target_node_id: String::new(),
            celebrate_frame: 0,
            celebrate_base_y: 0.0,
            clock: 0,
            pose,
        }
    }

    /// Current animation state.
    pub fn state(&self) -> AvatarState {
        self.state
    }

    /// Selected pose style.
    pub fn pose_style(&self) -> &PoseStyle {
        &self.pose
    }

    /// Current world position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Immediate teleport; used once at scene init.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Begin walking to `target` along the node list.
    ///
    /// A second call while already Walking is a no-op. When the current
    /// and target ids resolve to the same index — or either id is not in
    /// `nodes` — the walk resolves immediately: an
    /// [`AvatarEvent::Arrived`] is returned synchronously and the state
    /// stays Idle, so a stale tap can never strand the avatar.
    pub fn walk_to(
        &mut self,
        target: &PathNode,
        nodes: &[PathNode],
        current_id: &str,
    ) -> Option<AvatarEvent> {
        if self.state == AvatarState::Walking {
            return None;
        }

        let start = nodes.iter().position(|n| n.id == current_id);
        let end = nodes.iter().position(|n| n.id == target.id);
        let (Some(start), Some(end)) = (start, end) else {
            return Some(AvatarEvent::Arrived(target.id.clone()));
        };
        if start == end {
            return Some(AvatarEvent::Arrived(target.id.clone()));
        }

        self.walk_path.clear();
        if start < end {
            for n in &nodes[start..=end] {
                self.walk_path.push(Point::new(n.x, n.y - Self::FOOT_OFFSET));
            }
        } else {
            for n in nodes[end..=start].iter().rev() {
                self.walk_path.push(Point::new(n.x, n.y - Self::FOOT_OFFSET));
            }
        }

        self.walk_index = 0;
        self.walk_progress = 0.0;
        self.walk_frame = 0;
        self.target_node_id = target.id.clone();
        self.state = AvatarState::Walking;
        None
    }

    /// Begin the celebration bounce from the current position.
    pub fn celebrate(&mut self) {
        self.state = AvatarState::Celebrating;
        self.celebrate_frame = 0;
        self.celebrate_base_y = self.y;
    }

    /// Advance one tick. Returns an event when an animation completes.
    pub fn update(&mut self) -> Option<AvatarEvent> {
        self.clock += 1;
        match self.state {
            AvatarState::Walking => self.update_walk(),
            AvatarState::Celebrating => self.update_celebrate(),
            AvatarState::Idle => None,
        }
    }

    fn update_walk(&mut self) -> Option<AvatarEvent> {
        if self.walk_path.len() < 2 || self.walk_index >= self.walk_path.len() - 1 {
            self.state = AvatarState::Idle;
            return Some(AvatarEvent::Arrived(self.target_node_id.clone()));
        }

        let from = self.walk_path[self.walk_index];
        let to = self.walk_path[self.walk_index + 1];
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let dist = (dx * dx + dy * dy).sqrt();
        let step = Self::WALK_SPEED / dist.max(1.0);

        self.walk_progress += step;
        self.walk_frame += 1;

        if self.walk_progress >= 1.0 {
            self.walk_progress = 0.0;
            self.walk_index += 1;
            if self.walk_index >= self.walk_path.len() - 1 {
                self.x = to.x;
                self.y = to.y;
                self.state = AvatarState::Idle;
                return Some(AvatarEvent::Arrived(self.target_node_id.clone()));
            }
        }

        self.x = from.x + dx * self.walk_progress;
        self.y = from.y + dy * self.walk_progress;
        self.facing = if dx >= 0.0 { 1.0 } else { -1.0 };
        None
    }

    fn update_celebrate(&mut self) -> Option<AvatarEvent> {
        self.celebrate_frame += 1;
        let bounce = (self.celebrate_frame as f64 * 0.3).sin() * 8.0;
        self.y = self.celebrate_base_y + bounce;

        if self.celebrate_frame >= Self::CELEBRATE_DURATION {
            self.y = self.celebrate_base_y;
            self.state = AvatarState::Idle;
            return Some(AvatarEvent::CelebrationDone);
        }
        None
    }

    /// Write the current pose into the avatar's container: position,
    /// facing mirror, and a redrawn `pose` drawable.
    pub fn sync(&self, container: &mut Container) {
        container.x = self.x;
        container.y = self.y;
        container.scale_x = self.facing;
        container.scale_y = 1.0;

        if container.child_graphics_mut("pose").is_none() {
            container.add_graphics(Graphics::with_label("pose"));
        }
        let Some(g) = container.child_graphics_mut("pose") else {
            return;
        };
        g.clear();
        // Idle breathing offsets the whole body group.
        g.y = if self.state == AvatarState::Idle {
            (self.clock as f64 * 0.0333).sin() * 0.5
        } else {
            0.0
        };

        match &self.pose {
            PoseStyle::Sprite {
                idle,
                walk,
                celebrate,
            } => {
                let (frames, frame) = match self.state {
                    AvatarState::Walking => (walk, self.walk_frame),
                    AvatarState::Celebrating => (celebrate, self.celebrate_frame),
                    AvatarState::Idle => (idle, (self.clock as f64 * 0.05) as u64),
                };
                let idx = match self.state {
                    AvatarState::Idle => frame as usize % frames.len(),
                    _ => (frame as f64 * 0.15) as usize % frames.len(),
                };
                // Feet at the bottom of the sprite.
                g.image(frames[idx].clone(), 0.0, 22.0, 0.5, 1.0);
            }
            PoseStyle::Procedural => match self.state {
                AvatarState::Idle => draw_idle_pose(g),
                AvatarState::Walking => draw_walk_pose(g, self.walk_frame),
                AvatarState::Celebrating => draw_celebrate_pose(g, self.celebrate_frame),
            },
        }
    }
}

fn draw_idle_pose(g: &mut Graphics) {
    g.fill_ellipse(0.0, 20.0, 12.0, 4.0, Rgb::BLACK, 0.15);

    g.fill_round_rect(-7.0, 8.0, 5.0, 12.0, 2.0, PANTS, 1.0);
    g.fill_round_rect(2.0, 8.0, 5.0, 12.0, 2.0, PANTS, 1.0);

    g.fill_round_rect(-8.0, 18.0, 7.0, 4.0, 1.0, SHOE, 1.0);
    g.fill_round_rect(1.0, 18.0, 7.0, 4.0, 1.0, SHOE, 1.0);

    g.fill_round_rect(-10.0, -8.0, 20.0, 18.0, 6.0, SHIRT, 1.0);
    g.fill_round_rect(-3.0, -4.0, 6.0, 10.0, 2.0, SHIRT_DARK, 1.0);

    g.fill_round_rect(-14.0, -4.0, 5.0, 12.0, 2.0, SKIN, 1.0);
    g.fill_round_rect(9.0, -4.0, 5.0, 12.0, 2.0, SKIN, 1.0);

    draw_head(g, 0.0, 0.0, false);
}

fn draw_walk_pose(g: &mut Graphics, frame: u64) {
    let swing = (frame as f64 * 0.4).sin() * 6.0;

    g.fill_ellipse(swing * 0.2, 20.0, 12.0, 4.0, Rgb::BLACK, 0.15);

    g.fill_round_rect(-7.0 + swing, 8.0, 5.0, 12.0, 2.0, PANTS, 1.0);
    g.fill_round_rect(2.0 - swing, 8.0, 5.0, 12.0, 2.0, PANTS, 1.0);

    g.fill_round_rect(-8.0 + swing, 18.0, 7.0, 4.0, 1.0, SHOE, 1.0);
    g.fill_round_rect(1.0 - swing, 18.0, 7.0, 4.0, 1.0, SHOE, 1.0);

    let lean = 1.0;
    g.fill_round_rect(-10.0 + lean, -8.0, 20.0, 18.0, 6.0, SHIRT, 1.0);
    g.fill_round_rect(-3.0 + lean, -4.0, 6.0, 10.0, 2.0, SHIRT_DARK, 1.0);

    let arm_swing = (frame as f64 * 0.4).sin() * 8.0;
    g.fill_round_rect(-14.0 + lean, -4.0 - arm_swing, 5.0, 12.0, 2.0, SKIN, 1.0);
    g.fill_round_rect(9.0 + lean, -4.0 + arm_swing, 5.0, 12.0, 2.0, SKIN, 1.0);

    let bob = (frame as f64 * 0.4).sin().abs() * 1.5;
    draw_head(g, lean, -bob, false);
}

fn draw_celebrate_pose(g: &mut Graphics, frame: u64) {
    g.fill_ellipse(0.0, 20.0, 14.0, 5.0, Rgb::BLACK, 0.12);

    g.fill_round_rect(-9.0, 8.0, 5.0, 12.0, 2.0, PANTS, 1.0);
    g.fill_round_rect(4.0, 8.0, 5.0, 12.0, 2.0, PANTS, 1.0);

    g.fill_round_rect(-10.0, 18.0, 7.0, 4.0, 1.0, SHOE, 1.0);
    g.fill_round_rect(3.0, 18.0, 7.0, 4.0, 1.0, SHOE, 1.0);

    g.fill_round_rect(-11.0, -9.0, 22.0, 19.0, 6.0, SHIRT, 1.0);
    g.fill_round_rect(-3.0, -5.0, 6.0, 10.0, 2.0, SHIRT_DARK, 1.0);

    // Arms raised and waving.
    let wave = (frame as f64 * 0.5).sin() * 10.0;
    g.fill_round_rect(-16.0, -18.0 + wave, 5.0, 14.0, 2.0, SKIN, 1.0);
    g.fill_round_rect(11.0, -18.0 - wave, 5.0, 14.0, 2.0, SKIN, 1.0);

    draw_head(g, 0.0, 0.0, true);

    // Orbiting sparkles.
    let sparkle_phase = frame as f64 * 0.15;
    for i in 0..3 {
        let fi = f64::from(i);
        let angle = sparkle_phase + fi * std::f64::consts::TAU / 3.0;
        let dist = 20.0 + (frame as f64 * 0.3 + fi).sin() * 5.0;
        let sx = angle.cos() * dist;
        let sy = -10.0 + angle.sin() * dist * 0.6;
        let size = 2.0 + (frame as f64 * 0.4 + fi * 2.0).sin();
        let alpha = 0.6 + (frame as f64 * 0.3 + fi).sin() * 0.3;
        g.fill_star(sx, sy, 4, size, size * 0.4, SPARKLE, alpha as f32);
    }
}

fn draw_head(g: &mut Graphics, ox: f64, oy: f64, happy: bool) {
    use std::f64::consts::PI;

    g.fill_circle(ox, -16.0 + oy, 11.0, SKIN, 1.0);

    g.fill_arc(ox, -18.0 + oy, 11.0, PI, 0.0, HAIR, 1.0);
    g.fill_round_rect(-9.0 + ox, -24.0 + oy, 6.0, 5.0, 2.0, HAIR, 1.0);

    if happy {
        // Closed, upturned eyes and a wide smile.
        let eye_stroke = StrokeStyle::solid(EYE, 1.8);
        g.stroke_arc(-4.0 + ox, -17.0 + oy, 2.0, PI + 0.3, -0.3, eye_stroke);
        g.stroke_arc(4.0 + ox, -17.0 + oy, 2.0, PI + 0.3, -0.3, eye_stroke);
        g.stroke_arc(ox, -12.0 + oy, 4.0, 0.2, PI - 0.2, StrokeStyle::solid(MOUTH, 1.5));
        g.fill_circle(-7.0 + ox, -13.0 + oy, 3.0, CHEEK, 0.5);
        g.fill_circle(7.0 + ox, -13.0 + oy, 3.0, CHEEK, 0.5);
    } else {
        g.fill_circle(-4.0 + ox, -17.0 + oy, 1.8, EYE, 1.0);
        g.fill_circle(4.0 + ox, -17.0 + oy, 1.8, EYE, 1.0);
        g.fill_circle(-3.5 + ox, -17.5 + oy, 0.6, Rgb::WHITE, 1.0);
        g.fill_circle(4.5 + ox, -17.5 + oy, 0.6, Rgb::WHITE, 1.0);
        g.stroke_arc(ox, -12.0 + oy, 3.0, 0.1, PI - 0.1, StrokeStyle::solid(MOUTH, 1.2));
        g.fill_circle(-7.0 + ox, -13.0 + oy, 2.5, CHEEK, 0.35);
        g.fill_circle(7.0 + ox, -13.0 + oy, 2.5, CHEEK, 0.35);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/avatar.rs"]
mod tests;
