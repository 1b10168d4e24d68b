//! Camera over the world: an eased position chasing a clamped target.
//!
//! The target is the only thing input handlers touch; the rendered
//! position converges on it with exponential smoothing each tick. That
//! one rule is the entire camera animation system — there is no tween
//! machinery.

use crate::foundation::core::{Vec2, Viewport};
use crate::model::contract::PathNode;

/// Valid world-space extent the camera may show.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraBounds {
    /// Minimum world x.
    pub min_x: f64,
    /// Maximum world x.
    pub max_x: f64,
    /// Minimum world y.
    pub min_y: f64,
    /// Maximum world y.
    pub max_y: f64,
}

/// Damped-follow camera with drag-pan and bounds clamping.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Rendered offset x (eased).
    pub x: f64,
    /// Rendered offset y (eased).
    pub y: f64,
    /// Desired offset x (set by input, clamped).
    pub tx: f64,
    /// Desired offset y (set by input, clamped).
    pub ty: f64,
    bounds: CameraBounds,
    viewport: Viewport,
}

impl Camera {
    /// Per-tick exponential smoothing factor.
    pub const SMOOTHING: f64 = 0.12;

    /// Margin added around the node extent when deriving bounds.
    pub const BOUNDS_PAD: f64 = 120.0;

    /// A camera at the origin with degenerate bounds; call
    /// [`Camera::update_bounds`] before use.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            tx: 0.0,
            ty: 0.0,
            bounds: CameraBounds::default(),
            viewport,
        }
    }

    /// Current bounds.
    pub fn bounds(&self) -> CameraBounds {
        self.bounds
    }

    /// Derive bounds from the node extent plus a margin, expanded to at
    /// least the viewport on each axis so a small graph cannot expose
    /// empty space beyond its edges.
    pub fn update_bounds(&mut self, nodes: &[PathNode]) {
        if nodes.is_empty() {
            self.bounds = CameraBounds {
                min_x: 0.0,
                max_x: self.viewport.width_f(),
                min_y: 0.0,
                max_y: self.viewport.height_f(),
            };
            return;
        }

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for n in nodes {
            min_x = min_x.min(n.x);
            max_x = max_x.max(n.x);
            min_y = min_y.min(n.y);
            max_y = max_y.max(n.y);
        }
        min_x -= Self::BOUNDS_PAD;
        max_x += Self::BOUNDS_PAD;
        min_y -= Self::BOUNDS_PAD;
        max_y += Self::BOUNDS_PAD;

        let span_x = (max_x - min_x).max(self.viewport.width_f());
        let span_y = (max_y - min_y).max(self.viewport.height_f());
        self.bounds = CameraBounds {
            min_x,
            max_x: min_x + span_x,
            min_y,
            max_y: min_y + span_y,
        };
    }

    /// Clamp a target offset to the bounds. When the valid range
    /// collapses on an axis (content smaller than the viewport), the
    /// target centers on that axis instead.
    pub fn clamp_target(&self, tx: f64, ty: f64) -> (f64, f64) {
        let CameraBounds {
            min_x,
            max_x,
            min_y,
            max_y,
        } = self.bounds;
        let max_tx = max_x - self.viewport.width_f();
        let max_ty = max_y - self.viewport.height_f();

        let cx = if max_tx < min_x {
            (min_x + max_x - self.viewport.width_f()) / 2.0
        } else {
            tx.clamp(min_x, max_tx)
        };
        let cy = if max_ty < min_y {
            (min_y + max_y - self.viewport.height_f()) / 2.0
        } else {
            ty.clamp(min_y, max_ty)
        };
        (cx, cy)
    }

    /// Set the desired offset, clamped to bounds.
    pub fn set_target(&mut self, tx: f64, ty: f64) {
        let (cx, cy) = self.clamp_target(tx, ty);
        self.tx = cx;
        self.ty = cy;
    }

    /// Pan the target so a world point sits at the viewport center.
    pub fn target_center_on(&mut self, wx: f64, wy: f64) {
        self.set_target(
            wx - self.viewport.width_f() / 2.0,
            wy - self.viewport.height_f() / 2.0,
        );
    }

    /// Snap position and target so a world point sits at the viewport
    /// center, with no easing. Used once at scene init.
    pub fn jump_center_on(&mut self, wx: f64, wy: f64) {
        self.target_center_on(wx, wy);
        self.x = self.tx;
        self.y = self.ty;
    }

    /// Advance the eased position one tick toward the target.
    pub fn tick(&mut self) {
        self.x += (self.tx - self.x) * Self::SMOOTHING;
        self.y += (self.ty - self.y) * Self::SMOOTHING;
    }

    /// World translation to apply when drawing: the negated offset.
    pub fn world_offset(&self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }

    /// Convert a viewport-space point to world space.
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        (sx + self.x, sy + self.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
