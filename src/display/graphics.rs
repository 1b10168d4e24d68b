//! The retained drawable primitive: a transform plus an ordered list of
//! draw commands. Backends interpret the commands; nothing here touches
//! pixels.

use crate::foundation::core::{Affine, BezPath, Rgb};

/// Solid fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillStyle {
    /// Fill color.
    pub color: Rgb,
    /// Straight alpha in [0, 1].
    pub alpha: f32,
}

impl From<Rgb> for FillStyle {
    fn from(color: Rgb) -> Self {
        Self { color, alpha: 1.0 }
    }
}

/// Stroked outline. Caps and joins are always round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Rgb,
    /// Straight alpha in [0, 1].
    pub alpha: f32,
    /// Stroke width in world pixels.
    pub width: f64,
    /// Optional `[on, off]` dash lengths.
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    /// Solid round-capped stroke.
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color,
            alpha: 1.0,
            width,
            dash: None,
        }
    }
}

/// How a command is painted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Fill the shape interior.
    Fill(FillStyle),
    /// Stroke the shape outline.
    Stroke(StrokeStyle),
}

/// Text anchor relative to the command position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Centered on the position.
    Center,
    /// Centered horizontally, top edge at the position.
    Top,
}

/// One recorded draw command, in the local space of its [`Graphics`].
#[derive(Clone, Debug)]
pub enum DrawCmd {
    /// Circle centered at (cx, cy).
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// Paint.
        paint: Paint,
    },
    /// Axis-aligned ellipse.
    Ellipse {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
        /// Paint.
        paint: Paint,
    },
    /// Axis-aligned rectangle with origin at (x, y).
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Paint.
        paint: Paint,
    },
    /// Rounded rectangle.
    RoundRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        w: f64,
        /// Height.
        h: f64,
        /// Corner radius.
        radius: f64,
        /// Paint.
        paint: Paint,
    },
    /// Circular arc from `start` to `end` radians. Filled arcs close the
    /// chord (a half-disc when the sweep is pi).
    Arc {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// Start angle in radians.
        start: f64,
        /// End angle in radians.
        end: f64,
        /// Paint.
        paint: Paint,
    },
    /// N-pointed star.
    Star {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Point count.
        points: u32,
        /// Outer radius.
        outer: f64,
        /// Inner radius.
        inner: f64,
        /// Paint.
        paint: Paint,
    },
    /// Arbitrary bezier path.
    Path {
        /// Path in local space.
        path: BezPath,
        /// Paint.
        paint: Paint,
    },
    /// Bitmap from the scene's texture store, drawn at natural size.
    Image {
        /// Texture key (e.g. `avatar/walk/frame3.png`).
        key: String,
        /// Anchor position x.
        x: f64,
        /// Anchor position y.
        y: f64,
        /// Horizontal anchor in [0, 1] of the texture width.
        anchor_x: f64,
        /// Vertical anchor in [0, 1] of the texture height.
        anchor_y: f64,
    },
    /// A short text run.
    Text {
        /// Text content.
        content: String,
        /// Anchor position x.
        x: f64,
        /// Anchor position y.
        y: f64,
        /// Font size in pixels.
        size: f32,
        /// Fill color.
        color: Rgb,
        /// Anchor mode.
        anchor: TextAnchor,
    },
}

/// A reusable drawable: transform properties plus recorded commands.
///
/// Acquired from a [`crate::GraphicsPool`] during scene rebuilds;
/// [`Graphics::reset`] returns every mutable visual property to its
/// default so an acquired drawable is always in a known-clean state.
#[derive(Clone, Debug)]
pub struct Graphics {
    /// Diagnostic / lookup label.
    pub label: String,
    /// Translation x.
    pub x: f64,
    /// Translation y.
    pub y: f64,
    /// Horizontal scale (negative mirrors).
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Straight alpha multiplied over every command.
    pub alpha: f32,
    /// Draw-order key within the parent container.
    pub z_index: i32,
    /// Hidden drawables are skipped entirely.
    pub visible: bool,
    cmds: Vec<DrawCmd>,
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    /// A fresh drawable with default transform state.
    pub fn new() -> Self {
        Self {
            label: String::new(),
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            alpha: 1.0,
            z_index: 0,
            visible: true,
            cmds: Vec::new(),
        }
    }

    /// A fresh drawable with a label.
    pub fn with_label(label: impl Into<String>) -> Self {
        let mut g = Self::new();
        g.label = label.into();
        g
    }

    /// Drop recorded commands, keeping transform state.
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    /// Return every mutable visual property to its default.
    pub fn reset(&mut self) {
        self.label.clear();
        self.x = 0.0;
        self.y = 0.0;
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        self.rotation = 0.0;
        self.alpha = 1.0;
        self.z_index = 0;
        self.visible = true;
        self.cmds.clear();
    }

    /// Recorded commands in draw order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    /// Append a raw command.
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    /// Uniform scale setter.
    pub fn set_scale(&mut self, s: f64) {
        self.scale_x = s;
        self.scale_y = s;
    }

    /// Local transform: translate, then rotate, then scale.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.x, self.y))
            * Affine::rotate(self.rotation)
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Filled circle.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb, alpha: f32) {
        self.push(DrawCmd::Circle {
            cx,
            cy,
            r,
            paint: Paint::Fill(FillStyle { color, alpha }),
        });
    }

    /// Stroked circle outline.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, style: StrokeStyle) {
        self.push(DrawCmd::Circle {
            cx,
            cy,
            r,
            paint: Paint::Stroke(style),
        });
    }

    /// Filled ellipse.
    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgb, alpha: f32) {
        self.push(DrawCmd::Ellipse {
            cx,
            cy,
            rx,
            ry,
            paint: Paint::Fill(FillStyle { color, alpha }),
        });
    }

    /// Filled rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb, alpha: f32) {
        self.push(DrawCmd::Rect {
            x,
            y,
            w,
            h,
            paint: Paint::Fill(FillStyle { color, alpha }),
        });
    }

    /// Filled rounded rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_round_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        color: Rgb,
        alpha: f32,
    ) {
        self.push(DrawCmd::RoundRect {
            x,
            y,
            w,
            h,
            radius,
            paint: Paint::Fill(FillStyle { color, alpha }),
        });
    }

    /// Filled arc (chord-closed).
    #[allow(clippy::too_many_arguments)]
    pub fn fill_arc(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
        color: Rgb,
        alpha: f32,
    ) {
        self.push(DrawCmd::Arc {
            cx,
            cy,
            r,
            start,
            end,
            paint: Paint::Fill(FillStyle { color, alpha }),
        });
    }

    /// Stroked open arc.
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
        style: StrokeStyle,
    ) {
        self.push(DrawCmd::Arc {
            cx,
            cy,
            r,
            start,
            end,
            paint: Paint::Stroke(style),
        });
    }

    /// Filled star.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_star(
        &mut self,
        cx: f64,
        cy: f64,
        points: u32,
        outer: f64,
        inner: f64,
        color: Rgb,
        alpha: f32,
    ) {
        self.push(DrawCmd::Star {
            cx,
            cy,
            points,
            outer,
            inner,
            paint: Paint::Fill(FillStyle { color, alpha }),
        });
    }

    /// Stroked bezier path.
    pub fn stroke_path(&mut self, path: BezPath, style: StrokeStyle) {
        self.push(DrawCmd::Path {
            path,
            paint: Paint::Stroke(style),
        });
    }

    /// Bitmap sprite from the texture store.
    pub fn image(&mut self, key: impl Into<String>, x: f64, y: f64, anchor_x: f64, anchor_y: f64) {
        self.push(DrawCmd::Image {
            key: key.into(),
            x,
            y,
            anchor_x,
            anchor_y,
        });
    }

    /// Text run.
    pub fn text(
        &mut self,
        content: impl Into<String>,
        x: f64,
        y: f64,
        size: f32,
        color: Rgb,
        anchor: TextAnchor,
    ) {
        self.push(DrawCmd::Text {
            content: content.into(),
            x,
            y,
            size,
            color,
            anchor,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/graphics.rs"]
mod tests;
