//! Display tree containers. Children are owned by value; ownership is
//! the scene graph, so detaching a drawable is moving it out and Rust
//! makes a freed child unrepresentable.

use crate::foundation::core::Affine;
use crate::display::graphics::Graphics;

/// One node in the display tree.
#[derive(Clone, Debug)]
pub enum DisplayObject {
    /// A drawable primitive.
    Graphics(Graphics),
    /// A nested container.
    Container(Container),
}

impl DisplayObject {
    /// Label of the wrapped object.
    pub fn label(&self) -> &str {
        match self {
            Self::Graphics(g) => &g.label,
            Self::Container(c) => &c.label,
        }
    }

    /// Draw-order key of the wrapped object.
    pub fn z_index(&self) -> i32 {
        match self {
            Self::Graphics(g) => g.z_index,
            Self::Container(c) => c.z_index,
        }
    }

    /// Whether the wrapped object should be drawn.
    pub fn visible(&self) -> bool {
        match self {
            Self::Graphics(g) => g.visible,
            Self::Container(c) => c.visible,
        }
    }
}

/// A transformed group of display objects.
#[derive(Clone, Debug)]
pub struct Container {
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
    /// Straight alpha inherited by children.
    pub alpha: f32,
    /// Draw-order key within the parent container.
    pub z_index: i32,
    /// Hidden containers are skipped entirely, children included.
    pub visible: bool,
    children: Vec<DisplayObject>,
}

impl Container {
    /// An empty container with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
            z_index: 0,
            visible: true,
            children: Vec::new(),
        }
    }

    /// Append a child.
    pub fn add(&mut self, child: DisplayObject) {
        self.children.push(child);
    }

    /// Append a drawable child.
    pub fn add_graphics(&mut self, g: Graphics) {
        self.children.push(DisplayObject::Graphics(g));
    }

    /// Append a nested container.
    pub fn add_container(&mut self, c: Container) {
        self.children.push(DisplayObject::Container(c));
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[DisplayObject] {
        &self.children
    }

    /// Mutable children in insertion order.
    pub fn children_mut(&mut self) -> &mut [DisplayObject] {
        &mut self.children
    }

    /// Move every child out, leaving the container empty.
    pub fn take_children(&mut self) -> Vec<DisplayObject> {
        std::mem::take(&mut self.children)
    }

    /// Replace the child list wholesale.
    pub fn set_children(&mut self, children: Vec<DisplayObject>) {
        self.children = children;
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First direct child container with the given label.
    pub fn child_container_mut(&mut self, label: &str) -> Option<&mut Container> {
        self.children.iter_mut().find_map(|c| match c {
            DisplayObject::Container(c) if c.label == label => Some(c),
            _ => None,
        })
    }

    /// First direct drawable child with the given label.
    pub fn child_graphics_mut(&mut self, label: &str) -> Option<&mut Graphics> {
        self.children.iter_mut().find_map(|c| match c {
            DisplayObject::Graphics(g) if g.label == label => Some(g),
            _ => None,
        })
    }

    /// Children in draw order: stable-sorted by z-index, so equal keys
    /// keep insertion order (back-to-front painter's algorithm).
    pub fn draw_order(&self) -> Vec<&DisplayObject> {
        let mut order: Vec<&DisplayObject> = self.children.iter().collect();
        order.sort_by_key(|c| c.z_index());
        order
    }

    /// Local transform: translate then scale.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.x, self.y)) * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/container.rs"]
mod tests;
