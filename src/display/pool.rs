//! Bounded pool of drawable primitives.
//!
//! A scene rebuild runs on every node-state change; without pooling,
//! each rebuild allocates dozens of `Graphics` that are immediately
//! dropped. The pool is owned by one scene and dropped with it, so
//! concurrently mounted scenes cannot share (or leak into) each other's
//! drawables.

use tracing::trace;

use crate::display::container::{Container, DisplayObject};
use crate::display::graphics::Graphics;

/// Counters describing pool behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Drawables currently held in the free list.
    pub pooled: usize,
    /// Free-list capacity; releases past this drop the drawable.
    pub max_size: usize,
    /// Fresh allocations performed by [`GraphicsPool::acquire`].
    pub allocated: u64,
    /// Acquires served from the free list.
    pub recycled: u64,
    /// Releases dropped because the free list was full.
    pub dropped_on_release: u64,
}

/// Reuse cache for [`Graphics`] objects.
#[derive(Debug)]
pub struct GraphicsPool {
    free: Vec<Graphics>,
    max_size: usize,
    allocated: u64,
    recycled: u64,
    dropped_on_release: u64,
}

impl Default for GraphicsPool {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsPool {
    /// Default free-list capacity.
    pub const DEFAULT_MAX: usize = 200;

    /// Pool with the default capacity.
    pub fn new() -> Self {
        Self::with_max_size(Self::DEFAULT_MAX)
    }

    /// Pool with an explicit capacity.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            free: Vec::new(),
            max_size,
            allocated: 0,
            recycled: 0,
            dropped_on_release: 0,
        }
    }

    /// Hand out a drawable in a known-clean visual state.
    pub fn acquire(&mut self, label: &str) -> Graphics {
        let mut g = match self.free.pop() {
            Some(g) => {
                self.recycled += 1;
                g
            }
            None => {
                self.allocated += 1;
                Graphics::new()
            }
        };
        g.reset();
        g.label.push_str(label);
        g
    }

    /// Return a drawable to the pool, or drop it if the pool is full.
    ///
    /// The drawable is moved in, so a released handle cannot be used
    /// again without a fresh [`GraphicsPool::acquire`].
    pub fn release(&mut self, mut g: Graphics) {
        if self.free.len() >= self.max_size {
            self.dropped_on_release += 1;
            return;
        }
        g.reset();
        self.free.push(g);
    }

    /// Release a container's poolable children, preserving any direct
    /// child container whose label appears in `keep`.
    ///
    /// Nested containers outside the keep set are walked recursively —
    /// their `Graphics` go back to the pool and the containers
    /// themselves are dropped. Used during scene rebuilds to recycle
    /// everything except the live avatar and celebration containers.
    pub fn release_children_except(&mut self, container: &mut Container, keep: &[&str]) {
        let children = container.take_children();
        let mut kept = Vec::new();
        for child in children {
            match child {
                DisplayObject::Graphics(g) => self.release(g),
                DisplayObject::Container(mut c) => {
                    if keep.contains(&c.label.as_str()) {
                        kept.push(DisplayObject::Container(c));
                    } else {
                        self.release_tree(&mut c);
                    }
                }
            }
        }
        trace!(kept = kept.len(), pooled = self.free.len(), "released container children");
        container.set_children(kept);
    }

    fn release_tree(&mut self, container: &mut Container) {
        for child in container.take_children() {
            match child {
                DisplayObject::Graphics(g) => self.release(g),
                DisplayObject::Container(mut c) => self.release_tree(&mut c),
            }
        }
    }

    /// Current pool counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            pooled: self.free.len(),
            max_size: self.max_size,
            allocated: self.allocated,
            recycled: self.recycled,
            dropped_on_release: self.dropped_on_release,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/pool.rs"]
mod tests;
