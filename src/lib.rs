//! Waymark is a deterministic scene-rendering and animation core for
//! interactive journey maps.
//!
//! A journey map is a scrollable world of milestone nodes (weeks, days,
//! daily tasks) connected by a winding path, decorated with procedural
//! scenery, and walked by a small animated avatar. The host application
//! owns all persistent state; Waymark displays it and reports gestures
//! back through a fixed callback contract.
//!
//! # Pipeline overview
//!
//! 1. **Model**: the host builds a [`PathConfig`] and a [`SceneProps`]
//!    snapshot (nodes + per-node [`NodeState`]s).
//! 2. **Mount**: [`Scene::mount`] builds the retained display list
//!    (background, props, paths, node glyphs) and centers the camera.
//! 3. **Tick**: [`Scene::tick`] advances the camera easing, the avatar
//!    state machine, and any celebration effect — one call per display
//!    refresh, never blocking.
//! 4. **Render**: [`Scene::render_frame`] rasterizes the display list to
//!    premultiplied RGBA8 via the CPU backend.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: prop scatter and particle bursts draw
//!   from an explicit seeded generator, never a platform RNG.
//! - **Single-threaded**: all waiting is incremental per-tick state
//!   advancement; there are no locks and no blocking sleeps.
//! - **Premultiplied RGBA8** out of the renderer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod display;
mod foundation;
mod model;
mod render;
mod scene;
mod theme;

pub use assets::store::{Texture, TextureStore};
pub use display::container::{Container, DisplayObject};
pub use display::graphics::{DrawCmd, FillStyle, Graphics, Paint, StrokeStyle, TextAnchor};
pub use display::pool::{GraphicsPool, PoolStats};
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgb, Vec2, Viewport};
pub use foundation::error::{WaymarkError, WaymarkResult};
pub use foundation::rng::{SeededRng, journey_seed};
pub use model::contract::{
    Biome, NodeKind, NodeState, PathNode, SceneCallbacks, SceneProps, SceneType, Season,
    TaskCategory, can_transition, quarter_biome, transition_node, valid_transitions,
};
pub use model::paths::{
    PathConfig, PathConfigCache, WORLD_WIDTH, build_monthly_path, build_weekly_path, daily_layout,
};
pub use model::progress::{MemoryProgressStore, ProgressSnapshot, ProgressStore};
pub use render::backend::{FrameRGBA, RenderSettings};
pub use render::cpu::CpuRenderer;
pub use scene::avatar::{AvatarController, AvatarEvent, AvatarState, PoseStyle};
pub use scene::camera::{Camera, CameraBounds};
pub use scene::celebration::{CelebrationEffect, EffectEvent};
pub use scene::props::{PropKind, PropPlacement, biome_props, generate_props, render_props};
pub use scene::renderer::{NODE_RADIUS, Scene};
pub use theme::palette::{Palette, biome_palette, node_border, node_fill, seasonal_palette};
