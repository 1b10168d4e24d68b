//! The scene orchestrator: owns the display tree, camera, pool, avatar
//! and celebration effect; rebuilds static geometry when props change;
//! advances everything per tick; and dispatches tap/drag input back to
//! the host through the scene contract.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::assets::store::TextureStore;
use crate::display::container::Container;
use crate::display::graphics::{Graphics, StrokeStyle, TextAnchor};
use crate::display::pool::{GraphicsPool, PoolStats};
use crate::foundation::core::{BezPath, Rgb, Viewport};
use crate::foundation::error::{WaymarkError, WaymarkResult};
use crate::foundation::rng::journey_seed;
use crate::model::contract::{
    NodeKind, NodeState, PathNode, SceneCallbacks, SceneProps, SceneType,
};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::cpu::CpuRenderer;
use crate::scene::avatar::{AvatarController, AvatarEvent, AvatarState};
use crate::scene::camera::Camera;
use crate::scene::celebration::{CelebrationEffect, EffectEvent};
use crate::scene::props::{generate_props, render_props};
use crate::theme::palette::{PATH_COMPLETED, node_border, node_fill, seasonal_palette};

/// Node circle radius in world pixels.
pub const NODE_RADIUS: f64 = 22.0;

const TAP_SLOP: f64 = 10.0;
const CELEBRATION_POINTS: u32 = 50;
const AVATAR_LABEL: &str = "avatar";
const CELEBRATION_LABEL: &str = "celebration";

#[derive(Clone, Debug)]
struct NodeHit {
    id: String,
    x: f64,
    y: f64,
    kind: NodeKind,
}

/// A mounted journey-map scene.
///
/// The host owns all persistent state and re-renders the scene by
/// calling [`Scene::set_props`] with an updated snapshot; the scene only
/// displays state and reports gestures through [`SceneCallbacks`].
pub struct Scene {
    props: SceneProps,
    callbacks: SceneCallbacks,
    viewport: Viewport,
    textures: TextureStore,
    renderer: CpuRenderer,

    world: Container,
    camera: Camera,
    pool: GraphicsPool,
    avatar: Option<AvatarController>,
    celebration: CelebrationEffect,

    avatar_node_id: String,
    prev_states: BTreeMap<String, NodeState>,
    node_hits: Vec<NodeHit>,
    drag: Option<(f64, f64)>,
}

impl Scene {
    /// Mount a scene: build the display tree, center the camera on the
    /// avatar's node, and fire `on_scene_ready`.
    ///
    /// Renderer creation is retried once with antialiasing disabled
    /// before surfacing a fatal (but recoverable, host-side) error.
    pub fn mount(
        props: SceneProps,
        callbacks: SceneCallbacks,
        viewport: Viewport,
        textures: TextureStore,
    ) -> WaymarkResult<Self> {
        props.validate()?;

        let renderer = match CpuRenderer::new(viewport, RenderSettings::default()) {
            Ok(r) => r,
            Err(err) => {
                warn!(error = %err, "renderer init failed; retrying without antialiasing");
                CpuRenderer::new(
                    viewport,
                    RenderSettings {
                        antialias: false,
                        ..RenderSettings::default()
                    },
                )
                .map_err(|e| {
                    WaymarkError::render(format!("scene failed to initialize: {e}"))
                })?
            }
        };

        let mut world = Container::new("world");

        let mut avatar = None;
        let mut avatar_node_id = String::new();
        if props.scene_type.has_avatar() {
            let mut controller = AvatarController::new(&textures);
            if let Some(node) = props.node(&props.avatar_position) {
                controller.set_position(node.x, node.y - AvatarController::FOOT_OFFSET);
                avatar_node_id = node.id.clone();
            }
            let mut container = Container::new(AVATAR_LABEL);
            container.z_index = 1000;
            controller.sync(&mut container);
            world.add_container(container);
            avatar = Some(controller);
        }

        let mut celebration_container = Container::new(CELEBRATION_LABEL);
        celebration_container.z_index = 2000;
        world.add_container(celebration_container);

        let prev_states = props.node_states.clone();
        let mut scene = Self {
            celebration: CelebrationEffect::new(journey_seed(&props.journey_id)),
            props,
            callbacks,
            viewport,
            textures,
            renderer,
            world,
            camera: Camera::new(viewport),
            pool: GraphicsPool::new(),
            avatar,
            avatar_node_id,
            prev_states,
            node_hits: Vec::new(),
            drag: None,
        };

        scene.rebuild();
        if let Some(node) = scene.props.node(&scene.props.avatar_position) {
            scene.camera.jump_center_on(node.x, node.y);
        }
        (scene.callbacks.on_scene_ready)();
        Ok(scene)
    }

    /// Replace the displayed snapshot and rebuild static geometry.
    ///
    /// Any node transitioning *into* Completed since the previous
    /// snapshot triggers the avatar celebrate animation and a
    /// celebration burst at that node — exactly once per transition;
    /// rebuilds without a state change never refire it.
    pub fn set_props(&mut self, props: SceneProps) -> WaymarkResult<()> {
        props.validate()?;

        for (id, state) in &props.node_states {
            if *state == NodeState::Completed
                && self.prev_states.get(id).is_some_and(|p| *p != NodeState::Completed)
                && let Some(node) = props.path_nodes.iter().find(|n| n.id == *id)
            {
                debug!(node = %id, "node completed; playing celebration");
                if let Some(avatar) = self.avatar.as_mut() {
                    avatar.celebrate();
                }
                if let Some(c) = self.world.child_container_mut(CELEBRATION_LABEL) {
                    self.celebration
                        .play(c, node.x, node.y - 40.0, CELEBRATION_POINTS);
                }
            }
        }

        self.prev_states = props.node_states.clone();
        self.props = props;
        self.rebuild();
        Ok(())
    }

    /// Advance one display tick: camera easing, avatar animation (with
    /// walk-following camera), and the celebration effect. Animation
    /// completions are forwarded to the host callbacks.
    pub fn tick(&mut self) {
        self.camera.tick();

        let mut arrived = None;
        if let Some(avatar) = self.avatar.as_mut() {
            let event = avatar.update();

            if avatar.state() == AvatarState::Walking {
                let pos = avatar.position();
                self.camera.set_target(
                    pos.x - self.viewport.width_f() / 2.0,
                    pos.y - self.viewport.height_f() / 2.0,
                );
            }

            if let Some(container) = self.world.child_container_mut(AVATAR_LABEL) {
                avatar.sync(container);
            }

            match event {
                Some(AvatarEvent::Arrived(id)) => arrived = Some(id),
                Some(AvatarEvent::CelebrationDone) | None => {}
            }
        }
        if let Some(id) = arrived {
            self.finish_arrival(id);
        }

        if let Some(container) = self.world.child_container_mut(CELEBRATION_LABEL)
            && self.celebration.update(container) == Some(EffectEvent::Completed)
        {
            (self.callbacks.on_celebration_complete)();
        }
    }

    /// Handle a tap at viewport coordinates.
    ///
    /// With an avatar, a tapped node starts a walk and the callbacks
    /// fire on arrival; without one (monthly scene), the camera pans to
    /// the node and `on_node_tapped` fires immediately. The renderer
    /// reports taps on locked nodes too — rejecting them is host logic.
    pub fn tap(&mut self, sx: f64, sy: f64) {
        let (wx, wy) = self.camera.screen_to_world(sx, sy);
        let slop = NODE_RADIUS + TAP_SLOP;
        let hit = self
            .node_hits
            .iter()
            .find(|h| {
                let dx = wx - h.x;
                let dy = wy - h.y;
                dx * dx + dy * dy <= slop * slop
            })
            .cloned();
        let Some(hit) = hit else { return };

        let avatar_free = self
            .avatar
            .as_ref()
            .is_some_and(|a| a.state() != AvatarState::Walking);

        if avatar_free {
            let Some(target) = self.props.node(&hit.id).cloned() else {
                return;
            };
            let mut event = None;
            if let Some(avatar) = self.avatar.as_mut() {
                event = avatar.walk_to(&target, &self.props.path_nodes, &self.avatar_node_id);
            }
            if let Some(AvatarEvent::Arrived(id)) = event {
                self.finish_arrival(id);
            }
        } else {
            // Monthly view (or avatar mid-walk): pan and report.
            self.camera.target_center_on(hit.x, hit.y);
            (self.callbacks.on_node_tapped)(&hit.id, hit.kind);
        }
    }

    /// Begin a drag at viewport coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag = Some((x, y));
    }

    /// Continue a drag: the delta moves the camera *target* (never the
    /// position), so the eased position produces a smooth pan.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some((lx, ly)) = self.drag else { return };
        let dx = x - lx;
        let dy = y - ly;
        self.camera.set_target(self.camera.tx - dx, self.camera.ty - dy);
        self.drag = Some((x, y));
    }

    /// End a drag.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Forward the host back gesture through the contract.
    pub fn back(&mut self) {
        (self.callbacks.on_back_pressed)();
    }

    /// Rasterize the current display tree to a premultiplied RGBA8
    /// frame.
    pub fn render_frame(&mut self) -> WaymarkResult<FrameRGBA> {
        let clear = seasonal_palette(self.props.biome, self.props.season).ground;
        self.renderer.render(
            &self.world,
            self.camera.world_offset(),
            &self.textures,
            clear,
        )
    }

    /// Tear the scene down synchronously. The display tree, avatar and
    /// effect are dropped here; no callbacks fire afterwards.
    pub fn unmount(self) {
        debug!(journey = %self.props.journey_id, "scene unmounted");
    }

    /// Current props snapshot.
    pub fn props(&self) -> &SceneProps {
        &self.props
    }

    /// The display tree root.
    pub fn world(&self) -> &Container {
        &self.world
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The avatar controller, present on weekly/daily scenes.
    pub fn avatar(&self) -> Option<&AvatarController> {
        self.avatar.as_ref()
    }

    /// Node id the avatar currently stands on.
    pub fn avatar_node_id(&self) -> &str {
        &self.avatar_node_id
    }

    /// Whether a celebration burst is in flight.
    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_active()
    }

    /// Pool counters.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    fn finish_arrival(&mut self, id: String) {
        self.avatar_node_id = id.clone();
        let kind = self
            .props
            .node(&id)
            .map(|n| n.kind)
            .unwrap_or(NodeKind::Day);
        (self.callbacks.on_avatar_arrived)(&id);
        (self.callbacks.on_node_tapped)(&id, kind);
    }

    /// Rebuild all static geometry from the current props, recycling
    /// every poolable drawable while the avatar and celebration
    /// containers persist uninterrupted. Draw order is back-to-front:
    /// background, props, paths, nodes, indicator dot.
    fn rebuild(&mut self) {
        debug!(
            scene = ?self.props.scene_type,
            nodes = self.props.path_nodes.len(),
            "rebuilding scene"
        );
        self.camera.update_bounds(&self.props.path_nodes);
        self.pool
            .release_children_except(&mut self.world, &[AVATAR_LABEL, CELEBRATION_LABEL]);

        let palette = seasonal_palette(self.props.biome, self.props.season);

        let mut bg = self.pool.acquire("background");
        bg.z_index = -100;
        let max_y = self
            .props
            .path_nodes
            .iter()
            .map(|n| n.y)
            .fold(900.0, f64::max)
            + 300.0;
        bg.fill_rect(-200.0, -200.0, 800.0, max_y + 200.0, palette.ground, 0.15);
        self.world.add_graphics(bg);

        let placements = generate_props(
            &self.props.path_nodes,
            self.props.biome,
            journey_seed(&self.props.journey_id),
        );
        let mut props_container = Container::new("props");
        props_container.z_index = -10;
        render_props(
            &mut props_container,
            &placements,
            self.props.biome,
            self.props.season,
            &mut self.pool,
        );
        self.world.add_container(props_container);

        self.draw_paths(palette.path);

        self.node_hits.clear();
        let nodes = std::mem::take(&mut self.props.path_nodes);
        for node in &nodes {
            let state = self.props.state_of(&node.id);
            let container = self.build_node(node, state);
            self.world.add_container(container);
            self.node_hits.push(NodeHit {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
                kind: node.kind,
            });
        }
        self.props.path_nodes = nodes;

        if self.props.scene_type == SceneType::Monthly
            && let Some(node) = self.props.node(&self.props.avatar_position)
        {
            let mut dot = self.pool.acquire("avatar-dot");
            dot.z_index = 20;
            let cy = node.y - NODE_RADIUS - 10.0;
            dot.fill_circle(node.x, cy, 5.0, Rgb(0x0A84FF), 1.0);
            dot.stroke_circle(node.x, cy, 5.0, StrokeStyle::solid(Rgb::WHITE, 1.5));
            self.world.add_graphics(dot);
        }
    }

    /// Connect consecutive nodes with quadratic curves whose control
    /// points alternate sides, giving the path a gentle winding look.
    fn draw_paths(&mut self, path_color: Rgb) {
        if self.props.path_nodes.len() < 2 {
            return;
        }

        let mut g = self.pool.acquire("paths");
        g.z_index = 0;

        for (i, pair) in self.props.path_nodes.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            let state_a = self.props.state_of(&a.id);
            let state_b = self.props.state_of(&b.id);
            let completed = state_a == NodeState::Completed && state_b != NodeState::Locked;
            let locked = state_b == NodeState::Locked;

            let mx = (a.x + b.x) / 2.0;
            let my = (a.y + b.y) / 2.0;
            let cp_off = 35.0 * if i % 2 == 0 { 1.0 } else { -1.0 };

            let mut segment = BezPath::new();
            segment.move_to((a.x, a.y));
            segment.quad_to((mx + cp_off, my), (b.x, b.y));

            g.stroke_path(
                segment.clone(),
                StrokeStyle {
                    color: if completed { PATH_COMPLETED } else { path_color },
                    alpha: if locked { 0.25 } else { 0.7 },
                    width: 5.0,
                    dash: None,
                },
            );

            if locked {
                g.stroke_path(
                    segment,
                    StrokeStyle {
                        color: Rgb(0xAAAAAA),
                        alpha: 0.3,
                        width: 2.0,
                        dash: Some([6.0, 6.0]),
                    },
                );
            }
        }

        self.world.add_graphics(g);
    }

    /// One node glyph: state-colored circle with border and shadow, a
    /// glow ring when in progress, a status glyph or label text, and an
    /// optional caption beneath.
    fn build_node(&mut self, node: &PathNode, state: NodeState) -> Container {
        let mut c = Container::new(&node.id);
        c.x = node.x;
        c.y = node.y;
        c.z_index = 10;

        if state == NodeState::InProgress {
            let mut glow = self.pool.acquire("glow");
            glow.fill_circle(0.0, 0.0, NODE_RADIUS + 6.0, Rgb(0xFFB200), 0.25);
            c.add_graphics(glow);
        }

        let mut shadow = self.pool.acquire("shadow");
        shadow.fill_circle(2.0, 2.0, NODE_RADIUS, Rgb::BLACK, 0.1);
        c.add_graphics(shadow);

        let mut bg = self.pool.acquire("node-bg");
        bg.fill_circle(0.0, 0.0, NODE_RADIUS, node_fill(state), 1.0);
        bg.stroke_circle(0.0, 0.0, NODE_RADIUS, StrokeStyle::solid(node_border(state), 2.5));
        c.add_graphics(bg);

        let mut glyph = self.pool.acquire("glyph");
        match state {
            NodeState::Locked => draw_lock_glyph(&mut glyph),
            NodeState::Completed => draw_check_glyph(&mut glyph),
            NodeState::Skipped => draw_dash_glyph(&mut glyph),
            _ => {
                if let Some(key) =
                    self.textures.node_texture_key(node.kind, state, node.category)
                {
                    glyph.image(key, 0.0, 0.0, 0.5, 0.5);
                } else if let Some(label) = &node.label {
                    let short: String = label.chars().take(2).collect();
                    glyph.text(short, 0.0, 0.0, 14.0, Rgb(0x333333), TextAnchor::Center);
                } else {
                    glyph.fill_circle(0.0, 0.0, 3.0, Rgb(0x333333), 1.0);
                }
            }
        }
        c.add_graphics(glyph);

        if let Some(label) = &node.label
            && state != NodeState::Locked
        {
            let mut caption = self.pool.acquire("label");
            caption.text(
                label.clone(),
                0.0,
                NODE_RADIUS + 6.0,
                10.0,
                Rgb(0x555555),
                TextAnchor::Top,
            );
            c.add_graphics(caption);
        }

        c
    }
}

fn draw_lock_glyph(g: &mut Graphics) {
    use std::f64::consts::PI;
    let grey = Rgb(0x999999);
    g.stroke_arc(0.0, -3.0, 4.5, PI, 0.0, StrokeStyle::solid(grey, 2.0));
    g.fill_round_rect(-6.0, -3.0, 12.0, 10.0, 2.0, grey, 1.0);
}

fn draw_check_glyph(g: &mut Graphics) {
    let mut path = BezPath::new();
    path.move_to((-7.0, 0.0));
    path.line_to((-2.0, 5.0));
    path.line_to((7.0, -5.0));
    g.stroke_path(path, StrokeStyle::solid(Rgb::WHITE, 3.0));
}

fn draw_dash_glyph(g: &mut Graphics) {
    g.fill_round_rect(-7.0, -1.5, 14.0, 3.0, 1.5, Rgb(0x555555), 1.0);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderer.rs"]
mod tests;
