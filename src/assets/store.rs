//! Key → texture lookup for bitmap assets.
//!
//! The scene must function correctly with zero loaded textures: every
//! lookup is fallible-by-design and callers fall back to procedural
//! drawing. A failed decode is absorbed per-asset with a warning, never
//! surfaced as a scene failure.

use std::collections::HashMap;

use tracing::warn;

use crate::model::contract::{NodeKind, NodeState, TaskCategory};

/// A decoded bitmap, premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, row-major.
    pub data: Vec<u8>,
}

impl Texture {
    /// 1×1 opaque white sentinel.
    pub fn blank() -> Self {
        Self {
            width: 1,
            height: 1,
            data: vec![255, 255, 255, 255],
        }
    }
}

/// Scene-scoped texture cache keyed by asset path strings such as
/// `nodes/week-locked.png` or `avatar/walk/frame3.png`.
#[derive(Debug)]
pub struct TextureStore {
    textures: HashMap<String, Texture>,
    font: Option<Vec<u8>>,
    blank: Texture,
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    /// An empty store; the scene renders fully procedurally.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            font: None,
            blank: Texture::blank(),
        }
    }

    /// Decode and register a PNG under `key`. Returns whether the asset
    /// loaded; failures are logged and skipped so one bad asset cannot
    /// take the scene down.
    pub fn insert_png(&mut self, key: impl Into<String>, bytes: &[u8]) -> bool {
        let key = key.into();
        match image::load_from_memory_with_format(bytes, image::ImageFormat::Png) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                let mut data = rgba.into_raw();
                premultiply_rgba8_in_place(&mut data);
                self.textures.insert(key, Texture { width, height, data });
                true
            }
            Err(err) => {
                warn!(key = %key, error = %err, "texture decode failed; procedural fallback");
                false
            }
        }
    }

    /// Register an already-decoded texture under `key`.
    pub fn insert(&mut self, key: impl Into<String>, texture: Texture) {
        self.textures.insert(key.into(), texture);
    }

    /// Font bytes for label/text rasterization, if provided.
    pub fn set_font_bytes(&mut self, bytes: Vec<u8>) {
        self.font = Some(bytes);
    }

    /// Registered font bytes.
    pub fn font_bytes(&self) -> Option<&[u8]> {
        self.font.as_deref()
    }

    /// Texture for `key`, if loaded.
    pub fn get(&self, key: &str) -> Option<&Texture> {
        self.textures.get(key)
    }

    /// Texture for `key`, or the 1×1 white sentinel. Never errors on a
    /// missing key.
    pub fn get_or_blank(&self, key: &str) -> &Texture {
        self.textures.get(key).unwrap_or(&self.blank)
    }

    /// Whether `key` is loaded.
    pub fn contains(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    /// Number of loaded textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether no textures are loaded.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Keys `{prefix}/frame1.png ..= frame{count}.png` that are loaded,
    /// in frame order. Used to assemble avatar animation frame sets.
    pub fn frame_keys(&self, prefix: &str, count: usize) -> Vec<String> {
        (1..=count)
            .map(|i| format!("{prefix}/frame{i}.png"))
            .filter(|k| self.contains(k))
            .collect()
    }

    /// Node glyph texture key by kind, state, and optional task
    /// category.
    ///
    /// Active task nodes prefer their category art; otherwise the
    /// state table maps to week/day art, with skipped nodes reusing the
    /// locked art. Returns `None` when nothing matching is loaded —
    /// the caller draws procedurally.
    pub fn node_texture_key(
        &self,
        kind: NodeKind,
        state: NodeState,
        category: Option<TaskCategory>,
    ) -> Option<String> {
        if let Some(category) = category
            && !matches!(
                state,
                NodeState::Locked | NodeState::Completed | NodeState::Skipped
            )
        {
            let key = format!("nodes/task-{}.png", category_slug(category));
            if self.contains(&key) {
                return Some(key);
            }
        }

        let kind_slug = match kind {
            NodeKind::Week => "week",
            NodeKind::Day | NodeKind::Task => "day",
        };
        let state_slug = match state {
            NodeState::Locked | NodeState::Skipped => "locked",
            NodeState::Unlocked | NodeState::InProgress => "unlocked",
            NodeState::Completed => "completed",
        };
        let key = format!("nodes/{kind_slug}-{state_slug}.png");
        self.contains(&key).then_some(key)
    }
}

fn category_slug(category: TaskCategory) -> &'static str {
    match category {
        TaskCategory::Medication => "medication",
        TaskCategory::Nutrition => "nutrition",
        TaskCategory::Movement => "movement",
        TaskCategory::Wellness => "wellness",
        TaskCategory::Checkin => "checkin",
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((u16::from(px[0]) * a + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * a + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
