//! Path-shape generators and the cached path configuration.
//!
//! All coordinates are absolute world-space pixels laid out against a
//! fixed logical world width; the camera pans the viewport over the
//! world at render time. Paths grow upward: index 0 is the bottom-most
//! node and later nodes sit higher (smaller y).

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::foundation::error::{WaymarkError, WaymarkResult};
use crate::model::contract::{NodeKind, PathNode, TaskCategory};

/// Logical world width the generators lay out against.
pub const WORLD_WIDTH: f64 = 400.0;

const MONTHLY_SPACING: f64 = 240.0;
const MONTHLY_MARGIN: f64 = 160.0;
const WEEKLY_SPACING: f64 = 160.0;
const WEEKLY_MARGIN: f64 = 100.0;

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A journey's full path layout: one monthly path, one weekly path per
/// week, and the fixed daily task layout.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PathConfig {
    /// Cache key, `"{n}-week"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of weeks in the journey.
    pub week_count: u32,
    /// One week node per week.
    pub monthly_path: Vec<PathNode>,
    /// Seven day nodes per week, keyed by week id.
    pub weekly_paths: BTreeMap<String, Vec<PathNode>>,
    /// The five daily task nodes.
    pub daily_layout: Vec<PathNode>,
}

impl PathConfig {
    /// Check the structural invariants of a built configuration.
    pub fn validate(&self) -> WaymarkResult<()> {
        if self.monthly_path.len() != self.week_count as usize {
            return Err(WaymarkError::validation(
                "monthly path length must equal week_count",
            ));
        }
        if self.weekly_paths.len() != self.week_count as usize {
            return Err(WaymarkError::validation(
                "weekly path count must equal week_count",
            ));
        }
        for (week_id, days) in &self.weekly_paths {
            if days.len() != 7 {
                return Err(WaymarkError::validation(format!(
                    "weekly path '{week_id}' must have exactly 7 nodes"
                )));
            }
        }
        if self.daily_layout.len() != 5 {
            return Err(WaymarkError::validation(
                "daily layout must have exactly 5 nodes",
            ));
        }
        let mut categories = std::collections::BTreeSet::new();
        for node in &self.daily_layout {
            match node.category {
                Some(c) => {
                    if !categories.insert(format!("{c:?}")) {
                        return Err(WaymarkError::validation(
                            "daily layout categories must be distinct",
                        ));
                    }
                }
                None => {
                    return Err(WaymarkError::validation(
                        "daily layout nodes must carry a category",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Keep a generated node only if it landed inside the world; a position
/// outside the grid is a generator bug we absorb with a diagnostic
/// rather than letting one bad milestone take the whole graph down.
fn place(nodes: &mut Vec<PathNode>, node: PathNode) {
    if !(0.0..=WORLD_WIDTH).contains(&node.x) || !node.y.is_finite() {
        warn!(id = %node.id, x = node.x, y = node.y, "skipping out-of-bounds node placement");
        return;
    }
    nodes.push(node);
}

/// Lay out `week_count` week nodes in a 3-column snake with a subtle
/// sinusoidal wobble. Pure function of `week_count`; safe for
/// `week_count == 1`.
pub fn build_monthly_path(week_count: u32) -> Vec<PathNode> {
    let map_height = f64::from(week_count) * MONTHLY_SPACING + MONTHLY_MARGIN * 2.0;
    let mut nodes = Vec::with_capacity(week_count as usize);

    for i in 0..week_count {
        // 3-column snake: left (20%), center (50%), right (80%).
        let mut nx = match i % 3 {
            0 => 0.2,
            1 => 0.5,
            _ => 0.8,
        };
        nx += (f64::from(i) * 0.7).sin() * 0.05;
        nx = nx.clamp(0.12, 0.88);

        place(
            &mut nodes,
            PathNode {
                id: format!("w{}", i + 1),
                x: nx * WORLD_WIDTH,
                y: (map_height - MONTHLY_MARGIN - f64::from(i) * MONTHLY_SPACING).round(),
                kind: NodeKind::Week,
                label: Some(format!("Week {}", i + 1)),
                category: None,
            },
        );
    }

    nodes
}

/// Lay out the 7 day nodes for one week in a two-column zigzag.
pub fn build_weekly_path(week_id: &str) -> Vec<PathNode> {
    let map_height = DAY_LABELS.len() as f64 * WEEKLY_SPACING + WEEKLY_MARGIN * 2.0;
    let mut nodes = Vec::with_capacity(DAY_LABELS.len());

    for (i, day) in DAY_LABELS.iter().enumerate() {
        // Zigzag between ~25% and ~75% of the world width.
        let base = if i % 2 == 0 { 0.25 } else { 0.75 };
        let nx = base + (i as f64 * 1.3).sin() * 0.04;

        place(
            &mut nodes,
            PathNode {
                id: format!("{}-d{}", week_id, i + 1),
                x: nx * WORLD_WIDTH,
                y: (map_height - WEEKLY_MARGIN - i as f64 * WEEKLY_SPACING).round(),
                kind: NodeKind::Day,
                label: Some((*day).to_string()),
                category: None,
            },
        );
    }

    nodes
}

/// The fixed five-task daily layout.
pub fn daily_layout() -> Vec<PathNode> {
    fn task(id: &str, x: f64, y: f64, label: &str, category: TaskCategory) -> PathNode {
        PathNode {
            id: id.to_string(),
            x,
            y,
            kind: NodeKind::Task,
            label: Some(label.to_string()),
            category: Some(category),
        }
    }

    vec![
        task("medication", 200.0, 120.0, "Medication", TaskCategory::Medication),
        task("nutrition", 320.0, 220.0, "Nutrition", TaskCategory::Nutrition),
        task("movement", 200.0, 340.0, "Movement", TaskCategory::Movement),
        task("wellness", 80.0, 220.0, "Wellness", TaskCategory::Wellness),
        task("checkin", 200.0, 220.0, "Check-in", TaskCategory::Checkin),
    ]
}

fn build_path_config(id: &str, name: &str, week_count: u32) -> PathConfig {
    let monthly_path = build_monthly_path(week_count);
    let mut weekly_paths = BTreeMap::new();
    for i in 0..week_count {
        let week_id = format!("w{}", i + 1);
        weekly_paths.insert(week_id.clone(), build_weekly_path(&week_id));
    }
    PathConfig {
        id: id.to_string(),
        name: name.to_string(),
        week_count,
        monthly_path,
        weekly_paths,
        daily_layout: daily_layout(),
    }
}

/// Cache of built path configurations, keyed by `"{n}-week"`.
///
/// Owned by the host (or the CLI); an explicit object rather than a
/// process-global so concurrent journeys cannot cross-talk.
#[derive(Debug)]
pub struct PathConfigCache {
    configs: HashMap<String, PathConfig>,
}

impl Default for PathConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PathConfigCache {
    /// Create a cache pre-populated with the standard journey sizes.
    pub fn new() -> Self {
        let mut configs = HashMap::new();
        for (week_count, name) in [
            (4, "Quick Start"),
            (8, "Short Journey"),
            (12, "Standard Quarter"),
            (24, "Extended Journey"),
        ] {
            let key = format!("{week_count}-week");
            configs.insert(key.clone(), build_path_config(&key, name, week_count));
        }
        Self { configs }
    }

    /// Return the configuration for `week_count`, building and caching
    /// non-standard sizes on demand.
    pub fn get(&mut self, week_count: u32) -> &PathConfig {
        let key = format!("{week_count}-week");
        self.configs.entry(key.clone()).or_insert_with(|| {
            build_path_config(&key, &format!("{week_count}-Week Journey"), week_count)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/paths.rs"]
mod tests;
