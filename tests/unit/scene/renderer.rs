use super::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::display::container::DisplayObject;
use crate::model::contract::{Biome, Season};
use crate::model::paths::PathConfigCache;

fn monthly_props(states: &[(&str, NodeState)]) -> SceneProps {
    let mut cache = PathConfigCache::new();
    let config = cache.get(12).clone();
    SceneProps {
        scene_type: SceneType::Monthly,
        journey_id: "12-week".to_string(),
        current_quarter: 1,
        current_week: 2,
        current_day: 0,
        path_nodes: config.monthly_path,
        node_states: states
            .iter()
            .map(|(id, s)| (id.to_string(), *s))
            .collect(),
        biome: Biome::Wilderness,
        season: Season::Spring,
        avatar_position: "w2".to_string(),
    }
}

fn weekly_props() -> SceneProps {
    let mut cache = PathConfigCache::new();
    let days = cache.get(12).weekly_paths["w2"].clone();
    let avatar = days[0].id.clone();
    SceneProps {
        scene_type: SceneType::Weekly,
        journey_id: "12-week".to_string(),
        current_quarter: 1,
        current_week: 2,
        current_day: 1,
        path_nodes: days,
        node_states: std::collections::BTreeMap::new(),
        biome: Biome::Wilderness,
        season: Season::Spring,
        avatar_position: avatar,
    }
}

fn viewport() -> Viewport {
    Viewport::new(390, 844).unwrap()
}

#[test]
fn mount_builds_world_and_fires_ready() {
    let ready = Rc::new(RefCell::new(0));
    let ready_probe = ready.clone();
    let mut callbacks = SceneCallbacks::noop();
    callbacks.on_scene_ready = Box::new(move || *ready_probe.borrow_mut() += 1);

    let props = monthly_props(&[("w1", NodeState::Completed), ("w2", NodeState::InProgress)]);
    let scene = Scene::mount(props, callbacks, viewport(), TextureStore::new()).unwrap();

    assert_eq!(*ready.borrow(), 1);

    let labels: Vec<&str> = scene.world().children().iter().map(|c| c.label()).collect();
    assert!(labels.contains(&"celebration"));
    assert!(labels.contains(&"background"));
    assert!(labels.contains(&"props"));
    assert!(labels.contains(&"paths"));
    assert!(labels.contains(&"w1"));
    assert!(labels.contains(&"w12"));
    // Monthly scenes carry an indicator dot instead of an avatar.
    assert!(!labels.contains(&"avatar"));
    assert!(labels.contains(&"avatar-dot"));
    assert!(scene.avatar().is_none());
}

#[test]
fn weekly_scene_mounts_an_avatar_at_its_node() {
    let props = weekly_props();
    let day1 = props.path_nodes[0].clone();
    let scene = Scene::mount(props, SceneCallbacks::noop(), viewport(), TextureStore::new())
        .unwrap();

    let avatar = scene.avatar().expect("weekly scene has an avatar");
    assert_eq!(avatar.position().x, day1.x);
    assert_eq!(avatar.position().y, day1.y - AvatarController::FOOT_OFFSET);
    assert_eq!(scene.avatar_node_id(), day1.id);
}

#[test]
fn rebuild_recycles_through_the_pool_and_keeps_live_containers() {
    let props = monthly_props(&[("w1", NodeState::Completed)]);
    let mut scene =
        Scene::mount(props.clone(), SceneCallbacks::noop(), viewport(), TextureStore::new())
            .unwrap();

    let before = scene.pool_stats();
    scene.set_props(props).unwrap();
    let after = scene.pool_stats();

    assert!(after.recycled > before.recycled, "rebuild should reuse pooled drawables");
    let labels: Vec<&str> = scene.world().children().iter().map(|c| c.label()).collect();
    assert!(labels.contains(&"celebration"));
}

#[test]
fn completion_diff_triggers_celebration_exactly_once() {
    let base = monthly_props(&[("w1", NodeState::Completed), ("w2", NodeState::InProgress)]);
    let mut scene =
        Scene::mount(base.clone(), SceneCallbacks::noop(), viewport(), TextureStore::new())
            .unwrap();
    assert!(!scene.is_celebrating());

    let completed = monthly_props(&[("w1", NodeState::Completed), ("w2", NodeState::Completed)]);
    scene.set_props(completed.clone()).unwrap();
    assert!(scene.is_celebrating());

    // Drain the effect, then rebuild with unchanged state: no refire.
    for _ in 0..80 {
        scene.tick();
    }
    assert!(!scene.is_celebrating());
    scene.set_props(completed).unwrap();
    assert!(!scene.is_celebrating());
}

#[test]
fn already_completed_nodes_do_not_celebrate_on_mount() {
    let props = monthly_props(&[("w1", NodeState::Completed)]);
    let scene =
        Scene::mount(props, SceneCallbacks::noop(), viewport(), TextureStore::new()).unwrap();
    assert!(!scene.is_celebrating());
}

#[test]
fn drag_moves_the_camera_target_not_its_position() {
    let props = monthly_props(&[]);
    let mut scene =
        Scene::mount(props, SceneCallbacks::noop(), viewport(), TextureStore::new()).unwrap();

    let y0 = scene.camera().y;
    let ty0 = scene.camera().ty;

    // Drag downward by 100: the map pans up, target moves by -100.
    scene.pointer_down(200.0, 400.0);
    scene.pointer_move(200.0, 500.0);
    scene.pointer_up();

    assert_eq!(scene.camera().y, y0, "position only moves through easing");
    assert!((scene.camera().ty - (ty0 - 100.0)).abs() < 1e-9);

    // The eased position then chases the new target.
    scene.tick();
    assert!(scene.camera().y < y0);
}

#[test]
fn locked_glyphs_never_get_captions() {
    let props = monthly_props(&[("w1", NodeState::Unlocked)]);
    let scene =
        Scene::mount(props, SceneCallbacks::noop(), viewport(), TextureStore::new()).unwrap();

    for child in scene.world().children() {
        let DisplayObject::Container(c) = child else { continue };
        if c.label == "w1" {
            assert!(c.children().iter().any(|g| g.label() == "label"));
        }
        if c.label == "w3" {
            // Locked: no caption child.
            assert!(!c.children().iter().any(|g| g.label() == "label"));
        }
    }
}
