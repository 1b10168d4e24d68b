use super::*;
use crate::model::contract::NodeKind;

fn node(id: &str, x: f64, y: f64) -> PathNode {
    PathNode {
        id: id.to_string(),
        x,
        y,
        kind: NodeKind::Day,
        label: None,
        category: None,
    }
}

fn day_nodes() -> Vec<PathNode> {
    vec![
        node("d1", 100.0, 1120.0),
        node("d2", 300.0, 960.0),
        node("d3", 100.0, 800.0),
        node("d4", 300.0, 640.0),
    ]
}

fn procedural_avatar() -> AvatarController {
    AvatarController::new(&TextureStore::new())
}

#[test]
fn empty_store_selects_procedural_pose() {
    let avatar = procedural_avatar();
    assert!(matches!(avatar.pose_style(), PoseStyle::Procedural));
}

#[test]
fn walk_to_same_node_arrives_synchronously() {
    let nodes = day_nodes();
    let mut avatar = procedural_avatar();
    avatar.set_position(nodes[0].x, nodes[0].y - AvatarController::FOOT_OFFSET);

    let event = avatar.walk_to(&nodes[0], &nodes, "d1");
    assert_eq!(event, Some(AvatarEvent::Arrived("d1".to_string())));
    assert_eq!(avatar.state(), AvatarState::Idle);
}

#[test]
fn walk_to_unknown_node_arrives_synchronously() {
    let nodes = day_nodes();
    let mut avatar = procedural_avatar();

    let stranger = node("elsewhere", 0.0, 0.0);
    let event = avatar.walk_to(&stranger, &nodes, "d1");
    assert_eq!(event, Some(AvatarEvent::Arrived("elsewhere".to_string())));
    assert_eq!(avatar.state(), AvatarState::Idle);
}

#[test]
fn walk_completes_within_bounded_ticks() {
    let nodes = day_nodes();
    let mut avatar = procedural_avatar();
    avatar.set_position(nodes[0].x, nodes[0].y - AvatarController::FOOT_OFFSET);

    assert_eq!(avatar.walk_to(&nodes[1], &nodes, "d1"), None);
    assert_eq!(avatar.state(), AvatarState::Walking);

    let mut arrivals = Vec::new();
    for _ in 0..500 {
        if let Some(AvatarEvent::Arrived(id)) = avatar.update() {
            arrivals.push(id);
            break;
        }
    }
    assert_eq!(arrivals, ["d2"]);
    assert_eq!(avatar.state(), AvatarState::Idle);

    // Snapped exactly onto the target's foot position.
    let pos = avatar.position();
    assert_eq!(pos.x, nodes[1].x);
    assert_eq!(pos.y, nodes[1].y - AvatarController::FOOT_OFFSET);
}

#[test]
fn second_walk_request_while_walking_is_ignored() {
    let nodes = day_nodes();
    let mut avatar = procedural_avatar();
    avatar.set_position(nodes[0].x, nodes[0].y - AvatarController::FOOT_OFFSET);

    avatar.walk_to(&nodes[3], &nodes, "d1");
    avatar.update();
    assert_eq!(avatar.walk_to(&nodes[1], &nodes, "d1"), None);

    // The first walk still lands on d4.
    let mut arrived = None;
    for _ in 0..2000 {
        if let Some(AvatarEvent::Arrived(id)) = avatar.update() {
            arrived = Some(id);
            break;
        }
    }
    assert_eq!(arrived.as_deref(), Some("d4"));
}

#[test]
fn walking_backwards_mirrors_facing() {
    let nodes = day_nodes();
    let mut avatar = procedural_avatar();
    avatar.set_position(nodes[1].x, nodes[1].y - AvatarController::FOOT_OFFSET);

    avatar.walk_to(&nodes[0], &nodes, "d2");
    avatar.update();

    let mut container = Container::new("avatar");
    avatar.sync(&mut container);
    // d2 -> d1 heads left.
    assert_eq!(container.scale_x, -1.0);
}

#[test]
fn celebrate_bounces_then_returns_to_idle() {
    let mut avatar = procedural_avatar();
    avatar.set_position(200.0, 500.0);
    avatar.celebrate();
    assert_eq!(avatar.state(), AvatarState::Celebrating);

    let mut done = 0;
    let mut moved = false;
    for _ in 0..AvatarController::CELEBRATE_DURATION {
        if avatar.position().y != 500.0 {
            moved = true;
        }
        if avatar.update() == Some(AvatarEvent::CelebrationDone) {
            done += 1;
        }
    }
    assert!(moved, "bounce should displace the avatar mid-celebration");
    assert_eq!(done, 1);
    assert_eq!(avatar.state(), AvatarState::Idle);
    assert_eq!(avatar.position().y, 500.0);
}

#[test]
fn sync_redraws_the_pose_child() {
    let mut avatar = procedural_avatar();
    avatar.set_position(10.0, 20.0);

    let mut container = Container::new("avatar");
    avatar.sync(&mut container);
    assert_eq!(container.x, 10.0);
    assert_eq!(container.y, 20.0);

    let pose = container.child_graphics_mut("pose").unwrap();
    assert!(!pose.commands().is_empty(), "idle pose should draw the body");
    // One pose child, re-used across syncs.
    avatar.sync(&mut container);
    assert_eq!(container.len(), 1);
}
