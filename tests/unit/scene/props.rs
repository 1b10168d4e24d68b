use super::*;
use crate::model::contract::NodeKind;

fn nodes() -> Vec<PathNode> {
    (0..6)
        .map(|i| PathNode {
            id: format!("w{}", i + 1),
            x: 100.0 + f64::from(i % 3) * 100.0,
            y: 1600.0 - f64::from(i) * 240.0,
            kind: NodeKind::Week,
            label: None,
            category: None,
        })
        .collect()
}

#[test]
fn same_seed_is_bit_identical() {
    let a = generate_props(&nodes(), Biome::Wilderness, 42);
    let b = generate_props(&nodes(), Biome::Wilderness, 42);
    assert_eq!(a.len(), b.len());
    assert_eq!(a[0].x.to_bits(), b[0].x.to_bits());
    assert_eq!(a[0].y.to_bits(), b[0].y.to_bits());
    assert_eq!(a[0].kind, b[0].kind);
}

#[test]
fn different_seed_moves_the_first_prop() {
    let a = generate_props(&nodes(), Biome::Wilderness, 42);
    let b = generate_props(&nodes(), Biome::Wilderness, 99);
    assert!(a[0].x != b[0].x || a[0].y != b[0].y);
}

#[test]
fn per_segment_counts_and_scatter_extras() {
    let nodes = nodes();
    let props = generate_props(&nodes, Biome::Wilderness, 42);
    let segments = nodes.len() - 1;
    // 2..=4 per segment plus 4 endpoint scatter props.
    assert!(props.len() >= segments * 2 + 4);
    assert!(props.len() <= segments * 4 + 4);
    for prop in &props {
        assert!(prop.scale > 0.0);
    }
}

#[test]
fn biome_palettes_restrict_kinds() {
    let props = generate_props(&nodes(), Biome::City, 7);
    let allowed = biome_props(Biome::City);
    for prop in &props {
        assert!(allowed.contains(&prop.kind), "{:?} not a city prop", prop.kind);
    }
}

#[test]
fn empty_and_single_node_inputs_are_safe() {
    assert!(generate_props(&[], Biome::Town, 42).is_empty());
    let one = nodes()[..1].to_vec();
    // No segments; only the 4 endpoint scatter props.
    assert_eq!(generate_props(&one, Biome::Town, 42).len(), 4);
}

#[test]
fn rendered_props_recede_behind_nodes() {
    let mut pool = GraphicsPool::new();
    let mut container = Container::new("props");
    let placements = generate_props(&nodes(), Biome::Wilderness, 42);
    render_props(
        &mut container,
        &placements,
        Biome::Wilderness,
        Season::Spring,
        &mut pool,
    );
    assert_eq!(container.len(), placements.len());
    for child in container.children() {
        let crate::display::container::DisplayObject::Graphics(g) = child else {
            panic!("props container should hold graphics only");
        };
        assert_eq!(g.alpha, 0.6);
        assert!(!g.commands().is_empty());
    }
}
