use super::*;

#[test]
fn play_spawns_particles_and_points_text() {
    let mut effect = CelebrationEffect::new(42);
    let mut container = Container::new("celebration");

    effect.play(&mut container, 120.0, 300.0, 50);
    assert!(effect.is_active());
    assert_eq!(container.len(), PARTICLE_COUNT + 1);
    assert_eq!(container.x, 120.0);
    assert_eq!(container.y, 300.0);
}

#[test]
fn zero_points_skips_the_text() {
    let mut effect = CelebrationEffect::new(42);
    let mut container = Container::new("celebration");
    effect.play(&mut container, 0.0, 0.0, 0);
    assert_eq!(container.len(), PARTICLE_COUNT);
}

#[test]
fn runs_to_completion_exactly_once_and_cleans_up() {
    let mut effect = CelebrationEffect::new(42);
    let mut container = Container::new("celebration");
    effect.play(&mut container, 0.0, 0.0, 50);

    let mut completions = 0;
    for _ in 0..(EFFECT_DURATION + 10) {
        if effect.update(&mut container) == Some(EffectEvent::Completed) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert!(!effect.is_active());
    assert!(container.is_empty(), "transient children must be destroyed");
}

#[test]
fn particles_fall_fade_and_shrink() {
    let mut effect = CelebrationEffect::new(42);
    let mut container = Container::new("celebration");
    effect.play(&mut container, 0.0, 0.0, 0);

    for _ in 0..30 {
        effect.update(&mut container);
    }
    for child in container.children() {
        let DisplayObject::Graphics(g) = child else {
            panic!("celebration children are graphics");
        };
        assert!(g.alpha < 1.0);
        assert!(g.scale_x < 1.0);
    }
}

#[test]
fn replay_resets_the_prior_run() {
    let mut effect = CelebrationEffect::new(42);
    let mut container = Container::new("celebration");

    effect.play(&mut container, 0.0, 0.0, 50);
    for _ in 0..10 {
        effect.update(&mut container);
    }
    // Immediate replay must clean up the old children first.
    effect.play(&mut container, 50.0, 60.0, 25);
    assert_eq!(container.len(), PARTICLE_COUNT + 1);
    assert_eq!(container.x, 50.0);
    assert!(effect.is_active());
}

#[test]
fn points_text_floats_upward() {
    let mut effect = CelebrationEffect::new(42);
    let mut container = Container::new("celebration");
    effect.play(&mut container, 0.0, 0.0, 50);

    let start_y = container.child_graphics_mut("points").unwrap().y;
    for _ in 0..20 {
        effect.update(&mut container);
    }
    let after_y = container.child_graphics_mut("points").unwrap().y;
    assert!(after_y < start_y);
}
