use super::*;

#[test]
fn config_invariants_hold_for_standard_and_custom_sizes() {
    let mut cache = PathConfigCache::new();
    for week_count in [4u32, 8, 12, 24, 16] {
        let config = cache.get(week_count).clone();
        config.validate().unwrap();

        assert_eq!(config.monthly_path.len(), week_count as usize);
        assert_eq!(config.weekly_paths.len(), week_count as usize);
        for days in config.weekly_paths.values() {
            assert_eq!(days.len(), 7);
        }
        assert_eq!(config.daily_layout.len(), 5);

        for node in config
            .monthly_path
            .iter()
            .chain(config.weekly_paths.values().flatten())
            .chain(config.daily_layout.iter())
        {
            assert!(node.x.is_finite() && node.y.is_finite(), "NaN in '{}'", node.id);
        }
    }
}

#[test]
fn single_week_journey_builds() {
    let path = build_monthly_path(1);
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].id, "w1");
}

#[test]
fn monthly_path_snakes_within_world_bounds() {
    let path = build_monthly_path(24);
    for node in &path {
        assert!(node.x >= 0.12 * WORLD_WIDTH - 1e-9);
        assert!(node.x <= 0.88 * WORLD_WIDTH + 1e-9);
    }
    // Later weeks sit higher on the map.
    assert!(path[23].y < path[0].y);
}

#[test]
fn weekly_path_zigzags() {
    let days = build_weekly_path("w3");
    assert_eq!(days[0].id, "w3-d1");
    assert_eq!(days[6].id, "w3-d7");
    // Alternating columns: even indexes left of center, odd right.
    for (i, day) in days.iter().enumerate() {
        if i % 2 == 0 {
            assert!(day.x < WORLD_WIDTH / 2.0);
        } else {
            assert!(day.x > WORLD_WIDTH / 2.0);
        }
    }
}

#[test]
fn daily_layout_categories_are_distinct() {
    let layout = daily_layout();
    let mut seen = std::collections::BTreeSet::new();
    for node in &layout {
        assert!(seen.insert(format!("{:?}", node.category.unwrap())));
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn cache_reuses_standard_sizes() {
    let mut cache = PathConfigCache::new();
    let first = cache.get(12).id.clone();
    assert_eq!(first, "12-week");
    assert_eq!(cache.get(12).id, first);
    assert_eq!(cache.get(5).name, "5-Week Journey");
}

#[test]
fn generators_are_pure() {
    assert_eq!(build_monthly_path(8), build_monthly_path(8));
    assert_eq!(build_weekly_path("w1"), build_weekly_path("w1"));
}
