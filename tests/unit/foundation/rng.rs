use super::*;

#[test]
fn sequence_matches_documented_constants() {
    // First two raw states for seed 42 under state = state * 16807 mod (2^31 - 1).
    let mut rng = SeededRng::new(42);
    let s1 = (rng.next_f64() * 0x7fff_ffff as f64).round() as u64;
    let s2 = (rng.next_f64() * 0x7fff_ffff as f64).round() as u64;
    assert_eq!(s1, 705_894);
    assert_eq!(s2, 1_126_542_223);
}

#[test]
fn same_seed_replays_identically() {
    let mut a = SeededRng::new(1234);
    let mut b = SeededRng::new(1234);
    for _ in 0..100 {
        assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
    }
}

#[test]
fn samples_stay_in_unit_interval() {
    let mut rng = SeededRng::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn next_index_stays_in_range() {
    let mut rng = SeededRng::new(99);
    for _ in 0..1000 {
        assert!(rng.next_index(5) < 5);
    }
}

#[test]
fn journey_seed_is_stable_and_bounded() {
    let a = journey_seed("12-week");
    let b = journey_seed("12-week");
    assert_eq!(a, b);
    assert!(a < SeededRng::MODULUS);
    assert_ne!(journey_seed("12-week"), journey_seed("8-week"));
}
