use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let mut c = Rng64::new(124);
    assert_ne!(Rng64::new(123).next_u64(), c.next_u64());
}

#[test]
fn unit_interval_is_half_open() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn rand_in_range_respects_bounds_and_places() {
    let mut rng = Rng64::new(42);
    for _ in 0..500 {
        let v = rand_in_range(&mut rng, 5.0, Some(70.0), false, 3);
        assert!((5.0..70.0).contains(&v));
        let scaled = v * 1000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}

#[test]
fn rand_in_range_without_max_is_symmetric() {
    let mut rng = Rng64::new(9);
    let mut saw_negative = false;
    let mut saw_positive = false;
    for _ in 0..500 {
        let v = rand_in_range(&mut rng, -12.0, None, false, 3);
        assert!((-12.0..=12.0).contains(&v));
        saw_negative |= v < 0.0;
        saw_positive |= v > 0.0;
    }
    assert!(saw_negative && saw_positive);
}

#[test]
fn randomized_sign_flips_some_draws() {
    let mut rng = Rng64::new(3);
    let draws: Vec<f64> = (0..200)
        .map(|_| rand_in_range(&mut rng, 0.0, Some(30.0), true, 3))
        .collect();
    assert!(draws.iter().any(|v| *v < 0.0));
    assert!(draws.iter().any(|v| *v > 0.0));
    assert!(draws.iter().all(|v| v.abs() < 30.0));
}

#[test]
fn shuffle_is_a_seeded_permutation() {
    let mut a: Vec<usize> = (0..20).collect();
    let mut b = a.clone();
    shuffle(&mut Rng64::new(5), &mut a);
    shuffle(&mut Rng64::new(5), &mut b);
    assert_eq!(a, b);

    let mut sorted = a.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..20).collect::<Vec<_>>());

    let mut empty: Vec<u8> = Vec::new();
    shuffle(&mut Rng64::new(5), &mut empty);
    assert!(empty.is_empty());
}
