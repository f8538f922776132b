use super::*;

#[test]
fn scripted_entropy_cycles_values() {
    let mut e = ScriptedEntropy::new(vec![0.1, 0.5]);
    assert_eq!(e.fraction(), 0.1);
    assert_eq!(e.fraction(), 0.5);
    assert_eq!(e.fraction(), 0.1);
}

#[test]
fn scripted_below_floors_fraction() {
    let mut e = ScriptedEntropy::new(vec![0.0, 0.26, 0.999]);
    assert_eq!(e.below(4), 0);
    assert_eq!(e.below(4), 1);
    assert_eq!(e.below(4), 3);
    assert_eq!(e.below(0), 0);
}

#[test]
fn scripted_values_are_clamped_below_one() {
    let mut e = ScriptedEntropy::new(vec![1.0, -3.0, f64::NAN]);
    assert!(e.fraction() < 1.0);
    assert_eq!(e.fraction(), 0.0);
    assert_eq!(e.fraction(), 0.0);
}

#[test]
fn seeded_entropy_is_deterministic() {
    let mut a = RngEntropy::seeded(7);
    let mut b = RngEntropy::seeded(7);
    let xs: Vec<usize> = (0..16).map(|_| a.below(100)).collect();
    let ys: Vec<usize> = (0..16).map(|_| b.below(100)).collect();
    assert_eq!(xs, ys);
    assert!(xs.iter().all(|&x| x < 100));
}

#[test]
fn rng_entropy_stays_in_range() {
    let mut e = RngEntropy::seeded(42);
    for _ in 0..1000 {
        let f = e.fraction();
        assert!((0.0..1.0).contains(&f));
    }
    assert_eq!(e.below(0), 0);
}

#[test]
fn boxed_entropy_forwards() {
    let mut boxed: Box<dyn Entropy> = Box::new(ScriptedEntropy::constant(0.5));
    assert_eq!(boxed.below(10), 5);
}
