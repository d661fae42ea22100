use super::*;

#[test]
fn can_repeat_sequence_with_same_seed() {
    let first = DefaultRandom::new_with_seed(42);
    let second = DefaultRandom::new_with_seed(42);

    let first = (0..10).map(|_| first.uniform_int(0, 100)).collect::<Vec<_>>();
    let second = (0..10).map(|_| second.uniform_int(0, 100)).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn can_return_values_within_range() {
    let random = DefaultRandom::new_repeatable();

    for _ in 0..100 {
        assert!((-2..=2).contains(&random.uniform_int(-2, 2)));
    }

    assert_eq!(random.uniform_int(3, 3), 3);
}

#[test]
fn can_pick_index_from_degenerate_ranges() {
    let random = DefaultRandom::new_repeatable();

    assert_eq!(random.pick_index(0), 0);
    assert_eq!(random.pick_index(1), 0);
    assert!(random.pick_index(3) < 3);
}
