extern crate priority_treap;
extern crate rand;

use priority_treap::randomized::RandomizedTreap;
use rand::{Rng, SeedableRng, XorShiftRng};
use std::vec::Vec;

#[test]
fn int_test_randomized_treap_balance() {
    let len = 100_000;
    let trials = 3;
    let bound = 3.0 * (len as f64).log2();

    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut total_height = 0;
    for trial in 0..trials {
        let mut keys = Vec::with_capacity(len);
        while keys.len() < len {
            keys.push(rng.gen::<u64>());
        }
        keys.sort();
        keys.dedup();
        rng.shuffle(&mut keys);

        let mut treap = RandomizedTreap::with_seed(trial);
        treap.extend(keys.iter().cloned());
        assert_eq!(treap.len(), keys.len());
        assert!((treap.height() as f64) <= 2.0 * bound);
        total_height += treap.height();
    }

    assert!((total_height as f64) / (trials as f64) <= bound);
}

#[test]
fn int_test_randomized_treap_sorted_input() {
    let mut treap = RandomizedTreap::with_seed(17);
    treap.extend(0..100_000u32);

    assert!((treap.height() as f64) <= 3.0 * 100_000f64.log2());
    assert_eq!(treap.min(), Ok(&0));
    assert_eq!(treap.max(), Ok(&99_999));
    assert!(treap.iter().cloned().eq(0..100_000u32));
    assert!(treap.as_treap().check_invariants());

    for key in (0..100_000u32).filter(|key| key % 2 == 0) {
        let priority = treap.as_treap().get_priority(&key);
        assert_eq!(treap.delete(&key), priority.map(|priority| (key, priority)));
    }
    assert_eq!(treap.len(), 50_000);
    assert!(treap.iter().rev().cloned().eq((0..100_000u32).filter(|key| key % 2 == 1).rev()));
    assert!(treap.as_treap().check_invariants());
}
