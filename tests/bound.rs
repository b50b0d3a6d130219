mod common;

use bmdope::{Bmdope, BmdopeEncrypt, Bound, Nonce};
use common::{seeded_key, seeded_nonce};
use quickcheck::quickcheck;

#[test]
fn bound_of_42_contains_five_encryptions() {
    let cipher = Bmdope::new(seeded_key(20), None).unwrap();
    let (low, high) = 42u64.encrypt_bound(&cipher).unwrap().into_pair();

    let mut seen = Vec::new();
    for _ in 0..5 {
        let ct = 42u64.encrypt(&cipher).unwrap();
        let blocks = cipher.parse(&ct).unwrap().blocks().to_vec();
        assert!(low.as_slice() <= blocks.as_slice() && blocks.as_slice() <= high.as_slice());
        assert!(!seen.contains(&ct));
        seen.push(ct);
    }
}

#[test]
fn extreme_nonces_stay_inside() {
    let cipher = Bmdope::new(seeded_key(21), None).unwrap();
    let bound = cipher.encrypt_bound(b"boundary").unwrap();

    for nonce in [[0x00u8; 16], [0xffu8; 16]] {
        let ct = cipher
            .encrypt_with_nonce(b"boundary", &Nonce::from_slice(&nonce))
            .unwrap();
        assert!(bound.contains(&cipher.parse(&ct).unwrap()));
    }
}

#[test]
fn other_values_fall_outside() {
    let cipher = Bmdope::new(seeded_key(22), None).unwrap();
    let bound = 42u64.encrypt_bound(&cipher).unwrap();

    for other in [0u64, 41, 43, 1 << 40, u64::MAX] {
        let ct = other.encrypt(&cipher).unwrap();
        assert!(!bound.contains(&cipher.parse(&ct).unwrap()), "{}", other);
    }
}

#[test]
fn longer_value_sharing_padded_prefix_falls_outside() {
    let cipher = Bmdope::new(seeded_key(26), None).unwrap();
    let bound = cipher.encrypt_bound(b"abc").unwrap();

    for _ in 0..20 {
        let ct = cipher.encrypt(b"abc\x80xyz").unwrap();
        assert!(!bound.contains(&cipher.parse(&ct).unwrap()));
    }
    for seed in 0..20 {
        let ct = cipher
            .encrypt_with_nonce(b"abc\x80\x00\x00\x00", &seeded_nonce(seed))
            .unwrap();
        assert!(!bound.contains(&cipher.parse(&ct).unwrap()));
    }
}

#[test]
fn range_query() {
    let cipher = Bmdope::new(seeded_key(23), None).unwrap();
    let range = cipher
        .encrypt_range(&100u32.to_be_bytes(), &200u32.to_be_bytes())
        .unwrap();

    for value in [100u32, 101, 150, 199, 200] {
        let ct = value.encrypt(&cipher).unwrap();
        assert!(range.contains(&cipher.parse(&ct).unwrap()), "{}", value);
    }
    for value in [0u32, 99, 201, 1 << 20] {
        let ct = value.encrypt(&cipher).unwrap();
        assert!(!range.contains(&cipher.parse(&ct).unwrap()), "{}", value);
    }
}

#[test]
fn span_of_bounds_matches_range() {
    let cipher = Bmdope::new(seeded_key(24), None).unwrap();
    let low = 5u16.encrypt_bound(&cipher).unwrap();
    let high = 9u16.encrypt_bound(&cipher).unwrap();

    assert_eq!(
        Bound::span(&low, &high),
        cipher.encrypt_range(&5u16.to_be_bytes(), &9u16.to_be_bytes()).unwrap()
    );
}

quickcheck! {
    fn contains_every_nonce(value: Vec<u8>, seed: u64) -> bool {
        let cipher = Bmdope::new(seeded_key(25), None).unwrap();
        let bound = cipher.encrypt_bound(&value).unwrap();
        let ct = cipher.encrypt_with_nonce(&value, &seeded_nonce(seed)).unwrap();

        bound.contains(&cipher.parse(&ct).unwrap())
    }
}
