mod common;

use bmdope::{
    Bmdope, BmdopeEncrypt, Config, KeySchedule, LazySampleOpe, OrderPreservingBlockCipher,
    ValueDomain,
};
use common::{seeded_key, seeded_nonce};
use quickcheck::{quickcheck, TestResult};
use std::cmp::Ordering;

#[test]
fn numeric_string_blocks() {
    let key = seeded_key(10);
    let nonce = seeded_nonce(10);
    let ope = LazySampleOpe::new(8).unwrap();
    let subkey = KeySchedule::new(&key, &nonce).subkey(0).unwrap();

    let five = ope.encrypt_block(b"00000005", &subkey).unwrap();
    let ten = ope.encrypt_block(b"00000010", &subkey).unwrap();
    assert!(five < ten);
}

#[test]
fn numeric_strings_under_fixed_nonce() {
    let config = Config::default().with_block_width(8);
    let cipher = Bmdope::with_config(config, seeded_key(11), Some(seeded_nonce(11))).unwrap();

    let five = cipher.encrypt(b"00000005").unwrap();
    let ten = cipher.encrypt(b"00000010").unwrap();
    assert_eq!(cipher.compare_raw_slices(&five, &ten), Some(Ordering::Less));
}

#[test]
fn sorted_ciphertexts_sort_plaintexts() {
    let cipher = Bmdope::new(seeded_key(12), Some(seeded_nonce(12))).unwrap();
    let values = [
        0u32, 1, 2, 255, 256, 1000, 65_535, 65_536, 1 << 24, u32::MAX - 1, u32::MAX,
    ];

    let mut encrypted: Vec<(Vec<u8>, u32)> = values
        .iter()
        .rev()
        .map(|v| (v.encrypt(&cipher).unwrap(), *v))
        .collect();
    encrypted.sort_by(|a, b| {
        cipher
            .compare_raw_slices(&a.0, &b.0)
            .unwrap_or(Ordering::Equal)
    });

    let sorted: Vec<u32> = encrypted.into_iter().map(|(_, v)| v).collect();
    assert_eq!(sorted, values.to_vec());
}

#[test]
fn equal_values_under_one_nonce_are_equal() {
    let cipher = Bmdope::new(seeded_key(13), Some(seeded_nonce(13))).unwrap();
    let a = "same".encrypt(&cipher).unwrap();
    let b = "same".encrypt(&cipher).unwrap();

    assert_eq!(cipher.compare_raw_slices(&a, &b), Some(Ordering::Equal));
}

#[test]
fn lexicographic_strings() {
    let cipher = Bmdope::new(seeded_key(14), Some(seeded_nonce(14))).unwrap();
    let words = ["apple", "apply", "berry", "cherry"];
    for pair in words.windows(2) {
        if pair[0].len() != pair[1].len() {
            continue;
        }
        let a = pair[0].encrypt(&cipher).unwrap();
        let b = pair[1].encrypt(&cipher).unwrap();
        assert_eq!(cipher.compare_raw_slices(&a, &b), Some(Ordering::Less));
    }
}

fn numeric_cipher(seed: u64) -> Bmdope {
    let config = Config::default().with_domain(ValueDomain::Numeric { width: 4 });
    Bmdope::with_config(config, seeded_key(seed), Some(seeded_nonce(seed))).unwrap()
}

fn significant_bytes(value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

#[test]
fn numeric_domain_orders_by_value() {
    let cipher = numeric_cipher(17);
    let five = cipher.encrypt(&[5]).unwrap();
    let seven = cipher.encrypt(&[0, 0, 0, 7]).unwrap();
    let two_fifty_six = cipher.encrypt(&[1, 0]).unwrap();

    assert_eq!(cipher.compare_raw_slices(&five, &seven), Some(Ordering::Less));
    assert_eq!(cipher.compare_raw_slices(&seven, &two_fifty_six), Some(Ordering::Less));
    assert_eq!(cipher.compare_raw_slices(&five, &two_fifty_six), Some(Ordering::Less));
    assert_eq!(
        cipher.compare_raw_slices(&five, &cipher.encrypt(&[0, 5]).unwrap()),
        Some(Ordering::Equal)
    );
}

quickcheck! {
    fn numeric_domain_preserves_order(x: u32, y: u32) -> bool {
        let cipher = numeric_cipher(18);
        let a = cipher.encrypt(&significant_bytes(x)).unwrap();
        let b = cipher.encrypt(&significant_bytes(y)).unwrap();

        cipher.compare_raw_slices(&a, &b) == Some(x.cmp(&y))
    }


    fn fixed_nonce_preserves_order(x: u64, y: u64) -> bool {
        let cipher = Bmdope::new(seeded_key(15), Some(seeded_nonce(15))).unwrap();
        let a = x.encrypt(&cipher).unwrap();
        let b = y.encrypt(&cipher).unwrap();

        cipher.compare_raw_slices(&a, &b) == Some(x.cmp(&y))
    }

    fn fresh_nonces_preserve_order_of_distinct_values(x: u64, y: u64) -> TestResult {
        if x == y {
            return TestResult::discard();
        }
        let cipher = Bmdope::new(seeded_key(16), None).unwrap();
        let a = x.encrypt(&cipher).unwrap();
        let b = y.encrypt(&cipher).unwrap();

        TestResult::from_bool(cipher.compare_raw_slices(&a, &b) == Some(x.cmp(&y)))
    }
}
