use bmdope::{Bmdope, BmdopeEncrypt, Key};
use hex_literal::hex;

fn main() {
    let key = Key::from_slice(&hex!("00010203 04050607 08090a0b 0c0d0e0f"));
    let cipher = Bmdope::new(key, None).unwrap();

    let i = 10000u64;
    let ct = i.encrypt(&cipher).unwrap();
    println!("CT = {};", hex::encode(&ct));

    let (low, high) = i.encrypt_bound(&cipher).unwrap().into_pair();
    println!("LOW = {};", hex::encode(&low));
    println!("HIGH = {};", hex::encode(&high));
}
