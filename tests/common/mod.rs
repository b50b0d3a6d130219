use bmdope::{Key, Nonce};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[allow(dead_code)]
pub fn seeded_key(seed: u64) -> Key {
    let mut bytes = [0u8; 16];
    ChaCha20Rng::seed_from_u64(seed).fill_bytes(&mut bytes);
    Key::from_slice(&bytes)
}

#[allow(dead_code)]
pub fn seeded_nonce(seed: u64) -> Nonce {
    let mut bytes = [0u8; 16];
    ChaCha20Rng::seed_from_u64(seed ^ 0x6e6f6e6365).fill_bytes(&mut bytes);
    Nonce::from_slice(&bytes)
}
