pub mod kdf;
pub mod prf;
pub mod prng;

use aes::cipher::{consts::U16, generic_array::GenericArray};

pub type PrfKey = GenericArray<u8, U16>;
pub type PrfBlock = [u8; 16];

/// Size of every key handed to an AES-based primitive.
pub const SUBKEY_SIZE: usize = 16;

pub trait Prf {
    fn new(key: &PrfKey) -> Self;
    fn encrypt_all(&self, data: &mut [PrfBlock]);
}
