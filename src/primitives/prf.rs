use crate::primitives::{Prf, PrfBlock, PrfKey};
use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::Aes128;
use zeroize::ZeroizeOnDrop;

#[derive(ZeroizeOnDrop)]
pub struct Aes128Prf {
    cipher: Aes128,
}

impl Aes128Prf {
    /// Evaluates the PRF on a single block without touching the input.
    pub fn evaluate(&self, input: &PrfBlock) -> PrfBlock {
        let mut output = [*input];
        self.encrypt_all(&mut output);
        output[0]
    }
}

impl Prf for Aes128Prf {
    fn new(key: &PrfKey) -> Self {
        let cipher = Aes128::new(key);
        Self { cipher }
    }

    fn encrypt_all(&self, data: &mut [PrfBlock]) {
        for block in data.iter_mut() {
            self.cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
    }
}

impl std::fmt::Debug for Aes128Prf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Aes128Prf(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn init_prf() -> Aes128Prf {
        let key: [u8; 16] = hex!("00010203 04050607 08090a0b 0c0d0e0f");
        Prf::new(GenericArray::from_slice(&key))
    }

    #[test]
    fn prf_test_single_block() {
        let mut input = [[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 170]];
        let prf = init_prf();

        prf.encrypt_all(&mut input);
        assert_eq!(
            input,
            [[183, 103, 151, 211, 249, 253, 170, 135, 117, 243, 131, 50, 27, 15, 170, 59]]
        );
    }

    #[test]
    fn prf_test_2_blocks() {
        let mut input = [
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 170],
            [4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 170, 255, 221, 97, 170],
        ];
        let prf = init_prf();

        prf.encrypt_all(&mut input);
        assert_eq!(
            input,
            [
                [183, 103, 151, 211, 249, 253, 170, 135, 117, 243, 131, 50, 27, 15, 170, 59],
                [100, 192, 41, 108, 208, 245, 146, 251, 188, 245, 156, 28, 33, 210, 70, 50]
            ]
        );
    }

    #[test]
    fn evaluate_matches_encrypt_all() {
        let prf = init_prf();
        let input = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 170];

        assert_eq!(
            prf.evaluate(&input),
            [183, 103, 151, 211, 249, 253, 170, 135, 117, 243, 131, 50, 27, 15, 170, 59]
        );
        // Input is left untouched
        assert_eq!(input[15], 170);
    }
}
