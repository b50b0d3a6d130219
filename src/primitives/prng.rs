use crate::primitives::prf::Aes128Prf;
use crate::primitives::PrfBlock;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Counter-mode coin stream used to lazily sample one node of the
/// order-preserving recursion.
///
/// Each block fed to the PRF is laid out as
/// `node low point (8) || depth (1) || zeros (3) || counter (4)`,
/// so streams for distinct nodes never share an input.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Aes128Prng<'p> {
    #[zeroize(skip)]
    prf: &'p Aes128Prf,
    seed: [u8; 12],
    ctr: u32, // increments with each new encryption
}

impl<'p> Aes128Prng<'p> {
    pub fn init(prf: &'p Aes128Prf, low: u64, depth: u8) -> Self {
        let mut seed = [0u8; 12];
        seed[0..8].copy_from_slice(&low.to_be_bytes());
        seed[8] = depth;
        Self { prf, seed, ctr: 0 }
    }

    pub fn next_u128(&mut self) -> u128 {
        let mut block: PrfBlock = [0u8; 16];
        block[0..12].copy_from_slice(&self.seed);
        block[12..16].copy_from_slice(&self.ctr.to_be_bytes());
        self.ctr = self.ctr.wrapping_add(1);

        let out = u128::from_be_bytes(self.prf.evaluate(&block));
        block.zeroize();
        out
    }

    /* Find a uniform random number up to and including max */
    pub fn gen_range(&mut self, max: u128) -> u128 {
        if max == 0 {
            return 0;
        }
        // Smallest all-ones mask covering max
        let mask = u128::MAX >> max.leading_zeros();
        loop {
            let candidate = self.next_u128() & mask;
            if candidate <= max {
                return candidate;
            }
        }
    }
}
