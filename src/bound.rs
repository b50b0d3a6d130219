/*
 * Deterministic range bounds for searching over nonce-randomized ciphertexts.
 *
 * Every block of a message except the last is encrypted under a nonce-free
 * subkey, so a bound reproduces those blocks exactly. The last block carries
 * a nonce-dependent whitening tag under an order part that does not move,
 * so the bound pins that block between the tag cleared and the tag saturated.
 * That order part comes from the final-block order key, so a longer message
 * whose inner block matches the padded last block lands elsewhere.
 */

use crate::ciphertext::Ciphertext;
use crate::scheme::{CipherBlock, OrderPreservingBlockCipher};
use crate::schedule::{final_order_key, prefix_subkey, Key};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    low: Vec<u8>,
    high: Vec<u8>,
}

impl Bound {
    pub fn low(&self) -> &[u8] {
        &self.low
    }

    pub fn high(&self) -> &[u8] {
        &self.high
    }

    pub fn into_pair(self) -> (Vec<u8>, Vec<u8>) {
        (self.low, self.high)
    }

    /// True when `ciphertext` sorts inside `[low, high]`.
    pub fn contains(&self, ciphertext: &Ciphertext<'_>) -> bool {
        self.contains_blocks(ciphertext.blocks())
    }

    /// Same as [`contains`](Self::contains), over a bare block region.
    pub fn contains_blocks(&self, blocks: &[u8]) -> bool {
        self.low.as_slice() <= blocks && blocks <= self.high.as_slice()
    }

    /// The bound running from the low end of `lower` to the high end of `upper`.
    pub fn span(lower: &Bound, upper: &Bound) -> Bound {
        Bound {
            low: lower.low.clone(),
            high: upper.high.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

/// Computes the bound of an already padded plaintext.
pub fn encrypt_bound<C: OrderPreservingBlockCipher>(
    cipher: &C,
    key: &Key,
    padded: &[u8],
) -> Result<Bound> {
    let blocks = padded.len() / cipher.block_width();
    let mut low = Vec::with_capacity(blocks * CipherBlock::BLOCK_SIZE);
    let mut high = Vec::with_capacity(blocks * CipherBlock::BLOCK_SIZE);

    for (i, block) in padded.chunks(cipher.block_width()).enumerate() {
        if i + 1 < blocks {
            let exact = cipher.encrypt_block(block, &prefix_subkey(key, i as u64)?)?;
            low.extend_from_slice(&exact.to_bytes());
            high.extend_from_slice(&exact.to_bytes());
        } else {
            let (lo, hi) = cipher.block_bounds(block, &final_order_key(key, i as u64)?)?;
            low.extend_from_slice(&lo.to_bytes());
            high.extend_from_slice(&hi.to_bytes());
        }
    }

    Ok(Bound { low, high })
}
