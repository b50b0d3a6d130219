/*
 * Order-preserving block cipher following the lazy-sampling recursion of
 * Boldyreva, Chenette, Lee and O'Neill, "Order-Preserving Symmetric
 * Encryption" (Eurocrypt 2009).
 *
 * The plaintext domain [0, 2^(8w)) is halved at every node and the matching
 * range interval is cut at a point drawn from a coin stream keyed by the
 * order key and seeded by the node. BCLO draw that cut from a hypergeometric
 * distribution; here the slack (range size minus domain size) is split
 * uniformly instead, which keeps the map strictly monotonic and exactly
 * invertible with nothing more than a uniform sampler.
 */

use super::{CipherBlock, OrderPreservingBlockCipher};
use crate::config::MAX_BLOCK_WIDTH;
use crate::primitives::prf::Aes128Prf;
use crate::primitives::prng::Aes128Prng;
use crate::primitives::PrfBlock;
use crate::schedule::{OrderKey, SubKey};
use crate::{BmdopeError, Result};
use subtle_ng::ConstantTimeEq;

#[derive(Debug, Clone, Copy)]
struct Node {
    dlo: u128,
    dhi: u128,
    rlo: u128,
    rhi: u128,
    depth: u8,
}

impl Node {
    fn root(domain_max: u128) -> Self {
        Self {
            dlo: 0,
            dhi: domain_max,
            rlo: 0,
            rhi: CipherBlock::ORDER_MAX,
            depth: 0,
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.dlo == self.dhi
    }

    // Range size minus domain size; never negative
    #[inline]
    fn slack(&self) -> u128 {
        (self.rhi - self.rlo) - (self.dhi - self.dlo)
    }

    fn coins<'p>(&self, prf: &'p Aes128Prf) -> Aes128Prng<'p> {
        Aes128Prng::init(prf, self.dlo as u64, self.depth)
    }

    /// Returns the last domain point and the last range point of the left child.
    fn split(&self, prf: &Aes128Prf) -> (u128, u128) {
        let dmid = self.dlo + (self.dhi - self.dlo) / 2;
        let left_slack = self.coins(prf).gen_range(self.slack());
        (dmid, self.rlo + (dmid - self.dlo) + left_slack)
    }

    fn descend(&self, go_left: bool, dmid: u128, rmid: u128) -> Self {
        if go_left {
            Self {
                dhi: dmid,
                rhi: rmid,
                depth: self.depth + 1,
                ..*self
            }
        } else {
            Self {
                dlo: dmid + 1,
                rlo: rmid + 1,
                depth: self.depth + 1,
                ..*self
            }
        }
    }

    fn leaf_value(&self, prf: &Aes128Prf) -> u128 {
        debug_assert!(self.is_leaf());
        self.rlo + self.coins(prf).gen_range(self.slack())
    }
}

/// The order-preserving transform for blocks of `width` bytes (1 to 8).
#[derive(Debug, Clone, Copy)]
pub struct LazySampleOpe {
    width: usize,
}

impl LazySampleOpe {
    pub fn new(width: usize) -> Result<Self> {
        if !(1..=MAX_BLOCK_WIDTH).contains(&width) {
            return Err(BmdopeError::InvalidConfig("block width must be between 1 and 8 bytes"));
        }
        Ok(Self { width })
    }

    fn domain_max(&self) -> u128 {
        (1u128 << (8 * self.width)) - 1
    }

    fn read_block(&self, block: &[u8]) -> Result<u64> {
        if block.len() != self.width {
            return Err(BmdopeError::BlockWidthMismatch);
        }
        let mut bytes = [0u8; 8];
        bytes[8 - self.width..].copy_from_slice(block);
        Ok(u64::from_be_bytes(bytes))
    }

    fn write_block(&self, value: u64) -> Vec<u8> {
        value.to_be_bytes()[8 - self.width..].to_vec()
    }

    /// Maps a plaintext value to its order value in `[0, 2^96)`.
    pub fn permute(&self, prf: &Aes128Prf, value: u64) -> u128 {
        let value = value as u128;
        debug_assert!(value <= self.domain_max());

        let mut node = Node::root(self.domain_max());
        while !node.is_leaf() {
            let (dmid, rmid) = node.split(prf);
            node = node.descend(value <= dmid, dmid, rmid);
        }
        node.leaf_value(prf)
    }

    /// Inverse of [`permute`](Self::permute). Returns `None` when `order` is
    /// not the image of any value under this key.
    pub fn invert(&self, prf: &Aes128Prf, order: u128) -> Option<u64> {
        if order > CipherBlock::ORDER_MAX {
            return None;
        }

        let mut node = Node::root(self.domain_max());
        while !node.is_leaf() {
            let (dmid, rmid) = node.split(prf);
            node = node.descend(order <= rmid, dmid, rmid);
        }

        let expected = node.leaf_value(prf).to_be_bytes();
        if bool::from(expected[..].ct_eq(&order.to_be_bytes()[..])) {
            Some(node.dlo as u64)
        } else {
            None
        }
    }

    fn whitening_tag(prf: &Aes128Prf, value: u64) -> u32 {
        let mut input: PrfBlock = [0u8; 16];
        input[0..8].copy_from_slice(&value.to_be_bytes());
        let out = prf.evaluate(&input);
        u32::from_be_bytes([out[0], out[1], out[2], out[3]])
    }
}

impl OrderPreservingBlockCipher for LazySampleOpe {
    fn block_width(&self) -> usize {
        self.width
    }

    fn encrypt_block(&self, block: &[u8], subkey: &SubKey) -> Result<CipherBlock> {
        let value = self.read_block(block)?;
        let order = self.permute(&subkey.order_key().prf(), value);
        let tag = Self::whitening_tag(&subkey.whitening_prf(), value);
        Ok(CipherBlock::new(order, tag))
    }

    fn decrypt_block(&self, block: &CipherBlock, subkey: &SubKey) -> Result<Vec<u8>> {
        let corrupt = BmdopeError::CorruptBlock {
            index: subkey.index() as usize,
        };
        let value = self
            .invert(&subkey.order_key().prf(), block.order())
            .ok_or_else(|| corrupt.clone())?;

        let tag = Self::whitening_tag(&subkey.whitening_prf(), value);
        if !bool::from(tag.to_be_bytes()[..].ct_eq(&block.tag().to_be_bytes()[..])) {
            return Err(corrupt);
        }
        Ok(self.write_block(value))
    }

    fn block_bounds(&self, block: &[u8], key: &OrderKey) -> Result<(CipherBlock, CipherBlock)> {
        let value = self.read_block(block)?;
        let order = self.permute(&key.prf(), value);
        Ok((CipherBlock::new(order, 0), CipherBlock::new(order, u32::MAX)))
    }
}
