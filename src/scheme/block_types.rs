use crate::{BmdopeError, Result};

/*
 * A 16-byte ciphertext block: the 96-bit order value in the high bits and
 * a 32-bit whitening tag in the low bits. Comparing blocks as u128 is the
 * same as comparing their big-endian encodings byte by byte.
 */
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CipherBlock(u128);

impl CipherBlock {
    pub const BLOCK_SIZE: usize = 16;
    pub const TAG_BITS: u32 = 32;
    pub const ORDER_BITS: u32 = 128 - Self::TAG_BITS;
    pub const ORDER_MAX: u128 = (1u128 << Self::ORDER_BITS) - 1;

    #[inline]
    pub fn new(order: u128, tag: u32) -> Self {
        debug_assert!(order <= Self::ORDER_MAX);
        Self((order << Self::TAG_BITS) | tag as u128)
    }

    #[inline]
    pub fn order(&self) -> u128 {
        self.0 >> Self::TAG_BITS
    }

    #[inline]
    pub fn tag(&self) -> u32 {
        self.0 as u32
    }

    pub fn to_bytes(self) -> [u8; Self::BLOCK_SIZE] {
        self.0.to_be_bytes()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::BLOCK_SIZE] = data
            .try_into()
            .map_err(|_| BmdopeError::BlockWidthMismatch)?;
        Ok(Self(u128::from_be_bytes(bytes)))
    }
}
