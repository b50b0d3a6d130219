use crate::{BmdopeError, Result};
use std::borrow::Cow;

pub const DEFAULT_BLOCK_WIDTH: usize = 4;
pub const DEFAULT_KEY_LEN: usize = 16;
pub const DEFAULT_NONCE_LEN: usize = 16;

/// Widest plaintext block the order-preserving transform accepts (a `u64`).
pub const MAX_BLOCK_WIDTH: usize = 8;
pub const MIN_NONCE_LEN: usize = 8;
pub const MAX_NONCE_LEN: usize = 64;
pub const MAX_DOMAIN_WIDTH: usize = 4096;

/// How plaintext values are interpreted before blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDomain {
    /// Arbitrary byte strings. Order is only preserved between inputs of equal length.
    Bytes,
    /// Byte strings of exactly `width` bytes, compared lexicographically.
    Lexicographic { width: usize },
    /// Big-endian unsigned integers of at most `width` significant bytes.
    Numeric { width: usize },
}

impl Default for ValueDomain {
    fn default() -> Self {
        Self::Bytes
    }
}

impl ValueDomain {
    /// Brings a plaintext into the canonical form for this domain.
    pub fn normalize<'a>(&self, input: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        match *self {
            Self::Bytes => Ok(Cow::Borrowed(input)),
            Self::Lexicographic { width } => {
                if input.len() == width {
                    Ok(Cow::Borrowed(input))
                } else {
                    Err(BmdopeError::UnsupportedValueDomain)
                }
            }
            Self::Numeric { width } => {
                let first = input.iter().position(|&b| b != 0).unwrap_or(input.len());
                let significant = &input[first..];
                if significant.len() > width {
                    return Err(BmdopeError::UnsupportedValueDomain);
                }
                let mut out = vec![0u8; width];
                out[width - significant.len()..].copy_from_slice(significant);
                Ok(Cow::Owned(out))
            }
        }
    }

    /// Length every canonical plaintext has in this domain, if fixed.
    pub fn width(&self) -> Option<usize> {
        match *self {
            Self::Bytes => None,
            Self::Lexicographic { width } | Self::Numeric { width } => Some(width),
        }
    }
}

/// Parameters fixed for the lifetime of a cipher instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    block_width: usize,
    key_len: usize,
    nonce_len: usize,
    domain: ValueDomain,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_width: DEFAULT_BLOCK_WIDTH,
            key_len: DEFAULT_KEY_LEN,
            nonce_len: DEFAULT_NONCE_LEN,
            domain: ValueDomain::Bytes,
        }
    }
}

impl Config {
    pub fn with_block_width(mut self, block_width: usize) -> Self {
        self.block_width = block_width;
        self
    }

    pub fn with_key_len(mut self, key_len: usize) -> Self {
        self.key_len = key_len;
        self
    }

    pub fn with_nonce_len(mut self, nonce_len: usize) -> Self {
        self.nonce_len = nonce_len;
        self
    }

    pub fn with_domain(mut self, domain: ValueDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn block_width(&self) -> usize {
        self.block_width
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn nonce_len(&self) -> usize {
        self.nonce_len
    }

    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BLOCK_WIDTH).contains(&self.block_width) {
            return Err(BmdopeError::InvalidConfig("block width must be between 1 and 8 bytes"));
        }
        if !matches!(self.key_len, 16 | 24 | 32) {
            return Err(BmdopeError::InvalidConfig("key length must be 16, 24 or 32 bytes"));
        }
        if !(MIN_NONCE_LEN..=MAX_NONCE_LEN).contains(&self.nonce_len) {
            return Err(BmdopeError::InvalidConfig("nonce length must be between 8 and 64 bytes"));
        }
        if let Some(width) = self.domain.width() {
            if !(1..=MAX_DOMAIN_WIDTH).contains(&width) {
                return Err(BmdopeError::InvalidConfig("domain width must be between 1 and 4096 bytes"));
            }
        }
        Ok(())
    }
}
