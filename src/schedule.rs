//! Per-block key schedule.
//!
//! Every subkey is a pure function of the master key, the nonce and the
//! block index, so any block can be decrypted without replaying the blocks
//! before it and no cursor is kept between calls.
//!
//! The order half of a subkey depends on the block index and on whether the
//! block is the final one of its message, never on the nonce. The nonce
//! feeds the whitening half of the final block, which is what makes repeated
//! encryptions of a value differ while keeping them inside a common
//! [`Bound`](crate::Bound). Blocks before the final one are whitened under a
//! nonce-free key, so equal prefixes encrypt to equal blocks and equal-length
//! ciphertexts keep their order across nonces. The final block has its own
//! order key, so it never lines up with a same-index block of a longer message.

use crate::primitives::prf::Aes128Prf;
use crate::primitives::{kdf, Prf, PrfKey, SUBKEY_SIZE};
use crate::{BmdopeError, Config, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const ORDER_LABEL: &[u8] = b"bmdope/v1/order";
const FINAL_ORDER_LABEL: &[u8] = b"bmdope/v1/order/final";
const WHITENING_LABEL: &[u8] = b"bmdope/v1/whitening";
const PREFIX_WHITENING_LABEL: &[u8] = b"bmdope/v1/whitening/prefix";
const METADATA_ENC_LABEL: &[u8] = b"bmdope/v1/metadata/enc";
const METADATA_MAC_LABEL: &[u8] = b"bmdope/v1/metadata/mac";

fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|_| BmdopeError::EntropyUnavailable)
}

/// The master secret.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key(Vec<u8>);

impl Key {
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Draws `len` bytes from the operating system's secure random source.
    pub fn generate(len: usize) -> Result<Self> {
        let mut bytes = vec![0u8; len];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key([redacted; {}])", self.0.len())
    }
}

/// Per-message randomizer. Not secret, but never reused on purpose.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Nonce(Vec<u8>);

impl Nonce {
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn generate(len: usize) -> Result<Self> {
        let mut bytes = vec![0u8; len];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", hex::encode(&self.0))
    }
}

/// Keys the order-preserving permutation of one block position.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct OrderKey([u8; SUBKEY_SIZE]);

impl OrderKey {
    pub(crate) fn prf(&self) -> Aes128Prf {
        Prf::new(PrfKey::from_slice(&self.0))
    }
}

/// Ephemeral key material for a single block.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SubKey {
    index: u64,
    order: OrderKey,
    whitening: [u8; SUBKEY_SIZE],
}

impl SubKey {
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn order_key(&self) -> &OrderKey {
        &self.order
    }

    pub(crate) fn whitening_prf(&self) -> Aes128Prf {
        Prf::new(PrfKey::from_slice(&self.whitening))
    }
}

impl fmt::Debug for SubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubKey").field("index", &self.index).finish_non_exhaustive()
    }
}

/// Keys protecting the block-length metadata of one message.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MetadataKeys {
    pub(crate) enc: [u8; SUBKEY_SIZE],
    pub(crate) iv: [u8; SUBKEY_SIZE],
    pub(crate) mac: [u8; kdf::DIGEST_SIZE],
}

pub fn generate_key(config: &Config) -> Result<Key> {
    Key::generate(config.key_len())
}

fn derive_order_key(key: &Key, label: &[u8], index: u64) -> Result<OrderKey> {
    let digest = kdf::derive(key.as_bytes(), label, &[&index.to_be_bytes()[..]])?;
    let mut order = [0u8; SUBKEY_SIZE];
    order.copy_from_slice(&digest[..SUBKEY_SIZE]);
    Ok(OrderKey(order))
}

/// Order key of block `index` when more blocks follow it.
pub fn order_key(key: &Key, index: u64) -> Result<OrderKey> {
    derive_order_key(key, ORDER_LABEL, index)
}

/// Order key of block `index` when it is the last block of its message.
pub fn final_order_key(key: &Key, index: u64) -> Result<OrderKey> {
    derive_order_key(key, FINAL_ORDER_LABEL, index)
}

pub fn derive_initial_subkey(key: &Key, nonce: &Nonce) -> Result<SubKey> {
    next_subkey(key, nonce, 0)
}

/// Nonce-bound subkey, used for the final block of a message.
pub fn next_subkey(key: &Key, nonce: &Nonce, index: u64) -> Result<SubKey> {
    let digest = kdf::derive(
        key.as_bytes(),
        WHITENING_LABEL,
        &[nonce.as_bytes(), &index.to_be_bytes()[..]],
    )?;
    let mut whitening = [0u8; SUBKEY_SIZE];
    whitening.copy_from_slice(&digest[..SUBKEY_SIZE]);

    Ok(SubKey {
        index,
        order: final_order_key(key, index)?,
        whitening,
    })
}

/// Subkey for a block that is not the last of its message.
pub fn prefix_subkey(key: &Key, index: u64) -> Result<SubKey> {
    let digest = kdf::derive(
        key.as_bytes(),
        PREFIX_WHITENING_LABEL,
        &[&index.to_be_bytes()[..]],
    )?;
    let mut whitening = [0u8; SUBKEY_SIZE];
    whitening.copy_from_slice(&digest[..SUBKEY_SIZE]);

    Ok(SubKey {
        index,
        order: order_key(key, index)?,
        whitening,
    })
}

pub fn metadata_keys(key: &Key, nonce: &Nonce) -> Result<MetadataKeys> {
    let enc_digest = kdf::derive(key.as_bytes(), METADATA_ENC_LABEL, &[nonce.as_bytes()])?;
    let mac_digest = kdf::derive(key.as_bytes(), METADATA_MAC_LABEL, &[nonce.as_bytes()])?;

    let mut keys = MetadataKeys {
        enc: [0u8; SUBKEY_SIZE],
        iv: [0u8; SUBKEY_SIZE],
        mac: [0u8; kdf::DIGEST_SIZE],
    };
    keys.enc.copy_from_slice(&enc_digest[..SUBKEY_SIZE]);
    keys.iv.copy_from_slice(&enc_digest[SUBKEY_SIZE..]);
    keys.mac.copy_from_slice(&mac_digest[..]);
    Ok(keys)
}

/// Binds a key and nonce so subkeys can be requested by index.
#[derive(Debug, Clone, Copy)]
pub struct KeySchedule<'a> {
    key: &'a Key,
    nonce: &'a Nonce,
}

impl<'a> KeySchedule<'a> {
    pub fn new(key: &'a Key, nonce: &'a Nonce) -> Self {
        Self { key, nonce }
    }

    pub fn subkey(&self, index: usize) -> Result<SubKey> {
        next_subkey(self.key, self.nonce, index as u64)
    }

    /// The subkey that encrypts block `index` of a `blocks`-block message.
    ///
    /// `blocks` is always recoverable from a ciphertext alone as
    /// `blocks().len() / CipherBlock::BLOCK_SIZE`, so any single block can be
    /// decrypted without the metadata.
    pub fn block_subkey(&self, index: usize, blocks: usize) -> Result<SubKey> {
        if index + 1 == blocks {
            self.subkey(index)
        } else {
            prefix_subkey(self.key, index as u64)
        }
    }

    pub fn metadata_keys(&self) -> Result<MetadataKeys> {
        metadata_keys(self.key, self.nonce)
    }
}
