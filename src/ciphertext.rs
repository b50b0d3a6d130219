use crate::scheme::CipherBlock;
use crate::schedule::Nonce;
use crate::{BmdopeError, Result};
use byteorder::{BigEndian, ByteOrder};
use std::cmp::Ordering;
use std::fmt;

/// Width of the encrypted-metadata length field.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// A borrowed view over a serialized ciphertext:
/// `nonce || u32 metadata length || encrypted metadata || encrypted blocks`.
///
/// Ordering (and therefore equality) looks at the block region only. The
/// nonce and metadata never take part in a comparison.
#[derive(Clone, Copy)]
pub struct Ciphertext<'a> {
    nonce: &'a [u8],
    metadata: &'a [u8],
    blocks: &'a [u8],
}

impl<'a> Ciphertext<'a> {
    pub fn min_len(nonce_len: usize) -> usize {
        nonce_len + LENGTH_FIELD_SIZE
    }

    pub fn parse(data: &'a [u8], nonce_len: usize) -> Result<Self> {
        let minimum = Self::min_len(nonce_len);
        if data.len() < minimum {
            return Err(BmdopeError::CiphertextTooShort {
                minimum,
                actual: data.len(),
            });
        }

        let (nonce, rest) = data.split_at(nonce_len);
        let (length, rest) = rest.split_at(LENGTH_FIELD_SIZE);
        let metadata_len = BigEndian::read_u32(length) as usize;
        if metadata_len > rest.len() {
            return Err(BmdopeError::MetadataIntegrity);
        }
        let (metadata, blocks) = rest.split_at(metadata_len);

        Ok(Self {
            nonce,
            metadata,
            blocks,
        })
    }

    pub(crate) fn frame(nonce: &Nonce, metadata: &[u8], blocks: &[u8]) -> Result<Vec<u8>> {
        let metadata_len =
            u32::try_from(metadata.len()).map_err(|_| BmdopeError::MetadataIntegrity)?;

        let mut out =
            Vec::with_capacity(nonce.len() + LENGTH_FIELD_SIZE + metadata.len() + blocks.len());
        out.extend_from_slice(nonce.as_bytes());
        out.extend_from_slice(&metadata_len.to_be_bytes());
        out.extend_from_slice(metadata);
        out.extend_from_slice(blocks);
        Ok(out)
    }

    pub fn nonce(&self) -> &'a [u8] {
        self.nonce
    }

    pub fn metadata(&self) -> &'a [u8] {
        self.metadata
    }

    /// The concatenated encrypted blocks: the part that carries order.
    pub fn blocks(&self) -> &'a [u8] {
        self.blocks
    }

    /// Iterates over complete [`CipherBlock`]s, ignoring any ragged tail.
    pub fn cipher_blocks(&self) -> impl Iterator<Item = CipherBlock> + 'a {
        self.blocks
            .chunks_exact(CipherBlock::BLOCK_SIZE)
            .filter_map(|chunk| CipherBlock::from_bytes(chunk).ok())
    }
}

impl<'a> fmt::Debug for Ciphertext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ciphertext")
            .field("nonce", &hex::encode(self.nonce))
            .field("metadata_len", &self.metadata.len())
            .field("blocks", &hex::encode(self.blocks))
            .finish()
    }
}

impl<'a> Ord for Ciphertext<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.blocks.cmp(other.blocks)
    }
}

impl<'a> PartialOrd for Ciphertext<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> PartialEq for Ciphertext<'a> {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}

impl<'a> Eq for Ciphertext<'a> {}
