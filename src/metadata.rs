//! Protection of the per-block length sequence.
//!
//! Encoded form (before encryption), all big-endian:
//! `u32 block count || u16 length per block`.
//!
//! Encrypted form: `AES-128-CBC/PKCS#7(encoded) || HMAC-SHA256(nonce || cbc)`.
//! The encryption key, IV and MAC key are derived from the master key and
//! nonce under labels no block subkey uses.

use crate::primitives::kdf;
use crate::schedule::{metadata_keys, Key, Nonce};
use crate::{BmdopeError, Result};
use aes::cipher::generic_array::GenericArray;
use aes::Aes128;
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use std::io::Cursor;
use zeroize::Zeroizing;

const TAG_LABEL: &[u8] = b"bmdope/v1/metadata/tag";
const TAG_SIZE: usize = kdf::DIGEST_SIZE;
const AES_BLOCK_SIZE: usize = 16;

/// Smallest possible encrypted metadata: one CBC block plus the tag.
pub const MIN_ENCRYPTED_LEN: usize = AES_BLOCK_SIZE + TAG_SIZE;

/// Ordered ciphertext-block lengths, one per block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata(Vec<u16>);

impl Metadata {
    pub fn new(lengths: Vec<u16>) -> Self {
        Self(lengths)
    }

    pub fn push(&mut self, length: u16) {
        self.0.push(length);
    }

    pub fn lengths(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all block lengths, i.e. the size of the block region.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&l| l as usize).sum()
    }

    fn encode(&self) -> Result<Zeroizing<Vec<u8>>> {
        let count = u32::try_from(self.0.len()).map_err(|_| BmdopeError::MetadataIntegrity)?;
        let mut out = Zeroizing::new(vec![0u8; 4 + 2 * self.0.len()]);
        BigEndian::write_u32(&mut out[0..4], count);
        for (chunk, &length) in out[4..].chunks_exact_mut(2).zip(self.0.iter()) {
            BigEndian::write_u16(chunk, length);
        }
        Ok(out)
    }

    fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(data);
        let count = reader
            .read_u32::<BigEndian>()
            .map_err(|_| BmdopeError::MetadataIntegrity)? as usize;

        if data.len() != 4 + 2 * count {
            return Err(BmdopeError::MetadataIntegrity);
        }

        let mut lengths = Vec::with_capacity(count);
        for _ in 0..count {
            let length = reader
                .read_u16::<BigEndian>()
                .map_err(|_| BmdopeError::MetadataIntegrity)?;
            lengths.push(length);
        }
        Ok(Self(lengths))
    }
}

pub fn encode_and_encrypt(metadata: &Metadata, key: &Key, nonce: &Nonce) -> Result<Vec<u8>> {
    let keys = metadata_keys(key, nonce)?;
    let encoded = metadata.encode()?;

    let mut out = cbc::Encryptor::<Aes128>::new(
        GenericArray::from_slice(&keys.enc),
        GenericArray::from_slice(&keys.iv),
    )
    .encrypt_padded_vec_mut::<Pkcs7>(&encoded[..]);

    let tag = kdf::derive(&keys.mac, TAG_LABEL, &[nonce.as_bytes(), out.as_slice()])?;
    out.extend_from_slice(&tag[..]);
    Ok(out)
}

/// Authenticates, decrypts and parses `blob`, then checks that the lengths
/// account for exactly `remaining` bytes of block data.
pub fn decrypt_and_decode(
    blob: &[u8],
    key: &Key,
    nonce: &Nonce,
    remaining: usize,
) -> Result<Metadata> {
    if blob.len() < MIN_ENCRYPTED_LEN || (blob.len() - TAG_SIZE) % AES_BLOCK_SIZE != 0 {
        return Err(BmdopeError::MetadataIntegrity);
    }
    let (body, tag) = blob.split_at(blob.len() - TAG_SIZE);

    let keys = metadata_keys(key, nonce)?;
    if !kdf::verify(&keys.mac, TAG_LABEL, &[nonce.as_bytes(), body], tag)? {
        return Err(BmdopeError::MetadataIntegrity);
    }

    let encoded = Zeroizing::new(
        cbc::Decryptor::<Aes128>::new(
            GenericArray::from_slice(&keys.enc),
            GenericArray::from_slice(&keys.iv),
        )
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|_| BmdopeError::MetadataIntegrity)?,
    );

    let metadata = Metadata::decode(&encoded)?;
    if metadata.total() != remaining {
        return Err(BmdopeError::MetadataIntegrity);
    }
    Ok(metadata)
}
