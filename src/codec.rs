use crate::bound::{self, Bound};
use crate::ciphertext::Ciphertext;
use crate::metadata::{self, Metadata};
use crate::padding;
use crate::scheme::bclo::LazySampleOpe;
use crate::scheme::{CipherBlock, OrderPreservingBlockCipher};
use crate::schedule::{self, Key, KeySchedule, Nonce};
use crate::{BmdopeError, Config, Result};
use std::cmp::Ordering;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Encrypts and decrypts whole messages.
///
/// An instance holds nothing but its configuration, the master key and an
/// optional fixed nonce, all read-only after construction. It can be shared
/// between threads freely.
#[derive(Debug)]
pub struct Bmdope<C: OrderPreservingBlockCipher = LazySampleOpe> {
    config: Config,
    key: Key,
    nonce: Option<Nonce>,
    cipher: C,
}

impl Bmdope<LazySampleOpe> {
    /// Creates a cipher with the default [`Config`].
    ///
    /// When `nonce` is given every call to [`encrypt`](Self::encrypt) uses it,
    /// otherwise each call draws a fresh one.
    pub fn new(key: Key, nonce: Option<Nonce>) -> Result<Self> {
        Self::with_config(Config::default(), key, nonce)
    }

    pub fn with_config(config: Config, key: Key, nonce: Option<Nonce>) -> Result<Self> {
        config.validate()?;
        let cipher = LazySampleOpe::new(config.block_width())?;
        Self::with_cipher(config, key, nonce, cipher)
    }

    /// A fresh master key of the default length.
    pub fn generate_key() -> Result<Key> {
        schedule::generate_key(&Config::default())
    }
}

impl<C: OrderPreservingBlockCipher> Bmdope<C> {
    pub fn with_cipher(
        config: Config,
        key: Key,
        nonce: Option<Nonce>,
        cipher: C,
    ) -> Result<Self> {
        config.validate()?;
        if cipher.block_width() != config.block_width() {
            return Err(BmdopeError::InvalidConfig(
                "cipher block width does not match configuration",
            ));
        }
        if key.len() != config.key_len() {
            return Err(BmdopeError::InvalidKeyLength {
                expected: config.key_len(),
                actual: key.len(),
            });
        }
        if let Some(nonce) = &nonce {
            check_nonce(&config, nonce)?;
        }

        Ok(Self {
            config,
            key,
            nonce,
            cipher,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        match &self.nonce {
            Some(nonce) => self.encrypt_with_nonce(plaintext, nonce),
            None => {
                let nonce = Nonce::generate(self.config.nonce_len())?;
                self.encrypt_with_nonce(plaintext, &nonce)
            }
        }
    }

    pub fn encrypt_with_nonce(&self, plaintext: &[u8], nonce: &Nonce) -> Result<Vec<u8>> {
        check_nonce(&self.config, nonce)?;

        let value = self.config.domain().normalize(plaintext)?;
        let padded = Zeroizing::new(padding::pad(&value, self.config.block_width()));
        let count = padded.len() / self.config.block_width();
        let schedule = KeySchedule::new(&self.key, nonce);

        let mut metadata = Metadata::default();
        let mut blocks = Vec::with_capacity(count * CipherBlock::BLOCK_SIZE);
        for (i, block) in padded.chunks(self.config.block_width()).enumerate() {
            let subkey = schedule.block_subkey(i, count)?;
            let encrypted = self.cipher.encrypt_block(block, &subkey)?.to_bytes();
            metadata.push(encrypted.len() as u16);
            blocks.extend_from_slice(&encrypted);
        }

        let encrypted_metadata = metadata::encode_and_encrypt(&metadata, &self.key, nonce)?;
        debug!(blocks = count, "encrypted message");
        Ciphertext::frame(nonce, &encrypted_metadata, &blocks)
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let parsed = self.parse(ciphertext)?;
        let nonce = Nonce::from_slice(parsed.nonce());

        let remaining = parsed.blocks().len();
        let metadata = metadata::decrypt_and_decode(parsed.metadata(), &self.key, &nonce, remaining)
            .map_err(|e| {
                warn!(error = %e, "rejected ciphertext metadata");
                e
            })?;

        let count = metadata.len();
        let schedule = KeySchedule::new(&self.key, &nonce);
        let mut plaintext = Zeroizing::new(Vec::with_capacity(count * self.config.block_width()));
        let mut offset = 0;

        for (i, &length) in metadata.lengths().iter().enumerate() {
            let end = offset + length as usize;
            let block = CipherBlock::from_bytes(&parsed.blocks()[offset..end])?;
            offset = end;

            let subkey = schedule.block_subkey(i, count)?;
            let decrypted = self.cipher.decrypt_block(&block, &subkey).map_err(|e| {
                warn!(error = %e, "rejected ciphertext block");
                e
            })?;
            plaintext.extend_from_slice(&decrypted);
        }

        padding::unpad(&mut plaintext, self.config.block_width())?;
        if let Some(width) = self.config.domain().width() {
            if plaintext.len() != width {
                warn!(expected = width, actual = plaintext.len(), "plaintext outside value domain");
                return Err(BmdopeError::UnsupportedValueDomain);
            }
        }
        debug!(blocks = count, "decrypted message");
        Ok(std::mem::take(&mut *plaintext))
    }

    /// A bound containing every ciphertext of `value`, whatever its nonce.
    pub fn encrypt_bound(&self, value: &[u8]) -> Result<Bound> {
        let value = self.config.domain().normalize(value)?;
        let padded = Zeroizing::new(padding::pad(&value, self.config.block_width()));
        bound::encrypt_bound(&self.cipher, &self.key, &padded)
    }

    /// A bound containing every ciphertext of every value in `[low, high]`.
    ///
    /// Values of unequal length are only ordered by their common blocks, so
    /// under [`ValueDomain::Bytes`](crate::ValueDomain::Bytes) both ends should
    /// have the length of the values being searched.
    pub fn encrypt_range(&self, low: &[u8], high: &[u8]) -> Result<Bound> {
        Ok(Bound::span(&self.encrypt_bound(low)?, &self.encrypt_bound(high)?))
    }

    pub fn parse<'a>(&self, ciphertext: &'a [u8]) -> Result<Ciphertext<'a>> {
        Ciphertext::parse(ciphertext, self.config.nonce_len())
    }

    /// Orders two serialized ciphertexts without decrypting them.
    /// Returns `None` if either fails to parse.
    pub fn compare_raw_slices(&self, a: &[u8], b: &[u8]) -> Option<Ordering> {
        let a = self.parse(a).ok()?;
        let b = self.parse(b).ok()?;
        Some(a.cmp(&b))
    }
}

fn check_nonce(config: &Config, nonce: &Nonce) -> Result<()> {
    if nonce.len() != config.nonce_len() {
        return Err(BmdopeError::InvalidNonceLength {
            expected: config.nonce_len(),
            actual: nonce.len(),
        });
    }
    Ok(())
}
