//! Block Metadata-Driven Order-Preserving Encryption.
//!
//! A message is padded and split into fixed-width blocks. Each block is
//! encrypted by a keyed order-preserving transform under its own subkey, the
//! sequence of ciphertext block lengths is encrypted and authenticated
//! separately, and the pieces are framed as
//! `nonce || metadata length || metadata || blocks`.
//!
//! Ciphertexts compare in plaintext order under a shared nonce (and across
//! nonces for values of equal length), and a [`Bound`] turns an equality or
//! range query over nonce-randomized ciphertexts into a byte-range check.
//!
//! ```
//! use bmdope::{Bmdope, BmdopeEncrypt};
//!
//! let key = Bmdope::generate_key().unwrap();
//! let cipher = Bmdope::new(key, None).unwrap();
//!
//! let a = 10u64.encrypt(&cipher).unwrap();
//! let b = 20u64.encrypt(&cipher).unwrap();
//! assert!(cipher.compare_raw_slices(&a, &b) == Some(std::cmp::Ordering::Less));
//!
//! let bound = 10u64.encrypt_bound(&cipher).unwrap();
//! assert!(bound.contains(&cipher.parse(&a).unwrap()));
//! assert_eq!(cipher.decrypt(&a).unwrap(), 10u64.to_be_bytes());
//! ```

pub mod bound;
pub mod ciphertext;
mod codec;
pub mod config;
mod convert;
mod encrypt;
mod error;
pub mod metadata;
mod padding;
pub mod primitives;
pub mod schedule;
pub mod scheme;

pub use crate::bound::Bound;
pub use crate::ciphertext::Ciphertext;
pub use crate::codec::Bmdope;
pub use crate::config::{Config, ValueDomain};
pub use crate::encrypt::{BmdopeDecrypt, BmdopeEncrypt, FromPlaintext, Plaintext};
pub use crate::error::{BmdopeError, Result};
pub use crate::schedule::{Key, KeySchedule, Nonce, SubKey};
pub use crate::scheme::bclo::LazySampleOpe;
pub use crate::scheme::{CipherBlock, OrderPreservingBlockCipher};
