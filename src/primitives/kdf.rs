use crate::{BmdopeError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

pub const DIGEST_SIZE: usize = 32;

fn keyed(key: &[u8], label: &[u8], inputs: &[&[u8]]) -> Result<HmacSha256> {
    // HMAC accepts keys of any length so this only fails on a broken digest impl
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| BmdopeError::InvalidKeyLength {
        expected: DIGEST_SIZE,
        actual: key.len(),
    })?;
    mac.update(label);
    for input in inputs {
        mac.update(input);
    }
    Ok(mac)
}

/// One-way, domain-separated derivation: `HMAC-SHA256(key, label || inputs...)`.
pub fn derive(key: &[u8], label: &[u8], inputs: &[&[u8]]) -> Result<Zeroizing<[u8; DIGEST_SIZE]>> {
    let tag = keyed(key, label, inputs)?.finalize().into_bytes();
    let mut out = Zeroizing::new([0u8; DIGEST_SIZE]);
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Checks `tag` against `HMAC-SHA256(key, label || inputs...)` in constant time.
pub fn verify(key: &[u8], label: &[u8], inputs: &[&[u8]], tag: &[u8]) -> Result<bool> {
    Ok(keyed(key, label, inputs)?.verify_slice(tag).is_ok())
}
