use crate::convert::{FromOrderedInteger, ToOrderedInteger};
use crate::scheme::OrderPreservingBlockCipher;
use crate::{Bmdope, BmdopeError, Bound, Result};

/// A value with a canonical, order-preserving byte encoding.
pub trait Plaintext {
    fn to_plaintext(&self) -> Result<Vec<u8>>;
}

/// A value that can be rebuilt from a decrypted plaintext.
pub trait FromPlaintext: Sized {
    fn from_plaintext(bytes: &[u8]) -> Result<Self>;
}

pub trait BmdopeEncrypt {
    fn encrypt<C: OrderPreservingBlockCipher>(&self, cipher: &Bmdope<C>) -> Result<Vec<u8>>;

    fn encrypt_bound<C: OrderPreservingBlockCipher>(&self, cipher: &Bmdope<C>) -> Result<Bound>;
}

impl<T: Plaintext + ?Sized> BmdopeEncrypt for T {
    fn encrypt<C: OrderPreservingBlockCipher>(&self, cipher: &Bmdope<C>) -> Result<Vec<u8>> {
        cipher.encrypt(&self.to_plaintext()?)
    }

    fn encrypt_bound<C: OrderPreservingBlockCipher>(&self, cipher: &Bmdope<C>) -> Result<Bound> {
        cipher.encrypt_bound(&self.to_plaintext()?)
    }
}

pub trait BmdopeDecrypt: FromPlaintext {
    fn decrypt<C: OrderPreservingBlockCipher>(
        cipher: &Bmdope<C>,
        ciphertext: &[u8],
    ) -> Result<Self> {
        Self::from_plaintext(&cipher.decrypt(ciphertext)?)
    }
}

impl<T: FromPlaintext> BmdopeDecrypt for T {}

macro_rules! impl_plaintext_for_unsigned {
    ($($t:ty),*) => {
        $(
            impl Plaintext for $t {
                fn to_plaintext(&self) -> Result<Vec<u8>> {
                    Ok(self.to_be_bytes().to_vec())
                }
            }

            impl FromPlaintext for $t {
                fn from_plaintext(bytes: &[u8]) -> Result<Self> {
                    let bytes = bytes.try_into().map_err(|_| BmdopeError::UnsupportedValueDomain)?;
                    Ok(<$t>::from_be_bytes(bytes))
                }
            }
        )*
    };
}

impl_plaintext_for_unsigned!(u8, u16, u32, u64, u128);

impl Plaintext for f64 {
    fn to_plaintext(&self) -> Result<Vec<u8>> {
        if self.is_nan() {
            return Err(BmdopeError::UnsupportedValueDomain);
        }
        self.map_to().to_plaintext()
    }
}

impl FromPlaintext for f64 {
    fn from_plaintext(bytes: &[u8]) -> Result<Self> {
        Ok(f64::map_from(u64::from_plaintext(bytes)?))
    }
}

impl Plaintext for [u8] {
    fn to_plaintext(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> Plaintext for [u8; N] {
    fn to_plaintext(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl Plaintext for Vec<u8> {
    fn to_plaintext(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl FromPlaintext for Vec<u8> {
    fn from_plaintext(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl Plaintext for str {
    fn to_plaintext(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl Plaintext for String {
    fn to_plaintext(&self) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

impl FromPlaintext for String {
    fn from_plaintext(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec()).map_err(|_| BmdopeError::UnsupportedValueDomain)
    }
}
