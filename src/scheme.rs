pub mod bclo;
pub mod block_types;

pub use self::block_types::CipherBlock;

use crate::schedule::{OrderKey, SubKey};
use crate::Result;

/// A keyed, strictly monotonic bijection from fixed-width plaintext blocks
/// into [`CipherBlock`]s.
///
/// For a fixed subkey, `a < b` (as big-endian unsigned integers) implies
/// `encrypt_block(a) < encrypt_block(b)`.
pub trait OrderPreservingBlockCipher {
    fn block_width(&self) -> usize;

    fn encrypt_block(&self, block: &[u8], subkey: &SubKey) -> Result<CipherBlock>;

    fn decrypt_block(&self, block: &CipherBlock, subkey: &SubKey) -> Result<Vec<u8>>;

    /// The smallest and largest ciphertext `block` can encrypt to under any
    /// subkey sharing `key` as its order half.
    fn block_bounds(&self, block: &[u8], key: &OrderKey) -> Result<(CipherBlock, CipherBlock)>;
}
