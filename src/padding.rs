//! ISO/IEC 7816-4 block padding: a `0x80` terminator followed by zeros.
//!
//! Padding is always applied, so a message whose length is already a
//! multiple of the block width gains one whole padding block.

use crate::{BmdopeError, Result};

const TERMINATOR: u8 = 0x80;

pub fn pad(data: &[u8], width: usize) -> Vec<u8> {
    debug_assert!(width > 0);
    let padded_len = (data.len() / width + 1) * width;
    let mut out = Vec::with_capacity(padded_len);
    out.extend_from_slice(data);
    out.push(TERMINATOR);
    out.resize(padded_len, 0);
    out
}

/// Strips padding in place. The terminator must fall inside the final block.
pub fn unpad(data: &mut Vec<u8>, width: usize) -> Result<()> {
    if data.is_empty() || data.len() % width != 0 {
        return Err(BmdopeError::BlockWidthMismatch);
    }
    let last_block = data.len() - width;
    let terminator = data
        .iter()
        .rposition(|&b| b != 0)
        .filter(|&i| i >= last_block && data[i] == TERMINATOR)
        .ok_or(BmdopeError::BlockWidthMismatch)?;

    data.truncate(terminator);
    Ok(())
}
