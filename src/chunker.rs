// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This module provides utilities for laying a byte stream out in cipher blocks:
//! the zero padded length of an encoded stream, the zero stripping of the final
//! decoded block, and filling a block buffer from a reader.

use crate::error::Rc5Error;
use std::cmp::max;
use std::io::{ErrorKind, Read};

/// Returns the length of `len` bytes zero padded up to whole blocks.
///
/// An empty input still occupies one block.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(padded_len(0, 8), 8);
/// assert_eq!(padded_len(8, 8), 8);
/// assert_eq!(padded_len(9, 8), 16);
/// ```
pub fn padded_len(len: usize, block_bytes: usize) -> usize {
    max(1, len.div_ceil(block_bytes)) * block_bytes
}

/// Returns how many leading bytes of the final decrypted block remain once all
/// trailing `0x00` bytes are removed.
pub fn stripped_len(block: &[u8]) -> usize {
    block
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |last_non_zero| last_non_zero + 1)
}

/// Fails with [Rc5Error::InputShape] unless `len` is a whole number of blocks.
pub fn ensure_block_aligned(len: usize, block_bytes: usize) -> Result<(), Rc5Error> {
    if len % block_bytes != 0 {
        return Err(Rc5Error::InputShape { len, block_bytes });
    }
    Ok(())
}

/// Reads from `reader` until `buf` is full or the stream ends.
///
/// Returns the number of bytes placed in `buf`; anything short of `buf.len()`
/// means the end of the stream was reached.
pub fn read_block<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
