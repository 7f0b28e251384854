// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Error types surfaced by the cipher, the stream codec and the key record.

/// The `ConfigurationError` enum represents invalid cipher parameters.
///
/// These are never recovered from internally; the caller has to pick supported values.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unsupported word size `{0}`; supported word sizes are: {{16, 32, 64}}")]
    UnsupportedWordSize(u32),
    #[error("unsupported block size `{0}`; supported block sizes are: {{32, 64, 128}}")]
    UnsupportedBlockSize(u32),
    #[error("invalid round count `{0}`; supported range is [0, 255]")]
    RoundsOutOfRange(u32),
    #[error("invalid key size: `{0}` bits; supported range is [0, 2040]")]
    KeySizeOutOfRange(usize),
}

/// The `KeyRecordError` enum represents the possible errors while reading or
/// building a [KeyRecord](crate::KeyRecord).
#[derive(thiserror::Error, Debug)]
pub enum KeyRecordError {
    #[error("not a key record; magic bytes do not match")]
    BadMagic,
    #[error("unsupported key record version `{0}`; the only supported version is 1")]
    UnsupportedVersion(u8),
    #[error("key size `{key_size_bits}` bits does not correspond to the `{key_len}` byte key")]
    KeyLengthMismatch { key_size_bits: u16, key_len: usize },
    #[error("`{0}` unexpected bytes after the end of the key record")]
    TrailingBytes(usize),
    #[error("key record is truncated")]
    Truncated,
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("i/o failure while transferring key record: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for KeyRecordError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::UnexpectedEof => KeyRecordError::Truncated,
            _ => KeyRecordError::Io(value),
        }
    }
}

/// The `Rc5Error` enum is the top level error of the crate.
#[derive(thiserror::Error, Debug)]
pub enum Rc5Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("invalid input length `{len}`; expected a multiple of the `{block_bytes}` byte block")]
    InputShape { len: usize, block_bytes: usize },
    #[error(transparent)]
    KeyRecord(#[from] KeyRecordError),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}
