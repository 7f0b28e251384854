// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Validated cipher parameters: word size and round count.
//!
use crate::error::ConfigurationError;

/// Largest key accepted by the cipher, in bytes.
pub const MAX_KEY_BYTES: usize = 255;
/// Largest key accepted by the cipher, in bits.
pub const MAX_KEY_SIZE_BITS: usize = MAX_KEY_BYTES * 8;
/// Key size used when generating a fresh key without an explicit size.
pub const DEFAULT_KEY_SIZE_BITS: u16 = 128;
/// Round count used by [CipherParameters::default].
pub const DEFAULT_ROUNDS: u8 = 12;

/// The word width `w` of an RC5 instance. A block is two words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    W16,
    W32,
    W64,
}

impl WordSize {
    /// Maps a word width in bits onto a supported [WordSize].
    pub fn from_bits(word_size_bits: u32) -> Result<WordSize, ConfigurationError> {
        match word_size_bits {
            16 => Ok(WordSize::W16),
            32 => Ok(WordSize::W32),
            64 => Ok(WordSize::W64),
            _ => Err(ConfigurationError::UnsupportedWordSize(word_size_bits)),
        }
    }

    /// Maps a block size in bits (two words) onto a supported [WordSize].
    pub fn from_block_bits(block_size_bits: u32) -> Result<WordSize, ConfigurationError> {
        match block_size_bits {
            32 => Ok(WordSize::W16),
            64 => Ok(WordSize::W32),
            128 => Ok(WordSize::W64),
            _ => Err(ConfigurationError::UnsupportedBlockSize(block_size_bits)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            WordSize::W16 => 16,
            WordSize::W32 => 32,
            WordSize::W64 => 64,
        }
    }

    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    pub fn block_bits(self) -> u32 {
        2 * self.bits()
    }

    pub fn block_bytes(self) -> usize {
        2 * self.bytes()
    }
}

/// Immutable `(w, r)` pair describing an RC5 instance.
///
/// The secret key is kept apart from the parameters so the parameters can be
/// logged, compared and persisted freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipherParameters {
    word_size: WordSize,
    rounds: u8,
}

impl CipherParameters {
    /// Validates a word size in bits and a round count.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::CipherParameters;
    ///
    /// let params = CipherParameters::new(32, 12).unwrap();
    /// assert_eq!(params.block_size_bits(), 64);
    /// assert!(CipherParameters::new(24, 12).is_err());
    /// assert!(CipherParameters::new(32, 256).is_err());
    /// ```
    pub fn new(word_size_bits: u32, rounds: u32) -> Result<CipherParameters, ConfigurationError> {
        let word_size = WordSize::from_bits(word_size_bits)?;
        let rounds =
            u8::try_from(rounds).map_err(|_| ConfigurationError::RoundsOutOfRange(rounds))?;
        Ok(CipherParameters::with_word_size(word_size, rounds))
    }

    /// Same as [CipherParameters::new] but takes the block size (`2 * w`) in bits.
    pub fn from_block_size(
        block_size_bits: u32,
        rounds: u32,
    ) -> Result<CipherParameters, ConfigurationError> {
        let word_size = WordSize::from_block_bits(block_size_bits)?;
        CipherParameters::new(word_size.bits(), rounds)
    }

    pub const fn with_word_size(word_size: WordSize, rounds: u8) -> CipherParameters {
        CipherParameters { word_size, rounds }
    }

    pub fn word_size(&self) -> WordSize {
        self.word_size
    }

    pub fn word_size_bits(&self) -> u32 {
        self.word_size.bits()
    }

    pub fn block_size_bits(&self) -> u32 {
        self.word_size.block_bits()
    }

    pub fn block_bytes(&self) -> usize {
        self.word_size.block_bytes()
    }

    pub fn rounds(&self) -> u8 {
        self.rounds
    }

    /// Length `t = 2 * (r + 1)` of the expanded key table.
    pub fn table_len(&self) -> usize {
        2 * (self.rounds as usize + 1)
    }
}

impl Default for CipherParameters {
    /// RC5-32/12: 64 bit blocks and 12 rounds.
    fn default() -> Self {
        CipherParameters::with_word_size(WordSize::W32, DEFAULT_ROUNDS)
    }
}

/// Checks a key size given in bits against the `[0, 2040]` range.
pub fn validate_key_size_bits(key_size_bits: usize) -> Result<(), ConfigurationError> {
    if key_size_bits > MAX_KEY_SIZE_BITS {
        return Err(ConfigurationError::KeySizeOutOfRange(key_size_bits));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_word_sizes() {
        for (bits, block_bytes) in [(16, 4), (32, 8), (64, 16)] {
            let params = CipherParameters::new(bits, 12).unwrap();
            assert_eq!(params.word_size_bits(), bits);
            assert_eq!(params.block_size_bits(), 2 * bits);
            assert_eq!(params.block_bytes(), block_bytes);
        }
    }

    #[test]
    fn invalid_word_size() {
        let res = CipherParameters::new(128, 12);
        assert!(matches!(
            res,
            Err(ConfigurationError::UnsupportedWordSize(width)) if width == 128
        ));
    }

    #[test]
    fn invalid_block_size() {
        let res = CipherParameters::from_block_size(16, 12);
        assert!(matches!(
            res,
            Err(ConfigurationError::UnsupportedBlockSize(size)) if size == 16
        ));
    }

    #[test]
    fn block_size_maps_to_word_size() {
        let params = CipherParameters::from_block_size(128, 20).unwrap();
        assert_eq!(params.word_size(), WordSize::W64);
        assert_eq!(params.rounds(), 20);
    }

    #[test]
    fn rounds_out_of_range() {
        let res = CipherParameters::new(32, 256);
        assert!(matches!(
            res,
            Err(ConfigurationError::RoundsOutOfRange(rounds)) if rounds == 256
        ));
    }

    #[test]
    fn zero_rounds_table_len() {
        let params = CipherParameters::new(16, 0).unwrap();
        assert_eq!(params.table_len(), 2);
        let params = CipherParameters::new(16, 255).unwrap();
        assert_eq!(params.table_len(), 512);
    }

    #[test]
    fn default_is_rc5_32_12() {
        let params = CipherParameters::default();
        assert_eq!(params.block_size_bits(), 64);
        assert_eq!(params.rounds(), 12);
    }

    #[test]
    fn key_size_bounds() {
        assert!(validate_key_size_bits(0).is_ok());
        assert!(validate_key_size_bits(2040).is_ok());
        assert!(matches!(
            validate_key_size_bits(2041),
            Err(ConfigurationError::KeySizeOutOfRange(2041))
        ));
    }
}
