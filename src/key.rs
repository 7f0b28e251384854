// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Secret key material.
//!
use crate::error::ConfigurationError;
use crate::params::{validate_key_size_bits, MAX_KEY_BYTES};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A raw RC5 secret key of 0 to 255 bytes.
///
/// The bytes are wiped when the key is dropped and never show up in `Debug` output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wraps caller provided key bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::SecretKey;
    ///
    /// let key = SecretKey::new(b"my secret key".to_vec()).unwrap();
    /// assert_eq!(key.len(), 13);
    /// assert!(SecretKey::new(vec![0; 256]).is_err());
    /// ```
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<SecretKey, ConfigurationError> {
        let mut bytes = bytes.into();
        if bytes.len() > MAX_KEY_BYTES {
            let bits = bytes.len() * 8;
            bytes.zeroize();
            return Err(ConfigurationError::KeySizeOutOfRange(bits));
        }
        Ok(SecretKey(bytes))
    }

    /// Generates a key of `key_size_bits` bits from the operating system CSPRNG.
    pub fn generate(key_size_bits: u16) -> Result<SecretKey, ConfigurationError> {
        SecretKey::generate_with(&mut rand::rngs::OsRng, key_size_bits)
    }

    /// Generates a key of `key_size_bits` bits from the given cryptographic RNG.
    ///
    /// The key is `ceil(key_size_bits / 8)` bytes long. When the size is not a
    /// whole number of bytes the unused high bits of the last byte are cleared,
    /// so read as a little-endian number the key is below `2^key_size_bits`.
    pub fn generate_with<R: RngCore + CryptoRng>(
        rng: &mut R,
        key_size_bits: u16,
    ) -> Result<SecretKey, ConfigurationError> {
        let key_size_bits = key_size_bits as usize;
        validate_key_size_bits(key_size_bits)?;

        let mut bytes = vec![0u8; key_len_for_bits(key_size_bits)];
        rng.fill_bytes(&mut bytes);

        let spare_bits = key_size_bits % 8;
        if spare_bits != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= (1u8 << spare_bits) - 1;
            }
        }

        log::debug!("generated {key_size_bits} bit key");
        Ok(SecretKey(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey([REDACTED; {}])", self.0.len())
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Number of bytes holding a key of `key_size_bits` bits.
pub(crate) fn key_len_for_bits(key_size_bits: usize) -> usize {
    key_size_bits.div_ceil(8)
}
