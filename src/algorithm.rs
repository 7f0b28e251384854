// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The implementaton details of the RC5 block cipher algorithm
//!
use crate::error::{ConfigurationError, Rc5Error};
use crate::key_schedule::ExpandedKeyTable;
use crate::params::{CipherParameters, WordSize, MAX_KEY_BYTES};
use crate::type_traits::*;

/// The RC5 struct represents an instance of the RC5 block cipher algorithm.
///
/// The `Rc5` struct owns the expanded key table built once from the key and
/// the number of rounds, and provides methods for encrypting and decrypting
/// individual words and blocks of data with it.
#[derive(Clone, Debug)]
pub struct Rc5<T: Word> {
    table: ExpandedKeyTable<T>,
}

impl<T: Word> Rc5<T> {
    /// Creates a new RC5 instance with the given key and number of rounds.
    ///
    /// The `key` parameter is a slice of up to 255 bytes used to encrypt and decrypt
    /// the data. The `rounds` parameter specifies the number of rounds of the block
    /// transform (typically 12, 16, or 20).
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::Rc5;
    ///
    /// let key = b"my secret key";
    /// let rc5 = Rc5::<u32>::new(key, 12).unwrap();
    /// ```
    pub fn new(key: &[u8], rounds: u8) -> Result<Rc5<T>, ConfigurationError> {
        if key.len() > MAX_KEY_BYTES {
            return Err(ConfigurationError::KeySizeOutOfRange(key.len() * 8));
        }

        Ok(Rc5::with_table(ExpandedKeyTable::expand(key, rounds)))
    }

    /// Creates an RC5 instance around an already expanded key table.
    pub fn with_table(table: ExpandedKeyTable<T>) -> Rc5<T> {
        Rc5 { table }
    }

    pub fn table(&self) -> &ExpandedKeyTable<T> {
        &self.table
    }

    pub fn rounds(&self) -> u8 {
        self.table.rounds()
    }

    /// Encrypts the two-word block represented by the references `a` and `b`.
    ///
    /// The encrypted values are written back to the same references.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::Rc5;
    ///
    /// let key = [
    ///     0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
    ///     0x0E, 0x0F,
    /// ];
    /// let rc5 = Rc5::<u32>::new(&key, 12).unwrap();
    ///
    /// let mut a = 0x33221100;
    /// let mut b = 0x77665544;
    ///
    /// rc5.encrypt_words(&mut a, &mut b);
    ///
    /// assert_eq!(a, 0x9B14DC2D);
    /// assert_eq!(b, 0x9E8B08CF);
    /// ```
    pub fn encrypt_words(&self, a: &mut T, b: &mut T) {
        let (s0, s1) = self.table.whitening();
        *a = a.wrapping_add(&s0);
        *b = b.wrapping_add(&s1);

        for (s1, s2) in self.table.round_keys() {
            // A = ((A ^ B) <<< B) + S[2*i]
            *a = rotate_left(*a ^ *b, (*b).into()).wrapping_add(&s1);
            // B = ((B ^ A) <<< A) + S[2*i + 1]
            *b = rotate_left(*b ^ *a, (*a).into()).wrapping_add(&s2);
        }
    }

    /// Decrypts the two-word block represented by the references `a` and `b`.
    ///
    /// The decrypted values are written back to the same references.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::Rc5;
    ///
    /// let key = [
    ///     0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
    ///     0x0E, 0x0F,
    /// ];
    /// let rc5 = Rc5::<u32>::new(&key, 12).unwrap();
    ///
    /// let mut a = 0x9B14DC2D;
    /// let mut b = 0x9E8B08CF;
    ///
    /// rc5.decrypt_words(&mut a, &mut b);
    ///
    /// assert_eq!(a, 0x33221100);
    /// assert_eq!(b, 0x77665544);
    /// ```
    pub fn decrypt_words(&self, a: &mut T, b: &mut T) {
        for (s1, s2) in self.table.round_keys().rev() {
            // B = ((B - S[2*i+1]) >>> A) ^ A
            *b = rotate_right(b.wrapping_sub(&s2), (*a).into()) ^ *a;
            // A = ((A - S[2*i]) >>> B) ^ B
            *a = rotate_right(a.wrapping_sub(&s1), (*b).into()) ^ *b;
        }

        let (s0, s1) = self.table.whitening();
        *b = b.wrapping_sub(&s1);
        *a = a.wrapping_sub(&s0);
    }

    /// Encrypts one block of `2 * w / 8` bytes in place.
    ///
    /// The first half of the block is the little-endian word `A`, the second half
    /// the little-endian word `B`.
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<(), Rc5Error> {
        self.transform_block(block, Rc5::encrypt_words)
    }

    /// Decrypts one block of `2 * w / 8` bytes in place.
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<(), Rc5Error> {
        self.transform_block(block, Rc5::decrypt_words)
    }

    fn transform_block(
        &self,
        block: &mut [u8],
        transform: fn(&Rc5<T>, &mut T, &mut T),
    ) -> Result<(), Rc5Error> {
        if block.len() != 2 * T::BYTES {
            return Err(Rc5Error::InputShape {
                len: block.len(),
                block_bytes: 2 * T::BYTES,
            });
        }

        let (a_bytes, b_bytes) = block.split_at_mut(T::BYTES);
        let mut a = T::from_le_slice(a_bytes);
        let mut b = T::from_le_slice(b_bytes);

        transform(self, &mut a, &mut b);

        a.write_le(a_bytes);
        b.write_le(b_bytes);
        Ok(())
    }
}

/// The `BlockCipher` trait provides methods for encrypting and decrypting single
/// blocks with an RC5 instance whose word size is determined at runtime.
pub trait BlockCipher: Send + Sync {
    /// The `(w, rounds)` pair of this instance.
    fn parameters(&self) -> CipherParameters;

    /// Size of one block in bytes.
    fn block_bytes(&self) -> usize {
        self.parameters().block_bytes()
    }

    /// Encrypts the given block in place.
    ///
    /// Returns an [Rc5Error::InputShape] if the slice is not exactly one block long.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), Rc5Error>;

    /// Decrypts the given block in place.
    ///
    /// Returns an [Rc5Error::InputShape] if the slice is not exactly one block long.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), Rc5Error>;
}

impl<T: Word> BlockCipher for Rc5<T> {
    fn parameters(&self) -> CipherParameters {
        CipherParameters::with_word_size(T::WORD_SIZE, self.rounds())
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), Rc5Error> {
        Rc5::encrypt_block(self, block)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), Rc5Error> {
        Rc5::decrypt_block(self, block)
    }
}

/// Constructs a new [Rc5] instance for a word size chosen at runtime.
///
/// # Examples
///
/// ```
/// use rc5_codec::{new_block_cipher, CipherParameters};
///
/// let params = CipherParameters::new(32, 12).unwrap();
/// let algo = new_block_cipher(params, b"my secret key").unwrap();
/// let pt_org = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
/// let mut block = pt_org;
/// algo.encrypt_block(&mut block).unwrap();
/// assert_ne!(pt_org, block);
/// algo.decrypt_block(&mut block).unwrap();
/// assert_eq!(pt_org, block);
/// ```
pub fn new_block_cipher(
    params: CipherParameters,
    key: &[u8],
) -> Result<Box<dyn BlockCipher>, ConfigurationError> {
    let rounds = params.rounds();
    match params.word_size() {
        WordSize::W16 => Ok(Box::new(Rc5::<u16>::new(key, rounds)?)),
        WordSize::W32 => Ok(Box::new(Rc5::<u32>::new(key, rounds)?)),
        WordSize::W64 => Ok(Box::new(Rc5::<u64>::new(key, rounds)?)),
    }
}
