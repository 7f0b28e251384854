// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Fixed binary layout for persisting a key together with its cipher parameters.
//!
//! All integers are little-endian:
//!
//! | offset | size | field            |
//! |-------:|-----:|------------------|
//! | 0      | 4    | magic `RC5K`     |
//! | 4      | 1    | version (1)      |
//! | 5      | 2    | word size, bits  |
//! | 7      | 2    | key size, bits   |
//! | 9      | 1    | rounds           |
//! | 10     | 1    | key length, n    |
//! | 11     | n    | key bytes        |
//!
use crate::error::{KeyRecordError, Rc5Error};
use crate::key::{key_len_for_bits, SecretKey};
use crate::params::{validate_key_size_bits, CipherParameters, DEFAULT_KEY_SIZE_BITS};
use crate::stream::StreamCodec;
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::io::{Read, Write};

const MAGIC: [u8; 4] = *b"RC5K";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 11;

/// A secret key bundled with the parameters it has to be used with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyRecord {
    key: SecretKey,
    parameters: CipherParameters,
    key_size_bits: u16,
}

impl KeyRecord {
    /// Bundles `key` with `parameters`.
    ///
    /// `key_size_bits` has to round up to exactly `key.len()` bytes.
    pub fn new(
        key: SecretKey,
        parameters: CipherParameters,
        key_size_bits: u16,
    ) -> Result<KeyRecord, KeyRecordError> {
        validate_key_size_bits(key_size_bits as usize)?;
        if key_len_for_bits(key_size_bits as usize) != key.len() {
            return Err(KeyRecordError::KeyLengthMismatch {
                key_size_bits,
                key_len: key.len(),
            });
        }

        Ok(KeyRecord {
            key,
            parameters,
            key_size_bits,
        })
    }

    /// Generates a fresh random key of `key_size_bits` bits for `parameters`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::{CipherParameters, KeyRecord};
    ///
    /// let record = KeyRecord::generate(CipherParameters::default(), 128).unwrap();
    /// let bytes = record.to_bytes();
    /// assert_eq!(bytes.len(), 11 + 16);
    /// assert_eq!(KeyRecord::from_bytes(&bytes).unwrap(), record);
    /// ```
    pub fn generate(
        parameters: CipherParameters,
        key_size_bits: u16,
    ) -> Result<KeyRecord, KeyRecordError> {
        let key = SecretKey::generate(key_size_bits)?;
        KeyRecord::new(key, parameters, key_size_bits)
    }

    /// Generates a record with the default 128 bit key size.
    pub fn generate_default(parameters: CipherParameters) -> Result<KeyRecord, KeyRecordError> {
        KeyRecord::generate(parameters, DEFAULT_KEY_SIZE_BITS)
    }

    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    pub fn parameters(&self) -> CipherParameters {
        self.parameters
    }

    pub fn key_size_bits(&self) -> u16 {
        self.key_size_bits
    }

    /// Builds the stream codec described by this record.
    pub fn codec(&self) -> Result<StreamCodec, Rc5Error> {
        StreamCodec::new(&self.key, self.parameters)
    }

    /// Serialized length of this record.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.key.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.encoded_len()];
        out[..4].copy_from_slice(&MAGIC);
        out[4] = VERSION;
        LittleEndian::write_u16(&mut out[5..7], self.parameters.word_size_bits() as u16);
        LittleEndian::write_u16(&mut out[7..9], self.key_size_bits);
        out[9] = self.parameters.rounds();
        // SecretKey caps the key at 255 bytes
        out[10] = self.key.len() as u8;
        out[HEADER_LEN..].copy_from_slice(self.key.as_bytes());
        out
    }

    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), KeyRecordError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Reads one record from `reader`, leaving any following bytes unread.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<KeyRecord, KeyRecordError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(KeyRecordError::BadMagic);
        }

        let version = reader.read_u8()?;
        if version != VERSION {
            return Err(KeyRecordError::UnsupportedVersion(version));
        }

        let word_size_bits = reader.read_u16::<LittleEndian>()?;
        let key_size_bits = reader.read_u16::<LittleEndian>()?;
        let rounds = reader.read_u8()?;
        let key_len = reader.read_u8()? as usize;

        let parameters = CipherParameters::new(word_size_bits as u32, rounds as u32)?;

        let mut key = vec![0u8; key_len];
        reader.read_exact(&mut key)?;
        let key = SecretKey::new(key)?;

        log::debug!(
            "read key record: w = {}, rounds = {}, key size = {} bits",
            word_size_bits,
            rounds,
            key_size_bits
        );
        KeyRecord::new(key, parameters, key_size_bits)
    }

    /// Parses a record that has to span all of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<KeyRecord, KeyRecordError> {
        let mut cursor = bytes;
        let record = KeyRecord::read_from(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(KeyRecordError::TrailingBytes(cursor.len()));
        }
        Ok(record)
    }
}
