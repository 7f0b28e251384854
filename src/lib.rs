// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC5 block cipher algorithm
//! together with an ECB-style encoding of whole byte streams.
//!
//! The RC5 block cipher is a symmetric-key block cipher designed by Ron Rivest in 1994.
//! It has a variable block size (32, 64, or 128 bits), a variable key size (0 to 2040 bits),
//! and a variable number of rounds (0 to 255).
//!
//! The RC5 algorithm operates on two words (16-bit, 32-bit, or 64-bit each) at a time, with
//! each word being represented by a generic type `T: Word`. The algorithm is based on a key
//! expansion process that generates a series of round keys, which are used to encrypt
//! and decrypt the data.
//!
//! On top of the block cipher, [encode] and [decode] process byte streams block by block,
//! zero padding the final block. Trailing zero bytes of a plaintext are indistinguishable
//! from that padding and do not survive a round trip; see the [stream] module.
//!
//! Keys are persisted with the fixed binary [KeyRecord] layout.
//!
//! This crate provides no authentication and no side-channel resistance.
//!
//! # Examples
//!
//! ```
//! use rc5_codec::{CipherParameters, KeyRecord};
//!
//! let record = KeyRecord::generate(CipherParameters::new(32, 12).unwrap(), 128).unwrap();
//! let codec = record.codec().unwrap();
//!
//! let ciphertext = codec.encode(b"hello there !!!").unwrap();
//! assert_eq!(codec.decode(&ciphertext).unwrap(), b"hello there !!!");
//! ```

mod algorithm;
mod chunker;
mod error;
mod key;
mod key_schedule;
mod params;
mod record;
pub mod stream;
mod type_traits;

pub use crate::algorithm::*;
pub use crate::error::*;
pub use crate::key::SecretKey;
pub use crate::key_schedule::ExpandedKeyTable;
pub use crate::params::*;
pub use crate::record::KeyRecord;
pub use crate::stream::{decode, decode_stream, encode, encode_stream, StreamCodec};
pub use crate::type_traits::{rotate_left, rotate_right, Word};
