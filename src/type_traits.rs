// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The [Word] trait abstracts over the three RC5 word widths, together with the
//! width-generic data-dependent rotations.
//!
use crate::params::WordSize;

// ODD((E - 2) * (1 << 64))
const P64: u64 = 0xB7E151628AED2A6B;
// ODD((PHI - 1) * (1 << 64))
const Q64: u64 = 0x9E3779B97F4A7C15;

/// An unsigned word of width `w` with wrapping arithmetic.
///
/// Implemented for `u16`, `u32` and `u64` only, so an unsupported width can not
/// be expressed at compile time.
pub trait Word:
    num_traits::PrimInt
    + num_traits::Unsigned
    + num_traits::WrappingAdd
    + num_traits::WrappingSub
    + Into<u64>
    + zeroize::Zeroize
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
{
    const WORD_SIZE: WordSize;
    const BITS: u32;
    const BYTES: usize;
    /// Key schedule magic constant `P_w`.
    const P: Self;
    /// Key schedule magic constant `Q_w`.
    const Q: Self;

    /// Reads a little-endian word from at most [Word::BYTES] bytes. Missing high
    /// bytes are taken as zero.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Writes the word little-endian into exactly [Word::BYTES] bytes.
    fn write_le(self, out: &mut [u8]);
}

macro_rules! impl_word {
    ($t:ty, $word_size:expr) => {
        impl Word for $t {
            const WORD_SIZE: WordSize = $word_size;
            const BITS: u32 = <$t>::BITS;
            const BYTES: usize = std::mem::size_of::<$t>();
            const P: $t = ((P64 >> (64 - <$t>::BITS)) | 1) as $t;
            const Q: $t = ((Q64 >> (64 - <$t>::BITS)) | 1) as $t;

            fn from_le_slice(bytes: &[u8]) -> $t {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf[..bytes.len()].copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }

            fn write_le(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }
        }
    };
}

impl_word!(u16, WordSize::W16);
impl_word!(u32, WordSize::W32);
impl_word!(u64, WordSize::W64);

/// Rotates `value` left by `shift mod w` bits.
#[inline]
pub fn rotate_left<T: Word>(value: T, shift: u64) -> T {
    value.rotate_left(rotation_amount::<T>(shift))
}

/// Rotates `value` right by `shift mod w` bits.
#[inline]
pub fn rotate_right<T: Word>(value: T, shift: u64) -> T {
    value.rotate_right(rotation_amount::<T>(shift))
}

fn rotation_amount<T: Word>(shift: u64) -> u32 {
    (shift % T::BITS as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_amount_wrap() {
        let x = 0xffffff;
        let expected = 0xf;
        let amount = rotation_amount::<u16>(x);
        assert_eq!(expected, amount);
    }

    #[test]
    fn rotation_amount_nowrap() {
        let x = 4;
        let amount = rotation_amount::<u16>(x);
        assert_eq!(x as u32, amount);
    }

    #[test]
    fn rotation_amount_64() {
        assert_eq!(rotation_amount::<u64>(64), 0);
        assert_eq!(rotation_amount::<u64>(u64::MAX), 63);
    }

    #[test]
    fn rotate_stays_within_width() {
        assert_eq!(rotate_left(0x8001u16, 1), 0x0003);
        assert_eq!(rotate_left(0x8001u16, 17), 0x0003);
        assert_eq!(rotate_right(0x0003u16, 1), 0x8001);
        assert_eq!(rotate_left(0x8000_0001u32, 4), 0x0000_0018);
        assert_eq!(rotate_right(0x1u64, 65), 0x8000_0000_0000_0000);
    }

    #[test]
    fn rotate_by_width_is_identity() {
        assert_eq!(rotate_left(0x1234u16, 16), 0x1234);
        assert_eq!(rotate_right(0xDEAD_BEEFu32, 32), 0xDEAD_BEEF);
        assert_eq!(rotate_left(0x0123_4567_89AB_CDEFu64, 128), 0x0123_4567_89AB_CDEF);
    }

    #[test]
    fn magic_constants() {
        assert_eq!(<u16 as Word>::P, 0xB7E1);
        assert_eq!(<u16 as Word>::Q, 0x9E37);
        assert_eq!(<u32 as Word>::P, 0xB7E15163);
        assert_eq!(<u32 as Word>::Q, 0x9E3779B9);
        assert_eq!(<u64 as Word>::P, 0xB7E151628AED2A6B);
        assert_eq!(<u64 as Word>::Q, 0x9E3779B97F4A7C15);
    }

    #[test]
    fn from_le_slice_pads_high_bytes() {
        assert_eq!(u32::from_le_slice(&[0x01, 0x02, 0x03, 0x04]), 0x04030201);
        assert_eq!(u32::from_le_slice(&[0x01, 0x02]), 0x00000201);
        assert_eq!(u64::from_le_slice(&[]), 0);
    }

    #[test]
    fn write_le_order() {
        let mut out = [0u8; 2];
        0xABCDu16.write_le(&mut out);
        assert_eq!(out, [0xCD, 0xAB]);
    }
}
