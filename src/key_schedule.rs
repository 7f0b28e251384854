// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! RC5 key expansion: turns a variable length secret key into the table of
//! `2 * (rounds + 1)` round key words.
//!
use crate::type_traits::*;
use std::cmp::max;
use zeroize::Zeroize;

/// The expanded key table `S` of an RC5 instance.
///
/// The table is derived once from the key and never changes afterwards, so a
/// single table can be shared by any number of concurrent block operations.
#[derive(Clone, PartialEq, Eq)]
pub struct ExpandedKeyTable<T: Word> {
    words: Vec<T>,
}

impl<T: Word> ExpandedKeyTable<T> {
    /// Expands `key` into the round key table for `rounds` rounds.
    ///
    /// The key is zero padded to a whole number of words and split into
    /// little-endian words; an empty key becomes a single zero word.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_codec::ExpandedKeyTable;
    ///
    /// let table = ExpandedKeyTable::<u32>::expand(b"my secret key", 12);
    /// assert_eq!(table.len(), 26);
    /// ```
    pub fn expand(key: &[u8], rounds: u8) -> ExpandedKeyTable<T> {
        let mut l_arr = align_key::<T>(key);
        let s_arr = seed_table::<T>(rounds);

        log::debug!(
            "expanding key: w = {}, rounds = {}, c = {}, t = {}",
            T::BITS,
            rounds,
            l_arr.len(),
            s_arr.len()
        );

        let words = mix(s_arr, &mut l_arr);
        l_arr.zeroize();

        ExpandedKeyTable { words }
    }

    /// Number of rounds the table was expanded for.
    pub fn rounds(&self) -> u8 {
        // t = 2 * (r + 1) with r <= 255
        (self.words.len() / 2 - 1) as u8
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: even a zero round table holds `S[0]` and `S[1]`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.words.iter()
    }

    /// `(S[0], S[1])`, the whitening words applied before the first round.
    pub(crate) fn whitening(&self) -> (T, T) {
        (self.words[0], self.words[1])
    }

    /// `(S[2i], S[2i + 1])` for rounds `i = 1..=r`.
    pub(crate) fn round_keys(&self) -> impl DoubleEndedIterator<Item = (T, T)> + '_ {
        self.words[2..].chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }
}

impl<T: Word> Drop for ExpandedKeyTable<T> {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

impl<T: Word> std::fmt::Debug for ExpandedKeyTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandedKeyTable")
            .field("w", &T::BITS)
            .field("rounds", &self.rounds())
            .finish_non_exhaustive()
    }
}

/// Splits the key into `c >= 1` little-endian words, zero padding the last one.
fn align_key<T: Word>(key: &[u8]) -> Vec<T> {
    if key.is_empty() {
        return vec![T::zero()];
    }
    key.chunks(T::BYTES).map(T::from_le_slice).collect()
}

/// `S[0] = P`, `S[i] = S[i - 1] + Q`.
fn seed_table<T: Word>(rounds: u8) -> Vec<T> {
    let t = 2 * (rounds as usize + 1);
    std::iter::successors(Some(T::P), |x| Some(x.wrapping_add(&T::Q)))
        .take(t)
        .collect()
}

fn mix<T: Word>(mut s_arr: Vec<T>, l_arr: &mut [T]) -> Vec<T> {
    let (t, c) = (s_arr.len(), l_arr.len());
    let (mut a, mut b) = (T::zero(), T::zero());
    let (mut i, mut j) = (0, 0);

    for _ in 0..3 * max(t, c) {
        // A = S[i] = (S[i] + A + B) <<< 3
        a = rotate_left(s_arr[i].wrapping_add(&a).wrapping_add(&b), 3);
        s_arr[i] = a;
        // B = L[j] = (L[j] + A + B) <<< (A + B)
        let ab = a.wrapping_add(&b);
        b = rotate_left(l_arr[j].wrapping_add(&ab), ab.into());
        l_arr[j] = b;

        i = (i + 1) % t;
        j = (j + 1) % c;
    }

    s_arr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_key_empty_is_single_zero_word() {
        assert_eq!(align_key::<u32>(&[]), vec![0]);
    }

    #[test]
    fn align_key_pads_last_word() {
        let words = align_key::<u32>(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(words, vec![0x04030201, 0x00000005]);
    }

    #[test]
    fn align_key_64() {
        let words = align_key::<u64>(&[0xFF; 9]);
        assert_eq!(words, vec![u64::MAX, 0xFF]);
    }

    #[test]
    fn seed_table_progression() {
        let s = seed_table::<u16>(1);
        assert_eq!(s, vec![0xB7E1, 0x5618, 0xF44F, 0x9286]);
    }

    #[test]
    fn table_len_follows_rounds() {
        assert_eq!(ExpandedKeyTable::<u16>::expand(b"k", 0).len(), 2);
        assert_eq!(ExpandedKeyTable::<u32>::expand(b"k", 12).len(), 26);
        assert_eq!(ExpandedKeyTable::<u64>::expand(b"k", 255).len(), 512);
        assert_eq!(ExpandedKeyTable::<u64>::expand(b"k", 255).rounds(), 255);
    }

    #[test]
    fn zero_rounds_empty_key_table() {
        let table = ExpandedKeyTable::<u32>::expand(&[], 0);
        assert_eq!(table.as_slice(), &[0x4DBA7B7A, 0x1E1D1179]);
    }

    #[test]
    fn empty_key_equals_zero_word_key() {
        let empty = ExpandedKeyTable::<u32>::expand(&[], 12);
        let zero_word = ExpandedKeyTable::<u32>::expand(&[0, 0, 0, 0], 12);
        assert_eq!(empty, zero_word);
    }

    #[test]
    fn short_key_equals_zero_padded_key() {
        let short = ExpandedKeyTable::<u64>::expand(b"abc", 8);
        let padded = ExpandedKeyTable::<u64>::expand(b"abc\0\0\0\0\0", 8);
        assert_eq!(short, padded);
    }

    #[test]
    fn key_bit_flip_changes_table() {
        let key = *b"0123456789abcdef";
        let mut flipped = key;
        flipped[5] ^= 0x01;
        let a = ExpandedKeyTable::<u32>::expand(&key, 12);
        let b = ExpandedKeyTable::<u32>::expand(&flipped, 12);
        assert_ne!(a, b);
    }

    #[test]
    fn expansion_is_deterministic() {
        let a = ExpandedKeyTable::<u16>::expand(b"repeatable", 20);
        let b = ExpandedKeyTable::<u16>::expand(b"repeatable", 20);
        assert_eq!(a, b);
    }

    #[test]
    fn round_keys_pairs() {
        let table = ExpandedKeyTable::<u32>::expand(b"pairs", 3);
        let words = table.as_slice();
        assert_eq!(table.whitening(), (words[0], words[1]));
        let pairs: Vec<_> = table.round_keys().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], (words[6], words[7]));
    }

    #[test]
    fn debug_hides_words() {
        let table = ExpandedKeyTable::<u16>::expand(b"secret", 4);
        assert_eq!(
            format!("{table:?}"),
            "ExpandedKeyTable { w: 16, rounds: 4, .. }"
        );
    }
}
