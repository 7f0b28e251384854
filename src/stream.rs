// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! ECB-style encoding of whole byte streams.
//!
//! Plaintext is cut into blocks of `2 * w / 8` bytes, the final short block is
//! right padded with zero bytes, and every block is encrypted on its own. On
//! decoding, all trailing zero bytes of the final block are removed.
//!
//! # Trailing zero bytes are lost
//!
//! The padding is not recorded anywhere in the ciphertext, so zero bytes that
//! genuinely end the plaintext can not be told apart from padding and are
//! stripped too. `decode(encode(p))` is `p` without its trailing `0x00` bytes.
//! Callers that must preserve them need to frame the plaintext themselves,
//! e.g. with a length prefix.
//!
use crate::algorithm::{new_block_cipher, BlockCipher};
use crate::chunker::*;
use crate::error::Rc5Error;
use crate::key::SecretKey;
use crate::params::CipherParameters;
use std::io::{Read, Write};

/// Encrypts `plaintext` block by block, zero padding the final block.
///
/// The output is a whole number of blocks and never empty: an empty plaintext
/// encodes to one block.
///
/// # Examples
///
/// ```
/// use rc5_codec::{encode, Rc5};
///
/// let rc5 = Rc5::<u32>::new(b"my secret key", 12).unwrap();
/// let ciphertext = encode(b"hello there !!!", &rc5).unwrap();
/// assert_eq!(ciphertext.len(), 16);
/// ```
pub fn encode<C>(plaintext: &[u8], cipher: &C) -> Result<Vec<u8>, Rc5Error>
where
    C: BlockCipher + ?Sized,
{
    let block_bytes = cipher.block_bytes();
    let encoded_len = padded_len(plaintext.len(), block_bytes);

    let mut out = Vec::with_capacity(encoded_len);
    out.extend_from_slice(plaintext);
    out.resize(encoded_len, 0);

    for_each_block(&mut out, block_bytes, |block| cipher.encrypt_block(block))?;

    log::debug!(
        "encoded {} bytes into {} blocks of {} bytes",
        plaintext.len(),
        encoded_len / block_bytes,
        block_bytes
    );
    Ok(out)
}

/// Decrypts `ciphertext` block by block and strips the trailing zero bytes of
/// the final block.
///
/// # Examples
///
/// ```
/// use rc5_codec::{decode, encode, Rc5};
///
/// let rc5 = Rc5::<u16>::new(b"my secret key", 12).unwrap();
/// let ciphertext = encode(b"hello there !!!", &rc5).unwrap();
/// assert_eq!(decode(&ciphertext, &rc5).unwrap(), b"hello there !!!");
/// ```
pub fn decode<C>(ciphertext: &[u8], cipher: &C) -> Result<Vec<u8>, Rc5Error>
where
    C: BlockCipher + ?Sized,
{
    let block_bytes = cipher.block_bytes();
    ensure_block_aligned(ciphertext.len(), block_bytes)?;

    let mut out = ciphertext.to_vec();
    for_each_block(&mut out, block_bytes, |block| cipher.decrypt_block(block))?;

    if let Some(last_start) = out.len().checked_sub(block_bytes) {
        let kept = stripped_len(&out[last_start..]);
        out.truncate(last_start + kept);
        log::trace!("stripped {} trailing zero bytes", block_bytes - kept);
    }

    log::debug!(
        "decoded {} blocks of {} bytes into {} bytes",
        ciphertext.len() / block_bytes,
        block_bytes,
        out.len()
    );
    Ok(out)
}

/// Streaming counterpart of [encode]: reads plaintext from `reader` one block at
/// a time and writes the ciphertext to `writer`.
///
/// Returns the number of ciphertext bytes written.
pub fn encode_stream<C, R, W>(reader: &mut R, writer: &mut W, cipher: &C) -> Result<u64, Rc5Error>
where
    C: BlockCipher + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let block_bytes = cipher.block_bytes();
    let mut block = vec![0u8; block_bytes];
    let mut written = 0u64;

    loop {
        let filled = read_block(reader, &mut block)?;
        if filled == 0 && written > 0 {
            break;
        }

        block[filled..].fill(0);
        cipher.encrypt_block(&mut block)?;
        writer.write_all(&block)?;
        written += block_bytes as u64;

        if filled < block_bytes {
            break;
        }
    }

    writer.flush()?;
    log::debug!("encoded stream into {written} bytes");
    Ok(written)
}

/// Streaming counterpart of [decode]: reads ciphertext from `reader` and writes
/// plaintext to `writer`, keeping one block of look-ahead to recognise the final
/// block.
///
/// Returns the number of plaintext bytes written. When the ciphertext turns out
/// not to be block aligned an [Rc5Error::InputShape] is returned; blocks before
/// the misaligned tail have already been written by then.
pub fn decode_stream<C, R, W>(reader: &mut R, writer: &mut W, cipher: &C) -> Result<u64, Rc5Error>
where
    C: BlockCipher + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let block_bytes = cipher.block_bytes();
    let mut current = vec![0u8; block_bytes];
    let mut next = vec![0u8; block_bytes];
    let mut consumed = 0usize;
    let mut written = 0u64;

    let mut filled = read_block(reader, &mut current)?;
    if filled == 0 {
        return Ok(0);
    }

    loop {
        consumed += filled;
        if filled != block_bytes {
            return Err(Rc5Error::InputShape {
                len: consumed,
                block_bytes,
            });
        }
        cipher.decrypt_block(&mut current)?;

        filled = read_block(reader, &mut next)?;
        if filled == 0 {
            let kept = stripped_len(&current);
            writer.write_all(&current[..kept])?;
            written += kept as u64;
            break;
        }

        writer.write_all(&current)?;
        written += block_bytes as u64;
        std::mem::swap(&mut current, &mut next);
    }

    writer.flush()?;
    log::debug!("decoded {consumed} byte stream into {written} bytes");
    Ok(written)
}

#[cfg(not(feature = "parallel"))]
fn for_each_block<F>(buf: &mut [u8], block_bytes: usize, op: F) -> Result<(), Rc5Error>
where
    F: Fn(&mut [u8]) -> Result<(), Rc5Error> + Send + Sync,
{
    buf.chunks_exact_mut(block_bytes).try_for_each(op)
}

#[cfg(feature = "parallel")]
fn for_each_block<F>(buf: &mut [u8], block_bytes: usize, op: F) -> Result<(), Rc5Error>
where
    F: Fn(&mut [u8]) -> Result<(), Rc5Error> + Send + Sync,
{
    use rayon::prelude::*;

    buf.par_chunks_exact_mut(block_bytes).try_for_each(op)
}

/// A block cipher bound to the ECB stream layout.
///
/// # Examples
///
/// ```
/// use rc5_codec::{CipherParameters, SecretKey, StreamCodec};
///
/// let key = SecretKey::new(b"my secret key".to_vec()).unwrap();
/// let codec = StreamCodec::new(&key, CipherParameters::new(64, 16).unwrap()).unwrap();
///
/// let ciphertext = codec.encode(b"attack at dawn").unwrap();
/// assert_eq!(ciphertext.len(), 16);
/// assert_eq!(codec.decode(&ciphertext).unwrap(), b"attack at dawn");
/// ```
pub struct StreamCodec {
    cipher: Box<dyn BlockCipher>,
}

impl StreamCodec {
    /// Expands `key` once for `params` and keeps the resulting cipher.
    pub fn new(key: &SecretKey, params: CipherParameters) -> Result<StreamCodec, Rc5Error> {
        Ok(StreamCodec::from_cipher(new_block_cipher(
            params,
            key.as_bytes(),
        )?))
    }

    pub fn from_cipher(cipher: Box<dyn BlockCipher>) -> StreamCodec {
        StreamCodec { cipher }
    }

    pub fn parameters(&self) -> CipherParameters {
        self.cipher.parameters()
    }

    pub fn cipher(&self) -> &dyn BlockCipher {
        &*self.cipher
    }

    /// See [encode].
    pub fn encode(&self, plaintext: &[u8]) -> Result<Vec<u8>, Rc5Error> {
        encode(plaintext, &*self.cipher)
    }

    /// See [decode].
    pub fn decode(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Rc5Error> {
        decode(ciphertext, &*self.cipher)
    }

    /// See [encode_stream].
    pub fn encode_stream<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<u64, Rc5Error>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        encode_stream(reader, writer, &*self.cipher)
    }

    /// See [decode_stream].
    pub fn decode_stream<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<u64, Rc5Error>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        decode_stream(reader, writer, &*self.cipher)
    }
}

impl std::fmt::Debug for StreamCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCodec")
            .field("parameters", &self.parameters())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Rc5;
    use std::io::Cursor;

    const KEY: &[u8] = b"my secret key";

    fn rc5_32() -> Rc5<u32> {
        Rc5::<u32>::new(KEY, 12).unwrap()
    }

    #[test]
    fn encode_known_stream() {
        let ct = encode(b"hello there !!!", &rc5_32()).unwrap();
        assert_eq!(
            ct,
            [
                0xD2, 0x1F, 0xB0, 0xDC, 0x92, 0x76, 0x0A, 0x23, 0xB1, 0x36, 0xB8, 0x8F, 0x7D,
                0x2F, 0xD2, 0xAE
            ]
        );
    }

    #[test]
    fn encode_empty_is_one_zero_block() {
        let rc5 = rc5_32();
        let ct = encode(b"", &rc5).unwrap();
        assert_eq!(ct, [0x8B, 0x80, 0xA4, 0xBB, 0xE2, 0x78, 0xA6, 0x5E]);

        let mut zero_block = [0u8; 8];
        rc5.encrypt_block(&mut zero_block).unwrap();
        assert_eq!(ct, zero_block);
        assert_eq!(decode(&ct, &rc5).unwrap(), b"");
    }

    #[test]
    fn decode_empty_ciphertext() {
        assert_eq!(decode(&[], &rc5_32()).unwrap(), b"");
    }

    #[test]
    fn decode_misaligned_ciphertext() {
        let res = decode(&[0; 12], &rc5_32());
        assert!(matches!(
            res,
            Err(Rc5Error::InputShape { len: 12, block_bytes: 8 })
        ));
    }

    #[test]
    fn trailing_zeros_are_lost() {
        let rc5 = rc5_32();
        let pt = [0x41, 0x42, 0x00, 0x00];
        let ct = encode(&pt, &rc5).unwrap();
        assert_eq!(decode(&ct, &rc5).unwrap(), [0x41, 0x42]);
    }

    #[test]
    fn aligned_trailing_zero_block_is_lost() {
        let rc5 = rc5_32();
        let mut pt = vec![0x11; 8];
        pt.extend_from_slice(&[0; 8]);
        let ct = encode(&pt, &rc5).unwrap();
        assert_eq!(ct.len(), 16);
        assert_eq!(decode(&ct, &rc5).unwrap(), [0x11; 8]);
    }

    #[test]
    fn only_final_block_is_stripped() {
        let rc5 = rc5_32();
        let mut pt = vec![0x01];
        pt.extend_from_slice(&[0; 15]);
        pt.push(0x02);
        let ct = encode(&pt, &rc5).unwrap();
        assert_eq!(ct.len(), 24);
        assert_eq!(decode(&ct, &rc5).unwrap(), pt);
    }

    #[test]
    fn interior_zeros_of_final_block_survive() {
        let rc5 = rc5_32();
        let pt = [0x00, 0x00, 0x07, 0x00, 0x09];
        let ct = encode(&pt, &rc5).unwrap();
        assert_eq!(decode(&ct, &rc5).unwrap(), pt);
    }

    #[test]
    fn encode_is_deterministic() {
        let rc5 = rc5_32();
        let pt = b"the same input twice";
        assert_eq!(encode(pt, &rc5).unwrap(), encode(pt, &rc5).unwrap());
    }

    #[test]
    fn identical_blocks_encrypt_identically() {
        let rc5 = rc5_32();
        let ct = encode(&[0x5A; 16], &rc5).unwrap();
        assert_eq!(ct[..8], ct[8..]);
    }

    #[test]
    fn stream_matches_in_memory() {
        let codec = StreamCodec::from_cipher(Box::new(rc5_32()));
        for len in [0usize, 1, 7, 8, 9, 16, 31] {
            let pt: Vec<u8> = (1..=len as u8).collect();
            let mut ct = Vec::new();
            let written = codec
                .encode_stream(&mut Cursor::new(&pt), &mut ct)
                .unwrap();
            assert_eq!(written as usize, ct.len());
            assert_eq!(ct, codec.encode(&pt).unwrap());

            let mut decoded = Vec::new();
            let written = codec
                .decode_stream(&mut Cursor::new(&ct), &mut decoded)
                .unwrap();
            assert_eq!(written as usize, decoded.len());
            assert_eq!(decoded, codec.decode(&ct).unwrap());
            assert_eq!(decoded, pt);
        }
    }

    #[test]
    fn decode_stream_empty() {
        let mut out = Vec::new();
        let mut empty = Cursor::new(Vec::<u8>::new());
        let written = decode_stream(&mut empty, &mut out, &rc5_32()).unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn decode_stream_misaligned() {
        let mut out = Vec::new();
        let res = decode_stream(&mut Cursor::new(vec![0u8; 19]), &mut out, &rc5_32());
        assert!(matches!(
            res,
            Err(Rc5Error::InputShape { len: 19, block_bytes: 8 })
        ));
    }

    #[test]
    fn codec_reports_parameters() {
        let key = SecretKey::new(KEY.to_vec()).unwrap();
        let params = CipherParameters::new(16, 5).unwrap();
        let codec = StreamCodec::new(&key, params).unwrap();
        assert_eq!(codec.parameters(), params);
        assert_eq!(codec.cipher().block_bytes(), 4);
        assert_eq!(
            format!("{codec:?}"),
            format!("StreamCodec {{ parameters: {params:?}, .. }}")
        );
    }
}
