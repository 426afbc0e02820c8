//! Compression hash for hashtree
//!
//! A Merkle-Damgard construction over 512-bit blocks with a 256-bit chaining
//! state. Messages are padded with a single `0x80` byte, zero bytes up to 448
//! bits modulo 512, and the original bit length as a big-endian `u64`. Each
//! block is expanded to 68 schedule words and mixed into the state by 64
//! compression rounds; the post-round registers are XORed back into the state.
//!
//! The round function has the shape of SM3 but omits its round constants and
//! the early-round boolean functions, so digests differ from GB/T 32905.

use crate::core::error::{HashTreeError, Result};
use crate::core::types::{Digest, DIGEST_SIZE};
use std::fs;
use std::path::Path;

/// Initial chaining value
pub const IV: [u32; 8] = [
    0x7380_166F,
    0x4914_B2B9,
    0x1724_42D7,
    0xDA8A_0600,
    0xA96F_30BC,
    0x1631_38AA,
    0xE38D_EE4D,
    0xB0FB_0E4E,
];

/// Block size in bytes (512 bits)
pub const BLOCK_SIZE: usize = 64;

/// Number of compression rounds per block
pub const ROUNDS: usize = 64;

/// Number of expanded schedule words per block
const SCHEDULE_WORDS: usize = ROUNDS + 4;

/// Byte offset of the length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn gg(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

/// Working state of one hash computation
#[derive(Debug, Clone)]
struct MessageState {
    words: [u32; 8],
}

impl MessageState {
    fn new() -> Self {
        Self { words: IV }
    }

    /// Expand a 64-byte block into the 68-word message schedule
    fn expand(block: &[u8]) -> [u32; SCHEDULE_WORDS] {
        let mut w = [0u32; SCHEDULE_WORDS];
        for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        for j in 16..SCHEDULE_WORDS {
            w[j] = p1(w[j - 16] ^ w[j - 9] ^ p0(w[j - 15] ^ w[j - 1])) ^ p0(w[j - 14] ^ w[j - 2]);
        }
        w
    }

    /// Run the 64 compression rounds for one block
    fn compress(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), BLOCK_SIZE);
        let w = Self::expand(block);

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = self.words;

        for j in 0..ROUNDS {
            let a12 = a.rotate_left(12);
            let ss1 = a12.wrapping_add(e).wrapping_add(f).rotate_left(7);
            let ss2 = ss1 ^ a12;
            let tt1 = ff(a, b, c)
                .wrapping_add(ss2)
                .wrapping_add(gg(d, e, f))
                .wrapping_add(w[j]);
            let tt2 = gg(e, f, g)
                .wrapping_add(ss1)
                .wrapping_add(ff(d, e, f))
                .wrapping_add(w[j + 4]);

            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f;
            f = e;
            e = p0(tt2);
        }

        for (word, register) in self.words.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *word ^= register;
        }
    }

    fn into_digest(self) -> Digest {
        let mut out = [0u8; DIGEST_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Digest::from_bytes(out)
    }
}

/// Bit length of a message of `len` bytes, if it fits the 64-bit length field
fn message_bit_length(len: usize) -> Result<u64> {
    u64::try_from(len)
        .ok()
        .and_then(|bytes| bytes.checked_mul(8))
        .ok_or_else(|| HashTreeError::invalid_input(len))
}

/// Hash `message` whose bit length has already been validated
fn digest_with_length(message: &[u8], bit_length: u64) -> Digest {
    let mut state = MessageState::new();

    let mut blocks = message.chunks_exact(BLOCK_SIZE);
    for block in &mut blocks {
        state.compress(block);
    }

    // Only the tail is copied: one padded block, or two when the tail leaves
    // no room for the 0x80 marker plus the length field.
    let tail = blocks.remainder();
    let mut padded = [0u8; BLOCK_SIZE * 2];
    padded[..tail.len()].copy_from_slice(tail);
    padded[tail.len()] = 0x80;

    let padded_len = if tail.len() < LENGTH_OFFSET {
        BLOCK_SIZE
    } else {
        BLOCK_SIZE * 2
    };
    padded[padded_len - 8..padded_len].copy_from_slice(&bit_length.to_be_bytes());

    for block in padded[..padded_len].chunks_exact(BLOCK_SIZE) {
        state.compress(block);
    }

    state.into_digest()
}

/// Hash an arbitrary byte sequence
///
/// Fails with [`HashTreeError::InvalidInput`] only when the message bit length
/// does not fit in 64 bits.
pub fn hash(message: &[u8]) -> Result<Digest> {
    let bit_length = message_bit_length(message.len())?;
    Ok(digest_with_length(message, bit_length))
}

/// Hash a string's UTF-8 bytes
pub fn hash_string(s: &str) -> Result<Digest> {
    hash(s.as_bytes())
}

/// Hash the concatenation `left || right` (for merkle tree construction)
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut combined = [0u8; DIGEST_SIZE * 2];
    combined[..DIGEST_SIZE].copy_from_slice(left.as_bytes());
    combined[DIGEST_SIZE..].copy_from_slice(right.as_bytes());
    digest_with_length(&combined, (DIGEST_SIZE * 2 * 8) as u64)
}

/// Hash the full contents of a file
pub fn hash_file(path: &Path) -> Result<Digest> {
    let data = fs::read(path)?;
    hash(&data)
}
