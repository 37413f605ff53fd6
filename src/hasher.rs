//! The streaming fuzzy hash engine.
//!
//! [`Hasher`] scans its input one byte at a time and keeps one digest
//! lane per candidate block size. Lanes activate lazily as the input
//! grows and retire once a smaller block size can no longer be selected,
//! so the per-byte work stays proportional to the logarithm of the input
//! length rather than the full lane count.

use std::io;

use crate::blockhash::{b64_char, BlockHash, NUM_BLOCKHASHES, SPAM_SUM_LENGTH};
use crate::error::{CtphError, Result};
use crate::rolling::RollingHash;

/// Inputs shorter than this cannot be hashed: with fewer bytes the
/// smallest block size would dominate the digest and any two inputs
/// would compare as related.
pub const MIN_INPUT_SIZE: u64 = 4097;

/// Streaming fuzzy hash state.
///
/// Feed bytes with [`update`](Self::update) (or through the
/// [`std::io::Write`] impl) in chunks of any size; the digest is a pure
/// function of the byte sequence, not of its chunking. Finalisation via
/// [`digest`](Self::digest) does not consume the state, so more bytes
/// can be appended afterwards.
#[derive(Debug, Clone)]
pub struct Hasher {
    rolling: RollingHash,
    lanes: [BlockHash; NUM_BLOCKHASHES],
    i_start: usize,
    i_end: usize,
    total_size: u64,
}

impl Hasher {
    /// Creates an empty hash state. Only the smallest block size starts
    /// active; larger lanes switch on as the input reaches them.
    pub fn new() -> Self {
        Hasher {
            rolling: RollingHash::new(),
            lanes: std::array::from_fn(BlockHash::new),
            i_start: 0,
            i_end: 1,
            total_size: 0,
        }
    }

    /// Total number of bytes consumed so far.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Absorbs a chunk of input.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.process_byte(byte);
        }
    }

    #[inline]
    fn process_byte(&mut self, byte: u8) {
        self.rolling.roll(byte);
        let sum = self.rolling.sum();
        self.total_size += 1;

        for lane in &mut self.lanes[self.i_start..self.i_end] {
            lane.absorb(byte);
        }

        // Walk the active lanes from the smallest block size up. Block
        // sizes double, so the first lane whose trigger does not fire
        // ends the walk. A lane firing for the first time activates the
        // next lane above the frontier, and that lane is examined for
        // this same byte before the walk moves on.
        let mut i = self.i_start;
        while i < self.i_end {
            if !self.lanes[i].triggered(sum) {
                break;
            }
            if self.lanes[i].len == 0 {
                self.try_fork();
            }
            if !self.lanes[i].emit() {
                self.try_reduce();
            }
            i += 1;
        }
    }

    /// Activates the lane above the frontier, seeding its digests from
    /// the current frontier lane so the new block size joins mid-piece.
    fn try_fork(&mut self) {
        if self.i_end >= NUM_BLOCKHASHES {
            return;
        }
        let prev = &self.lanes[self.i_end - 1];
        let (h, half_h) = (prev.h, prev.half_h);
        self.lanes[self.i_end].activate_from(h, half_h);
        self.i_end += 1;
    }

    /// Retires the smallest active lane once finalisation can no longer
    /// select it: the total size already demands a larger block size and
    /// the next lane has enough characters to be representative.
    fn try_reduce(&mut self) {
        if self.i_end - self.i_start < 2 {
            return;
        }
        if self.lanes[self.i_start].block_size * SPAM_SUM_LENGTH as u64 >= self.total_size {
            return;
        }
        if self.lanes[self.i_start + 1].len < SPAM_SUM_LENGTH / 2 {
            return;
        }
        self.i_start += 1;
    }

    /// Finalises the digest text.
    ///
    /// Fails with [`CtphError::InputTooSmall`] below [`MIN_INPUT_SIZE`]
    /// bytes. The state is left untouched.
    pub fn digest(&self) -> Result<String> {
        if self.total_size < MIN_INPUT_SIZE {
            return Err(CtphError::InputTooSmall {
                size: self.total_size,
            });
        }
        Ok(self.format_digest())
    }

    /// Selects the output block size and formats `blocksize:s1:s2`.
    fn format_digest(&self) -> String {
        // Size-based first guess: the largest block size whose full
        // string would still be shorter than the input demands.
        let mut bi = self.i_start;
        while bi < NUM_BLOCKHASHES - 1
            && self.lanes[bi].block_size * (SPAM_SUM_LENGTH as u64) < self.total_size
        {
            bi += 1;
        }
        // Clip into the active range, then back down to a lane that
        // actually collected enough characters.
        if bi >= self.i_end {
            bi = self.i_end - 1;
        }
        while bi > self.i_start && self.lanes[bi].len < SPAM_SUM_LENGTH / 2 {
            bi -= 1;
        }

        let sum = self.rolling.sum();
        let lane = &self.lanes[bi];

        let mut s1 = String::with_capacity(SPAM_SUM_LENGTH);
        for &c in lane.emitted() {
            s1.push(c as char);
        }
        // Close the in-progress piece: a non-zero rolling value means the
        // stream did not end exactly on a trigger, so the remainder gets
        // one more character.
        if sum != 0 {
            s1.push(b64_char(lane.h) as char);
        } else if lane.tail != 0 {
            s1.push(lane.tail as char);
        }

        let mut s2 = String::with_capacity(SPAM_SUM_LENGTH / 2);
        if bi < self.i_end - 1 {
            let next = &self.lanes[bi + 1];
            let keep = next.len.min(SPAM_SUM_LENGTH / 2 - 1);
            for &c in &next.emitted()[..keep] {
                s2.push(c as char);
            }
            if sum != 0 {
                s2.push(b64_char(next.half_h) as char);
            } else if next.half_tail != 0 {
                s2.push(next.half_tail as char);
            }
        } else if sum != 0 {
            s2.push(b64_char(lane.h) as char);
        }

        format!("{}:{}:{}", lane.block_size, s1, s2)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// The sink never rejects bytes; `write` always accepts the whole
/// buffer. This lets `std::io::copy` drive a [`Hasher`] directly.
impl io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Computes the fuzzy hash of an in-memory buffer.
///
/// Fails with [`CtphError::InputTooSmall`] for buffers shorter than
/// [`MIN_INPUT_SIZE`] bytes.
pub fn hash_bytes(data: &[u8]) -> Result<String> {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.digest()
}
