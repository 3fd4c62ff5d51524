//! Word-addressed synchronous SRAM.
//!
//! One 32-bit port, one access per clock. Reads are registered: the word read
//! on clock `t` appears on `dout` for the whole of cycle `t + 1`. Writes leave
//! `dout` unchanged.

use crate::common::constants::WORD_SHIFT;
use crate::common::error::{ImageError, MemoryError};
use crate::config::OutOfRangePolicy;

/// Single-port word SRAM.
#[derive(Clone, Debug)]
pub struct Sram {
    words: Vec<u32>,
    policy: OutOfRangePolicy,
    dout: u32,
}

impl Sram {
    /// Creates a zero-filled SRAM of `2^depth_log` words.
    ///
    /// # Arguments
    ///
    /// * `depth_log` - Log2 of the word count.
    /// * `policy` - What to do with addresses past the last word.
    pub fn new(depth_log: u32, policy: OutOfRangePolicy) -> Self {
        Self {
            words: vec![0; 1 << depth_log],
            policy,
            dout: 0,
        }
    }

    /// Number of 32-bit words.
    pub fn depth_words(&self) -> usize {
        self.words.len()
    }

    /// Maps a byte address to a word index.
    ///
    /// The byte offset `addr[1:0]` is dropped. Past the end, `Wrap` keeps the
    /// low index bits and `Fault` reports [`MemoryError::OutOfRange`].
    pub fn index(&self, addr: u32) -> Result<usize, MemoryError> {
        let idx = (addr >> WORD_SHIFT) as usize;
        let depth = self.words.len();
        if idx < depth {
            return Ok(idx);
        }
        match self.policy {
            OutOfRangePolicy::Wrap => Ok(idx & (depth - 1)),
            OutOfRangePolicy::Fault => Err(MemoryError::OutOfRange {
                addr,
                depth_words: depth,
            }),
        }
    }

    /// Reads the word containing `addr` and latches it onto `dout`.
    pub fn read(&mut self, addr: u32) -> Result<u32, MemoryError> {
        let idx = self.index(addr)?;
        self.dout = self.words[idx];
        Ok(self.dout)
    }

    /// Writes the word containing `addr`.
    pub fn write(&mut self, addr: u32, word: u32) -> Result<(), MemoryError> {
        let idx = self.index(addr)?;
        self.words[idx] = word;
        Ok(())
    }

    /// Registered read output.
    #[inline]
    pub const fn dout(&self) -> u32 {
        self.dout
    }

    /// Word at `addr` without disturbing `dout`.
    pub fn peek(&self, addr: u32) -> Result<u32, MemoryError> {
        Ok(self.words[self.index(addr)?])
    }

    /// Copies an image into memory starting at word `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - First word index to fill.
    /// * `image` - Words to place.
    pub fn load_words(&mut self, base: usize, image: &[u32]) -> Result<(), ImageError> {
        let end = base + image.len();
        let capacity = self.words.len();
        if end > capacity {
            return Err(ImageError::TooLarge {
                end_word: end,
                capacity,
            });
        }
        self.words[base..end].copy_from_slice(image);
        Ok(())
    }

    /// Clears every word and `dout`.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.dout = 0;
    }
}
