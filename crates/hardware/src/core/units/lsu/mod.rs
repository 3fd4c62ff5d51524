//! Load/Store Unit (LSU).
//!
//! Sub-word helpers shared by the Memory stage and the arbiter. Memory is only
//! ever accessed a whole word at a time; this unit selects or replaces the byte
//! lanes an access actually touches. The lane offset is `addr[1:0]` and is not
//! checked for natural alignment.

use crate::common::constants::BYTE_OFFSET_MASK;
use crate::core::pipeline::signals::MemWidth;

/// Load/Store Unit (LSU) for sub-word memory operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lsu;

impl Lsu {
    /// Bit offset of the byte lane selected by `addr`.
    #[inline]
    pub const fn lane_shift(addr: u32) -> u32 {
        (addr & BYTE_OFFSET_MASK) * 8
    }

    /// Extracts a load result from a whole memory word.
    ///
    /// # Arguments
    ///
    /// * `word` - The word read from memory.
    /// * `addr` - Byte address of the access.
    /// * `width` - Access width.
    /// * `signed` - Sign-extend from the field's top bit instead of zero-extending.
    ///
    /// # Returns
    ///
    /// The 32-bit value to write back.
    pub fn extract(word: u32, addr: u32, width: MemWidth, signed: bool) -> u32 {
        let field = (word >> Self::lane_shift(addr)) & width.mask();
        match (width, signed) {
            (MemWidth::Byte, true) => field as u8 as i8 as i32 as u32,
            (MemWidth::Half, true) => field as u16 as i16 as i32 as u32,
            _ => field,
        }
    }

    /// Byte-lane mask a store of `width` at `addr` replaces.
    #[inline]
    pub const fn store_mask(addr: u32, width: MemWidth) -> u32 {
        width.mask().wrapping_shl(Self::lane_shift(addr))
    }

    /// Replaces the addressed lanes of `old` with the low bits of `data`.
    ///
    /// # Arguments
    ///
    /// * `old` - Word currently in memory.
    /// * `addr` - Byte address of the store.
    /// * `width` - Store width.
    /// * `data` - Register value being stored.
    ///
    /// # Returns
    ///
    /// The word to write back to memory.
    pub const fn merge(old: u32, addr: u32, width: MemWidth, data: u32) -> u32 {
        let mask = Self::store_mask(addr, width);
        (old & !mask) | (data.wrapping_shl(Self::lane_shift(addr)) & mask)
    }
}
