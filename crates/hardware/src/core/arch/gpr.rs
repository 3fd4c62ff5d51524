//! RISC-V General-Purpose Register File.
//!
//! This module implements the 32-entry integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) of 32 bits each.
//! 2. **Invariant Enforcement:** Register `x0` boots at zero and the write port
//!    refuses it, so reads never need masking.
//! 3. **Debugging:** Renders the complete register state with ABI names.
//!
//! The file has two combinational read ports and one write port. Writes are
//! committed by the driver at the end of a cycle, so reads in the same cycle
//! observe the value from before the write.

use std::fmt;

use crate::common::constants::NUM_REGS;
use crate::isa::abi::reg_name;

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The stored value.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// Writes a register. Writes to `x0` are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Copy of every register, `x0` included.
    pub fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }
}

impl fmt::Display for Gpr {
    /// Registers in four columns, each as `xN(name)=0x........`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_REGS / 4 {
            for col in 0..4 {
                let i = row * 4 + col;
                let label = format!("x{i}({})", reg_name(i));
                write!(f, "{label:<10}={:#010x}", self.regs[i])?;
                if col < 3 {
                    f.write_str("  ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
