//! Pipeline stage implementations.
//!
//! Each stage is a function of start-of-cycle state that returns the value of
//! its output latch; the CPU commits all of them together at the end of the
//! cycle. It includes:
//! 1. **Fetch:** Chooses the address presented to the memory port.
//! 2. **Decode:** Decodes the fetched word and resolves forwarded operands.
//! 3. **Execute:** Performs the ALU operation and resolves branches.
//! 4. **Memory:** Extracts load results from the SRAM output.
//! 5. **Writeback:** Commits results to the register file and detects halt.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decoder entry point (ID stage, first half).
pub use decode::decode_stage;
/// Decode-forward entry point (ID stage, second half).
pub use decode::forward_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
