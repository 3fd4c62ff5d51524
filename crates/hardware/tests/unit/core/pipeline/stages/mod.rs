//! Stage tests. Each stage is a free function, so these drive it directly
//! with hand-built latch values.

/// Decode and decode-forward.
pub mod decode;


/// Fetch PC selection.
pub mod fetch;
