//! Pipeline Latch Interface.
//!
//! Common behaviour of the inter-stage bundles: every one of them can be
//! flushed to a bubble and asked whether it holds a real instruction.

use crate::core::pipeline::latches::{ExBundle, IfIdEntry, MemBundle, WbBundle};

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// Replaces the contents with a bubble.
    fn flush(&mut self);

    /// Checks if the latch is empty.
    ///
    /// # Returns
    ///
    /// `true` if the latch holds no instruction that will retire.
    fn is_empty(&self) -> bool;
}

impl PipelineLatch for Option<IfIdEntry> {
    fn flush(&mut self) {
        *self = None;
    }

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

macro_rules! bundle_latch {
    ($($ty:ty),+) => {
        $(
            impl PipelineLatch for $ty {
                fn flush(&mut self) {
                    *self = Self::default();
                }

                fn is_empty(&self) -> bool {
                    !self.valid
                }
            }
        )+
    };
}

bundle_latch!(ExBundle, MemBundle, WbBundle);
