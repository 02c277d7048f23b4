//! In-memory chain height tracker.
//!
//! Stands in for the block storage subsystem in single-process nodes and
//! tests. The height only moves forward.

use crate::ports::outbound::ChainHeightSource;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

/// Chain height held in a single atomic.
#[derive(Debug, Default)]
pub struct InMemoryChain {
    height: AtomicU32,
}

impl InMemoryChain {
    /// Genesis-only chain (height 0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height(height: u32) -> Self {
        Self {
            height: AtomicU32::new(height),
        }
    }

    /// Commit one block and return the new height.
    ///
    /// Saturates at `u32::MAX`.
    pub fn push_block(&self) -> u32 {
        let previous = self
            .height
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |h| h.checked_add(1))
            .unwrap_or(u32::MAX);
        let height = previous.saturating_add(1);
        debug!(height, "Block committed");
        height
    }

    /// Move the tip forward to `height`.
    ///
    /// Returns `false` (and leaves the chain untouched) if `height` is not
    /// above the current tip.
    pub fn advance_to(&self, height: u32) -> bool {
        self.height.fetch_max(height, Ordering::AcqRel) < height
    }
}

impl ChainHeightSource for InMemoryChain {
    fn current_height(&self) -> u32 {
        self.height.load(Ordering::Acquire)
    }
}
