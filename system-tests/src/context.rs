// system-tests/src/context.rs
// ============================================================================
// Module: Scenario Context
// Description: Scenario-scoped bookkeeping of created product IDs.
// Purpose: Track creates for logging without process-wide state.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! [`CreatedProducts`] is owned by one scenario and passed explicitly. The
//! service does not persist writes, so the list is informational only and
//! nothing is cleaned up remotely.

use tracing::debug;

/// IDs the service returned for creates in the current scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedProducts {
    /// Recorded IDs in creation order.
    ids: Vec<u64>,
}

impl CreatedProducts {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: Vec::new(),
        }
    }

    /// Records a created ID.
    pub fn record(&mut self, id: u64) {
        self.ids.push(id);
        debug!(id, total = self.ids.len(), "recorded created product");
    }

    /// Returns the recorded IDs in creation order.
    #[must_use]
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    /// Returns the number of recorded IDs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when nothing was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forgets every recorded ID.
    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            debug!(count = self.ids.len(), "clearing created products");
        }
        self.ids.clear();
    }
}
