use std::sync::{Mutex, PoisonError};

/// Run-scoped sequence for evidence identifiers.
///
/// Identifiers start at 1 and are strictly increasing in claim order.
#[derive(Debug)]
pub struct EvidenceCounter {
    next: Mutex<u64>,
}

impl EvidenceCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: Mutex::new(1),
        }
    }

    /// Claim the next identifier.
    pub fn claim(&self) -> u64 {
        // A panic elsewhere cannot leave the integer half-updated.
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let id = *next;
        *next += 1;
        id
    }

    #[must_use]
    pub fn claimed(&self) -> u64 {
        *self.next.lock().unwrap_or_else(PoisonError::into_inner) - 1
    }
}

impl Default for EvidenceCounter {
    fn default() -> Self {
        Self::new()
    }
}
