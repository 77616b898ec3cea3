//! Single in-flight import slot.
//!
//! # Invariants
//! - At most one `ImportClaim` holds a slot at a time.
//! - Dropping a claim frees its slot unless the store already settled it.
//! - A claim never frees a slot it does not hold.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const IDLE: u64 = 0;

/// Store-owned marker of the import currently in flight.
#[derive(Debug, Default)]
pub(crate) struct ImportSlot {
    active: Arc<AtomicU64>,
}

impl ImportSlot {
    pub(crate) fn is_busy(&self) -> bool {
        self.active.load(Ordering::Acquire) != IDLE
    }

    /// Claims the slot for `ticket`. Returns `None` while another claim holds it.
    pub(crate) fn try_claim(&self, ticket: u64) -> Option<ImportClaim> {
        debug_assert_ne!(ticket, IDLE);
        self.active
            .compare_exchange(IDLE, ticket, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ImportClaim {
                ticket,
                active: Arc::clone(&self.active),
            })
    }

    /// Frees the slot when `claim` belongs to it and still holds it.
    pub(crate) fn settle(&self, claim: &ImportClaim) -> bool {
        Arc::ptr_eq(&self.active, &claim.active) && claim.release()
    }
}

/// Guard for one in-flight import; frees its slot on drop.
#[derive(Debug)]
pub(crate) struct ImportClaim {
    ticket: u64,
    active: Arc<AtomicU64>,
}

impl ImportClaim {
    pub(crate) fn ticket(&self) -> u64 {
        self.ticket
    }

    fn release(&self) -> bool {
        self.active
            .compare_exchange(self.ticket, IDLE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Drop for ImportClaim {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::ImportSlot;

    #[test]
    fn claim_is_exclusive_and_freed_on_drop() {
        let slot = ImportSlot::default();
        let claim = slot.try_claim(1).expect("free slot");
        assert!(slot.is_busy());
        assert!(slot.try_claim(2).is_none());

        drop(claim);
        assert!(!slot.is_busy());
        assert!(slot.try_claim(3).is_some());
    }

    #[test]
    fn settled_claim_does_not_free_a_newer_one() {
        let slot = ImportSlot::default();
        let old = slot.try_claim(1).expect("free slot");
        assert!(slot.settle(&old));

        let _current = slot.try_claim(2).expect("free slot");
        drop(old);
        assert!(slot.is_busy());
    }

    #[test]
    fn claim_from_another_slot_is_not_settled() {
        let slot = ImportSlot::default();
        let other = ImportSlot::default();
        let foreign = other.try_claim(1).expect("free slot");

        assert!(!slot.settle(&foreign));
        assert!(other.is_busy());
    }
}
