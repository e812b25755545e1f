//! Which slot this play session last touched

use parking_lot::Mutex;

use super::validate_slot;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOperation {
    Save,
    Load,
}

/// In-memory record of the last slot operation, used by quick save-and-exit
#[derive(Debug, Default)]
pub struct SessionSlotTracker {
    last: Mutex<Option<(u8, SlotOperation)>>,
}

impl SessionSlotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_save(&self, slot_number: u8) -> Result<()> {
        self.record(slot_number, SlotOperation::Save)
    }

    pub fn record_load(&self, slot_number: u8) -> Result<()> {
        self.record(slot_number, SlotOperation::Load)
    }

    fn record(&self, slot_number: u8, op: SlotOperation) -> Result<()> {
        validate_slot(slot_number)?;
        *self.last.lock() = Some((slot_number, op));
        tracing::debug!("Session recorded {:?} on slot {}", op, slot_number);
        Ok(())
    }

    pub fn last_used_slot(&self) -> Option<u8> {
        self.last.lock().map(|(slot, _)| slot)
    }

    pub fn last_operation(&self) -> Option<SlotOperation> {
        self.last.lock().map(|(_, op)| op)
    }

    pub fn has_slot_context(&self) -> bool {
        self.last.lock().is_some()
    }

    pub fn clear(&self) {
        *self.last.lock() = None;
        tracing::debug!("Session slot tracking cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;

    #[test]
    fn test_starts_without_context() {
        let tracker = SessionSlotTracker::new();
        assert!(!tracker.has_slot_context());
        assert_eq!(tracker.last_used_slot(), None);
        assert_eq!(tracker.last_operation(), None);
    }

    #[test]
    fn test_latest_operation_wins() {
        let tracker = SessionSlotTracker::new();
        tracker.record_save(3).expect("valid slot");
        tracker.record_load(8).expect("valid slot");
        assert_eq!(tracker.last_used_slot(), Some(8));
        assert_eq!(tracker.last_operation(), Some(SlotOperation::Load));

        tracker.clear();
        assert!(!tracker.has_slot_context());
    }

    #[test]
    fn test_out_of_range_slot_rejected_and_state_kept() {
        let tracker = SessionSlotTracker::new();
        tracker.record_save(2).expect("valid slot");
        assert!(matches!(
            tracker.record_load(0),
            Err(MenuError::InvalidSlot(0))
        ));
        assert!(matches!(
            tracker.record_save(10),
            Err(MenuError::InvalidSlot(10))
        ));
        assert_eq!(tracker.last_used_slot(), Some(2));
        assert_eq!(tracker.last_operation(), Some(SlotOperation::Save));
    }
}
