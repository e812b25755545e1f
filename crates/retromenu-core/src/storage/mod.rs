//! Save-slot persistence
//!
//! Nine numbered slots, each holding an engine state blob, an optional
//! screenshot and a small metadata record. Menus only see
//! [`SaveStateStore`]; [`FileSaveStateStore`] is the on-disk version.

mod file_store;
mod session;

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};

use crate::engine::Screenshot;
use crate::error::{MenuError, Result};

pub use file_store::FileSaveStateStore;
pub use session::{SessionSlotTracker, SlotOperation};

/// Number of slots in the grid
pub const TOTAL_SLOTS: u8 = 9;

/// Reject slot numbers outside 1..=9
pub fn validate_slot(slot_number: u8) -> Result<u8> {
    if (1..=TOTAL_SLOTS).contains(&slot_number) {
        Ok(slot_number)
    } else {
        Err(MenuError::InvalidSlot(slot_number))
    }
}

/// What the menus know about a slot
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSlotData {
    pub slot_number: u8,
    pub name: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub rom_name: String,
    pub play_time_secs: u64,
    pub description: String,
    pub screenshot: Option<PathBuf>,
    pub is_empty: bool,
}

impl SaveSlotData {
    pub fn empty(slot_number: u8) -> Self {
        Self {
            slot_number,
            name: Self::default_name(slot_number),
            timestamp: None,
            rom_name: String::new(),
            play_time_secs: 0,
            description: String::new(),
            screenshot: None,
            is_empty: true,
        }
    }

    pub fn default_name(slot_number: u8) -> String {
        format!("Slot {slot_number}")
    }

    /// Label for the grid cell
    pub fn display_name(&self) -> &str {
        if self.is_empty {
            "Empty"
        } else {
            &self.name
        }
    }

    /// `dd/MM/yyyy HH:mm` in local time, blank without a timestamp
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp
            .map(|ts| ts.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Slot storage as the menus consume it.
///
/// Expected failures come back as `false`/`None`; implementations log them.
pub trait SaveStateStore: Send + Sync {
    fn get_slot(&self, slot_number: u8) -> SaveSlotData;

    fn get_all_slots(&self) -> Vec<SaveSlotData> {
        (1..=TOTAL_SLOTS).map(|n| self.get_slot(n)).collect()
    }

    /// Write state, screenshot and metadata; `name` defaults to "Slot N"
    fn save_to_slot(
        &self,
        slot_number: u8,
        state: &[u8],
        screenshot: Option<&Screenshot>,
        name: Option<&str>,
        rom_name: &str,
    ) -> bool;

    fn load_from_slot(&self, slot_number: u8) -> Option<Vec<u8>>;

    fn delete_slot(&self, slot_number: u8) -> bool;

    /// Replace the target with a copy of the source
    fn copy_slot(&self, source: u8, target: u8) -> bool;

    fn move_slot(&self, source: u8, target: u8) -> bool {
        self.copy_slot(source, target) && self.delete_slot(source)
    }

    fn rename_slot(&self, slot_number: u8, name: &str) -> bool;

    fn update_screenshot(&self, slot_number: u8, screenshot: &Screenshot) -> bool;

    fn has_any_save(&self) -> bool {
        self.get_all_slots().iter().any(|s| !s.is_empty)
    }

    fn first_empty_slot(&self) -> Option<u8> {
        self.get_all_slots()
            .into_iter()
            .find(|s| s.is_empty)
            .map(|s| s.slot_number)
    }
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_empty_slot_labels() {
        let slot = SaveSlotData::empty(4);
        assert_eq!(slot.name, "Slot 4");
        assert_eq!(slot.display_name(), "Empty");
        assert_eq!(slot.formatted_timestamp(), "");
    }

    #[test]
    fn test_formatted_timestamp_uses_day_first() {
        let local = Local
            .with_ymd_and_hms(2024, 3, 7, 9, 5, 0)
            .single()
            .expect("unambiguous time");
        let slot = SaveSlotData {
            timestamp: Some(local.with_timezone(&Utc)),
            is_empty: false,
            ..SaveSlotData::empty(1)
        };
        assert_eq!(slot.formatted_timestamp(), "07/03/2024 09:05");
        assert_eq!(slot.display_name(), "Slot 1");
    }

    #[test]
    fn test_validate_slot_range() {
        assert!(validate_slot(1).is_ok());
        assert!(validate_slot(9).is_ok());
        assert!(matches!(validate_slot(0), Err(MenuError::InvalidSlot(0))));
        assert!(matches!(validate_slot(10), Err(MenuError::InvalidSlot(10))));
    }

    #[test]
    fn test_default_helpers_on_trait() {
        let store = testing::MemoryStore::with_slots(&[(1, "a"), (3, "c")]);
        assert!(store.has_any_save());
        assert_eq!(store.first_empty_slot(), Some(2));
        assert_eq!(store.get_all_slots().len(), 9);

        assert!(store.move_slot(3, 5));
        assert!(store.get_slot(3).is_empty);
        assert_eq!(store.get_slot(5).slot_number, 5);
        assert_eq!(store.state_of(5), Some(vec![3]));
    }
}
