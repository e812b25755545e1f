//! Directory-per-slot store
//!
//! ```text
//! <root>/saves/slot_N/state.bin
//!                    /screenshot.png
//!                    /metadata.json
//! ```
//!
//! A slot exists exactly when its `state.bin` does. Metadata is best effort:
//! a missing or corrupt file falls back to the default name and no timestamp.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_slot, SaveSlotData, SaveStateStore};
use crate::engine::Screenshot;
use crate::error::{MenuError, Result};

const STATE_FILE: &str = "state.bin";
const SCREENSHOT_FILE: &str = "screenshot.png";
const METADATA_FILE: &str = "metadata.json";
const LEGACY_STATE_FILE: &str = "state";
const LEGACY_NAME: &str = "Slot 1 (Legacy)";
const LEGACY_DESCRIPTION: &str = "Migrated from single-slot save system";

/// On-disk metadata record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotMetadata {
    name: String,
    /// RFC 3339
    timestamp: String,
    slot_number: u8,
    #[serde(default)]
    rom_name: String,
    #[serde(default)]
    play_time: u64,
    #[serde(default)]
    description: String,
}

impl SlotMetadata {
    fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
    }
}

/// File-backed [`SaveStateStore`]
#[derive(Debug, Clone)]
pub struct FileSaveStateStore {
    root: PathBuf,
}

impl FileSaveStateStore {
    /// Open the store under `root`, migrating a legacy single-slot save
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { root: root.into() };
        fs::create_dir_all(store.saves_dir())?;
        store.migrate_legacy_save()?;
        Ok(store)
    }

    pub fn saves_dir(&self) -> PathBuf {
        self.root.join("saves")
    }

    fn slot_dir(&self, slot_number: u8) -> PathBuf {
        self.saves_dir().join(format!("slot_{slot_number}"))
    }

    fn state_path(&self, slot_number: u8) -> PathBuf {
        self.slot_dir(slot_number).join(STATE_FILE)
    }

    fn metadata_path(&self, slot_number: u8) -> PathBuf {
        self.slot_dir(slot_number).join(METADATA_FILE)
    }

    fn screenshot_path(&self, slot_number: u8) -> PathBuf {
        self.slot_dir(slot_number).join(SCREENSHOT_FILE)
    }

    fn read_metadata(&self, slot_number: u8) -> Option<SlotMetadata> {
        let path = self.metadata_path(slot_number);
        let text = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&text) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!("Corrupt slot metadata at {:?}: {}", path, e);
                None
            }
        }
    }

    fn write_metadata(&self, slot_number: u8, meta: &SlotMetadata) -> Result<()> {
        let contents = serde_json::to_string_pretty(meta)?;
        fs::write(self.metadata_path(slot_number), contents)?;
        Ok(())
    }

    fn try_save(
        &self,
        slot_number: u8,
        state: &[u8],
        screenshot: Option<&Screenshot>,
        name: Option<&str>,
        rom_name: &str,
    ) -> Result<()> {
        validate_slot(slot_number)?;
        let dir = self.slot_dir(slot_number);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(STATE_FILE), state)?;

        if let Some(shot) = screenshot {
            // A slot without a thumbnail is still a good save
            if let Err(e) = shot.write_png(&dir.join(SCREENSHOT_FILE)) {
                tracing::warn!("Screenshot for slot {} not written: {}", slot_number, e);
            }
        }

        let meta = SlotMetadata {
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| SaveSlotData::default_name(slot_number)),
            timestamp: Utc::now().to_rfc3339(),
            slot_number,
            rom_name: rom_name.to_string(),
            play_time: 0,
            description: String::new(),
        };
        self.write_metadata(slot_number, &meta)
    }

    fn try_copy(&self, source: u8, target: u8) -> Result<bool> {
        validate_slot(source)?;
        validate_slot(target)?;
        if source == target {
            return Err(MenuError::SameSlot(source));
        }
        if !self.state_path(source).exists() {
            return Ok(false);
        }

        let target_dir = self.slot_dir(target);
        if target_dir.exists() {
            fs::remove_dir_all(&target_dir)?;
        }
        fs::create_dir_all(&target_dir)?;

        for file in [STATE_FILE, SCREENSHOT_FILE, METADATA_FILE] {
            let from = self.slot_dir(source).join(file);
            if from.exists() {
                fs::copy(&from, target_dir.join(file))?;
            }
        }

        if let Some(mut meta) = self.read_metadata(target) {
            meta.slot_number = target;
            self.write_metadata(target, &meta)?;
        }
        Ok(true)
    }

    fn try_rename(&self, slot_number: u8, name: &str) -> Result<bool> {
        validate_slot(slot_number)?;
        let Some(mut meta) = self.read_metadata(slot_number) else {
            return Ok(false);
        };
        meta.name = name.to_string();
        self.write_metadata(slot_number, &meta)?;
        Ok(true)
    }

    /// Move `<root>/state` into slot 1 unless slot 1 is taken
    fn migrate_legacy_save(&self) -> Result<()> {
        let legacy = self.root.join(LEGACY_STATE_FILE);
        let Ok(bytes) = fs::read(&legacy) else {
            return Ok(());
        };
        if bytes.is_empty() || self.state_path(1).exists() {
            return Ok(());
        }

        tracing::info!("Migrating legacy save {:?} into slot 1", legacy);
        let dir = self.slot_dir(1);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(STATE_FILE), &bytes)?;
        let meta = SlotMetadata {
            name: LEGACY_NAME.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            slot_number: 1,
            rom_name: String::new(),
            play_time: 0,
            description: LEGACY_DESCRIPTION.to_string(),
        };
        self.write_metadata(1, &meta)?;
        fs::remove_file(&legacy)?;
        Ok(())
    }

    /// Log and flatten an operation result into the trait's bool
    fn report(op: &str, result: Result<bool>) -> bool {
        match result {
            Ok(done) => done,
            Err(e) => {
                tracing::warn!("Slot {} failed: {}", op, e);
                false
            }
        }
    }
}

impl SaveStateStore for FileSaveStateStore {
    fn get_slot(&self, slot_number: u8) -> SaveSlotData {
        if validate_slot(slot_number).is_err() || !self.state_path(slot_number).exists() {
            return SaveSlotData::empty(slot_number);
        }

        let meta = self.read_metadata(slot_number);
        let screenshot = Some(self.screenshot_path(slot_number)).filter(|p| p.exists());
        SaveSlotData {
            slot_number,
            name: meta
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_else(|| SaveSlotData::default_name(slot_number)),
            timestamp: meta.as_ref().and_then(SlotMetadata::parsed_timestamp),
            rom_name: meta.as_ref().map(|m| m.rom_name.clone()).unwrap_or_default(),
            play_time_secs: meta.as_ref().map(|m| m.play_time).unwrap_or(0),
            description: meta.map(|m| m.description).unwrap_or_default(),
            screenshot,
            is_empty: false,
        }
    }

    fn save_to_slot(
        &self,
        slot_number: u8,
        state: &[u8],
        screenshot: Option<&Screenshot>,
        name: Option<&str>,
        rom_name: &str,
    ) -> bool {
        let result = self.try_save(slot_number, state, screenshot, name, rom_name);
        if result.is_ok() {
            tracing::info!("Saved {} bytes to slot {}", state.len(), slot_number);
        }
        Self::report("save", result.map(|_| true))
    }

    fn load_from_slot(&self, slot_number: u8) -> Option<Vec<u8>> {
        validate_slot(slot_number).ok()?;
        let path = self.state_path(slot_number);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Reading {:?} failed: {}", path, e);
                None
            }
        }
    }

    fn delete_slot(&self, slot_number: u8) -> bool {
        let result = validate_slot(slot_number).and_then(|n| {
            let dir = self.slot_dir(n);
            if dir.exists() {
                fs::remove_dir_all(&dir)?;
            }
            Ok(true)
        });
        Self::report("delete", result)
    }

    fn copy_slot(&self, source: u8, target: u8) -> bool {
        Self::report("copy", self.try_copy(source, target))
    }

    fn rename_slot(&self, slot_number: u8, name: &str) -> bool {
        Self::report("rename", self.try_rename(slot_number, name))
    }

    fn update_screenshot(&self, slot_number: u8, screenshot: &Screenshot) -> bool {
        let result = validate_slot(slot_number).and_then(|n| {
            if !self.state_path(n).exists() {
                return Err(MenuError::EmptySlot(n));
            }
            screenshot.write_png(&self.screenshot_path(n))?;
            Ok(true)
        });
        Self::report("screenshot update", result)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store() -> (FileSaveStateStore, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let store = FileSaveStateStore::open(dir.path()).expect("open store");
        (store, dir)
    }

    fn shot() -> Screenshot {
        Screenshot::new(1, 1, vec![10, 20, 30, 255])
    }

    #[test]
    fn test_save_then_read_back() {
        let (store, _dir) = store();
        assert!(store.get_slot(2).is_empty);

        assert!(store.save_to_slot(2, b"blob", Some(&shot()), Some("Boss"), "mario.sfc"));
        let slot = store.get_slot(2);
        assert!(!slot.is_empty);
        assert_eq!(slot.name, "Boss");
        assert_eq!(slot.rom_name, "mario.sfc");
        assert!(slot.timestamp.is_some());
        assert!(slot.screenshot.is_some());
        assert_eq!(store.load_from_slot(2), Some(b"blob".to_vec()));
    }

    #[test]
    fn test_metadata_is_camel_case_json() {
        let (store, dir) = store();
        assert!(store.save_to_slot(5, b"x", None, None, "rom"));

        let raw = fs::read_to_string(dir.path().join("saves/slot_5/metadata.json"))
            .expect("metadata written");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(json["slotNumber"], 5);
        assert_eq!(json["romName"], "rom");
        assert_eq!(json["name"], "Slot 5");
        assert_eq!(json["playTime"], 0);
    }

    #[test]
    fn test_missing_metadata_falls_back_to_defaults() {
        let (store, dir) = store();
        let slot_dir = dir.path().join("saves/slot_3");
        fs::create_dir_all(&slot_dir).expect("mkdir");
        fs::write(slot_dir.join("state.bin"), b"s").expect("write state");

        let slot = store.get_slot(3);
        assert!(!slot.is_empty);
        assert_eq!(slot.name, "Slot 3");
        assert!(slot.timestamp.is_none());
        assert!(!store.rename_slot(3, "new"));
    }

    #[test]
    fn test_copy_rewrites_slot_number_and_replaces_target() {
        let (store, _dir) = store();
        assert!(store.save_to_slot(1, b"one", Some(&shot()), Some("First"), "rom"));
        assert!(store.save_to_slot(4, b"four", None, Some("Old"), "rom"));

        assert!(store.copy_slot(1, 4));
        let copied = store.get_slot(4);
        assert_eq!(copied.name, "First");
        assert_eq!(copied.slot_number, 4);
        assert!(copied.screenshot.is_some());
        assert_eq!(store.load_from_slot(4), Some(b"one".to_vec()));
        assert!(!store.get_slot(1).is_empty);
    }

    #[test]
    fn test_copy_rejects_bad_arguments() {
        let (store, _dir) = store();
        assert!(!store.copy_slot(1, 2), "empty source");
        assert!(store.save_to_slot(1, b"x", None, None, "rom"));
        assert!(!store.copy_slot(1, 1));
        assert!(!store.copy_slot(1, 10));
    }

    #[test]
    fn test_move_then_delete_and_rename() {
        let (store, _dir) = store();
        assert!(store.save_to_slot(7, b"seven", None, None, "rom"));

        assert!(store.move_slot(7, 9));
        assert!(store.get_slot(7).is_empty);
        assert_eq!(store.load_from_slot(9), Some(b"seven".to_vec()));

        assert!(store.rename_slot(9, "Renamed"));
        assert_eq!(store.get_slot(9).display_name(), "Renamed");

        assert!(store.delete_slot(9));
        assert!(store.get_slot(9).is_empty);
        assert!(store.load_from_slot(9).is_none());
        assert!(!store.has_any_save());
    }

    #[test]
    fn test_first_empty_slot_and_all_slots() {
        let (store, _dir) = store();
        assert_eq!(store.first_empty_slot(), Some(1));
        assert!(store.save_to_slot(1, b"a", None, None, "rom"));
        assert!(store.save_to_slot(2, b"b", None, None, "rom"));
        assert_eq!(store.first_empty_slot(), Some(3));

        let all = store.get_all_slots();
        assert_eq!(all.len(), 9);
        assert_eq!(all.iter().filter(|s| !s.is_empty).count(), 2);
    }

    #[test]
    fn test_update_screenshot_requires_occupied_slot() {
        let (store, _dir) = store();
        assert!(!store.update_screenshot(6, &shot()));
        assert!(store.save_to_slot(6, b"s", None, None, "rom"));
        assert!(store.get_slot(6).screenshot.is_none());
        assert!(store.update_screenshot(6, &shot()));
        assert!(store.get_slot(6).screenshot.is_some());
    }

    #[test]
    fn test_legacy_state_migrates_into_slot_one() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("state"), b"legacy").expect("write legacy");

        let store = FileSaveStateStore::open(dir.path()).expect("open store");
        let slot = store.get_slot(1);
        assert_eq!(slot.name, "Slot 1 (Legacy)");
        assert_eq!(slot.description, "Migrated from single-slot save system");
        assert_eq!(store.load_from_slot(1), Some(b"legacy".to_vec()));
        assert!(!dir.path().join("state").exists());
    }

    #[test]
    fn test_legacy_state_left_alone_when_slot_one_taken() {
        let dir = TempDir::new().expect("tempdir");
        {
            let store = FileSaveStateStore::open(dir.path()).expect("open store");
            assert!(store.save_to_slot(1, b"new", None, Some("Mine"), "rom"));
        }
        fs::write(dir.path().join("state"), b"legacy").expect("write legacy");

        let store = FileSaveStateStore::open(dir.path()).expect("reopen store");
        assert_eq!(store.get_slot(1).name, "Mine");
        assert!(dir.path().join("state").exists());
    }
}
