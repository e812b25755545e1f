//! Save before exit; the Exit button unlocks once a save lands

use super::{name_or_default, Dialog, DialogResult, GridContext, SlotGridMenu, SlotGridVariant};
use crate::menu::{MenuRequest, MenuServices};
use crate::navigation::MenuType;
use crate::storage::SaveSlotData;

const EXIT_DISABLED_HINT: &str = "Save to a slot first to enable Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitSaveIntent {
    Overwrite(u8),
    Name(u8),
}

#[derive(Debug, Default)]
pub struct ExitSaveGrid {
    exit_enabled: bool,
}

pub type ExitSaveSlotsMenu = SlotGridMenu<ExitSaveGrid>;

pub fn exit_save_slots_menu(services: MenuServices) -> ExitSaveSlotsMenu {
    SlotGridMenu::new(ExitSaveGrid::default(), services)
}

impl ExitSaveGrid {
    pub fn is_exit_enabled(&self) -> bool {
        self.exit_enabled
    }

    fn save(&mut self, slot_number: u8, name: &str, ctx: &mut GridContext<'_, ExitSaveIntent>) {
        if !ctx.services.save_to_slot(slot_number, Some(name)) {
            ctx.toast("Save failed");
            return;
        }
        if let Err(e) = ctx.services.session.record_save(slot_number) {
            tracing::warn!("Session tracking failed: {}", e);
        }
        self.exit_enabled = true;
        tracing::info!("Saved to slot {} before exit, exit unlocked", slot_number);
        ctx.toast(&format!("Saved to slot {slot_number}"));
    }
}

impl SlotGridVariant for ExitSaveGrid {
    type Intent = ExitSaveIntent;

    fn menu_type(&self) -> MenuType {
        MenuType::ExitSaveSlots
    }

    fn back_label(&self) -> &'static str {
        "Exit"
    }

    fn back_enabled(&self) -> bool {
        self.exit_enabled
    }

    fn hint(&self) -> Option<String> {
        (!self.exit_enabled).then(|| EXIT_DISABLED_HINT.to_string())
    }

    fn on_slot(&mut self, slot: &SaveSlotData, ctx: &mut GridContext<'_, ExitSaveIntent>) {
        let n = slot.slot_number;
        if slot.is_empty {
            ctx.open(Dialog::naming(
                "Name this save",
                SaveSlotData::default_name(n),
                ExitSaveIntent::Name(n),
            ));
        } else {
            ctx.open(Dialog::confirm(
                format!("Overwrite '{}'?", slot.name),
                "Overwrite",
                "Cancel",
                ExitSaveIntent::Overwrite(n),
            ));
        }
    }

    fn on_back_button(&mut self, ctx: &mut GridContext<'_, ExitSaveIntent>) {
        if !self.exit_enabled {
            ctx.toast(EXIT_DISABLED_HINT);
            return;
        }
        tracing::info!("Exiting after save");
        ctx.request(MenuRequest::CloseMenu(None));
        ctx.services.host.exit_game();
    }

    fn on_dialog(
        &mut self,
        intent: ExitSaveIntent,
        result: DialogResult,
        ctx: &mut GridContext<'_, ExitSaveIntent>,
    ) {
        match (intent, result) {
            (ExitSaveIntent::Overwrite(n), DialogResult::Confirmed) => {
                self.save(n, &SaveSlotData::default_name(n), ctx)
            }
            (ExitSaveIntent::Name(n), DialogResult::Named(name)) => {
                self.save(n, &name_or_default(&name, n), ctx)
            }
            // Cancelling the keyboard still saves, under the default name
            (ExitSaveIntent::Name(n), DialogResult::Cancelled) => {
                self.save(n, &SaveSlotData::default_name(n), ctx)
            }
            (intent, result) => tracing::debug!(?intent, ?result, "Exit-save dialog closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::menu::host::testing::TestServices;
    use crate::menu::view::MenuView;
    use crate::menu::MenuFragment;
    use crate::storage::testing::MemoryStore;
    use crate::storage::SaveStateStore;

    #[test]
    fn test_exit_disabled_until_saved() {
        let t = TestServices::empty();
        let mut menu = exit_save_slots_menu(t.services.clone());
        menu.set_selected_index(9);
        menu.on_confirm();
        assert_eq!(t.host.toasts(), vec![EXIT_DISABLED_HINT.to_string()]);
        assert!(!t.host.exited.load(Ordering::SeqCst));
        assert!(!menu.get_menu_items()[9].is_enabled);
    }

    #[test]
    fn test_keyboard_cancel_saves_default_name_and_unlocks_exit() {
        let t = TestServices::empty();
        let mut menu = exit_save_slots_menu(t.services.clone());
        menu.set_selected_index(4);
        menu.on_confirm();
        for _ in 0..4 {
            menu.on_navigate_down();
        }
        menu.on_confirm();

        assert_eq!(t.store.get_slot(5).name, "Slot 5");
        assert!(menu.variant().is_exit_enabled());
        match menu.view() {
            MenuView::Grid(grid) => {
                assert!(grid.back_enabled);
                assert_eq!(grid.back_label, "Exit");
                assert!(grid.hint.is_none());
            }
            other => panic!("expected grid, got {other:?}"),
        }

        menu.set_selected_index(9);
        menu.on_confirm();
        assert!(t.host.exited.load(Ordering::SeqCst));
    }

    #[test]
    fn test_overwrite_saves_under_default_name() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "Mine")]));
        let mut menu = exit_save_slots_menu(t.services.clone());
        menu.on_confirm();
        menu.on_confirm();
        assert_eq!(t.store.get_slot(1).name, "Slot 1");
        assert_eq!(t.store.state_of(1), Some(b"live".to_vec()));
    }

    #[test]
    fn test_back_only_consumed_by_dialog() {
        let t = TestServices::empty();
        let mut menu = exit_save_slots_menu(t.services.clone());
        assert!(!menu.on_back());
        menu.on_confirm();
        assert!(menu.on_back());
        assert!(t.store.get_slot(1).is_empty);
    }
}
