//! Move, copy, delete and rename saves

use super::{name_or_default, Dialog, DialogResult, GridContext, SlotGridMenu, SlotGridVariant};
use crate::menu::{MenuRequest, MenuServices};
use crate::navigation::MenuType;
use crate::storage::SaveSlotData;

const OPERATIONS: [&str; 5] = ["Move", "Copy", "Delete", "Rename", "Cancel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Move,
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageIntent {
    Operations(u8),
    Delete(u8),
    Rename(u8),
    Overwrite {
        transfer: Transfer,
        source: u8,
        target: u8,
    },
}

/// Source waiting for a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransfer {
    pub transfer: Transfer,
    pub source: u8,
}

#[derive(Debug, Default)]
pub struct ManageGrid {
    pending: Option<PendingTransfer>,
}

pub type ManageSavesMenu = SlotGridMenu<ManageGrid>;

pub fn manage_saves_menu(services: MenuServices) -> ManageSavesMenu {
    SlotGridMenu::new(ManageGrid::default(), services)
}

impl ManageGrid {
    pub fn pending(&self) -> Option<PendingTransfer> {
        self.pending
    }

    fn cancel_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            tracing::debug!(?p, "Pending transfer cancelled");
        }
    }

    fn on_destination(
        &mut self,
        pending: PendingTransfer,
        target: &SaveSlotData,
        ctx: &mut GridContext<'_, ManageIntent>,
    ) {
        if target.slot_number == pending.source {
            ctx.toast("Choose a different slot");
            return;
        }
        if target.is_empty {
            self.transfer(pending.transfer, pending.source, target.slot_number, ctx);
        } else {
            ctx.open(Dialog::confirm(
                format!("Overwrite '{}'?", target.name),
                "Overwrite",
                "Cancel",
                ManageIntent::Overwrite {
                    transfer: pending.transfer,
                    source: pending.source,
                    target: target.slot_number,
                },
            ));
        }
    }

    fn transfer(
        &mut self,
        transfer: Transfer,
        source: u8,
        target: u8,
        ctx: &mut GridContext<'_, ManageIntent>,
    ) {
        let store = &ctx.services.store;
        let ok = match transfer {
            Transfer::Move => store.move_slot(source, target),
            Transfer::Copy => store.copy_slot(source, target),
        };
        tracing::info!(?transfer, source, target, ok, "Slot transfer");
        if ok {
            ctx.toast(&format!("{transfer:?} to slot {target} done"));
        } else {
            ctx.toast(&format!("{transfer:?} failed"));
        }
        self.pending = None;
    }
}

impl SlotGridVariant for ManageGrid {
    type Intent = ManageIntent;

    fn menu_type(&self) -> MenuType {
        MenuType::ManageSaves
    }

    fn title(&self) -> String {
        match self.pending {
            Some(_) => "Select Destination".to_string(),
            None => MenuType::ManageSaves.title().to_string(),
        }
    }

    fn hint(&self) -> Option<String> {
        self.pending.map(|p| {
            format!(
                "{:?} slot {}: pick a destination, Back to cancel",
                p.transfer, p.source
            )
        })
    }

    fn marked_slot(&self) -> Option<u8> {
        self.pending.map(|p| p.source)
    }

    fn on_slot(&mut self, slot: &SaveSlotData, ctx: &mut GridContext<'_, ManageIntent>) {
        if let Some(pending) = self.pending {
            self.on_destination(pending, slot, ctx);
            return;
        }
        if slot.is_empty {
            return;
        }
        ctx.open(Dialog::picker(
            slot.name.clone(),
            &OPERATIONS,
            ManageIntent::Operations(slot.slot_number),
        ));
    }

    fn on_back_button(&mut self, ctx: &mut GridContext<'_, ManageIntent>) {
        if self.pending.is_some() {
            self.cancel_pending();
        } else {
            ctx.request(MenuRequest::NavigateBack);
        }
    }

    fn on_dialog(
        &mut self,
        intent: ManageIntent,
        result: DialogResult,
        ctx: &mut GridContext<'_, ManageIntent>,
    ) {
        match (intent, result) {
            (ManageIntent::Operations(n), DialogResult::Picked(choice)) => match choice {
                0 | 1 => {
                    let transfer = if choice == 0 {
                        Transfer::Move
                    } else {
                        Transfer::Copy
                    };
                    self.pending = Some(PendingTransfer {
                        transfer,
                        source: n,
                    });
                }
                2 => {
                    let name = ctx.services.store.get_slot(n).name;
                    ctx.open(Dialog::confirm(
                        format!("Delete '{name}'?"),
                        "Delete",
                        "Cancel",
                        ManageIntent::Delete(n),
                    ));
                }
                3 => {
                    let name = ctx.services.store.get_slot(n).name;
                    ctx.open(Dialog::naming("Rename save", name, ManageIntent::Rename(n)));
                }
                _ => {}
            },
            (ManageIntent::Delete(n), DialogResult::Confirmed) => {
                if ctx.services.store.delete_slot(n) {
                    ctx.toast(&format!("Slot {n} deleted"));
                } else {
                    ctx.toast("Delete failed");
                }
            }
            (ManageIntent::Rename(n), DialogResult::Named(name)) => {
                let name = name_or_default(&name, n);
                if ctx.services.store.rename_slot(n, &name) {
                    ctx.toast(&format!("Renamed to {name}"));
                } else {
                    ctx.toast("Rename failed");
                }
            }
            (
                ManageIntent::Overwrite {
                    transfer,
                    source,
                    target,
                },
                DialogResult::Confirmed,
            ) => self.transfer(transfer, source, target, ctx),
            (ManageIntent::Overwrite { .. }, _) => self.cancel_pending(),
            (intent, result) => tracing::debug!(?intent, ?result, "Manage dialog closed"),
        }
    }

    fn on_back(&mut self, _ctx: &mut GridContext<'_, ManageIntent>) -> bool {
        if self.pending.is_some() {
            self.cancel_pending();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::host::testing::TestServices;
    use crate::menu::MenuFragment;
    use crate::storage::testing::MemoryStore;
    use crate::storage::SaveStateStore;

    fn pick(menu: &mut ManageSavesMenu, choice: usize) {
        menu.on_confirm();
        for _ in 0..choice {
            menu.on_navigate_down();
        }
        menu.on_confirm();
    }

    #[test]
    fn test_empty_slot_does_nothing() {
        let t = TestServices::empty();
        let mut menu = manage_saves_menu(t.services.clone());
        assert!(menu.on_confirm());
        assert!(menu.dialog().is_none());
    }

    #[test]
    fn test_move_to_empty_slot() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 0);
        assert_eq!(menu.variant().marked_slot(), Some(1));
        assert_eq!(menu.variant().title(), "Select Destination");

        menu.on_navigate_right();
        menu.on_confirm();
        assert!(t.store.get_slot(1).is_empty);
        assert_eq!(t.store.get_slot(2).name, "A");
        assert!(menu.variant().pending().is_none());
    }

    #[test]
    fn test_same_slot_destination_rejected() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 1);
        menu.on_confirm();
        assert_eq!(t.host.toasts(), vec!["Choose a different slot".to_string()]);
        assert!(menu.variant().pending().is_some());
    }

    #[test]
    fn test_copy_onto_occupied_asks_first() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A"), (2, "B")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 1);
        menu.on_navigate_right();
        menu.on_confirm();
        assert!(menu.dialog().is_some());

        menu.on_confirm();
        assert_eq!(t.store.get_slot(2).name, "A");
        assert!(!t.store.get_slot(1).is_empty);
    }

    #[test]
    fn test_declined_overwrite_cancels_pending() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A"), (2, "B")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 0);
        menu.on_navigate_right();
        menu.on_confirm();
        menu.on_navigate_down();
        menu.on_confirm();
        assert_eq!(t.store.get_slot(2).name, "B");
        assert!(menu.variant().pending().is_none());
    }

    #[test]
    fn test_back_cancels_pending_before_leaving() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 0);
        assert!(menu.on_back());
        assert!(menu.variant().pending().is_none());
        assert!(!menu.on_back());
    }

    #[test]
    fn test_delete_after_confirm() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 2);
        menu.on_confirm();
        assert!(t.store.get_slot(1).is_empty);
        assert_eq!(t.host.toasts(), vec!["Slot 1 deleted".to_string()]);
    }

    #[test]
    fn test_rename_prefills_current_name() {
        let t = TestServices::new(MemoryStore::with_slots(&[(1, "A")]));
        let mut menu = manage_saves_menu(t.services.clone());
        pick(&mut menu, 3);
        // 'Q' then OK
        menu.on_navigate_down();
        menu.on_confirm();
        for _ in 0..3 {
            menu.on_navigate_down();
        }
        menu.on_navigate_right();
        menu.on_navigate_right();
        menu.on_confirm();
        assert_eq!(t.store.get_slot(1).name, "AQ");
    }
}
