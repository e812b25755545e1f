//! Save into a slot

use super::{name_or_default, Dialog, DialogResult, GridContext, SlotGridMenu, SlotGridVariant};
use crate::menu::{MenuRequest, MenuServices};
use crate::navigation::MenuType;
use crate::storage::SaveSlotData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveIntent {
    Overwrite(u8),
    Name(u8),
}

#[derive(Debug, Default)]
pub struct SaveGrid;

pub type SaveSlotsMenu = SlotGridMenu<SaveGrid>;

pub fn save_slots_menu(services: MenuServices) -> SaveSlotsMenu {
    SlotGridMenu::new(SaveGrid, services)
}

fn naming_dialog(slot_number: u8) -> Dialog<SaveIntent> {
    Dialog::naming(
        "Name this save",
        SaveSlotData::default_name(slot_number),
        SaveIntent::Name(slot_number),
    )
}

impl SlotGridVariant for SaveGrid {
    type Intent = SaveIntent;

    fn menu_type(&self) -> MenuType {
        MenuType::SaveSlots
    }

    fn on_slot(&mut self, slot: &SaveSlotData, ctx: &mut GridContext<'_, SaveIntent>) {
        if slot.is_empty {
            ctx.open(naming_dialog(slot.slot_number));
        } else {
            ctx.open(Dialog::confirm(
                format!("Overwrite '{}'?", slot.name),
                "Overwrite",
                "Cancel",
                SaveIntent::Overwrite(slot.slot_number),
            ));
        }
    }

    fn on_dialog(
        &mut self,
        intent: SaveIntent,
        result: DialogResult,
        ctx: &mut GridContext<'_, SaveIntent>,
    ) {
        match (intent, result) {
            (SaveIntent::Overwrite(n), DialogResult::Confirmed) => ctx.open(naming_dialog(n)),
            (SaveIntent::Name(n), DialogResult::Named(name)) => {
                let name = name_or_default(&name, n);
                if !ctx.services.save_to_slot(n, Some(&name)) {
                    ctx.toast("Save failed");
                    return;
                }
                if let Err(e) = ctx.services.session.record_save(n) {
                    tracing::warn!("Session tracking failed: {}", e);
                }
                ctx.toast(&format!("Saved to slot {n}"));
                ctx.request(MenuRequest::NavigateBack);
            }
            (intent, result) => tracing::debug!(?intent, ?result, "Save dialog closed"),
        }
    }
}
