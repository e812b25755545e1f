//! Load from a slot

use super::{Dialog, DialogResult, GridContext, SlotGridMenu, SlotGridVariant};
use crate::menu::{MenuRequest, MenuServices};
use crate::navigation::MenuType;
use crate::storage::SaveSlotData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIntent(pub u8);

#[derive(Debug, Default)]
pub struct LoadGrid;

pub type LoadSlotsMenu = SlotGridMenu<LoadGrid>;

pub fn load_slots_menu(services: MenuServices) -> LoadSlotsMenu {
    SlotGridMenu::new(LoadGrid, services)
}

impl LoadGrid {
    fn load(slot_number: u8, ctx: &mut GridContext<'_, LoadIntent>) {
        let services = ctx.services;
        let slot = services.store.get_slot(slot_number);
        let loaded = services
            .store
            .load_from_slot(slot_number)
            .map(|state| services.engine.unserialize_state(&state))
            .unwrap_or(false);

        if !loaded {
            tracing::warn!("Loading slot {} failed", slot_number);
            ctx.toast("Failed to load game state");
            return;
        }
        if let Err(e) = services.session.record_load(slot_number) {
            tracing::warn!("Session tracking failed: {}", e);
        }
        tracing::info!("Loaded slot {}", slot_number);
        ctx.toast(&format!("Game loaded from {}", slot.display_name()));
        ctx.request(MenuRequest::CloseMenu(None));
    }
}

impl SlotGridVariant for LoadGrid {
    type Intent = LoadIntent;

    fn menu_type(&self) -> MenuType {
        MenuType::LoadSlots
    }

    fn on_slot(&mut self, slot: &SaveSlotData, ctx: &mut GridContext<'_, LoadIntent>) {
        if slot.is_empty {
            ctx.toast("Cannot load from empty slot");
            return;
        }
        ctx.open(Dialog::confirm(
            format!(
                "Load game state from {}? Current progress will be lost.",
                slot.display_name()
            ),
            "Load",
            "Cancel",
            LoadIntent(slot.slot_number),
        ));
    }

    fn on_dialog(
        &mut self,
        intent: LoadIntent,
        result: DialogResult,
        ctx: &mut GridContext<'_, LoadIntent>,
    ) {
        if result == DialogResult::Confirmed {
            Self::load(intent.0, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::testing::{EngineCall, MemoryEngine};
    use crate::engine::Engine;
    use crate::menu::host::testing::TestServices;
    use crate::menu::MenuFragment;
    use crate::storage::testing::MemoryStore;
    use crate::storage::SaveStateStore;

    #[test]
    fn test_empty_slot_rejected_with_toast() {
        let t = TestServices::empty();
        let mut menu = load_slots_menu(t.services.clone());
        assert!(menu.on_confirm());
        assert!(menu.dialog().is_none());
        assert_eq!(t.host.toasts(), vec!["Cannot load from empty slot".to_string()]);
    }

    #[test]
    fn test_confirmed_load_restores_and_closes() {
        let t = TestServices::new(MemoryStore::with_slots(&[(4, "Cave")]));
        let mut menu = load_slots_menu(t.services.clone());
        menu.set_selected_index(3);
        menu.on_confirm();
        menu.on_confirm();

        assert!(t.engine.calls().contains(&EngineCall::Unserialize(vec![4])));
        assert_eq!(t.services.session.last_used_slot(), Some(4));
        assert_eq!(t.host.toasts(), vec!["Game loaded from Cave".to_string()]);
        assert_eq!(t.services.requests.drain(), vec![MenuRequest::CloseMenu(None)]);
    }

    #[test]
    fn test_rejected_state_toasts_and_keeps_menu() {
        let mut t = TestServices::new(MemoryStore::with_slots(&[(1, "Bad")]));
        let engine: Arc<dyn Engine> = Arc::new(MemoryEngine {
            reject_loads: true,
            ..MemoryEngine::default()
        });
        t.services.engine = engine;
        let mut menu = load_slots_menu(t.services.clone());
        menu.on_confirm();
        menu.on_confirm();

        assert_eq!(t.host.toasts(), vec!["Failed to load game state".to_string()]);
        assert!(t.services.requests.is_empty());
        assert!(!t.services.session.has_slot_context());
    }
}
