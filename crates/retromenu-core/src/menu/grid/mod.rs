//! Save-slot grid screens
//!
//! A 3x3 slot grid with a back button underneath. Movement is bounded (no
//! wraparound). Confirm on a slot hands the slot to the screen variant, which
//! may open one modal [`Dialog`]; the dialog then takes every navigation until
//! it is answered or dismissed.

pub mod dialog;
pub mod exit_save;
pub mod keyboard;
pub mod load;
pub mod manage;
pub mod save;

use std::fmt::Debug;

use super::view::{GridView, SlotView};
use super::{MenuAction, MenuFragment, MenuItem, MenuRequest, MenuServices, MenuView};
use crate::navigation::{Direction, MenuType};
use crate::storage::{SaveSlotData, TOTAL_SLOTS};

pub use dialog::{Dialog, DialogKind, DialogResult};
pub use keyboard::RetroKeyboard;

pub const GRID_ROWS: usize = 3;
pub const GRID_COLS: usize = 3;
/// Index reported while the back button is selected
pub const BACK_INDEX: usize = GRID_ROWS * GRID_COLS;

/// Bounded cursor over the grid and its back button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    row: usize,
    col: usize,
    back_selected: bool,
}

impl GridCursor {
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_back_selected(&self) -> bool {
        self.back_selected
    }

    pub fn move_up(&mut self) {
        if self.back_selected {
            self.back_selected = false;
            self.row = GRID_ROWS - 1;
        } else if self.row > 0 {
            self.row -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.back_selected {
            return;
        }
        if self.row < GRID_ROWS - 1 {
            self.row += 1;
        } else {
            self.back_selected = true;
        }
    }

    pub fn move_left(&mut self) {
        if !self.back_selected && self.col > 0 {
            self.col -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if !self.back_selected && self.col < GRID_COLS - 1 {
            self.col += 1;
        }
    }

    /// `row * 3 + col`, or [`BACK_INDEX`]
    pub fn index(&self) -> usize {
        if self.back_selected {
            BACK_INDEX
        } else {
            self.row * GRID_COLS + self.col
        }
    }

    pub fn set_index(&mut self, index: usize) {
        if index >= BACK_INDEX {
            self.back_selected = true;
        } else {
            self.back_selected = false;
            self.row = index / GRID_COLS;
            self.col = index % GRID_COLS;
        }
    }

    /// 1-based slot under the cursor
    pub fn slot_number(&self) -> Option<u8> {
        if self.back_selected {
            None
        } else {
            Some((self.index() + 1) as u8)
        }
    }
}

/// What a variant may do while handling a grid event
pub struct GridContext<'a, I> {
    pub services: &'a MenuServices,
    dialog: &'a mut Option<Dialog<I>>,
}

impl<'a, I> GridContext<'a, I> {
    pub fn open(&mut self, dialog: Dialog<I>) {
        *self.dialog = Some(dialog);
    }

    pub fn toast(&self, message: &str) {
        self.services.host.show_toast(message);
    }

    pub fn request(&self, request: MenuRequest) {
        self.services.requests.push(request);
    }
}

/// Per-screen behaviour plugged into [`SlotGridMenu`]
pub trait SlotGridVariant: Send {
    /// What an open dialog is asking about
    type Intent: Clone + Debug + Send;

    fn menu_type(&self) -> MenuType;

    fn title(&self) -> String {
        self.menu_type().title().to_string()
    }

    fn back_label(&self) -> &'static str {
        "Back"
    }

    fn back_enabled(&self) -> bool {
        true
    }

    fn hint(&self) -> Option<String> {
        None
    }

    /// Slot drawn as the source of a pending operation
    fn marked_slot(&self) -> Option<u8> {
        None
    }

    fn on_slot(&mut self, slot: &SaveSlotData, ctx: &mut GridContext<'_, Self::Intent>);

    fn on_back_button(&mut self, ctx: &mut GridContext<'_, Self::Intent>) {
        ctx.request(MenuRequest::NavigateBack);
    }

    fn on_dialog(
        &mut self,
        intent: Self::Intent,
        result: DialogResult,
        ctx: &mut GridContext<'_, Self::Intent>,
    );

    /// Back with no dialog open; true when consumed
    fn on_back(&mut self, _ctx: &mut GridContext<'_, Self::Intent>) -> bool {
        false
    }
}

/// Grid fragment shared by the save, load, manage and exit-save screens
pub struct SlotGridMenu<V: SlotGridVariant> {
    variant: V,
    services: MenuServices,
    cursor: GridCursor,
    dialog: Option<Dialog<V::Intent>>,
    attached: bool,
}

impl<V: SlotGridVariant> SlotGridMenu<V> {
    pub fn new(variant: V, services: MenuServices) -> Self {
        Self {
            variant,
            services,
            cursor: GridCursor::default(),
            dialog: None,
            attached: true,
        }
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn cursor(&self) -> GridCursor {
        self.cursor
    }

    pub fn dialog(&self) -> Option<&Dialog<V::Intent>> {
        self.dialog.as_ref()
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.navigate(direction);
            return true;
        }
        match direction {
            Direction::Up => self.cursor.move_up(),
            Direction::Down => self.cursor.move_down(),
            Direction::Left => self.cursor.move_left(),
            Direction::Right => self.cursor.move_right(),
        }
        true
    }
}

impl<V: SlotGridVariant> MenuFragment for SlotGridMenu<V> {
    fn menu_type(&self) -> MenuType {
        self.variant.menu_type()
    }

    fn get_menu_items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self
            .services
            .store
            .get_all_slots()
            .into_iter()
            .map(|slot| {
                MenuItem::new(
                    format!("slot_{}", slot.slot_number),
                    slot.display_name().to_string(),
                    MenuAction::None,
                )
            })
            .collect();
        items.push(
            MenuItem::new("back", self.variant.back_label(), MenuAction::Back)
                .enabled(self.variant.back_enabled()),
        );
        items
    }

    fn on_navigate_up(&mut self) -> bool {
        self.navigate(Direction::Up)
    }

    fn on_navigate_down(&mut self) -> bool {
        self.navigate(Direction::Down)
    }

    fn on_navigate_left(&mut self) -> bool {
        self.navigate(Direction::Left)
    }

    fn on_navigate_right(&mut self) -> bool {
        self.navigate(Direction::Right)
    }

    fn on_confirm(&mut self) -> bool {
        if let Some(dialog) = self.dialog.as_mut() {
            let Some(result) = dialog.confirm_selection() else {
                return true;
            };
            if let Some(dialog) = self.dialog.take() {
                tracing::debug!(intent = ?dialog.intent, ?result, "Dialog answered");
                let mut ctx = GridContext {
                    services: &self.services,
                    dialog: &mut self.dialog,
                };
                self.variant.on_dialog(dialog.intent, result, &mut ctx);
            }
            return true;
        }

        let mut ctx = GridContext {
            services: &self.services,
            dialog: &mut self.dialog,
        };
        match self.cursor.slot_number() {
            None => self.variant.on_back_button(&mut ctx),
            Some(n) => {
                let slot = self.services.store.get_slot(n);
                tracing::debug!(menu = %self.variant.menu_type(), slot = n, empty = slot.is_empty, "Slot confirmed");
                self.variant.on_slot(&slot, &mut ctx);
            }
        }
        true
    }

    fn on_back(&mut self) -> bool {
        if let Some(dialog) = self.dialog.take() {
            tracing::debug!(intent = ?dialog.intent, "Dialog dismissed");
            return true;
        }
        let mut ctx = GridContext {
            services: &self.services,
            dialog: &mut self.dialog,
        };
        self.variant.on_back(&mut ctx)
    }

    fn current_selected_index(&self) -> usize {
        self.cursor.index()
    }

    fn set_selected_index(&mut self, index: usize) {
        self.cursor.set_index(index);
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn item_count(&self) -> usize {
        TOTAL_SLOTS as usize + 1
    }

    fn view(&self) -> MenuView {
        let marked = self.variant.marked_slot();
        let slots = self
            .services
            .store
            .get_all_slots()
            .into_iter()
            .map(|slot| SlotView {
                slot_number: slot.slot_number,
                label: slot.display_name().to_string(),
                timestamp: Some(slot.formatted_timestamp()).filter(|t| !t.is_empty()),
                is_empty: slot.is_empty,
                is_marked: marked == Some(slot.slot_number),
            })
            .collect();
        MenuView::Grid(GridView {
            menu_type: self.variant.menu_type(),
            title: self.variant.title(),
            slots,
            selected: self.cursor.index(),
            back_label: self.variant.back_label().to_string(),
            back_enabled: self.variant.back_enabled(),
            hint: self.variant.hint(),
            dialog: self.dialog.as_ref().map(Dialog::view),
        })
    }
}

/// Name typed into a naming dialog, or "Slot N" when left blank
pub fn name_or_default(name: &str, slot_number: u8) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        SaveSlotData::default_name(slot_number)
    } else {
        trimmed.to_string()
    }
}
