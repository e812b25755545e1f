//! Navigation history stack and its bundle encoding

use super::bundle::Bundle;
use super::event::{MenuState, MenuType};

const MENU_PREFIX: &str = "menu_";
const STACK_PREFIX: &str = "stack_";

impl MenuState {
    /// Encode as `{prefix}type` / `{prefix}index`
    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        self.write_into(&mut bundle, MENU_PREFIX);
        bundle
    }

    /// Decode; unknown or missing type names yield `None`
    pub fn from_bundle(bundle: &Bundle) -> Option<MenuState> {
        Self::read_from(bundle, MENU_PREFIX)
    }

    fn write_into(&self, bundle: &mut Bundle, prefix: &str) {
        bundle.put_string(format!("{prefix}type"), self.menu_type.as_str());
        bundle.put_int(format!("{prefix}index"), self.selected_index as i64);
    }

    fn read_from(bundle: &Bundle, prefix: &str) -> Option<MenuState> {
        let type_name = bundle.get_string(&format!("{prefix}type"))?;
        let index = bundle.get_int(&format!("{prefix}index"), 0).max(0) as usize;
        match type_name.parse::<MenuType>() {
            Ok(menu_type) => Some(MenuState::new(menu_type, index)),
            Err(e) => {
                tracing::warn!("Invalid menu type in bundle: {}", e);
                None
            }
        }
    }
}

/// LIFO of previously visited menus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<MenuState>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: MenuState) {
        self.entries.push(state);
    }

    pub fn pop(&mut self) -> Option<MenuState> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&MenuState> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Bottom-to-top view
    pub fn iter(&self) -> impl Iterator<Item = &MenuState> {
        self.entries.iter()
    }

    /// Flattened as `stack_size` plus `stack_{i}_type` / `stack_{i}_index`
    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_int(format!("{STACK_PREFIX}size"), self.entries.len() as i64);
        for (i, state) in self.entries.iter().enumerate() {
            state.write_into(&mut bundle, &format!("{STACK_PREFIX}{i}_"));
        }
        bundle
    }

    /// Replace contents from a bundle; bad entries are skipped
    pub fn restore_from_bundle(&mut self, bundle: Option<&Bundle>) {
        self.clear();
        let Some(bundle) = bundle else {
            return;
        };
        let size = bundle.get_int(&format!("{STACK_PREFIX}size"), 0).max(0);
        for i in 0..size {
            if let Some(state) = MenuState::read_from(bundle, &format!("{STACK_PREFIX}{i}_")) {
                self.entries.push(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_peek_order() {
        let mut stack = NavigationStack::new();
        assert!(stack.is_empty());
        assert!(stack.pop().is_none());

        stack.push(MenuState::new(MenuType::Main, 2));
        stack.push(MenuState::new(MenuType::Progress, 1));
        assert_eq!(stack.size(), 2);
        assert_eq!(stack.peek(), Some(&MenuState::new(MenuType::Progress, 1)));

        assert_eq!(stack.pop(), Some(MenuState::new(MenuType::Progress, 1)));
        assert_eq!(stack.pop(), Some(MenuState::new(MenuType::Main, 2)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_bundle_keys_layout() {
        let mut stack = NavigationStack::new();
        stack.push(MenuState::new(MenuType::Main, 3));
        stack.push(MenuState::new(MenuType::Settings, 1));

        let bundle = stack.to_bundle();
        assert_eq!(bundle.get_int("stack_size", -1), 2);
        assert_eq!(bundle.get_string("stack_0_type"), Some("MAIN"));
        assert_eq!(bundle.get_int("stack_0_index", -1), 3);
        assert_eq!(bundle.get_string("stack_1_type"), Some("SETTINGS"));

        let mut restored = NavigationStack::new();
        restored.restore_from_bundle(Some(&bundle));
        assert_eq!(restored, stack);
    }

    #[test]
    fn test_invalid_entry_is_skipped_not_fatal() {
        let mut bundle = Bundle::new();
        bundle.put_int("stack_size", 3);
        bundle.put_string("stack_0_type", "MAIN");
        bundle.put_int("stack_0_index", 4);
        bundle.put_string("stack_1_type", "NOT_A_MENU");
        bundle.put_string("stack_2_type", "EXIT");

        let mut stack = NavigationStack::new();
        stack.push(MenuState::new(MenuType::About, 0));
        stack.restore_from_bundle(Some(&bundle));

        let entries: Vec<_> = stack.iter().copied().collect();
        assert_eq!(
            entries,
            vec![
                MenuState::new(MenuType::Main, 4),
                MenuState::new(MenuType::Exit, 0)
            ]
        );
    }

    #[test]
    fn test_menu_state_bundle_uses_menu_prefix() {
        let state = MenuState::new(MenuType::LoadSlots, 9);
        let bundle = state.to_bundle();
        assert_eq!(bundle.get_string("menu_type"), Some("LOAD_SLOTS"));
        assert_eq!(bundle.get_int("menu_index", 0), 9);
        assert_eq!(MenuState::from_bundle(&bundle), Some(state));

        let mut broken = Bundle::new();
        broken.put_string("menu_type", "???");
        assert_eq!(MenuState::from_bundle(&broken), None);
        assert_eq!(MenuState::from_bundle(&Bundle::new()), None);
    }

    #[test]
    fn test_restore_from_none_clears() {
        let mut stack = NavigationStack::new();
        stack.push(MenuState::new(MenuType::Main, 0));
        stack.restore_from_bundle(None);
        assert!(stack.is_empty());
    }
}
