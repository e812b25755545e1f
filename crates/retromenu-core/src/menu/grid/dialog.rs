//! Modal layer over the slot grid
//!
//! At most one dialog is open. While it is, every navigation goes to it.

use super::keyboard::{KeyPress, RetroKeyboard};
use crate::menu::view::DialogView;
use crate::navigation::Direction;

/// How a dialog finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Confirmed,
    Cancelled,
    Picked(usize),
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Two stacked buttons; index 0 confirms
    Confirm {
        message: String,
        options: [String; 2],
        selected: usize,
    },
    OperationPicker {
        title: String,
        options: Vec<String>,
        selected: usize,
    },
    Naming {
        prompt: String,
        keyboard: RetroKeyboard,
    },
}

/// Open dialog plus what the grid will do with its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog<I> {
    pub kind: DialogKind,
    pub intent: I,
}

impl<I> Dialog<I> {
    pub fn confirm(message: impl Into<String>, yes: &str, no: &str, intent: I) -> Self {
        Self {
            kind: DialogKind::Confirm {
                message: message.into(),
                options: [yes.to_string(), no.to_string()],
                selected: 0,
            },
            intent,
        }
    }

    pub fn picker(title: impl Into<String>, options: &[&str], intent: I) -> Self {
        Self {
            kind: DialogKind::OperationPicker {
                title: title.into(),
                options: options.iter().map(|o| o.to_string()).collect(),
                selected: 0,
            },
            intent,
        }
    }

    pub fn naming(prompt: impl Into<String>, initial: impl Into<String>, intent: I) -> Self {
        Self {
            kind: DialogKind::Naming {
                prompt: prompt.into(),
                keyboard: RetroKeyboard::new(initial),
            },
            intent,
        }
    }

    /// Move inside the dialog; the grid underneath never sees it
    pub fn navigate(&mut self, direction: Direction) {
        match &mut self.kind {
            DialogKind::Confirm { selected, .. } => step(selected, 2, direction),
            DialogKind::OperationPicker {
                selected, options, ..
            } => step(selected, options.len(), direction),
            DialogKind::Naming { keyboard, .. } => {
                keyboard.navigate(direction);
            }
        }
    }

    /// Activate the highlighted control; `None` while the dialog stays open
    pub fn confirm_selection(&mut self) -> Option<DialogResult> {
        match &mut self.kind {
            DialogKind::Confirm { selected, .. } => Some(if *selected == 0 {
                DialogResult::Confirmed
            } else {
                DialogResult::Cancelled
            }),
            DialogKind::OperationPicker { selected, .. } => Some(DialogResult::Picked(*selected)),
            DialogKind::Naming { keyboard, .. } => match keyboard.press() {
                KeyPress::Edited => None,
                KeyPress::Submit(text) => Some(DialogResult::Named(text)),
                KeyPress::Cancel => Some(DialogResult::Cancelled),
            },
        }
    }

    pub fn view(&self) -> DialogView {
        match &self.kind {
            DialogKind::Confirm {
                message,
                options,
                selected,
            } => DialogView::Confirm {
                message: message.clone(),
                options: options.clone(),
                selected: *selected,
            },
            DialogKind::OperationPicker {
                title,
                options,
                selected,
            } => DialogView::Picker {
                title: title.clone(),
                options: options.clone(),
                selected: *selected,
            },
            DialogKind::Naming { prompt, keyboard } => {
                let (row, col) = keyboard.position();
                DialogView::Keyboard {
                    prompt: prompt.clone(),
                    text: keyboard.text().to_string(),
                    rows: RetroKeyboard::labels(),
                    row,
                    col,
                }
            }
        }
    }
}

/// Bounded vertical step; sideways is ignored
fn step(selected: &mut usize, len: usize, direction: Direction) {
    match direction {
        Direction::Up if *selected > 0 => *selected -= 1,
        Direction::Down if *selected + 1 < len => *selected += 1,
        _ => {}
    }
}
