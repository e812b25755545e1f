//! On-screen keyboard for naming saves with a pad

use crate::navigation::Direction;

const ROWS: [&[Key]; 5] = [
    &[
        Key::Char('1'),
        Key::Char('2'),
        Key::Char('3'),
        Key::Char('4'),
        Key::Char('5'),
        Key::Char('6'),
        Key::Char('7'),
        Key::Char('8'),
        Key::Char('9'),
        Key::Char('0'),
        Key::Char('-'),
        Key::Char('_'),
    ],
    &[
        Key::Char('Q'),
        Key::Char('W'),
        Key::Char('E'),
        Key::Char('R'),
        Key::Char('T'),
        Key::Char('Y'),
        Key::Char('U'),
        Key::Char('I'),
        Key::Char('O'),
        Key::Char('P'),
    ],
    &[
        Key::Char('A'),
        Key::Char('S'),
        Key::Char('D'),
        Key::Char('F'),
        Key::Char('G'),
        Key::Char('H'),
        Key::Char('J'),
        Key::Char('K'),
        Key::Char('L'),
    ],
    &[
        Key::Char('Z'),
        Key::Char('X'),
        Key::Char('C'),
        Key::Char('V'),
        Key::Char('B'),
        Key::Char('N'),
        Key::Char('M'),
        Key::Char(','),
        Key::Char('.'),
        Key::Backspace,
    ],
    &[Key::Cancel, Key::Char(' '), Key::Ok],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Cancel,
    Ok,
}

impl Key {
    pub fn label(&self) -> String {
        match self {
            Key::Char(' ') => "SPACE".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Backspace => "DEL".to_string(),
            Key::Cancel => "CANCEL".to_string(),
            Key::Ok => "OK".to_string(),
        }
    }
}

/// Result of pressing the highlighted key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPress {
    Edited,
    Submit(String),
    Cancel,
}

/// Five-row keyboard with bounded 2-D cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroKeyboard {
    text: String,
    row: usize,
    col: usize,
}

impl RetroKeyboard {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            text: initial.into(),
            row: 0,
            col: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn current_key(&self) -> Key {
        ROWS[self.row][self.col]
    }

    /// Move the highlight; the column is clamped when the row is shorter
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Up if self.row > 0 => self.row -= 1,
            Direction::Down if self.row < ROWS.len() - 1 => self.row += 1,
            Direction::Left if self.col > 0 => {
                self.col -= 1;
                return true;
            }
            Direction::Right if self.col < ROWS[self.row].len() - 1 => {
                self.col += 1;
                return true;
            }
            _ => return false,
        }
        self.col = self.col.min(ROWS[self.row].len() - 1);
        true
    }

    pub fn press(&mut self) -> KeyPress {
        match self.current_key() {
            Key::Char(c) => {
                self.text.push(c);
                KeyPress::Edited
            }
            Key::Backspace => {
                self.text.pop();
                KeyPress::Edited
            }
            Key::Cancel => KeyPress::Cancel,
            Key::Ok => KeyPress::Submit(self.text.clone()),
        }
    }

    pub fn labels() -> Vec<Vec<String>> {
        ROWS.iter()
            .map(|row| row.iter().map(Key::label).collect())
            .collect()
    }
}
