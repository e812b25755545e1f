//! Menu overlay - list screens, the slot grid and grid dialogs
//!
//! Drawn over the paused game. Every selectable item records its screen
//! rect in the [`HitMap`] so the mouse can stand in for touch.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use retromenu_core::menu::view::{DialogView, GridView, ListView, SlotView};
use retromenu_core::MenuView;

use crate::tui::handlers::HitMap;
use crate::tui::theme::Theme;
use crate::tui::utils::{centered, truncate_ellipsis};

const LIST_WIDTH: u16 = 44;
const CELL_WIDTH: u16 = 18;
const CELL_HEIGHT: u16 = 4;
/// Hit index of the grid's back button
const BACK_HIT: usize = 9;

/// Fixed-size rect centered in `area`, clamped to fit
fn center_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

fn panel_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme.border_color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.accent_color)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg_color))
}

pub fn render_menu(f: &mut Frame, area: Rect, view: &MenuView, theme: &Theme, hits: &mut HitMap) {
    hits.clear();
    match view {
        MenuView::List(list) => render_list(f, area, list, theme, hits),
        MenuView::Grid(grid) => render_grid(f, area, grid, theme, hits),
    }
}

fn render_list(f: &mut Frame, area: Rect, list: &ListView, theme: &Theme, hits: &mut HitMap) {
    let rows = list.info.len() + list.items.len() * 2 + 3;
    let popup = center_rect(LIST_WIDTH, rows as u16 + 2, area);
    f.render_widget(Clear, popup);
    let block = panel_block(&list.title, theme);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for info in &list.info {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_ellipsis(info, width.saturating_sub(2))),
            Style::default().fg(theme.dim_color),
        )));
    }
    if !list.info.is_empty() {
        lines.push(Line::from(""));
    }

    for (i, item) in list.items.iter().enumerate() {
        let selected = i == list.selected;
        let marker = if selected { "▶ " } else { "  " };
        let style = if !item.is_enabled {
            Style::default().fg(theme.dim_color)
        } else if selected {
            Style::default()
                .fg(theme.bg_color)
                .bg(theme.accent_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_color)
        };
        let label = truncate_ellipsis(&item.title, width.saturating_sub(4));
        let row = inner.y + lines.len() as u16;
        if row < inner.bottom() {
            hits.push(Rect::new(inner.x, row, inner.width, 1), i);
        }
        lines.push(Line::from(Span::styled(
            format!(" {}{:<w$}", marker, label, w = width.saturating_sub(3)),
            style,
        )));
        if let Some(subtitle) = &item.subtitle {
            lines.push(Line::from(Span::styled(
                format!("    {}", truncate_ellipsis(subtitle, width.saturating_sub(5))),
                Style::default().fg(theme.dim_color),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_grid(f: &mut Frame, area: Rect, grid: &GridView, theme: &Theme, hits: &mut HitMap) {
    let width = CELL_WIDTH * 3 + 2;
    let height = CELL_HEIGHT * 3 + 6;
    let popup = center_rect(width, height, area);
    f.render_widget(Clear, popup);
    let block = panel_block(&grid.title, theme);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let record = grid.dialog.is_none();
    for (i, slot) in grid.slots.iter().enumerate().take(9) {
        let col = (i % 3) as u16;
        let row = (i / 3) as u16;
        let cell = Rect::new(
            inner.x + col * CELL_WIDTH,
            inner.y + row * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
        .intersection(inner);
        if cell.is_empty() {
            continue;
        }
        render_slot(f, cell, slot, i == grid.selected, theme);
        if record {
            hits.push(cell, i);
        }
    }

    let back_row = inner.y + CELL_HEIGHT * 3;
    if back_row < inner.bottom() {
        let back_area = Rect::new(inner.x, back_row, inner.width, 1);
        let selected = grid.selected == BACK_HIT;
        let style = if !grid.back_enabled {
            Style::default().fg(theme.dim_color)
        } else if selected {
            Style::default()
                .fg(theme.bg_color)
                .bg(theme.accent_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_color)
        };
        let label = format!("[ {} ]", grid.back_label);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                centered(&label, inner.width as usize),
                style,
            ))),
            back_area,
        );
        if record {
            hits.push(back_area, BACK_HIT);
        }
    }

    if let Some(hint) = &grid.hint {
        let hint_row = back_row + 1;
        if hint_row < inner.bottom() {
            f.render_widget(
                Paragraph::new(Span::styled(
                    centered(
                        &truncate_ellipsis(hint, inner.width as usize),
                        inner.width as usize,
                    ),
                    Style::default().fg(theme.warning_color),
                )),
                Rect::new(inner.x, hint_row, inner.width, 1),
            );
        }
    }

    if let Some(dialog) = &grid.dialog {
        render_dialog(f, area, dialog, theme);
    }
}

fn render_slot(f: &mut Frame, area: Rect, slot: &SlotView, selected: bool, theme: &Theme) {
    let border_color = if selected {
        theme.accent_color
    } else if slot.is_marked {
        theme.marked_color
    } else {
        theme.border_color
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!("{}", slot.slot_number),
            Style::default().fg(theme.dim_color),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text_width = inner.width as usize;
    let label_style = if slot.is_empty {
        Style::default().fg(theme.dim_color)
    } else if selected {
        Style::default()
            .fg(theme.accent_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_color)
    };
    let mut lines = vec![Line::from(Span::styled(
        truncate_ellipsis(&slot.label, text_width),
        label_style,
    ))];
    if let Some(timestamp) = &slot.timestamp {
        lines.push(Line::from(Span::styled(
            truncate_ellipsis(timestamp, text_width),
            Style::default().fg(theme.dim_color),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn option_lines<'a>(options: &[String], selected: usize, theme: &Theme) -> Vec<Line<'a>> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("▶ {}", option),
                    Style::default()
                        .fg(theme.bg_color)
                        .bg(theme.accent_color)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", option),
                    Style::default().fg(theme.text_color),
                ))
            }
        })
        .collect()
}

fn render_dialog(f: &mut Frame, area: Rect, dialog: &DialogView, theme: &Theme) {
    let (title, lines, width) = match dialog {
        DialogView::Confirm {
            message,
            options,
            selected,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(theme.text_color),
                )),
                Line::from(""),
            ];
            lines.extend(option_lines(options, *selected, theme));
            ("Confirm".to_string(), lines, 40)
        }
        DialogView::Picker {
            title,
            options,
            selected,
        } => (title.clone(), option_lines(options, *selected, theme), 30),
        DialogView::Keyboard {
            prompt,
            text,
            rows,
            row,
            col,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("> {}_", text),
                    Style::default()
                        .fg(theme.success_color)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ];
            for (r, keys) in rows.iter().enumerate() {
                let mut spans = Vec::new();
                for (c, key) in keys.iter().enumerate() {
                    let style = if r == *row && c == *col {
                        Style::default()
                            .fg(theme.bg_color)
                            .bg(theme.accent_color)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.text_color)
                    };
                    spans.push(Span::styled(format!(" {} ", key), style));
                }
                lines.push(Line::from(spans));
            }
            (prompt.clone(), lines, 52)
        }
    };

    let popup = center_rect(width, lines.len() as u16 + 2, area);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent_color))
        .title(format!(" {} ", title))
        .style(Style::default().bg(theme.bg_color));
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use retromenu_core::menu::{MenuAction, MenuItem};
    use retromenu_core::MenuType;

    fn grid(dialog: Option<DialogView>) -> GridView {
        GridView {
            menu_type: MenuType::SaveSlots,
            title: "Save Game".to_string(),
            slots: (1..=9)
                .map(|n| SlotView {
                    slot_number: n,
                    label: "Empty".to_string(),
                    timestamp: None,
                    is_empty: true,
                    is_marked: false,
                })
                .collect(),
            selected: 0,
            back_label: "Back".to_string(),
            back_enabled: true,
            hint: None,
            dialog,
        }
    }

    #[test]
    fn test_list_records_one_hit_per_item() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let view = MenuView::list(
            MenuType::Main,
            vec![
                MenuItem::new("continue", "Continue", MenuAction::Continue),
                MenuItem::new("reset", "Reset", MenuAction::Reset),
            ],
            1,
        );
        let mut hits = HitMap::default();
        terminal
            .draw(|f| render_menu(f, f.area(), &view, &Theme::default(), &mut hits))
            .expect("draw");

        let area = Rect::new(0, 0, 80, 30);
        let popup = center_rect(LIST_WIDTH, 9, area);
        let first_row = popup.y + 1;
        assert_eq!(hits.hit(popup.x + 3, first_row), Some(0));
        assert_eq!(hits.hit(popup.x + 3, first_row + 1), Some(1));
    }

    #[test]
    fn test_grid_hits_cover_slots_and_back() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let view = MenuView::Grid(grid(None));
        let mut hits = HitMap::default();
        terminal
            .draw(|f| render_menu(f, f.area(), &view, &Theme::default(), &mut hits))
            .expect("draw");

        let popup = center_rect(CELL_WIDTH * 3 + 2, CELL_HEIGHT * 3 + 6, Rect::new(0, 0, 80, 30));
        let (x, y) = (popup.x + 1, popup.y + 1);
        assert_eq!(hits.hit(x + 1, y + 1), Some(0));
        assert_eq!(hits.hit(x + CELL_WIDTH * 2 + 1, y + CELL_HEIGHT * 2 + 1), Some(8));
        assert_eq!(hits.hit(x + 5, y + CELL_HEIGHT * 3), Some(BACK_HIT));
    }

    #[test]
    fn test_open_dialog_records_no_hits() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let view = MenuView::Grid(grid(Some(DialogView::Picker {
            title: "Slot 1".to_string(),
            options: vec!["Move".to_string(), "Cancel".to_string()],
            selected: 0,
        })));
        let mut hits = HitMap::default();
        terminal
            .draw(|f| render_menu(f, f.area(), &view, &Theme::default(), &mut hits))
            .expect("draw");
        assert!(hits.is_empty());
    }
}
