//! The demo playfield, with the selected shader applied

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::tui::plugins::demo::{DemoState, FIELD_HEIGHT, FIELD_WIDTH};
use crate::tui::theme::Theme;

pub fn render_game(f: &mut Frame, area: Rect, theme: &Theme, state: &DemoState, shader: usize) {
    let border_type = if shader == 2 {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };
    let block = Block::bordered()
        .border_type(border_type)
        .border_style(Style::default().fg(theme.border_color))
        .title(format!(" bounce · {} bounces ", state.bounces));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let background = if shader == 3 { "░" } else { " " };
    let lines: Vec<Line> = (0..FIELD_HEIGHT.min(inner.height as i32))
        .map(|y| {
            let mut row_style = Style::default().fg(theme.dim_color);
            // Scanlines dim every other row
            if shader == 1 && y % 2 == 1 {
                row_style = row_style.add_modifier(Modifier::DIM);
            }
            let spans: Vec<Span> = (0..FIELD_WIDTH.min(inner.width as i32))
                .map(|x| {
                    if (x, y) == (state.x, state.y) {
                        Span::styled("●", Style::default().fg(theme.accent_color))
                    } else {
                        Span::styled(background, row_style)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}
