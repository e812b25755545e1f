//! Status bar component - bottom bar with ROM, speed, toggles, shortcuts

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::Theme;

/// What the bar shows; gathered by the app each frame
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub rom_name: String,
    pub frame: u64,
    pub speed: u32,
    pub paused: bool,
    pub audio: bool,
    pub shader: String,
    pub controller: Option<String>,
}

pub fn render_status_bar(f: &mut Frame, area: Rect, theme: &Theme, info: &StatusInfo) {
    let bg = Paragraph::new("").style(Style::default().bg(theme.bg_color));
    f.render_widget(bg, area);

    let sep = Span::styled(" │ ", Style::default().fg(theme.dim_color));
    let state = if info.paused {
        Span::styled("PAUSED", Style::default().fg(theme.accent_color))
    } else {
        Span::styled(
            format!("x{}", info.speed),
            Style::default().fg(theme.success_color),
        )
    };
    let left = Line::from(vec![
        Span::raw(" "),
        Span::styled(info.rom_name.clone(), Style::default().fg(theme.text_color)),
        sep.clone(),
        Span::styled(
            format!("frame {:>7}", info.frame),
            Style::default().fg(theme.dim_color),
        ),
        sep.clone(),
        state,
        sep.clone(),
        Span::styled(
            if info.audio { "♪ on" } else { "♪ off" },
            Style::default().fg(theme.dim_color),
        ),
        sep.clone(),
        Span::styled(info.shader.clone(), Style::default().fg(theme.dim_color)),
    ]);

    let mut right_text = String::from("F12/Start menu · q quit ");
    if let Some(name) = &info.controller {
        right_text = format!("🎮 {} · {}", name, right_text);
    }
    let right_width = (right_text.width() as u16).min(area.width / 2);

    let [left_area, right_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);
    f.render_widget(Paragraph::new(left), left_area);
    f.render_widget(
        Paragraph::new(Span::styled(right_text, Style::default().fg(theme.dim_color)))
            .alignment(Alignment::Right),
        right_area,
    );
}
