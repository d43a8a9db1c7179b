//! Centered yes/no dialog.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::app::Confirmation;

/// Renders the dialog for `confirmation` over `area`.
pub fn render(frame: &mut Frame, area: Rect, confirmation: Confirmation) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(36)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = vec![
        Line::from(confirmation.prompt()).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("[y]es   [n]o").style(Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block).centered(), popup);
}
