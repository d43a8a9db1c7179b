//! Cart tab layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;

use super::{fit, visible_window};

/// Renders the cart tab body.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(layout[0]);

    render_items(frame, content[0], app);
    render_summary(frame, content[1], app);
    render_keybindings(frame, layout[1], app);
}

/// Renders the cart lines.
fn render_items(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Carrito ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let items = app.cart.items();
    if items.is_empty() {
        let text = match &app.last_checkout {
            Some(_) => "Thanks for your order! Press [1] to keep shopping.",
            None => "Your cart is empty. Press [1] to browse deals.",
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let name_width = (inner.width as usize).saturating_sub(30).max(8);
    let window = visible_window(app.cart_selected, items.len(), inner.height as usize);

    let lines: Vec<Line> = items[window.clone()]
        .iter()
        .zip(window)
        .map(|(item, index)| {
            let style = if index == app.cart_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let limit = if app.cart.can_add(&item.product) {
                "   "
            } else {
                "MAX"
            };
            Line::from(vec![
                Span::styled(format!("{:>3} x ", item.quantity), Style::default().fg(Color::Green)),
                Span::raw(fit(&item.product.name, name_width)),
                Span::raw(format!(" ${:>10} ", app.market.format_price(item.line_total()))),
                Span::styled(limit, Style::default().fg(Color::Yellow)),
            ])
            .style(style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the order summary panel.
fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Resumen ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Units    ", label),
            Span::raw(app.cart.units().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Savings  ", label),
            Span::styled(
                format!("${}", app.market.format_price(app.cart.savings())),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Total    ", label),
            Span::styled(
                format!("${}", app.market.format_price(app.cart.subtotal())),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if let Some(summary) = app.last_checkout.as_ref().filter(|_| app.cart.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Last order", label)));
        lines.push(Line::from(format!(
            "{} units · ${}",
            summary.units,
            app.market.format_price(summary.subtotal)
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders keybinding help for the cart tab.
fn render_keybindings(frame: &mut Frame, area: Rect, app: &App) {
    let help = if app.cart.is_empty() {
        "[1]deals [r]efresh [q]uit"
    } else {
        "[j/k]move [+]add [-]remove [p]lace order [C]lear [Tab]deals [q]uit"
    };
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
