//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, FeedStatus, NoticeLevel};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (feed_label, feed_color) = match &app.feed_status {
        FeedStatus::Loading => ("Loading...".to_string(), Color::Yellow),
        FeedStatus::Ready => (format!("{} deals", app.products.len()), Color::Green),
        FeedStatus::Failed(_) => ("Feed unavailable".to_string(), Color::Red),
    };

    let notice_span = match &app.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Cyan,
                NoticeLevel::Error => Color::Red,
            };
            Span::styled(format!(" {} ", notice.message), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let cart_label = format!(
        " {} units · ${} ",
        app.cart.units(),
        app.market.format_price(app.cart.subtotal())
    );

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.market.as_str().to_uppercase()),
            Style::default().fg(Color::White),
        ),
        Span::raw("│"),
        Span::styled(format!(" {feed_label} "), Style::default().fg(feed_color)),
        Span::raw("│"),
        Span::styled(cart_label, Style::default().fg(Color::Cyan)),
        Span::raw("│"),
        notice_span,
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
