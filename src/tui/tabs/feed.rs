//! Deal feed tab layout and rendering.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::feed::FALLBACK_NAME;
use crate::market::Market;
use crate::models::{CompetitorPrice, EnrichedProduct};
use crate::tui::app::{App, FeedStatus};

use super::{fit, visible_window};

/// Renders the feed tab body.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    if app.products.is_empty() {
        render_placeholder(frame, layout[0], app);
    } else {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(layout[0]);
        render_list(frame, content[0], app);
        render_detail(frame, content[1], app);
    }

    render_keybindings(frame, layout[1]);
}

/// Shown while loading, after a failure, or when nothing is on offer.
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match &app.feed_status {
        FeedStatus::Loading => ("Loading deals...".to_string(), Color::Yellow),
        FeedStatus::Failed(message) => (
            format!("Error: {message}\n\nPress [r] to try again."),
            Color::Red,
        ),
        FeedStatus::Ready => ("No deals right now.".to_string(), Color::DarkGray),
    };
    let block = Block::default()
        .title(" Ofertas ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let para = Paragraph::new(text)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(para, area);
}

/// Renders the scrolling product list.
fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Ofertas ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // qty marker (5) + price (12) + comparison (20) + gaps
    let name_width = (inner.width as usize).saturating_sub(40).max(8);
    let window = visible_window(app.selected, app.products.len(), inner.height as usize);

    let lines: Vec<Line> = app.products[window.clone()]
        .iter()
        .zip(window)
        .map(|(product, index)| {
            let qty = app.cart.quantity_of(product.id);
            let qty_label = match qty {
                0 => "     ".to_string(),
                _ if !app.cart.can_add(product) => " MAX ".to_string(),
                n => format!("{n:>4} "),
            };
            let row_style = if index == app.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(qty_label, Style::default().fg(Color::Green)),
                Span::raw(fit(&product.name, name_width)),
                Span::styled(
                    format!(" ${:>10}", app.market.format_price(product.price)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  {}",
                        fit(&comparison_label(product.comparison(), app.market), 20)
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
            .style(row_style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders details for the highlighted product.
fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Detalle ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(product) = app.selected_product() else {
        frame.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            product.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(product.weight.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Price      ", label),
            Span::styled(
                format!("${}", app.market.format_price(product.price)),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Compare at ", label),
            Span::raw(comparison_label(product.comparison(), app.market)),
        ]),
        Line::from(vec![
            Span::styled("Category   ", label),
            Span::raw(product.category.clone()),
        ]),
    ];

    let expiry = expiry_label(product.discount_ends_at, Utc::now());
    if !expiry.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Deal       ", label),
            Span::styled(expiry, Style::default().fg(Color::Yellow)),
        ]));
    }
    if let Some(min) = product.minimum_order_value {
        lines.push(Line::from(vec![
            Span::styled("Min order  ", label),
            Span::raw(format!("${}", app.market.format_price(min))),
        ]));
    }
    if let Some(max) = product.unit_ceiling() {
        lines.push(Line::from(vec![
            Span::styled("Limit      ", label),
            Span::raw(format!("{max} per delivery")),
        ]));
    }
    let in_cart = app.cart.quantity_of(product.id);
    if in_cart > 0 {
        lines.push(Line::from(vec![
            Span::styled("In cart    ", label),
            Span::styled(in_cart.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }
    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(description.to_string()));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(para, area);
}

/// Renders keybinding help for the feed tab.
fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[j/k]move [a/+]add [x/-]remove [r]efresh [Tab]cart [q]uit";
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

/// Text for the comparison price: `Antes $X` for the synthetic entry,
/// otherwise the competitor's name and price.
pub fn comparison_label(comparison: Option<&CompetitorPrice>, market: Market) -> String {
    match comparison {
        Some(c) if c.name == FALLBACK_NAME => format!("Antes ${}", market.format_price(c.price)),
        Some(c) => format!("{} ${}", c.name, market.format_price(c.price)),
        None => String::new(),
    }
}

/// Human countdown to the end of a discount; empty when unknown.
pub fn expiry_label(ends_at: Option<DateTime<FixedOffset>>, now: DateTime<Utc>) -> String {
    let Some(ends_at) = ends_at else {
        return String::new();
    };
    let remaining = ends_at.to_utc() - now;
    if remaining <= chrono::TimeDelta::zero() {
        return "ended".to_string();
    }
    let (days, hours, minutes) = (
        remaining.num_days(),
        remaining.num_hours() % 24,
        remaining.num_minutes() % 60,
    );
    match (days, hours) {
        (0, 0) => format!("ends in {}m", minutes.max(1)),
        (0, h) => format!("ends in {h}h {minutes}m"),
        (d, h) => format!("ends in {d}d {h}h"),
    }
}

/// Plain-text rendering of the feed, one product per line.
pub fn plain_listing(products: &[EnrichedProduct], market: Market) -> String {
    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:>8}  {} {}  ${:>10}  {}",
            product.id,
            fit(&product.name, 40),
            fit(&product.weight, 12),
            market.format_price(product.price),
            comparison_label(product.comparison(), market)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use crate::feed::fallback_price;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 15, 0, 0).unwrap()
    }

    fn at(hour: u32, minute: u32, day: u32) -> Option<DateTime<FixedOffset>> {
        Some(
            FixedOffset::west_opt(3 * 3600)
                .unwrap()
                .with_ymd_and_hms(2025, 3, day, hour, minute, 0)
                .unwrap(),
        )
    }

    #[test]
    fn synthetic_comparison_reads_antes() {
        let label = comparison_label(Some(&fallback_price(dec!(1234.4))), Market::Argentina);
        assert_eq!(label, "Antes $1.234");
    }

    #[test]
    fn competitor_comparison_shows_name() {
        let c = CompetitorPrice {
            name: "Soriana".to_string(),
            logo: "/images/soriana.png".to_string(),
            price: dec!(1500),
        };
        assert_eq!(comparison_label(Some(&c), Market::Mexico), "Soriana $1,500");
        assert_eq!(comparison_label(None, Market::Mexico), "");
    }

    #[test]
    fn expiry_countdown() {
        // now is 12:00 in the market zone
        assert_eq!(expiry_label(None, now()), "");
        assert_eq!(expiry_label(at(11, 0, 14), now()), "ended");
        assert_eq!(expiry_label(at(12, 0, 14), now()), "ended");
        assert_eq!(expiry_label(at(12, 20, 14), now()), "ends in 20m");
        assert_eq!(expiry_label(at(14, 30, 14), now()), "ends in 2h 30m");
        assert_eq!(expiry_label(at(15, 0, 16), now()), "ends in 2d 3h");
    }

    #[test]
    fn plain_listing_has_a_line_per_product() {
        let product = EnrichedProduct {
            id: 42,
            name: "Aceite de girasol".to_string(),
            category: "7".to_string(),
            price: dec!(1800),
            list_price: dec!(2000),
            image: None,
            description: None,
            weight: "900ml".to_string(),
            competitor_prices: vec![fallback_price(dec!(2000))],
            discount_ends_at: None,
            minimum_order_value: None,
            max_units_per_delivery: None,
        };
        let listing = plain_listing(&[product.clone(), product], Market::Argentina);
        assert_eq!(listing.lines().count(), 2);
        let first = listing.lines().next().unwrap();
        assert!(first.contains("Aceite de girasol"));
        assert!(first.contains("$     1.800"));
        assert!(first.ends_with("Antes $2.000"));
    }
}
