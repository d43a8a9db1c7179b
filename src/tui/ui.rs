//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::app::{App, Mode, Tab};
use super::components::{confirm, status_bar, tab_bar};
use super::tabs::{cart, feed};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let [tabs_area, status_area, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(6),
    ])
    .areas(frame.area());

    tab_bar::render(frame, tabs_area, app);
    status_bar::render(frame, status_area, app);

    match app.current_tab() {
        Tab::Feed => feed::render(frame, body, app),
        Tab::Cart => cart::render(frame, body, app),
    }

    if let Mode::Confirm(confirmation) = app.mode {
        confirm::render(frame, body, confirmation);
    }
}
