//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::info;

use crate::Result;
use crate::models::EnrichedProduct;

use super::app::{App, Confirmation, Mode, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// A feed refresh finished.
    FeedLoaded {
        generation: u64,
        result: Result<Vec<EnrichedProduct>>,
    },
    /// Request to quit the application.
    Quit,
}

/// Actions that require external handling.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Start a new feed refresh, superseding any in flight.
    Refresh,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::FeedLoaded { generation, result } => {
            app.apply_feed(generation, result);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_notices();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Confirm(confirmation) => {
            handle_confirm_mode(app, key, confirmation);
            None
        }
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }
        KeyCode::Char('1') => {
            app.show_tab(Tab::Feed);
            None
        }
        KeyCode::Char('2') => {
            app.show_tab(Tab::Cart);
            None
        }
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_selection(true);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_selection(false);
            None
        }
        KeyCode::Char('a') | KeyCode::Char('+') | KeyCode::Enter => {
            app.add_selected();
            None
        }
        KeyCode::Char('x') | KeyCode::Char('-') => {
            app.remove_selected();
            None
        }
        _ => {
            if app.current_tab() == Tab::Cart {
                handle_cart_tab_keys(app, key);
            }
            None
        }
    }
}

/// Handles keys only meaningful on the cart tab.
fn handle_cart_tab_keys(app: &mut App, key: KeyEvent) {
    if app.cart.is_empty() {
        return;
    }
    match key.code {
        KeyCode::Char('C') => app.mode = Mode::Confirm(Confirmation::ClearCart),
        KeyCode::Char('p') => app.mode = Mode::Confirm(Confirmation::Checkout),
        _ => {}
    }
}

/// Handles keys in confirm mode (dialogs).
fn handle_confirm_mode(app: &mut App, key: KeyEvent, confirmation: Confirmation) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Normal;
            match confirmation {
                Confirmation::ClearCart => app.clear_cart(),
                Confirmation::Checkout => {
                    if let Some(summary) = app.checkout() {
                        info!(
                            "Mock checkout: {} lines, {} units, subtotal {}",
                            summary.lines, summary.units, summary.subtotal
                        );
                    }
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}
