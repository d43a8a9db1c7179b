//! Terminal storefront.
//!
//! Provides a Ratatui-based TUI with a deal feed tab and a cart tab, fed
//! by background refreshes of the product feed.

pub mod app;
pub mod components;
pub mod event;
pub mod loader;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message, update};
pub use loader::FeedLoader;
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
