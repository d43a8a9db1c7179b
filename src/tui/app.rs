//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::cart::{Cart, CheckoutSummary};
use crate::market::Market;
use crate::models::EnrichedProduct;
use crate::{MercaditoError, Result};

/// How long a status-bar notice stays visible.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    /// Market the feed was assembled for; drives price formatting.
    pub market: Market,

    // -- Tab State --
    pub tabs: Vec<Tab>,
    pub active_tab: usize,

    // -- Feed State --
    /// Products of the last successful refresh, in feed order.
    pub products: Vec<EnrichedProduct>,
    pub feed_status: FeedStatus,
    /// Incremented on every refresh; older results are discarded.
    pub feed_generation: u64,
    /// Highlighted row in the feed.
    pub selected: usize,

    // -- Cart State --
    pub cart: Cart,
    /// Highlighted row in the cart.
    pub cart_selected: usize,
    pub last_checkout: Option<CheckoutSummary>,

    // -- UI State --
    pub mode: Mode,
    pub notice: Option<Notice>,

    // -- Internal --
    pub should_quit: bool,
}

impl App {
    /// Creates an app with an empty feed that is about to load.
    pub fn new(market: Market) -> Self {
        Self {
            market,
            tabs: vec![Tab::Feed, Tab::Cart],
            active_tab: 0,
            products: Vec::new(),
            feed_status: FeedStatus::Loading,
            feed_generation: 0,
            selected: 0,
            cart: Cart::new(),
            cart_selected: 0,
            last_checkout: None,
            mode: Mode::Normal,
            notice: None,
            should_quit: false,
        }
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self
            .active_tab
            .checked_sub(1)
            .unwrap_or(self.tabs.len() - 1);
    }

    /// Jumps straight to `tab`.
    pub fn show_tab(&mut self, tab: Tab) {
        if let Some(pos) = self.tabs.iter().position(|t| *t == tab) {
            self.active_tab = pos;
        }
    }

    /// Marks a new refresh as in flight and returns its generation.
    pub fn begin_refresh(&mut self) -> u64 {
        self.feed_generation += 1;
        self.feed_status = FeedStatus::Loading;
        self.feed_generation
    }

    /// Commits the outcome of a refresh.
    ///
    /// Results from superseded refreshes are dropped. A failed refresh
    /// empties the feed and surfaces the error. Returns whether the result
    /// was applied.
    pub fn apply_feed(&mut self, generation: u64, result: Result<Vec<EnrichedProduct>>) -> bool {
        if generation != self.feed_generation {
            debug!(
                "Discarding feed from refresh {generation}, current is {}",
                self.feed_generation
            );
            return false;
        }
        match result {
            Ok(products) => {
                self.products = products;
                self.feed_status = FeedStatus::Ready;
            }
            Err(MercaditoError::Cancelled) => return false,
            Err(e) => {
                self.products.clear();
                self.feed_status = FeedStatus::Failed(e.to_string());
                self.show_error(format!("Could not load products: {e}"));
            }
        }
        self.selected = self.selected.min(self.products.len().saturating_sub(1));
        true
    }

    /// Product under the feed cursor.
    pub fn selected_product(&self) -> Option<&EnrichedProduct> {
        self.products.get(self.selected)
    }

    /// Moves the cursor of the active tab by one row.
    pub fn move_selection(&mut self, down: bool) {
        let (cursor, len) = match self.current_tab() {
            Tab::Feed => (&mut self.selected, self.products.len()),
            Tab::Cart => (&mut self.cart_selected, self.cart.items().len()),
        };
        *cursor = if down {
            (*cursor + 1).min(len.saturating_sub(1))
        } else {
            cursor.saturating_sub(1)
        };
    }

    /// Adds one unit of the highlighted product in the active tab.
    pub fn add_selected(&mut self) {
        let product = match self.current_tab() {
            Tab::Feed => self.selected_product().cloned(),
            Tab::Cart => self
                .cart
                .items()
                .get(self.cart_selected)
                .map(|item| item.product.clone()),
        };
        let Some(product) = product else {
            return;
        };
        if self.cart.can_add(&product) {
            self.cart.add(&product);
        } else {
            self.show_info(format!("{} is limited per delivery", product.name));
        }
    }

    /// Removes one unit of the highlighted product in the active tab.
    pub fn remove_selected(&mut self) {
        let id = match self.current_tab() {
            Tab::Feed => self.selected_product().map(|p| p.id),
            Tab::Cart => self
                .cart
                .items()
                .get(self.cart_selected)
                .map(|item| item.product.id),
        };
        if let Some(id) = id {
            self.cart.remove(id);
            self.clamp_cart_selection();
        }
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.cart_selected = 0;
    }

    /// Runs the mocked checkout, keeping its summary for display.
    pub fn checkout(&mut self) -> Option<&CheckoutSummary> {
        let summary = self.cart.checkout()?;
        self.cart_selected = 0;
        self.show_info(format!(
            "Order placed: {} units, ${}",
            summary.units,
            self.market.format_price(summary.subtotal)
        ));
        self.last_checkout = Some(summary);
        self.last_checkout.as_ref()
    }

    fn clamp_cart_selection(&mut self) {
        self.cart_selected = self
            .cart_selected
            .min(self.cart.items().len().saturating_sub(1));
    }

    /// Shows an error in the status bar.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(message, NoticeLevel::Error));
    }

    /// Shows an informational message in the status bar.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(message, NoticeLevel::Info));
    }

    /// Clears notices older than five seconds.
    pub fn clear_stale_notices(&mut self) {
        if let Some(ref notice) = self.notice
            && notice.timestamp.elapsed() > NOTICE_TTL
        {
            self.notice = None;
        }
    }
}

/// Tabs in the application shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Discounted product feed.
    Feed,
    /// The shopper's cart.
    Cart,
}

impl Tab {
    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Feed => "Ofertas",
            Tab::Cart => "Carrito",
        }
    }
}

/// Where the product feed stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FeedStatus {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Waiting for the shopper to confirm a cart-wide action.
    Confirm(Confirmation),
}

/// Cart-wide actions that ask before running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    ClearCart,
    Checkout,
}

impl Confirmation {
    /// Question shown in the confirmation dialog.
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::ClearCart => "Empty the cart?",
            Confirmation::Checkout => "Place this order?",
        }
    }
}

/// Severity of a status-bar notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Status-bar message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub timestamp: Instant,
}

impl Notice {
    fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Instant::now(),
        }
    }
}
