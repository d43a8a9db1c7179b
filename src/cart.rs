//! In-memory shopping cart.
//!
//! The cart is a reducer: [`reduce`] maps the current item list and a
//! [`CartAction`] to the next item list and never fails. [`Cart`] owns the
//! list and is the only place it is mutated.
//!
//! Invariants held by every transition:
//! - at most one [`CartItem`] per product id, in first-added order
//! - every quantity is at least 1
//! - no quantity exceeds the product's per-delivery ceiling

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{EnrichedProduct, ProductId};

/// A product and how many units the shopper wants.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: EnrichedProduct,
    pub quantity: u32,
}

impl CartItem {
    /// Discounted price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Saving against the comparison price times quantity.
    pub fn line_savings(&self) -> Decimal {
        self.product.unit_savings() * Decimal::from(self.quantity)
    }

    fn at_ceiling(&self) -> bool {
        self.product
            .unit_ceiling()
            .is_some_and(|max| self.quantity >= max)
    }
}

/// Cart transitions.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one unit of a product.
    Add(EnrichedProduct),
    /// Take one unit of a product out; removing the last drops the item.
    Remove(ProductId),
    /// Empty the cart.
    Clear,
}

/// Computes the next cart contents.
pub fn reduce(mut items: Vec<CartItem>, action: CartAction) -> Vec<CartItem> {
    match action {
        CartAction::Add(product) => {
            match items.iter_mut().find(|item| item.product.id == product.id) {
                Some(item) if item.at_ceiling() => {
                    debug!("Product {} already at its delivery limit", product.id);
                }
                Some(item) => item.quantity += 1,
                None => items.push(CartItem {
                    product,
                    quantity: 1,
                }),
            }
            items
        }
        CartAction::Remove(id) => {
            if let Some(pos) = items.iter().position(|item| item.product.id == id) {
                if items[pos].quantity > 1 {
                    items[pos].quantity -= 1;
                } else {
                    items.remove(pos);
                }
            }
            items
        }
        CartAction::Clear => Vec::new(),
    }
}

/// Totals reported by a mocked checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Distinct products.
    pub lines: usize,
    /// Units across all products.
    pub units: u32,
    pub subtotal: Decimal,
    pub savings: Decimal,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one transition.
    pub fn dispatch(&mut self, action: CartAction) {
        let items = std::mem::take(&mut self.items);
        self.items = reduce(items, action);
    }

    /// Adds one unit of `product`, unless it is at its delivery limit.
    pub fn add(&mut self, product: &EnrichedProduct) {
        self.dispatch(CartAction::Add(product.clone()));
    }

    /// Removes one unit of the product with `id`, if present.
    pub fn remove(&mut self, id: ProductId) {
        self.dispatch(CartAction::Remove(id));
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Current contents in first-added order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units of `id` in the cart, zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product.id == id)
            .map_or(0, |item| item.quantity)
    }

    /// Whether another unit of `product` would be accepted.
    pub fn can_add(&self, product: &EnrichedProduct) -> bool {
        product
            .unit_ceiling()
            .is_none_or(|max| self.quantity_of(product.id) < max)
    }

    /// Units across all products.
    pub fn units(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn savings(&self) -> Decimal {
        self.items.iter().map(CartItem::line_savings).sum()
    }

    /// Mocked checkout: reports the totals and empties the cart.
    ///
    /// Returns `None` for an empty cart.
    pub fn checkout(&mut self) -> Option<CheckoutSummary> {
        if self.items.is_empty() {
            return None;
        }
        let summary = CheckoutSummary {
            lines: self.items.len(),
            units: self.units(),
            subtotal: self.subtotal(),
            savings: self.savings(),
        };
        self.clear();
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::models::CompetitorPrice;

    fn product(id: ProductId) -> EnrichedProduct {
        EnrichedProduct {
            id,
            name: format!("product {id}"),
            category: "1".to_string(),
            price: dec!(80),
            list_price: dec!(100),
            image: None,
            description: None,
            weight: String::new(),
            competitor_prices: vec![CompetitorPrice {
                name: "Coto".to_string(),
                logo: "/images/coto.png".to_string(),
                price: dec!(110),
            }],
            discount_ends_at: None,
            minimum_order_value: None,
            max_units_per_delivery: None,
        }
    }

    fn capped(id: ProductId, max: u32) -> EnrichedProduct {
        EnrichedProduct {
            max_units_per_delivery: Some(max),
            ..product(id)
        }
    }

    fn snapshot(cart: &Cart) -> Vec<(ProductId, u32)> {
        cart.items()
            .iter()
            .map(|item| (item.product.id, item.quantity))
            .collect()
    }

    #[test]
    fn add_add_remove_remove_walkthrough() {
        let mut cart = Cart::new();
        let p = product(1);

        cart.add(&p);
        assert_eq!(snapshot(&cart), vec![(1, 1)]);
        cart.add(&p);
        assert_eq!(snapshot(&cart), vec![(1, 2)]);
        cart.remove(1);
        assert_eq!(snapshot(&cart), vec![(1, 1)]);
        cart.remove(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn adding_same_product_n_times_yields_one_line() {
        let mut cart = Cart::new();
        let p = product(7);
        for _ in 0..5 {
            cart.add(&p);
        }
        assert_eq!(snapshot(&cart), vec![(7, 5)]);
    }

    #[test]
    fn add_then_remove_restores_previous_snapshot() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        cart.add(&product(2));
        cart.add(&product(2));
        let before = cart.items().to_vec();

        cart.add(&product(3));
        cart.remove(3);
        assert_eq!(cart.items(), before.as_slice());

        cart.add(&product(1));
        cart.remove(1);
        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn new_products_append_at_the_end() {
        let mut cart = Cart::new();
        cart.add(&product(3));
        cart.add(&product(1));
        cart.add(&product(3));
        cart.add(&product(2));
        assert_eq!(snapshot(&cart), vec![(3, 2), (1, 1), (2, 1)]);
    }

    #[test]
    fn removing_last_unit_keeps_order_of_others() {
        let mut cart = Cart::new();
        for id in [1, 2, 3] {
            cart.add(&product(id));
        }
        cart.remove(2);
        assert_eq!(snapshot(&cart), vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn removing_absent_product_is_a_no_op() {
        let mut cart = Cart::new();
        cart.remove(42);
        assert!(cart.is_empty());
        cart.add(&product(1));
        cart.remove(42);
        assert_eq!(snapshot(&cart), vec![(1, 1)]);
    }

    #[test]
    fn clear_always_empties() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());
        for id in 1..=4 {
            cart.add(&product(id));
        }
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn add_stops_at_delivery_limit() {
        let mut cart = Cart::new();
        let p = capped(1, 2);
        assert!(cart.can_add(&p));
        cart.add(&p);
        cart.add(&p);
        assert!(!cart.can_add(&p));
        cart.add(&p);
        assert_eq!(cart.quantity_of(1), 2);

        cart.remove(1);
        assert!(cart.can_add(&p));
    }

    #[test]
    fn zero_limit_means_unbounded() {
        let mut cart = Cart::new();
        let p = capped(1, 0);
        for _ in 0..3 {
            cart.add(&p);
        }
        assert_eq!(cart.quantity_of(1), 3);
    }

    #[test]
    fn reduce_is_pure_over_its_input() {
        let start = vec![CartItem {
            product: product(1),
            quantity: 2,
        }];
        let next = reduce(start.clone(), CartAction::Remove(1));
        assert_eq!(start[0].quantity, 2);
        assert_eq!(next[0].quantity, 1);
        assert!(reduce(next, CartAction::Clear).is_empty());
    }

    #[test]
    fn totals_and_checkout() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        cart.add(&product(1));
        cart.add(&product(2));

        assert_eq!(cart.units(), 3);
        assert_eq!(cart.subtotal(), dec!(240));
        assert_eq!(cart.savings(), dec!(90));

        let summary = cart.checkout().unwrap();
        assert_eq!(
            summary,
            CheckoutSummary {
                lines: 2,
                units: 3,
                subtotal: dec!(240),
                savings: dec!(90),
            }
        );
        assert!(cart.is_empty());
        assert!(cart.checkout().is_none());
    }

    #[test]
    fn savings_never_negative() {
        let mut p = product(1);
        p.competitor_prices[0].price = dec!(50);
        let mut cart = Cart::new();
        cart.add(&p);
        assert_eq!(cart.savings(), dec!(0));
    }
}
