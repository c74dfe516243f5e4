//! # Cart State
//!
//! Shared handle to the session's single cart aggregate.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. UI event dispatch mutates it between checkout suspension points
//! 2. Only one caller should modify the cart at a time
//! 3. The checkout flow holds a handle across awaits
//!
//! The mutex is only ever held across a single synchronous reducer call,
//! never across an await, so an in-flight checkout cannot deadlock the UI.
//!
//! ## Why Not RwLock?
//! Cart operations are quick and most of them modify state.
//! A RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use sarukulu_core::Cart;

/// Shared, session-scoped cart state.
///
/// Cloning is cheap and every clone observes the same aggregate.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.clear());
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarukulu_core::Money;

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let handle = state.clone();

        state.with_cart_mut(|c| {
            c.add_item("v1", "Milk", Some("1L".into()), Money::from_paise(6000), 1)
        });

        assert_eq!(handle.with_cart(|c| c.total_quantity()), 1);
    }

    #[test]
    fn test_with_cart_mut_round_trip() {
        let state = CartState::new();
        state.with_cart_mut(|c| {
            c.add_item("v1", "Milk", None, Money::from_paise(6000), 2);
            c.add_item("v2", "Bread", None, Money::from_paise(4000), 1);
        });
        assert_eq!(state.with_cart(|c| c.subtotal()), Money::from_paise(16000));

        state.with_cart_mut(|c| c.clear());
        assert!(state.with_cart(|c| c.is_empty()));
    }
}
