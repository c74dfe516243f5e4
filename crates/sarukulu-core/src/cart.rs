//! # Cart Aggregate
//!
//! The in-memory shopping cart: an ordered list of selected variants plus
//! derived totals, mutated only through the reducer operations below.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Reducer Call            Aggregate Change      │
//! │  ──────────────           ────────────            ────────────────      │
//! │                                                                         │
//! │  Tap variant chip ───────► add_item() ──────────► merge or append      │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ──────► qty = n (0 removes)  │
//! │                                                                         │
//! │  Tap Remove ─────────────► remove_item() ───────► drop entry           │
//! │                                                                         │
//! │  Checkout success ───────► clear() ─────────────► items = []           │
//! │                                                                         │
//! │  NOTE: None of these can fail. The reducer is fed straight from UI     │
//! │        event handlers, so malformed input degrades to a safe default   │
//! │        (quantity 1, price zero) instead of erroring.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one entry per `variant_id`; re-adding merges quantities
//! - No entry ever has quantity 0 (it is removed instead)
//! - Insertion order is preserved; merges never reorder
//! - `unit_price` is frozen at first add and NOT refreshed by later adds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductVariant};

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `variant_id`: the purchasable unit's key; unique within the cart
/// - `name`/`label`/`unit_price`: frozen copies of display data at the
///   moment of adding. The shopper keeps seeing the price they tapped,
///   even if the shelf price changes before checkout; the order service
///   re-prices authoritatively at submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Variant key (UUID from the catalog).
    pub variant_id: String,

    /// Parent product name at time of adding (frozen).
    pub name: String,

    /// Variant label at time of adding, e.g. "1L" (frozen).
    pub label: Option<String>,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity in cart (always >= 1).
    pub quantity: i64,

    /// When this item was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// Lives for the authenticated session only: created empty, cleared
/// wholesale on checkout success or sign-out, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a variant to the cart, merging with an existing entry.
    ///
    /// ## Behavior
    /// - Blank `variant_id`: silently ignored (nothing to key on)
    /// - `quantity < 1`: treated as 1 (a tap always adds something)
    /// - Negative `unit_price`: treated as zero
    /// - Already in cart: `quantity` increases; `name`, `label` and
    ///   `unit_price` keep their first-add values
    /// - Not in cart: appended at the end
    pub fn add_item(
        &mut self,
        variant_id: impl Into<String>,
        name: impl Into<String>,
        label: Option<String>,
        unit_price: Money,
        quantity: i64,
    ) {
        let variant_id = variant_id.into();
        if variant_id.trim().is_empty() {
            return;
        }

        let quantity = quantity.max(1);

        if let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity += quantity;
            return;
        }

        let unit_price = if unit_price.is_negative() {
            Money::zero()
        } else {
            unit_price
        };

        self.items.push(CartItem {
            variant_id,
            name: name.into(),
            label,
            unit_price,
            quantity,
            added_at: Utc::now(),
        });
    }

    /// Adds one unit of a catalog variant, denormalizing its display data.
    ///
    /// Convenience for the product screen's "add to cart" tap: the parent
    /// product supplies the name, the variant supplies label and price.
    pub fn add_variant(&mut self, product: &Product, variant: &ProductVariant, quantity: i64) {
        self.add_item(
            variant.id.clone(),
            product.name.clone(),
            Some(variant.display_label().to_string()),
            variant.price,
            quantity,
        );
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - Negative quantity clamps to 0
    /// - Quantity 0 removes the entry (a zero-quantity entry never exists)
    /// - Unknown `variant_id`: no-op
    pub fn set_quantity(&mut self, variant_id: &str, quantity: i64) {
        let quantity = quantity.max(0);
        if quantity == 0 {
            self.remove_item(variant_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            item.quantity = quantity;
        }
    }

    /// Removes an item by variant key. No-op if absent.
    pub fn remove_item(&mut self, variant_id: &str) {
        self.items.retain(|i| i.variant_id != variant_id);
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    ///
    /// Recomputed from the live items on every call; there is no cached
    /// counter that could go stale between mutations.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal across all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for the UI boundary.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderRequest;

    fn milk_1l(cart: &mut Cart, qty: i64) {
        cart.add_item("v1", "Milk", Some("1L".to_string()), Money::from_paise(6000), qty);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_paise(12000));
    }

    #[test]
    fn test_add_same_variant_merges_quantity() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 1);
        milk_1l(&mut cart, 2);

        assert_eq!(cart.item_count(), 1); // Still one unique item
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.subtotal(), Money::from_paise(18000)); // ₹180.00
    }

    #[test]
    fn test_merge_keeps_first_add_price() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 1);

        // Shelf price changed before the second tap; the cart keeps the
        // price the shopper saw first.
        cart.add_item("v1", "Milk", Some("1L".to_string()), Money::from_paise(9900), 1);

        assert_eq!(cart.items[0].unit_price, Money::from_paise(6000));
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.subtotal(), Money::from_paise(12000));
    }

    #[test]
    fn test_blank_variant_id_is_ignored() {
        let mut cart = Cart::new();
        cart.add_item("", "Ghost", None, Money::from_paise(100), 1);
        cart.add_item("   ", "Ghost", None, Money::from_paise(100), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_bad_inputs_degrade_to_safe_defaults() {
        let mut cart = Cart::new();
        // Non-positive quantity still adds one unit
        cart.add_item("v1", "Milk", None, Money::from_paise(6000), 0);
        assert_eq!(cart.items[0].quantity, 1);

        cart.add_item("v2", "Bread", None, Money::from_paise(4000), -5);
        assert_eq!(cart.items[1].quantity, 1);

        // Negative price degrades to zero
        cart.add_item("v3", "Eggs", None, Money::from_paise(-100), 1);
        assert_eq!(cart.items[2].unit_price, Money::zero());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut a = Cart::new();
        milk_1l(&mut a, 2);
        a.add_item("v2", "Bread", None, Money::from_paise(4000), 1);

        let mut b = a.clone();
        a.set_quantity("v1", 0);
        b.remove_item("v1");

        assert_eq!(a.items, b.items);
        assert_eq!(a.item_count(), 1);
    }

    #[test]
    fn test_set_quantity_clamps_and_ignores_unknown() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 2);

        cart.set_quantity("v1", -3); // clamps to 0 → removes
        assert!(cart.is_empty());

        cart.set_quantity("nope", 5); // unknown key: no-op
        assert!(cart.is_empty());
    }

    #[test]
    fn test_derived_reads_are_never_stale() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 1);
        assert_eq!(cart.subtotal(), Money::from_paise(6000));

        cart.set_quantity("v1", 5);
        assert_eq!(cart.subtotal(), Money::from_paise(30000));
        assert_eq!(cart.total_quantity(), 5);

        cart.remove_item("v1");
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 2);
        cart.add_item("v2", "Bread", None, Money::from_paise(4000), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    /// The walkthrough the storefront team uses as a smoke scenario:
    /// Milk 1L ₹60 ×1, again ×2, Bread ₹40 ×1, then remove the milk.
    #[test]
    fn test_shopping_walkthrough() {
        let mut cart = Cart::new();

        milk_1l(&mut cart, 1);
        milk_1l(&mut cart, 2);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.subtotal(), Money::from_paise(18000));

        cart.add_item("v2", "Bread", None, Money::from_paise(4000), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal(), Money::from_paise(22000));
        assert_eq!(cart.total_quantity(), 4);

        cart.remove_item("v1");
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].variant_id, "v2");
        assert_eq!(cart.subtotal(), Money::from_paise(4000));
    }

    #[test]
    fn test_insertion_order_preserved_across_merge() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 1);
        cart.add_item("v2", "Bread", None, Money::from_paise(4000), 1);
        milk_1l(&mut cart, 1); // merge must not move v1 to the back

        let keys: Vec<&str> = cart.items.iter().map(|i| i.variant_id.as_str()).collect();
        assert_eq!(keys, vec!["v1", "v2"]);
    }

    #[test]
    fn test_add_variant_denormalizes_display_data() {
        use crate::types::{CatalogStatus, Product, ProductVariant};

        let variant = ProductVariant {
            id: "v1".to_string(),
            product_id: "p1".to_string(),
            name: "Milk 1L".to_string(),
            pack_size_label: Some("1L".to_string()),
            price: Money::from_paise(6000),
            is_active: true,
            status: CatalogStatus::Active,
        };
        let product = Product {
            id: "p1".to_string(),
            category_id: "c1".to_string(),
            name: "Milk".to_string(),
            images: vec![],
            variants: vec![variant.clone()],
            is_active: true,
            status: CatalogStatus::Active,
        };

        let mut cart = Cart::new();
        cart.add_variant(&product, &variant, 2);

        let item = &cart.items[0];
        assert_eq!(item.variant_id, "v1");
        assert_eq!(item.name, "Milk");
        assert_eq!(item.label.as_deref(), Some("1L"));
        assert_eq!(item.unit_price, Money::from_paise(6000));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_order_request_projection() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 3);
        cart.add_item("v2", "Bread", None, Money::from_paise(4000), 1);

        let request = OrderRequest::from_cart(&cart, "addr-1", None).unwrap();
        assert_eq!(request.address_id, "addr-1");
        assert_eq!(request.lines.len(), 2);
        assert_eq!(request.lines[0].variant_id, "v1");
        assert_eq!(request.lines[0].quantity, 3);
        assert_eq!(request.lines[1].variant_id, "v2");
        assert_eq!(request.lines[1].quantity, 1);

        let empty = Cart::new();
        assert!(OrderRequest::from_cart(&empty, "addr-1", None).is_err());
    }

    #[test]
    fn test_cart_serializes_camel_case() {
        let mut cart = Cart::new();
        milk_1l(&mut cart, 1);
        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("\"variantId\":\"v1\""));
        assert!(json.contains("\"unitPrice\":6000"));
    }
}
