//! # Domain Types
//!
//! Core domain types for the Sarukulu storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    Product      │   │ ProductVariant  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  pack_size_label│       │
//! │  │  sort_order     │   │  images         │   │  price          │       │
//! │  │  is_active      │   │  variants       │   │  is_active      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Address      │   │     Order       │   │  OrderRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  line1/city/pin │   │  status/total   │   │  address_id     │       │
//! │  │  is_default     │   │  items          │   │  lines/notes    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  The backend owns every one of these durably; the client holds them    │
//! │  only as read models, except OrderRequest which the client produces.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Catalog Status
// =============================================================================

/// Publication status shared by catalog entities.
///
/// The backend keeps a soft-delete flag (`is_active`) AND a status column;
/// shoppers only ever see rows where both say active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    /// Visible to shoppers.
    Active,
    /// Hidden from the storefront (kept for order history joins).
    Inactive,
}

impl Default for CatalogStatus {
    fn default() -> Self {
        CatalogStatus::Active
    }
}

// =============================================================================
// Category
// =============================================================================

/// A browsable product category (the storefront landing grid).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the category tile.
    pub name: String,

    /// Tile image, if one was uploaded.
    pub image_url: Option<String>,

    /// Ascending display position in the grid.
    pub sort_order: i64,

    /// Whether the category is shown to shoppers (soft delete).
    pub is_active: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A product image with its display position.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductImage {
    pub url: String,
    pub sort_order: i64,
}

/// A purchasable variant of a product (e.g. a pack size).
///
/// The variant is the unit shoppers actually buy; `variant.id` is the key
/// the cart and the order service operate on.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductVariant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Parent product id.
    pub product_id: String,

    /// Variant name (fallback display label).
    pub name: String,

    /// Pack size shown on the shelf chip (e.g. "1L", "500ml").
    pub pack_size_label: Option<String>,

    /// Shelf price. The order service re-prices authoritatively at
    /// submission time; this value is display + cart snapshot input.
    pub price: Money,

    /// Soft-delete flag.
    pub is_active: bool,

    /// Publication status.
    pub status: CatalogStatus,
}

impl ProductVariant {
    /// Returns whether shoppers may buy this variant.
    #[inline]
    pub fn is_purchasable(&self) -> bool {
        self.is_active && self.status == CatalogStatus::Active
    }

    /// Display label for the variant chip: pack size if present, else name.
    pub fn display_label(&self) -> &str {
        self.pack_size_label.as_deref().unwrap_or(&self.name)
    }
}

/// A product with its images and variants, as the catalog returns it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Category this product is listed under.
    pub category_id: String,

    /// Display name (also denormalized into cart items on add).
    pub name: String,

    /// Product images, unsorted as received.
    pub images: Vec<ProductImage>,

    /// All variants, including inactive ones.
    pub variants: Vec<ProductVariant>,

    /// Soft-delete flag.
    pub is_active: bool,

    /// Publication status.
    pub status: CatalogStatus,
}

impl Product {
    /// Variants shoppers may buy, in catalog order.
    pub fn active_variants(&self) -> Vec<&ProductVariant> {
        self.variants.iter().filter(|v| v.is_purchasable()).collect()
    }

    /// The image with the lowest sort order, for the product card.
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.iter().min_by_key(|img| img.sort_order)
    }

    /// Cheapest purchasable variant price ("from ₹X" on the card).
    /// None when no variant is purchasable.
    pub fn min_price(&self) -> Option<Money> {
        self.variants
            .iter()
            .filter(|v| v.is_purchasable())
            .map(|v| v.price)
            .min()
    }
}

// =============================================================================
// Address
// =============================================================================

/// A saved delivery address.
///
/// At most one address per user carries `is_default = true`; the backend
/// enforces that invariant, the client only selects on it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user.
    pub user_id: String,

    /// Recipient full name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Address line 1.
    pub line1: String,

    /// Address line 2 (optional).
    pub line2: Option<String>,

    /// Nearby landmark (optional).
    pub landmark: Option<String>,

    /// City.
    pub city: String,

    /// 6-digit postal code.
    pub pincode: String,

    /// Whether this is the delivery target for checkout.
    pub is_default: bool,

    /// When the address was saved.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Payload for saving a new address (the add-address form).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewAddress {
    pub name: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub landmark: Option<String>,
    pub city: String,
    pub pincode: String,
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of a placed order.
///
/// Serialized in snake_case to match the backend's status column; the UI
/// replaces underscores with spaces for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order accepted, awaiting confirmation.
    Placed,
    /// Store confirmed the order.
    Confirmed,
    /// Rider is on the way.
    OutForDelivery,
    /// Delivered and paid (cash on delivery).
    Delivered,
    /// Cancelled by the store or the customer.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::OutForDelivery => "out for delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

// =============================================================================
// Order (history read model)
// =============================================================================

/// A line of a placed order, as order history returns it.
/// Uses snapshot pattern: names and prices are frozen at order time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Variant that was ordered.
    pub variant_id: String,

    /// Product name at time of order (frozen).
    pub product_name: String,

    /// Variant label at time of order (frozen).
    pub variant_label: Option<String>,

    /// Quantity ordered.
    pub quantity: i64,

    /// Unit price the backend charged (frozen).
    pub unit_price: Money,
}

/// A placed order with its lines, as order history returns it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Backend-assigned order number.
    pub id: i64,

    /// Owning user.
    pub user_id: String,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Item total, computed server-side.
    pub subtotal: Money,

    /// Delivery fee, computed server-side.
    pub delivery_fee: Money,

    /// Grand total (subtotal + delivery fee).
    pub total: Money,

    /// When the order was placed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Order lines.
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// One-line summary for the order list: first item, then "+ N more"
    /// counting every unit beyond the first.
    pub fn headline(&self) -> String {
        let Some(first) = self.items.first() else {
            return "Items".to_string();
        };
        let mut line = first.product_name.clone();
        if let Some(label) = &first.variant_label {
            line.push_str(&format!(" ({})", label));
        }
        let extra = self.total_quantity() - 1;
        if extra > 0 {
            line.push_str(&format!(" + {} more", extra));
        }
        line
    }
}

// =============================================================================
// Order Request (checkout wire shape)
// =============================================================================

/// One requested line: the variant key and how many.
///
/// Display fields are deliberately absent - the order service looks the
/// variant up and prices it server-side, so a stale client price can never
/// leak into a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub variant_id: String,
    #[serde(rename = "qty")]
    pub quantity: i64,
}

/// The atomic order-creation request sent to the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Resolved delivery address.
    pub address_id: String,

    /// Requested lines, in cart order.
    pub lines: Vec<OrderLine>,

    /// Free-text delivery notes.
    pub notes: Option<String>,
}

impl OrderRequest {
    /// Projects a cart snapshot into an order request.
    ///
    /// ## Behavior
    /// - Every cart item becomes `{variant_id, quantity}`, cart order kept
    /// - Denormalized display fields (name, label, price) are dropped
    /// - An empty cart is refused: there is nothing to order
    pub fn from_cart(
        cart: &Cart,
        address_id: impl Into<String>,
        notes: Option<String>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(OrderRequest {
            address_id: address_id.into(),
            lines: cart
                .items
                .iter()
                .map(|item| OrderLine {
                    variant_id: item.variant_id.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            notes,
        })
    }
}

/// The result of a successful atomic submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    /// Backend-assigned order number.
    pub order_id: i64,

    /// Grand total the backend computed (subtotal + delivery fee).
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: &str, price: i64, purchasable: bool) -> ProductVariant {
        ProductVariant {
            id: id.to_string(),
            product_id: "p1".to_string(),
            name: format!("Variant {}", id),
            pack_size_label: Some("1L".to_string()),
            price: Money::from_paise(price),
            is_active: purchasable,
            status: CatalogStatus::Active,
        }
    }

    fn product(variants: Vec<ProductVariant>) -> Product {
        Product {
            id: "p1".to_string(),
            category_id: "c1".to_string(),
            name: "Milk".to_string(),
            images: vec![
                ProductImage {
                    url: "https://img/2".to_string(),
                    sort_order: 2,
                },
                ProductImage {
                    url: "https://img/1".to_string(),
                    sort_order: 1,
                },
            ],
            variants,
            is_active: true,
            status: CatalogStatus::Active,
        }
    }

    #[test]
    fn test_active_variants_filters_inactive() {
        let p = product(vec![variant("v1", 6000, true), variant("v2", 4000, false)]);
        let active = p.active_variants();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "v1");
    }

    #[test]
    fn test_min_price_over_purchasable_only() {
        let p = product(vec![variant("v1", 6000, true), variant("v2", 4000, false)]);
        assert_eq!(p.min_price(), Some(Money::from_paise(6000)));

        let none = product(vec![variant("v1", 6000, false)]);
        assert_eq!(none.min_price(), None);
    }

    #[test]
    fn test_primary_image_is_lowest_sort_order() {
        let p = product(vec![]);
        assert_eq!(p.primary_image().unwrap().url, "https://img/1");
    }

    #[test]
    fn test_variant_display_label_fallback() {
        let mut v = variant("v1", 6000, true);
        assert_eq!(v.display_label(), "1L");
        v.pack_size_label = None;
        assert_eq!(v.display_label(), "Variant v1");
    }

    #[test]
    fn test_order_headline() {
        let order = Order {
            id: 7,
            user_id: "u1".to_string(),
            status: OrderStatus::Placed,
            subtotal: Money::from_paise(22000),
            delivery_fee: Money::zero(),
            total: Money::from_paise(22000),
            created_at: Utc::now(),
            items: vec![
                OrderItem {
                    variant_id: "v1".to_string(),
                    product_name: "Milk".to_string(),
                    variant_label: Some("1L".to_string()),
                    quantity: 3,
                    unit_price: Money::from_paise(6000),
                },
                OrderItem {
                    variant_id: "v2".to_string(),
                    product_name: "Bread".to_string(),
                    variant_label: None,
                    quantity: 1,
                    unit_price: Money::from_paise(4000),
                },
            ],
        };
        assert_eq!(order.total_quantity(), 4);
        assert_eq!(order.headline(), "Milk (1L) + 3 more");
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "out for delivery");
    }

    #[test]
    fn test_order_line_wire_shape() {
        // The order RPC expects {"variantId": ..., "qty": ...}
        let line = OrderLine {
            variant_id: "v1".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"variantId":"v1","qty":2}"#);
    }
}
