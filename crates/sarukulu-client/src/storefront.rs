//! # Storefront Facade
//!
//! The single entry point the mobile screens call. Each method mirrors a
//! screen interaction and returns a serializable response or a
//! [`StoreError`] the frontend can route on.
//!
//! ## Screen → Facade Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Facade                                    │
//! │                                                                         │
//! │  Screen                  Facade Call              Backing               │
//! │  ──────                  ───────────              ───────               │
//! │  Categories grid ──────► categories()           CatalogService         │
//! │  Product list ─────────► products_in_category() CatalogService         │
//! │  Variant chip tap ─────► add_to_cart()          CartState              │
//! │  Cart +1 / Remove ─────► update/remove/clear    CartState              │
//! │  Proceed to Checkout ──► checkout()             CheckoutFlow           │
//! │  Address screen ───────► addresses(), add_…     AddressService         │
//! │  My Orders ────────────► my_orders()            OrderService           │
//! │                                                                         │
//! │  Cart calls are synchronous and infallible; everything touching the    │
//! │  backend is async and returns Result<_, StoreError>.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sarukulu_core::validation::{validate_new_address, validate_notes, validate_uuid};
use sarukulu_core::{
    Address, Cart, CartItem, CartTotals, Category, Money, NewAddress, Order, PlacedOrder, Product,
};

use crate::backend::{AddressService, CatalogService, IdentityService, OrderService};
use crate::checkout::CheckoutFlow;
use crate::error::{ErrorCode, StoreError};
use crate::state::{CartState, StoreConfig};

// =============================================================================
// Facade DTOs
// =============================================================================

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Payload for a variant-chip tap: everything the cart snapshot needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAdd {
    pub variant_id: String,
    pub name: String,
    pub label: Option<String>,
    pub unit_price: Money,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// A variant chip on the product card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantChip {
    pub variant_id: String,
    pub label: String,
    pub price: Money,
}

/// A product card, shaped for the product list screen:
/// only purchasable variants, primary image, "from ₹X" price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub product_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub min_price: Option<Money>,
    pub variants: Vec<VariantChip>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        ProductCard {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image_url: product.primary_image().map(|img| img.url.clone()),
            min_price: product.min_price(),
            variants: product
                .active_variants()
                .into_iter()
                .map(|v| VariantChip {
                    variant_id: v.id.clone(),
                    label: v.display_label().to_string(),
                    price: v.price,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Storefront
// =============================================================================

/// The headless storefront a host app drives.
///
/// Construction wires the four backend capabilities to one session cart;
/// cloning shares both.
#[derive(Clone)]
pub struct Storefront {
    identity: Arc<dyn IdentityService>,
    addresses: Arc<dyn AddressService>,
    orders: Arc<dyn OrderService>,
    catalog: Arc<dyn CatalogService>,
    cart: CartState,
    checkout: CheckoutFlow,
    config: StoreConfig,
}

impl Storefront {
    /// Creates a storefront session over the given collaborators.
    pub fn new(
        identity: Arc<dyn IdentityService>,
        addresses: Arc<dyn AddressService>,
        orders: Arc<dyn OrderService>,
        catalog: Arc<dyn CatalogService>,
        config: StoreConfig,
    ) -> Self {
        let cart = CartState::new();
        let checkout = CheckoutFlow::new(
            identity.clone(),
            addresses.clone(),
            orders.clone(),
            cart.clone(),
        );
        Storefront {
            identity,
            addresses,
            orders,
            catalog,
            cart,
            checkout,
            config,
        }
    }

    /// The store configuration this session runs with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Direct handle to the session cart (for host-side observers).
    pub fn cart_state(&self) -> &CartState {
        &self.cart
    }

    /// Resolves the signed-in user or fails with a routable error.
    async fn require_user(&self) -> Result<String, StoreError> {
        match self.identity.current_user_id().await {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(StoreError::new(
                ErrorCode::NotAuthenticated,
                "Not signed in. Please sign in again.",
            )),
            Err(e) => Err(e.into()),
        }
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Active categories for the landing grid.
    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        debug!("categories");
        Ok(self.catalog.categories().await?)
    }

    /// Product cards for a category: purchasable variants only, primary
    /// image first, cheapest-variant price for the "from ₹X" line.
    pub async fn products_in_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<ProductCard>, StoreError> {
        debug!(category_id = %category_id, "products_in_category");
        let products = self.catalog.products_in_category(category_id).await?;
        Ok(products.iter().map(ProductCard::from).collect())
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Gets the current cart contents.
    pub fn cart(&self) -> CartView {
        debug!("cart");
        self.cart.with_cart(|c| CartView::from(c))
    }

    /// Adds a variant to the cart.
    ///
    /// ## Behavior
    /// - Already in cart: quantity increases, first-add price kept
    /// - Not in cart: added at the end
    /// - Never fails; malformed input degrades to safe defaults
    pub fn add_to_cart(&self, add: CartAdd) -> CartView {
        debug!(variant_id = %add.variant_id, quantity = %add.quantity, "add_to_cart");
        self.cart.with_cart_mut(|c| {
            c.add_item(add.variant_id, add.name, add.label, add.unit_price, add.quantity);
            CartView::from(&*c)
        })
    }

    /// Sets the quantity of a cart item (0 removes it).
    pub fn update_cart_item(&self, variant_id: &str, quantity: i64) -> CartView {
        debug!(variant_id = %variant_id, quantity = %quantity, "update_cart_item");
        self.cart.with_cart_mut(|c| {
            c.set_quantity(variant_id, quantity);
            CartView::from(&*c)
        })
    }

    /// Removes an item from the cart.
    pub fn remove_from_cart(&self, variant_id: &str) -> CartView {
        debug!(variant_id = %variant_id, "remove_from_cart");
        self.cart.with_cart_mut(|c| {
            c.remove_item(variant_id);
            CartView::from(&*c)
        })
    }

    /// Clears all items from the cart.
    pub fn clear_cart(&self) -> CartView {
        debug!("clear_cart");
        self.cart.with_cart_mut(|c| {
            c.clear();
            CartView::from(&*c)
        })
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Places a COD order from the current cart.
    ///
    /// `Ok(None)` means nothing was attempted (empty cart, or an attempt
    /// already in flight). Failure codes are routable: the frontend sends
    /// `NO_DEFAULT_ADDRESS` to the address screen and shows
    /// `SUBMISSION_FAILED` messages verbatim.
    pub async fn checkout(
        &self,
        notes: Option<String>,
    ) -> Result<Option<PlacedOrder>, StoreError> {
        debug!("checkout");
        if let Some(notes) = &notes {
            validate_notes(notes)?;
        }
        Ok(self.checkout.place_order(notes).await?)
    }

    /// Whether a checkout attempt is currently in flight.
    pub fn is_checkout_in_flight(&self) -> bool {
        self.checkout.is_in_flight()
    }

    // -------------------------------------------------------------------------
    // Addresses
    // -------------------------------------------------------------------------

    /// The signed-in user's addresses, default first.
    pub async fn addresses(&self) -> Result<Vec<Address>, StoreError> {
        debug!("addresses");
        let user_id = self.require_user().await?;
        Ok(self.addresses.addresses(&user_id).await?)
    }

    /// Validates and saves a new address.
    ///
    /// The backend makes a user's first address their default.
    pub async fn add_address(&self, address: NewAddress) -> Result<Address, StoreError> {
        debug!("add_address");
        validate_new_address(&address)?;
        let user_id = self.require_user().await?;
        Ok(self.addresses.add_address(&user_id, address).await?)
    }

    /// Flags an address as the delivery default.
    pub async fn make_default_address(&self, address_id: &str) -> Result<(), StoreError> {
        debug!(address_id = %address_id, "make_default_address");
        validate_uuid(address_id)?;
        let user_id = self.require_user().await?;
        Ok(self.addresses.make_default(&user_id, address_id).await?)
    }

    /// Deletes an address.
    pub async fn remove_address(&self, address_id: &str) -> Result<(), StoreError> {
        debug!(address_id = %address_id, "remove_address");
        validate_uuid(address_id)?;
        let user_id = self.require_user().await?;
        Ok(self.addresses.remove_address(&user_id, address_id).await?)
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// The signed-in user's order history, newest first.
    pub async fn my_orders(&self) -> Result<Vec<Order>, StoreError> {
        debug!("my_orders");
        let user_id = self.require_user().await?;
        Ok(self.orders.orders_for(&user_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InMemoryBackend;

    fn storefront_over(backend: &InMemoryBackend) -> Storefront {
        Storefront::new(
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            StoreConfig::default(),
        )
    }

    fn milk_add() -> CartAdd {
        CartAdd {
            variant_id: "v1".to_string(),
            name: "Milk".to_string(),
            label: Some("1L".to_string()),
            unit_price: Money::from_paise(6000),
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_product_cards_are_shaped_for_display() {
        let backend = InMemoryBackend::demo();
        let store = storefront_over(&backend);

        let cards = store.products_in_category("cat-dairy").await.unwrap();
        assert_eq!(cards.len(), 1);
        let milk = &cards[0];
        assert_eq!(milk.name, "Milk");
        assert_eq!(milk.min_price, Some(Money::from_paise(6000)));
        assert_eq!(milk.variants.len(), 1);
        assert_eq!(milk.variants[0].label, "1L");
        assert!(milk.image_url.is_some());
    }

    #[tokio::test]
    async fn test_cart_round_trip_through_facade() {
        let backend = InMemoryBackend::demo();
        let store = storefront_over(&backend);

        let view = store.add_to_cart(milk_add());
        assert_eq!(view.totals.total_quantity, 1);

        let view = store.add_to_cart(milk_add());
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.totals.subtotal, Money::from_paise(12000));

        let view = store.update_cart_item("v1", 5);
        assert_eq!(view.totals.total_quantity, 5);

        let view = store.remove_from_cart("v1");
        assert!(view.items.is_empty());
        assert_eq!(view.totals.subtotal, Money::zero());
    }

    #[tokio::test]
    async fn test_addresses_require_sign_in() {
        let backend = InMemoryBackend::demo();
        let store = storefront_over(&backend);

        let err = store.addresses().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_add_address_validates_before_backend() {
        let backend = InMemoryBackend::demo();
        backend.sign_in("u1");
        let store = storefront_over(&backend);

        let err = store
            .add_address(NewAddress {
                name: "Asha Rao".to_string(),
                phone: "12".to_string(), // too short
                line1: "12-3 Beach Road".to_string(),
                line2: None,
                landmark: None,
                city: "Visakhapatnam".to_string(),
                pincode: "530001".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.addresses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_routes_no_default_address() {
        let backend = InMemoryBackend::demo();
        backend.sign_in("u1");
        let store = storefront_over(&backend);
        store.add_to_cart(milk_add());

        let err = store.checkout(None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoDefaultAddress);
        // Cart kept for the retry after the address is added
        assert_eq!(store.cart().items.len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_rejects_oversized_notes() {
        let backend = InMemoryBackend::demo();
        backend.sign_in("u1");
        let store = storefront_over(&backend);
        store.add_to_cart(milk_add());

        let notes = "x".repeat(sarukulu_core::MAX_NOTES_LEN + 1);
        let err = store.checkout(Some(notes)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
