//! # Backend Collaborator Traits
//!
//! The backend capabilities the client consumes, as object-safe async
//! traits. The client is agnostic to their transport: production wires
//! them to the remote API, tests wire them to [`crate::mock`].
//!
//! ## Capability Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend Capabilities                                 │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │ IdentityService │  │ AddressService  │  │  OrderService           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ current_user_id │  │ default_address │  │  submit_order (atomic)  │ │
//! │  │                 │  │ addresses       │  │  orders_for             │ │
//! │  │                 │  │ add_address     │  │                         │ │
//! │  │                 │  │ make_default    │  │                         │ │
//! │  │                 │  │ remove_address  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │ CatalogService  │  categories, products_in_category                 │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  The backend owns ALL durable state. Nothing in the client persists.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use sarukulu_core::{Address, Category, NewAddress, Order, OrderRequest, PlacedOrder, Product};

use crate::error::BackendError;

/// Result type alias for collaborator calls.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Identity
// =============================================================================

/// Resolves the authenticated user for the current session.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// The signed-in user's id, or `None` when no session exists
    /// (signed out, or the session expired under us).
    async fn current_user_id(&self) -> BackendResult<Option<String>>;
}

// =============================================================================
// Addresses
// =============================================================================

/// The user's saved delivery addresses.
#[async_trait]
pub trait AddressService: Send + Sync {
    /// The id of the address flagged as default, if any.
    ///
    /// The backend guarantees at most one default per user; this is the
    /// delivery target checkout resolves.
    async fn default_address(&self, user_id: &str) -> BackendResult<Option<String>>;

    /// All saved addresses, default first, then newest first.
    async fn addresses(&self, user_id: &str) -> BackendResult<Vec<Address>>;

    /// Saves a new address and returns it.
    ///
    /// The first address a user saves becomes their default automatically.
    async fn add_address(&self, user_id: &str, address: NewAddress) -> BackendResult<Address>;

    /// Flags `address_id` as the single default for this user.
    async fn make_default(&self, user_id: &str, address_id: &str) -> BackendResult<()>;

    /// Deletes an address. Deleting someone else's address is rejected.
    async fn remove_address(&self, user_id: &str, address_id: &str) -> BackendResult<()>;
}

// =============================================================================
// Orders
// =============================================================================

/// Order submission and history.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submits an order as a single all-or-nothing operation.
    ///
    /// The service re-validates variant availability, prices every line
    /// server-side, computes subtotal/delivery fee/total, persists the
    /// order with its lines, and returns the order number and grand
    /// total - or fails the entire submission. There is no partial
    /// commit and no per-line retry.
    async fn submit_order(&self, request: &OrderRequest) -> BackendResult<PlacedOrder>;

    /// The user's order history, newest first.
    async fn orders_for(&self, user_id: &str) -> BackendResult<Vec<Order>>;
}

// =============================================================================
// Catalog
// =============================================================================

/// Read-only catalog browsing.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Active categories, ascending by sort order.
    async fn categories(&self) -> BackendResult<Vec<Category>>;

    /// Active products in a category, ascending by name.
    ///
    /// Products come back with ALL their variants; the facade filters to
    /// purchasable ones for display.
    async fn products_in_category(&self, category_id: &str) -> BackendResult<Vec<Product>>;
}
