//! # Sarukulu Client Library
//!
//! Headless storefront client: session state, backend collaborator traits
//! and the checkout flow, behind one facade the mobile screens call.
//!
//! ## Module Organization
//! ```text
//! sarukulu_client/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Shared cart handle (Arc<Mutex<Cart>>)
//! │   └── config.rs   ◄─── Store configuration
//! ├── backend.rs      ◄─── Collaborator traits (identity/address/order/catalog)
//! ├── checkout.rs     ◄─── The checkout flow (guarded, atomic)
//! ├── storefront.rs   ◄─── Facade the screens call
//! ├── mock.rs         ◄─── In-memory backend for tests & local dev
//! └── error.rs        ◄─── BackendError / CheckoutError / StoreError
//! ```
//!
//! ## Typical Wiring
//! ```rust
//! use std::sync::Arc;
//! use sarukulu_client::mock::InMemoryBackend;
//! use sarukulu_client::state::StoreConfig;
//! use sarukulu_client::storefront::Storefront;
//!
//! let backend = InMemoryBackend::demo();
//! backend.sign_in("user-1");
//!
//! let store = Storefront::new(
//!     Arc::new(backend.clone()),
//!     Arc::new(backend.clone()),
//!     Arc::new(backend.clone()),
//!     Arc::new(backend),
//!     StoreConfig::default(),
//! );
//! assert!(store.cart().items.is_empty());
//! ```
//!
//! Production wiring replaces the mock with adapters over the real backend
//! API; the facade and the checkout flow do not change.

pub mod backend;
pub mod checkout;
pub mod error;
pub mod mock;
pub mod state;
pub mod storefront;

pub use backend::{AddressService, BackendResult, CatalogService, IdentityService, OrderService};
pub use checkout::CheckoutFlow;
pub use error::{BackendError, CheckoutError, ErrorCode, StoreError};
pub use state::{CartState, StoreConfig};
pub use storefront::{CartAdd, CartView, ProductCard, Storefront, VariantChip};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Call once at host-app startup, before constructing a [`Storefront`].
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sarukulu=trace` - Show trace for sarukulu crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sarukulu=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
