//! # sarukulu-core: Pure Business Logic for the Sarukulu Storefront
//!
//! This crate is the **heart** of the Sarukulu client. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sarukulu Client Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile Frontend (screens)                    │   │
//! │  │   Categories ──► Products ──► Cart ──► Checkout ──► Orders     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ storefront facade                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sarukulu-client                              │   │
//! │  │    CartState, CheckoutFlow, collaborator traits                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sarukulu-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Catalog  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Orders   │  │  ₹ paise  │  │ CartItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SESSION STATE • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Address, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart aggregate and its reducer operations
//! - [`error`] - Domain error types
//! - [`validation`] - Form input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system and session access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Infallible Cart**: the cart reducer sanitizes bad input instead of
//!    erroring - it is driven straight from UI event handlers
//!
//! ## Example Usage
//!
//! ```rust
//! use sarukulu_core::cart::Cart;
//! use sarukulu_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add_item("v1", "Milk", Some("1L".into()), Money::from_paise(6000), 1);
//! cart.add_item("v1", "Milk", Some("1L".into()), Money::from_paise(6000), 2);
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total_quantity(), 3);
//! assert_eq!(cart.subtotal(), Money::from_paise(18000)); // ₹180.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sarukulu_core::Money` instead of
// `use sarukulu_core::money::Money`

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of the free-text delivery notes attached to an order.
///
/// Matches the backend column bound so a request never fails server-side
/// for a limit the client could have enforced locally.
pub const MAX_NOTES_LEN: usize = 500;
