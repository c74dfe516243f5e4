//! # Checkout Flow
//!
//! Converts the current cart into a placed cash-on-delivery order through
//! the backend collaborators, with no partial local state ever observable.
//!
//! ## Checkout State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Checkout Attempt                                 │
//! │                                                                         │
//! │  ┌──────┐   guard ok   ┌──────────────┐      ┌──────────────┐          │
//! │  │ Idle │─────────────►│  Resolving   │─────►│  Resolving   │          │
//! │  └──────┘              │  (identity)  │      │  (address)   │          │
//! │     ▲                  └──────┬───────┘      └──────┬───────┘          │
//! │     │                        │ none                │ none              │
//! │     │                        ▼                     ▼                   │
//! │     │                  NotAuthenticated      NoDefaultAddress          │
//! │     │                                               │                  │
//! │     │                  ┌──────────────┐             ▼                  │
//! │     │◄── flag released │  Submitting  │◄──── snapshot cart             │
//! │     │    on EVERY exit └──────┬───────┘                                │
//! │     │                        │                                         │
//! │     │              ┌─────────┴─────────┐                               │
//! │     │              ▼                   ▼                               │
//! │     │          Succeeded            Failed                             │
//! │     │          (clear cart,         (cart untouched,                   │
//! │     │           exactly once)        retry allowed)                    │
//! │     └──────────────┴───────────────────┘                               │
//! │                                                                         │
//! │  Guard: at most one attempt in flight per cart. The busy flag is       │
//! │  released by an RAII guard, so no exit path can leave the flow         │
//! │  permanently busy.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Steps that await the backend are suspension points; the shopper can
//! keep editing the cart meanwhile. The item list is snapshotted at
//! request-build time, so a late local edit can never alter an order that
//! is already on the wire.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use sarukulu_core::{OrderRequest, PlacedOrder};

use crate::backend::{AddressService, IdentityService, OrderService};
use crate::error::CheckoutError;
use crate::state::CartState;

// =============================================================================
// In-Flight Guard
// =============================================================================

/// Releases the busy flag when dropped.
///
/// Drop runs on every exit from `place_order` - success, classified
/// failure, early return or unwind - which is what keeps the flow from
/// ever being stuck busy.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Drives the identity → address → submit sequence for one cart.
///
/// Cheap to clone; clones share the same cart handle and busy flag.
#[derive(Clone)]
pub struct CheckoutFlow {
    identity: Arc<dyn IdentityService>,
    addresses: Arc<dyn AddressService>,
    orders: Arc<dyn OrderService>,
    cart: CartState,
    in_flight: Arc<AtomicBool>,
}

impl CheckoutFlow {
    /// Creates a checkout flow over the given collaborators and cart.
    pub fn new(
        identity: Arc<dyn IdentityService>,
        addresses: Arc<dyn AddressService>,
        orders: Arc<dyn OrderService>,
        cart: CartState,
    ) -> Self {
        CheckoutFlow {
            identity,
            addresses,
            orders,
            cart,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a checkout attempt is currently in flight.
    ///
    /// The UI uses this for the "Placing order…" state on the button.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Places a COD order from the current cart.
    ///
    /// ## Returns
    /// - `Ok(Some(placed))` - order confirmed; the cart has been cleared
    /// - `Ok(None)` - nothing attempted: the cart was empty or another
    ///   attempt was already in flight
    /// - `Err(_)` - a classified failure; the cart is exactly as it was
    ///
    /// ## Behavior
    /// 1. Empty cart or attempt already in flight → no-op
    /// 2. Resolve the signed-in user, else `NotAuthenticated`
    /// 3. Resolve their default address, else `NoDefaultAddress`
    /// 4. Snapshot the cart into `{variant_id, quantity}` lines
    /// 5. Submit atomically; any rejection surfaces the backend's own
    ///    message, and the cart is left untouched
    /// 6. On success clear the cart (exactly once) and return the result
    pub async fn place_order(
        &self,
        notes: Option<String>,
    ) -> Result<Option<PlacedOrder>, CheckoutError> {
        if self.cart.with_cart(|c| c.is_empty()) {
            debug!("checkout skipped: cart is empty");
            return Ok(None);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("checkout skipped: another attempt is in flight");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.in_flight);

        // Step 1: who is buying?
        let user_id = match self.identity.current_user_id().await {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!("checkout failed: no signed-in user");
                return Err(CheckoutError::NotAuthenticated);
            }
            Err(e) => {
                warn!(error = %e, "identity lookup failed during checkout");
                return Err(CheckoutError::Internal(e.to_string()));
            }
        };

        // Step 2: where does it go?
        let address_id = match self.addresses.default_address(&user_id).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!(user_id = %user_id, "checkout failed: no default address");
                return Err(CheckoutError::NoDefaultAddress);
            }
            Err(e) => {
                warn!(error = %e, "address lookup failed during checkout");
                return Err(CheckoutError::Internal(e.to_string()));
            }
        };

        // Step 3: snapshot the cart NOW. Edits made while we await the
        // backend must not leak into an already-submitted order.
        let request = match self
            .cart
            .with_cart(|c| OrderRequest::from_cart(c, address_id, notes))
        {
            Ok(request) => request,
            Err(_) => {
                // Cart drained while we were resolving - nothing to order
                debug!("checkout skipped: cart emptied while resolving");
                return Ok(None);
            }
        };

        // Step 4: one atomic submission. The backend re-prices, persists
        // the order with its lines, or fails the whole thing.
        let placed = match self.orders.submit_order(&request).await {
            Ok(placed) => placed,
            Err(e) => {
                warn!(error = %e, lines = request.lines.len(), "order submission failed");
                return Err(CheckoutError::Submission(e.to_string()));
            }
        };

        // Step 5: reconcile local state. Clearing happens exactly once,
        // only after the backend confirmed the order.
        self.cart.with_cart_mut(|c| c.clear());

        info!(
            order_id = placed.order_id,
            total = %placed.total,
            lines = request.lines.len(),
            "Order placed"
        );

        Ok(Some(placed))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
