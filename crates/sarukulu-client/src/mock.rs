//! # In-Memory Backend
//!
//! A complete in-memory implementation of every collaborator trait, for
//! tests and local development without a real backend.
//!
//! Use [`InMemoryBackend::demo`] for a seeded catalog, then the helpers
//! ([`InMemoryBackend::sign_in`], [`InMemoryBackend::fail_next_submission`],
//! [`InMemoryBackend::gate_submissions`]) to script scenarios.
//!
//! ## Fidelity Notes
//! The mock mirrors the real backend's contract, not just its happy path:
//! - `submit_order` is atomic: it re-validates every line and prices it
//!   from the seeded catalog; any bad line fails the whole submission and
//!   persists nothing
//! - The first saved address becomes the default automatically
//! - At most one address per user is flagged default

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Notify;
use uuid::Uuid;

use sarukulu_core::{
    Address, CatalogStatus, Category, Money, NewAddress, Order, OrderItem, OrderRequest,
    OrderStatus, PlacedOrder, Product, ProductImage, ProductVariant,
};

use crate::backend::{
    AddressService, BackendResult, CatalogService, IdentityService, OrderService,
};
use crate::error::BackendError;

// =============================================================================
// State
// =============================================================================

#[derive(Default)]
struct Inner {
    user_id: Option<String>,
    categories: Vec<Category>,
    products: Vec<Product>,
    addresses: Vec<Address>,
    orders: Vec<Order>,
    fail_next_submission: Option<String>,
    submit_gate: Option<Arc<Notify>>,
}

/// In-memory stand-in for the remote backend.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct InMemoryBackend {
    inner: Arc<Mutex<Inner>>,
    next_order_id: Arc<AtomicI64>,
}

impl InMemoryBackend {
    /// Creates an empty backend: no session, no catalog, no addresses.
    pub fn new() -> Self {
        InMemoryBackend {
            inner: Arc::new(Mutex::new(Inner::default())),
            next_order_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Creates a backend seeded with the demo catalog:
    /// Dairy (Milk 1L ₹60 = variant `v1`) and Bakery (Bread ₹40 = `v2`).
    pub fn demo() -> Self {
        let backend = InMemoryBackend::new();
        backend.seed_category("cat-dairy", "Dairy", 1);
        backend.seed_category("cat-bakery", "Bakery", 2);
        backend.seed_product(
            "p-milk",
            "cat-dairy",
            "Milk",
            vec![("v1", "Milk 1L", Some("1L"), 6000)],
        );
        backend.seed_product(
            "p-bread",
            "cat-bakery",
            "Bread",
            vec![("v2", "Bread Loaf", None, 4000)],
        );
        backend
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("backend mutex poisoned")
    }

    // -------------------------------------------------------------------------
    // Session scripting
    // -------------------------------------------------------------------------

    /// Signs a user in; subsequent identity lookups resolve to this id.
    pub fn sign_in(&self, user_id: impl Into<String>) {
        self.lock().user_id = Some(user_id.into());
    }

    /// Ends the session.
    pub fn sign_out(&self) {
        self.lock().user_id = None;
    }

    // -------------------------------------------------------------------------
    // Catalog seeding
    // -------------------------------------------------------------------------

    /// Adds an active category.
    pub fn seed_category(&self, id: &str, name: &str, sort_order: i64) {
        self.lock().categories.push(Category {
            id: id.to_string(),
            name: name.to_string(),
            image_url: None,
            sort_order,
            is_active: true,
        });
    }

    /// Adds an active product with `(variant_id, name, pack_size, paise)` variants.
    pub fn seed_product(
        &self,
        id: &str,
        category_id: &str,
        name: &str,
        variants: Vec<(&str, &str, Option<&str>, i64)>,
    ) {
        let product = Product {
            id: id.to_string(),
            category_id: category_id.to_string(),
            name: name.to_string(),
            images: vec![ProductImage {
                url: format!("https://img.sarukulu.in/{}.jpg", id),
                sort_order: 1,
            }],
            variants: variants
                .into_iter()
                .map(|(vid, vname, pack, paise)| ProductVariant {
                    id: vid.to_string(),
                    product_id: id.to_string(),
                    name: vname.to_string(),
                    pack_size_label: pack.map(|p| p.to_string()),
                    price: Money::from_paise(paise),
                    is_active: true,
                    status: CatalogStatus::Active,
                })
                .collect(),
            is_active: true,
            status: CatalogStatus::Active,
        };
        self.lock().products.push(product);
    }

    // -------------------------------------------------------------------------
    // Failure scripting
    // -------------------------------------------------------------------------

    /// The next `submit_order` call fails with this message, then the
    /// backend behaves normally again.
    pub fn fail_next_submission(&self, message: impl Into<String>) {
        self.lock().fail_next_submission = Some(message.into());
    }

    /// Makes every `submit_order` call wait on the returned gate before
    /// proceeding, so tests can hold a checkout mid-flight deterministically.
    pub fn gate_submissions(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().submit_gate = Some(gate.clone());
        gate
    }

    /// Overrides the id the next placed order receives.
    pub fn set_next_order_id(&self, id: i64) {
        self.next_order_id.store(id, Ordering::SeqCst);
    }

    /// Number of orders the backend has persisted.
    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }
}

// =============================================================================
// IdentityService
// =============================================================================

#[async_trait]
impl IdentityService for InMemoryBackend {
    async fn current_user_id(&self) -> BackendResult<Option<String>> {
        Ok(self.lock().user_id.clone())
    }
}

// =============================================================================
// AddressService
// =============================================================================

#[async_trait]
impl AddressService for InMemoryBackend {
    async fn default_address(&self, user_id: &str) -> BackendResult<Option<String>> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .find(|a| a.user_id == user_id && a.is_default)
            .map(|a| a.id.clone()))
    }

    async fn addresses(&self, user_id: &str) -> BackendResult<Vec<Address>> {
        let mut list: Vec<Address> = self
            .lock()
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // Default first, then newest first
        list.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(list)
    }

    async fn add_address(&self, user_id: &str, address: NewAddress) -> BackendResult<Address> {
        let mut inner = self.lock();
        let is_first = !inner.addresses.iter().any(|a| a.user_id == user_id);
        let saved = Address {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: address.name,
            phone: address.phone,
            line1: address.line1,
            line2: address.line2,
            landmark: address.landmark,
            city: address.city,
            pincode: address.pincode,
            is_default: is_first,
            created_at: Utc::now(),
        };
        inner.addresses.push(saved.clone());
        Ok(saved)
    }

    async fn make_default(&self, user_id: &str, address_id: &str) -> BackendResult<()> {
        let mut inner = self.lock();
        if !inner
            .addresses
            .iter()
            .any(|a| a.user_id == user_id && a.id == address_id)
        {
            return Err(BackendError::Rejected(format!(
                "address {} not found",
                address_id
            )));
        }
        for a in inner.addresses.iter_mut().filter(|a| a.user_id == user_id) {
            a.is_default = a.id == address_id;
        }
        Ok(())
    }

    async fn remove_address(&self, user_id: &str, address_id: &str) -> BackendResult<()> {
        let mut inner = self.lock();
        let before = inner.addresses.len();
        inner
            .addresses
            .retain(|a| !(a.user_id == user_id && a.id == address_id));
        if inner.addresses.len() == before {
            return Err(BackendError::Rejected(format!(
                "address {} not found",
                address_id
            )));
        }
        Ok(())
    }
}

// =============================================================================
// OrderService
// =============================================================================

#[async_trait]
impl OrderService for InMemoryBackend {
    async fn submit_order(&self, request: &OrderRequest) -> BackendResult<PlacedOrder> {
        // Hold here if a test gated submissions (outside the lock!)
        let gate = self.lock().submit_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut inner = self.lock();

        if let Some(message) = inner.fail_next_submission.take() {
            return Err(BackendError::Rejected(message));
        }

        let Some(user_id) = inner.user_id.clone() else {
            return Err(BackendError::Rejected("no active session".to_string()));
        };

        // Re-validate and re-price every line before persisting anything:
        // one bad line fails the whole submission.
        let mut items = Vec::with_capacity(request.lines.len());
        let mut subtotal = Money::zero();
        for line in &request.lines {
            if line.quantity <= 0 {
                return Err(BackendError::Rejected(format!(
                    "invalid quantity for variant {}",
                    line.variant_id
                )));
            }
            let found = inner.products.iter().find_map(|p| {
                p.variants
                    .iter()
                    .find(|v| v.id == line.variant_id)
                    .map(|v| (p, v))
            });
            let Some((product, variant)) = found else {
                return Err(BackendError::Rejected(format!(
                    "variant {} not found",
                    line.variant_id
                )));
            };
            subtotal += variant.price.multiply_quantity(line.quantity);
            items.push(OrderItem {
                variant_id: variant.id.clone(),
                product_name: product.name.clone(),
                variant_label: variant.pack_size_label.clone(),
                quantity: line.quantity,
                unit_price: variant.price,
            });
        }

        let delivery_fee = Money::zero();
        let total = subtotal + delivery_fee;
        let order_id = self.next_order_id.fetch_add(1, Ordering::SeqCst);

        inner.orders.push(Order {
            id: order_id,
            user_id,
            status: OrderStatus::Placed,
            subtotal,
            delivery_fee,
            total,
            created_at: Utc::now(),
            items,
        });

        Ok(PlacedOrder { order_id, total })
    }

    async fn orders_for(&self, user_id: &str) -> BackendResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .lock()
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }
}

// =============================================================================
// CatalogService
// =============================================================================

#[async_trait]
impl CatalogService for InMemoryBackend {
    async fn categories(&self) -> BackendResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .lock()
            .categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.sort_order);
        Ok(categories)
    }

    async fn products_in_category(&self, category_id: &str) -> BackendResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .lock()
            .products
            .iter()
            .filter(|p| {
                p.category_id == category_id && p.is_active && p.status == CatalogStatus::Active
            })
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
