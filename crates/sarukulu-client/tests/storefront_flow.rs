//! End-to-end storefront journey over the in-memory backend:
//! browse → fill cart → checkout blocked on address → fix → order placed.

use std::sync::Arc;

use sarukulu_client::mock::InMemoryBackend;
use sarukulu_client::{CartAdd, ErrorCode, StoreConfig, Storefront};
use sarukulu_core::{Money, NewAddress, OrderStatus};

fn storefront_over(backend: &InMemoryBackend) -> Storefront {
    Storefront::new(
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        Arc::new(backend.clone()),
        StoreConfig::default(),
    )
}

fn chip_to_cart_add(card: &sarukulu_client::ProductCard, index: usize, quantity: i64) -> CartAdd {
    let chip = &card.variants[index];
    CartAdd {
        variant_id: chip.variant_id.clone(),
        name: card.name.clone(),
        label: Some(chip.label.clone()),
        unit_price: chip.price,
        quantity,
    }
}

#[tokio::test]
async fn shopper_journey_from_browse_to_placed_order() {
    let backend = InMemoryBackend::demo();
    backend.sign_in("u1");
    backend.set_next_order_id(42);
    let store = storefront_over(&backend);

    // Browse the landing grid
    let categories = store.categories().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Dairy");

    // Open Dairy, tap the Milk 1L chip three times' worth
    let dairy = store.products_in_category(&categories[0].id).await.unwrap();
    let milk = &dairy[0];
    store.add_to_cart(chip_to_cart_add(milk, 0, 1));
    store.add_to_cart(chip_to_cart_add(milk, 0, 2));

    // Open Bakery, add a loaf of bread
    let bakery = store.products_in_category(&categories[1].id).await.unwrap();
    store.add_to_cart(chip_to_cart_add(&bakery[0], 0, 1));

    let cart = store.cart();
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.totals.total_quantity, 4);
    assert_eq!(cart.totals.subtotal, Money::from_paise(22000)); // ₹220.00

    // Checkout is blocked: no delivery address yet
    let err = store.checkout(None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NoDefaultAddress);
    assert_eq!(store.cart().items.len(), 2);

    // Save an address (first one becomes the default automatically)
    let saved = store
        .add_address(NewAddress {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            line1: "12-3 Beach Road".to_string(),
            line2: None,
            landmark: Some("Opp. water tank".to_string()),
            city: "Visakhapatnam".to_string(),
            pincode: "530001".to_string(),
        })
        .await
        .unwrap();
    assert!(saved.is_default);

    // Retry: the order goes through and the cart resets
    let placed = store
        .checkout(Some("Ring the bell twice".to_string()))
        .await
        .unwrap()
        .expect("order should be attempted");
    assert_eq!(placed.order_id, 42);
    assert_eq!(placed.total, Money::from_paise(22000));
    assert!(store.cart().items.is_empty());
    assert!(!store.is_checkout_in_flight());

    // The order shows up in history with frozen display data
    let orders = store.my_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.id, 42);
    assert_eq!(order.status, OrderStatus::Placed);
    assert_eq!(order.total, Money::from_paise(22000));
    assert_eq!(order.total_quantity(), 4);
    assert_eq!(order.headline(), "Milk (1L) + 3 more");
}

#[tokio::test]
async fn failed_submission_keeps_the_cart_for_a_retry() {
    let backend = InMemoryBackend::demo();
    backend.sign_in("u1");
    let store = storefront_over(&backend);

    store
        .add_address(NewAddress {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            line1: "12-3 Beach Road".to_string(),
            line2: None,
            landmark: None,
            city: "Visakhapatnam".to_string(),
            pincode: "530001".to_string(),
        })
        .await
        .unwrap();

    store.add_to_cart(CartAdd {
        variant_id: "v1".to_string(),
        name: "Milk".to_string(),
        label: Some("1L".to_string()),
        unit_price: Money::from_paise(6000),
        quantity: 3,
    });

    backend.fail_next_submission("store is closed right now");
    let err = store.checkout(None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SubmissionFailed);
    assert_eq!(err.message, "store is closed right now");
    assert_eq!(store.cart().totals.total_quantity, 3);

    // Same cart, next attempt succeeds
    let placed = store.checkout(None).await.unwrap().unwrap();
    assert_eq!(placed.total, Money::from_paise(18000));
    assert!(store.cart().items.is_empty());
}
