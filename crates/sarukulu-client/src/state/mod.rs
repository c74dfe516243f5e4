//! # State Module
//!
//! Session-scoped state for the storefront client.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Can construct individual states in isolation
//! 3. **Clearer Signatures**: Components declare exactly what state they need
//! 4. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┐        ┌──────────────────┐              │
//! │          │    CartState     │        │   StoreConfig    │              │
//! │          │                  │        │                  │              │
//! │          │  Arc<Mutex<      │        │  store_name      │              │
//! │          │    Cart          │        │  currency        │              │
//! │          │  >>              │        │  notes limit     │              │
//! │          └──────────────────┘        └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • StoreConfig: Read-only after initialization                         │
//! │                                                                         │
//! │  LIFETIME: both live exactly as long as the signed-in session.         │
//! │  Nothing here survives a process restart - the backend owns all        │
//! │  durable state.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::StoreConfig;
