//! # Client Error Types
//!
//! Error taxonomy for the storefront client.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Client                             │
//! │                                                                         │
//! │  Frontend                     Rust Client                               │
//! │  ────────                     ───────────                               │
//! │                                                                         │
//! │  storefront.checkout()                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Facade method                                                   │  │
//! │  │  Result<T, StoreError>                                           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Backend unreachable? ── BackendError ─────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Checkout failed? ────── CheckoutError ──────── StoreError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The frontend switches on `code` to pick the next screen:              │
//! │    NO_DEFAULT_ADDRESS  → navigate to the address screen                │
//! │    NOT_AUTHENTICATED   → back to sign-in                               │
//! │    SUBMISSION_FAILED   → show the backend's message verbatim           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use sarukulu_core::{CoreError, ValidationError};

// =============================================================================
// Backend Error
// =============================================================================

/// A failure reported by (or while reaching) a backend collaborator.
///
/// ## Design Principles
/// - `Rejected` carries the service's own message, suitable for display
/// - `Unavailable` covers transport-level trouble (offline, timeout)
/// - All variants are `Send + Sync` for async compatibility
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The service processed the request and said no.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or timed out.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something the client cannot interpret.
    #[error("Unexpected backend response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Classified outcome of a failed checkout attempt.
///
/// Every failure leaves the cart exactly as it was; the shopper can fix
/// the cause (sign in, add an address) and try again.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    /// No authenticated user could be resolved.
    #[error("Not signed in. Please sign in again.")]
    NotAuthenticated,

    /// The user has no address flagged as default.
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "Proceed to Checkout"
    ///      │
    ///      ▼
    /// default_address(user) → None
    ///      │
    ///      ▼
    /// NoDefaultAddress → UI offers "Go to Address" navigation
    /// ```
    #[error("Please add a default address before checkout.")]
    NoDefaultAddress,

    /// The order service rejected or could not complete the atomic
    /// submission. Displays the collaborator's message verbatim.
    #[error("{0}")]
    Submission(String),

    /// An unexpected collaborator fault, recovered at the checkout
    /// boundary instead of crashing the event handler.
    #[error("Checkout error: {0}")]
    Internal(String),
}

// =============================================================================
// Store Error (facade boundary)
// =============================================================================

/// Error returned from storefront facade methods.
///
/// ## Serialization
/// This is what the frontend receives when a call fails:
/// ```json
/// {
///   "code": "NO_DEFAULT_ADDRESS",
///   "message": "Please add a default address before checkout."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for facade responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No signed-in user
    NotAuthenticated,

    /// No default delivery address on file
    NoDefaultAddress,

    /// The order service refused the atomic submission
    SubmissionFailed,

    /// Input validation failed
    ValidationError,

    /// A backend collaborator failed or was unreachable
    BackendError,

    /// Resource not found
    NotFound,

    /// Anything unexpected, recovered and reported
    Internal,
}

impl StoreError {
    /// Creates a new store error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        StoreError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        StoreError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::new(ErrorCode::Internal, message)
    }
}

/// Converts checkout failures, preserving the distinct code per kind.
impl From<CheckoutError> for StoreError {
    fn from(err: CheckoutError) -> Self {
        let code = match err {
            CheckoutError::NotAuthenticated => ErrorCode::NotAuthenticated,
            CheckoutError::NoDefaultAddress => ErrorCode::NoDefaultAddress,
            CheckoutError::Submission(_) => ErrorCode::SubmissionFailed,
            CheckoutError::Internal(_) => ErrorCode::Internal,
        };
        StoreError::new(code, err.to_string())
    }
}

/// Converts backend collaborator errors.
impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected(message) => StoreError::new(ErrorCode::BackendError, message),
            other => {
                // Log the transport detail, show a generic message
                tracing::error!("Backend call failed: {}", other);
                StoreError::new(
                    ErrorCode::BackendError,
                    "Could not reach the store. Please try again.",
                )
            }
        }
    }
}

/// Converts core domain errors.
impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => StoreError::validation("Cart is empty"),
            CoreError::Validation(e) => StoreError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors directly (address form, notes).
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::validation(err.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_codes_are_distinct() {
        let cases = [
            (CheckoutError::NotAuthenticated, ErrorCode::NotAuthenticated),
            (CheckoutError::NoDefaultAddress, ErrorCode::NoDefaultAddress),
            (
                CheckoutError::Submission("variant out of stock".into()),
                ErrorCode::SubmissionFailed,
            ),
            (CheckoutError::Internal("boom".into()), ErrorCode::Internal),
        ];
        for (err, code) in cases {
            assert_eq!(StoreError::from(err).code, code);
        }
    }

    #[test]
    fn test_submission_message_is_verbatim() {
        let err = CheckoutError::Submission("variant v9 not found".into());
        let store: StoreError = err.into();
        assert_eq!(store.message, "variant v9 not found");
    }

    #[test]
    fn test_store_error_serialization() {
        let err = StoreError::new(ErrorCode::NoDefaultAddress, "Please add a default address");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":\"NO_DEFAULT_ADDRESS\""));
    }
}
