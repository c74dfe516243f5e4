//! # Validation Module
//!
//! Input validation for user-entered data before it leaves the client.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (form state)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback (save button disabled)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (client core)                                    │
//! │  └── The same rules, enforced even if a screen forgets them            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend (row-level security + constraints)                   │
//! │                                                                         │
//! │  NOTE: Cart mutations are NOT validated here. The cart reducer         │
//! │        sanitizes its own inputs and never fails.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sarukulu_core::validation::{validate_pincode, validate_phone};
//!
//! validate_pincode("530001").unwrap();
//! validate_phone("+91 98765 43210").unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::NewAddress;
use crate::MAX_NOTES_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a recipient name on an address form.
///
/// ## Rules
/// - Must not be empty
/// - Must be at least 2 characters after trimming
pub fn validate_recipient_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() < 2 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        });
    }

    Ok(())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - At least 10 digits once formatting characters are stripped
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();

    if digits == 0 {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if digits < 10 {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 10,
        });
    }

    Ok(())
}

/// Validates the first address line.
///
/// ## Rules
/// - Must not be empty
/// - Must be at least 3 characters after trimming
pub fn validate_address_line(line1: &str) -> ValidationResult<()> {
    let line1 = line1.trim();

    if line1.is_empty() {
        return Err(ValidationError::Required {
            field: "line1".to_string(),
        });
    }

    if line1.len() < 3 {
        return Err(ValidationError::TooShort {
            field: "line1".to_string(),
            min: 3,
        });
    }

    Ok(())
}

/// Validates a city name.
pub fn validate_city(city: &str) -> ValidationResult<()> {
    let city = city.trim();

    if city.is_empty() {
        return Err(ValidationError::Required {
            field: "city".to_string(),
        });
    }

    if city.len() < 2 {
        return Err(ValidationError::TooShort {
            field: "city".to_string(),
            min: 2,
        });
    }

    Ok(())
}

/// Validates an Indian postal code.
///
/// ## Rules
/// - Exactly 6 digits after stripping non-digit characters
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let digits: String = pincode.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "pincode".to_string(),
        });
    }

    if digits.len() != 6 {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must be exactly 6 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates free-text delivery notes.
///
/// ## Rules
/// - Optional; only length is bounded
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a complete add-address payload.
///
/// Mirrors the save-button gate on the address form: name, phone, line 1,
/// city and a 6-digit pincode are all required; line 2 and landmark are not.
pub fn validate_new_address(address: &NewAddress) -> ValidationResult<()> {
    validate_recipient_name(&address.name)?;
    validate_phone(&address.phone)?;
    validate_address_line(&address.line1)?;
    validate_city(&address.city)?;
    validate_pincode(&address.pincode)?;
    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format (catalog and address ids are UUID v4)
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
