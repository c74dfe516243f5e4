//! # Store Configuration
//!
//! Client configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SARUKULU_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

use sarukulu_core::{Money, MAX_NOTES_LEN};

/// Storefront client configuration.
///
/// ## Fields
/// Defaults suit the Sarukulu store (INR, ₹, 2-decimal display).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (displayed in headers and confirmations)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Maximum length of delivery notes accepted at checkout
    pub notes_max_len: usize,
}

impl Default for StoreConfig {
    /// Returns default configuration for the Sarukulu storefront.
    fn default() -> Self {
        StoreConfig {
            store_name: "Sarukulu".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            notes_max_len: MAX_NOTES_LEN,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `SARUKULU_STORE_NAME`: Override store name
    /// - `SARUKULU_CURRENCY_CODE`: Override currency code
    /// - `SARUKULU_CURRENCY_SYMBOL`: Override currency symbol
    pub fn from_env() -> Self {
        let mut config = StoreConfig::default();

        if let Ok(store_name) = std::env::var("SARUKULU_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(code) = std::env::var("SARUKULU_CURRENCY_CODE") {
            config.currency_code = code;
        }

        if let Ok(symbol) = std::env::var("SARUKULU_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats a money amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_paise(22000)), "₹220.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let paise = amount.paise();
        let whole = paise / divisor;
        let frac = (paise % divisor).abs();

        format!(
            "{}{}{}",
            if paise < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_paise(22000)), "₹220.00");
        assert_eq!(config.format_currency(Money::from_paise(100)), "₹1.00");
        assert_eq!(config.format_currency(Money::from_paise(1)), "₹0.01");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_paise(-1234)), "-₹12.34");
    }

    #[test]
    fn test_format_currency_large() {
        let config = StoreConfig::default();
        assert_eq!(
            config.format_currency(Money::from_paise(123456789)),
            "₹1234567.89"
        );
    }
}
