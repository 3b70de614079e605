//! # Money Types
//!
//! Currency and price types. Amounts are kept in the smallest currency unit
//! and rendered as decimal strings for the PayPal REST API.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Returns the lowercase ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
            Currency::CHF => "chf",
            Currency::MXN => "mxn",
        }
    }

    /// Upper-case code as PayPal expects it (`USD`)
    pub fn code(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, most others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (cents, etc.)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (cents for USD)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a new price from decimal amount
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self {
            amount: currency.to_smallest_unit(amount),
            currency,
        }
    }

    /// Create a price from smallest unit (cents)
    pub fn from_cents(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency
    pub fn zero(currency: Currency) -> Self {
        Self::from_cents(0, currency)
    }

    /// Decimal string without floating point (`1999` USD -> `"19.99"`)
    pub fn to_decimal_string(&self) -> String {
        let places = self.currency.decimal_places() as u32;
        if places == 0 {
            return self.amount.to_string();
        }

        let divisor = 10_i64.pow(places);
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor as u64,
            abs % divisor as u64,
            width = places as usize
        )
    }

    /// Format for display (e.g., "USD 10.00")
    pub fn display(&self) -> String {
        format!("{} {}", self.currency.code(), self.to_decimal_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_conversion() {
        assert_eq!(Currency::USD.to_smallest_unit(10.99), 1099);
        assert_eq!(Currency::JPY.to_smallest_unit(1000.0), 1000);
        assert_eq!(Currency::EUR.code(), "EUR");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Price::from_cents(1999, Currency::USD).to_decimal_string(), "19.99");
        assert_eq!(Price::from_cents(5, Currency::USD).to_decimal_string(), "0.05");
        assert_eq!(Price::from_cents(3000, Currency::GBP).to_decimal_string(), "30.00");
        assert_eq!(Price::from_cents(-250, Currency::USD).to_decimal_string(), "-2.50");
        assert_eq!(Price::from_cents(1500, Currency::JPY).to_decimal_string(), "1500");
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(29.99, Currency::USD);
        assert_eq!(price.display(), "USD 29.99");
    }
}
