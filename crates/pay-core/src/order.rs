//! # Order Types
//!
//! The slice of a host order the gateway reads: line items and the total.
//! Payloads are always rebuilt from these records, never from the amounts
//! the checkout widget sent.

use crate::error::{PaymentError, PaymentResult};
use crate::money::{Currency, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Title shown to the buyer in PayPal's item list
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Price, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Unit price times quantity; fails when the product leaves `i64`
    pub fn total(&self) -> PaymentResult<Price> {
        self.unit_price
            .amount
            .checked_mul(i64::from(self.quantity))
            .map(|amount| Price::from_cents(amount, self.unit_price.currency))
            .ok_or_else(|| {
                PaymentError::InvalidRequest(format!(
                    "Line item {:?} total is out of range",
                    self.name
                ))
            })
    }
}

/// Order as handed to the gateway at payment creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub line_items: Vec<LineItem>,
    /// Every line item is priced in this currency
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Empty order with a generated id
    pub fn new(currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            line_items: Vec::new(),
            currency,
            created_at: Utc::now(),
        }
    }

    /// Order holding `items`, each checked by [`Order::add_item`]
    pub fn from_items(
        currency: Currency,
        items: impl IntoIterator<Item = LineItem>,
    ) -> PaymentResult<Self> {
        let mut order = Self::new(currency);
        for item in items {
            order.add_item(item)?;
        }
        Ok(order)
    }

    /// Rejects items in a foreign currency, negative prices, zero quantities,
    /// and items that would push the order total or unit count out of range
    pub fn add_item(&mut self, item: LineItem) -> PaymentResult<()> {
        if item.unit_price.currency != self.currency {
            return Err(PaymentError::InvalidRequest(format!(
                "Line item {:?} is priced in {}, order currency is {}",
                item.name, item.unit_price.currency, self.currency
            )));
        }
        if item.quantity == 0 {
            return Err(PaymentError::InvalidRequest(format!(
                "Line item {:?} has zero quantity",
                item.name
            )));
        }
        if item.unit_price.amount < 0 {
            return Err(PaymentError::InvalidRequest(format!(
                "Line item {:?} has a negative price",
                item.name
            )));
        }

        let line_total = item.total()?;
        if self.total().amount.checked_add(line_total.amount).is_none() {
            return Err(PaymentError::InvalidRequest(
                "Order total is out of range".to_string(),
            ));
        }
        if self.item_count().checked_add(item.quantity).is_none() {
            return Err(PaymentError::InvalidRequest(
                "Order quantity is out of range".to_string(),
            ));
        }

        self.line_items.push(item);
        Ok(())
    }

    /// Sum of the line totals in the order currency.
    ///
    /// Items added through [`Order::add_item`] always fit; the arithmetic
    /// saturates for line items pushed directly.
    pub fn total(&self) -> Price {
        let amount = self
            .line_items
            .iter()
            .map(|item| {
                item.unit_price
                    .amount
                    .saturating_mul(i64::from(item.quantity))
            })
            .fold(0i64, i64::saturating_add);
        Price::from_cents(amount, self.currency)
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Number of units across all line items
    pub fn item_count(&self) -> u32 {
        self.line_items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }
}
