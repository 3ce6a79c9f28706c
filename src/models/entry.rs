//! Delivery entry model
//!
//! One recorded delivery of milk to one customer on one date. The rate and
//! total are captured when the entry is made and never recomputed, so later
//! rate changes on the customer leave history alone.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CustomerId;
use super::money::Money;
use super::quantity::Quantity;

/// A single delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Delivery date (serialized as YYYY-MM-DD)
    pub date: NaiveDate,

    /// Customer the milk went to; may dangle if data was edited by hand
    pub customer_id: CustomerId,

    /// Litres delivered
    pub quantity: Quantity,

    /// Rate per litre at the time of delivery
    pub rate: Money,

    /// `quantity * rate`, stored
    pub total: Money,

    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}

impl Entry {
    /// Build an entry, computing the stored total.
    ///
    /// Returns `None` if the total overflows.
    pub fn new(
        date: NaiveDate,
        customer_id: CustomerId,
        quantity: Quantity,
        rate: Money,
    ) -> Option<Self> {
        let total = quantity.price_at(rate)?;
        Some(Self {
            date,
            customer_id,
            quantity,
            rate,
            total,
            recorded_at: Utc::now(),
        })
    }

    /// Canonical date key, e.g. "2024-03-01"
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Whether this entry is for the given customer and date
    pub fn is_for(&self, customer_id: CustomerId, date: NaiveDate) -> bool {
        self.customer_id == customer_id && self.date == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_total_is_computed() {
        let entry = Entry::new(
            date(2024, 3, 1),
            CustomerId::new(),
            Quantity::from_litres(2),
            Money::from_rupees(50),
        )
        .unwrap();
        assert_eq!(entry.total, Money::from_rupees(100));
        assert_eq!(entry.date_key(), "2024-03-01");
    }

    #[test]
    fn test_serialized_layout() {
        let id = CustomerId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let entry = Entry::new(date(2024, 3, 1), id, Quantity::from_ml(1500), Money::from_rupees(60))
            .unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["customerId"], "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(value["quantity"], 1500);
        assert_eq!(value["rate"], 6000);
        assert_eq!(value["total"], 9000);
    }

    #[test]
    fn test_is_for() {
        let id = CustomerId::new();
        let entry =
            Entry::new(date(2024, 3, 1), id, Quantity::from_litres(1), Money::from_rupees(1)).unwrap();
        assert!(entry.is_for(id, date(2024, 3, 1)));
        assert!(!entry.is_for(id, date(2024, 3, 2)));
        assert!(!entry.is_for(CustomerId::new(), date(2024, 3, 1)));
    }
}
