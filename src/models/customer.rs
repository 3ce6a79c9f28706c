//! Customer model
//!
//! A household that receives milk every day at an agreed rate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CustomerId;
use super::money::Money;
use super::quantity::Quantity;

/// Maximum length of a customer name
pub const MAX_NAME_LEN: usize = 100;

/// A milk customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,

    /// Display name
    pub name: String,

    /// Phone number including country code, used for sharing bills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Current rate per litre; applies to new entries only
    pub rate: Money,

    /// Quantity pre-filled on the daily attendance sheet
    #[serde(default = "default_qty")]
    pub default_qty: Quantity,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_qty() -> Quantity {
    Quantity::from_litres(1)
}

impl Customer {
    /// Create a new customer with a one-litre default quantity
    pub fn new(name: impl Into<String>, rate: Money) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new(),
            name: name.into(),
            mobile: None,
            rate,
            default_qty: default_qty(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style mobile setter
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Builder-style default quantity setter
    pub fn with_default_qty(mut self, qty: Quantity) -> Self {
        self.default_qty = qty;
        self
    }

    /// Validate the customer
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        if self.name.trim().is_empty() {
            return Err(CustomerValidationError::EmptyName);
        }

        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(CustomerValidationError::NameTooLong(self.name.chars().count()));
        }

        if self.rate.is_negative() {
            return Err(CustomerValidationError::NegativeRate);
        }

        if self.default_qty.is_negative() {
            return Err(CustomerValidationError::NegativeQuantity);
        }

        if let Some(mobile) = &self.mobile {
            let digits = mobile.trim_start_matches('+');
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(CustomerValidationError::InvalidMobile(mobile.clone()));
            }
        }

        Ok(())
    }

    /// Normalize a customer name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this customer matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }

    /// Normalize a phone number: strip spaces and dashes, and prefix a bare
    /// ten-digit number with `country_code`.
    ///
    /// Returns `None` for an empty input.
    pub fn normalize_mobile(raw: &str, country_code: &str) -> Option<String> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '(' && *c != ')')
            .collect();

        if cleaned.is_empty() {
            return None;
        }

        if cleaned.starts_with('+') {
            Some(cleaned)
        } else if cleaned.len() == 10 {
            Some(format!("{}{}", country_code, cleaned))
        } else {
            Some(format!("+{}", cleaned))
        }
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeRate,
    NegativeQuantity,
    InvalidMobile(String),
}

impl fmt::Display for CustomerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Customer name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Customer name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeRate => write!(f, "Rate cannot be negative"),
            Self::NegativeQuantity => write!(f, "Default quantity cannot be negative"),
            Self::InvalidMobile(m) => write!(f, "Invalid mobile number: {}", m),
        }
    }
}

impl std::error::Error for CustomerValidationError {}
