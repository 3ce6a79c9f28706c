//! Customer service
//!
//! Adding, editing and deleting customers. Deleting a customer removes every
//! entry recorded for them; editing a customer never touches existing entries.

use chrono::Utc;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Customer, CustomerId, Ledger, Money, Quantity};

/// Input for a new customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub mobile: Option<String>,
    pub rate: Money,
    pub default_qty: Quantity,
}

/// Partial update of a customer; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    /// `Some(None)` clears the mobile number
    pub mobile: Option<Option<String>>,
    pub rate: Option<Money>,
    pub default_qty: Option<Quantity>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.mobile.is_none()
            && self.rate.is_none()
            && self.default_qty.is_none()
    }
}

/// Service for customer management
pub struct CustomerService<'a> {
    ledger: &'a mut Ledger,
    country_code: String,
}

impl<'a> CustomerService<'a> {
    pub fn new(ledger: &'a mut Ledger) -> Self {
        Self {
            ledger,
            country_code: "+91".to_string(),
        }
    }

    /// Country code used when normalizing bare ten-digit mobile numbers
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    /// Add a new customer
    pub fn add(&mut self, new: NewCustomer) -> LedgerResult<Customer> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("Customer name cannot be empty".into()));
        }

        if self.ledger.customer_by_name(name).is_some() {
            return Err(LedgerError::Duplicate {
                entity_type: "Customer",
                identifier: name.to_string(),
            });
        }

        let mut customer = Customer::new(name, new.rate).with_default_qty(new.default_qty);
        customer.mobile = new
            .mobile
            .as_deref()
            .and_then(|m| Customer::normalize_mobile(m, &self.country_code));

        customer
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        info!(customer = %customer.id, name = %customer.name, rate = %customer.rate, "added customer");
        self.ledger.customers.push(customer.clone());
        Ok(customer)
    }

    /// Get a customer by ID
    pub fn get(&self, id: CustomerId) -> LedgerResult<&Customer> {
        self.ledger
            .customer(id)
            .ok_or_else(|| LedgerError::customer_not_found(id.to_string()))
    }

    /// Find a customer by name or ID
    pub fn find(&self, identifier: &str) -> LedgerResult<&Customer> {
        self.ledger
            .find_customer(identifier)
            .ok_or_else(|| LedgerError::customer_not_found(identifier))
    }

    /// All customers in insertion order
    pub fn list(&self) -> &[Customer] {
        &self.ledger.customers
    }

    /// Apply a partial update
    pub fn update(&mut self, id: CustomerId, update: CustomerUpdate) -> LedgerResult<Customer> {
        let mut customer = self.get(id)?.clone();

        if let Some(name) = &update.name {
            let name = name.trim();
            if let Some(existing) = self.ledger.customer_by_name(name) {
                if existing.id != id {
                    return Err(LedgerError::Duplicate {
                        entity_type: "Customer",
                        identifier: name.to_string(),
                    });
                }
            }
            customer.name = name.to_string();
        }

        if let Some(mobile) = &update.mobile {
            customer.mobile = mobile
                .as_deref()
                .and_then(|m| Customer::normalize_mobile(m, &self.country_code));
        }

        if let Some(rate) = update.rate {
            customer.rate = rate;
        }

        if let Some(qty) = update.default_qty {
            customer.default_qty = qty;
        }

        customer
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        customer.updated_at = Utc::now();

        let slot = self
            .ledger
            .customer_mut(id)
            .ok_or_else(|| LedgerError::customer_not_found(id.to_string()))?;
        *slot = customer.clone();

        info!(customer = %id, "updated customer");
        Ok(customer)
    }

    /// Delete a customer and every entry recorded for them.
    ///
    /// Returns the removed customer and the number of entries removed.
    pub fn delete(&mut self, id: CustomerId) -> LedgerResult<(Customer, usize)> {
        let position = self
            .ledger
            .customers
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::customer_not_found(id.to_string()))?;

        let customer = self.ledger.customers.remove(position);
        let before = self.ledger.entries.len();
        self.ledger.entries.retain(|e| e.customer_id != id);
        let removed = before - self.ledger.entries.len();

        info!(customer = %id, name = %customer.name, removed_entries = removed, "deleted customer");
        Ok((customer, removed))
    }

    pub fn count(&self) -> usize {
        self.ledger.customers.len()
    }
}
