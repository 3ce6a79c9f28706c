//! Monthly bill messages
//!
//! Builds the bill text sent to a customer at the end of a month and the
//! `wa.me` link that opens it in a chat. Opening the link is left to the
//! caller.

use std::fmt;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Customer, Money, Quantity};
use crate::reports::CustomerTotals;

const SHARE_BASE_URL: &str = "https://wa.me";

/// A customer's bill for one period
#[derive(Debug, Clone, PartialEq)]
pub struct BillMessage {
    pub customer_name: String,
    pub mobile: Option<String>,
    pub period_label: String,
    pub total_quantity: Quantity,
    pub rate: Money,
    pub total_amount: Money,
    pub signature: String,
}

impl BillMessage {
    /// Bill built from a customer's aggregated totals.
    ///
    /// The amount is the sum of stored entry totals; `rate` is the customer's
    /// current rate and is shown for reference only.
    pub fn for_customer(
        customer: &Customer,
        period_label: impl Into<String>,
        totals: &CustomerTotals,
    ) -> Self {
        Self {
            customer_name: customer.name.clone(),
            mobile: customer.mobile.clone(),
            period_label: period_label.into(),
            total_quantity: totals.total_quantity,
            rate: customer.rate,
            total_amount: totals.total_amount,
            signature: String::new(),
        }
    }

    /// Sign the message on behalf of the supplier
    pub fn signed_by(mut self, owner: &str) -> Self {
        self.signature = format!("{} मिल्क सप्लाई", owner.trim());
        self
    }

    /// The message body
    pub fn text(&self) -> String {
        let mut text = format!(
            "नमस्ते {},\n\n{} महीने का दूध हिसाब:\nकुल दूध: {:.1} लीटर\nदर: ₹{}/लीटर\nकुल राशि: ₹{:.2}\n\nधन्यवाद!",
            self.customer_name,
            self.period_label,
            self.total_quantity.as_litres_f64(),
            self.rate.format_plain(),
            self.total_amount.as_rupees_f64(),
        );
        if !self.signature.is_empty() {
            text.push_str("\n- ");
            text.push_str(&self.signature);
        }
        text
    }

    /// Chat link with the message pre-filled.
    ///
    /// # Errors
    ///
    /// `Validation` if the customer has no usable mobile number.
    pub fn share_link(&self) -> LedgerResult<String> {
        let digits: String = self
            .mobile
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        if digits.is_empty() {
            return Err(LedgerError::Validation(format!(
                "Mobile number not set for {}",
                self.customer_name
            )));
        }

        Ok(format!(
            "{}/{}?text={}",
            SHARE_BASE_URL,
            digits,
            urlencoding::encode(&self.text())
        ))
    }
}

impl fmt::Display for BillMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> CustomerTotals {
        CustomerTotals {
            total_quantity: Quantity::from_ml(31_500),
            total_amount: Money::from_paise(189_000),
            entry_count: 30,
        }
    }

    #[test]
    fn test_bill_text() {
        let customer = Customer::new("Gupta", Money::from_rupees(60));
        let bill = BillMessage::for_customer(&customer, "2024-03", &totals()).signed_by("Menka");
        let text = bill.text();

        assert!(text.starts_with("नमस्ते Gupta,"));
        assert!(text.contains("2024-03 महीने का दूध हिसाब:"));
        assert!(text.contains("कुल दूध: 31.5 लीटर"));
        assert!(text.contains("दर: ₹60/लीटर"));
        assert!(text.contains("कुल राशि: ₹1890.00"));
        assert!(text.ends_with("- Menka मिल्क सप्लाई"));
    }

    #[test]
    fn test_share_link() {
        let customer =
            Customer::new("Gupta", Money::from_rupees(60)).with_mobile("+91 98765-43210");
        let link = BillMessage::for_customer(&customer, "2024-03", &totals())
            .share_link()
            .unwrap();

        assert!(link.starts_with("https://wa.me/919876543210?text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert!(link.contains("%0A"));
    }

    #[test]
    fn test_share_link_without_mobile() {
        let customer = Customer::new("Gupta", Money::from_rupees(60));
        let err = BillMessage::for_customer(&customer, "2024-03", &totals())
            .share_link()
            .unwrap_err();
        assert!(err.is_validation());
    }
}
