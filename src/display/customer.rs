//! Customer display formatting
//!
//! Formats customers for terminal output in list and detail views.

use crate::models::{Customer, Ledger};

/// Format the customer list as a table
pub fn format_customer_list(customers: &[Customer], currency: &str) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let name_width = customers
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>10}  {:>8}  {}\n",
        "ID",
        "Name",
        "Rate",
        "Daily L",
        "Mobile",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->10}  {:->8}  {:-<14}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for customer in customers {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>10}  {:>8}  {}\n",
            customer.id.to_string(),
            customer.name,
            customer.rate.format_with_symbol(currency),
            customer.default_qty.to_string(),
            customer.mobile.as_deref().unwrap_or("-"),
            name_width = name_width,
        ));
    }

    output
}

/// Format a single customer's details along with their entry history summary
pub fn format_customer_details(customer: &Customer, ledger: &Ledger, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Customer: {}\n", customer.name));
    output.push_str(&format!("  ID:             {}\n", customer.id));
    output.push_str(&format!(
        "  Mobile:         {}\n",
        customer.mobile.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "  Rate:           {}/L\n",
        customer.rate.format_with_symbol(currency)
    ));
    output.push_str(&format!("  Daily Quantity: {} L\n", customer.default_qty));

    let entries: Vec<_> = ledger.entries_for(customer.id).collect();
    output.push('\n');
    output.push_str(&format!("  Entries:        {}\n", entries.len()));
    if let Some(last) = entries.iter().map(|e| e.date).max() {
        output.push_str(&format!("  Last Delivery:  {}\n", last));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        customer.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        customer.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Quantity};
    use crate::services::EntryRecorder;
    use chrono::NaiveDate;

    #[test]
    fn test_format_customer_list() {
        let customers = vec![
            Customer::new("Gupta", Money::from_rupees(50)).with_mobile("+919876543210"),
            Customer::new("Verma", Money::from_paise(5550)),
        ];
        let output = format_customer_list(&customers, "₹");

        assert!(output.contains("Name"));
        assert!(output.contains("Gupta"));
        assert!(output.contains("₹55.50"));
        assert!(output.contains("+919876543210"));
        assert!(output.contains(&customers[0].id.to_string()));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_customer_list(&[], "₹"), "No customers found.");
    }

    #[test]
    fn test_format_customer_details() {
        let mut ledger = Ledger::seeded();
        let id = ledger.customers[0].id;
        EntryRecorder::new(&mut ledger)
            .record_entry(
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                id,
                Quantity::from_litres(1),
                Money::from_rupees(60),
            )
            .unwrap();

        let output = format_customer_details(&ledger.customers[0], &ledger, "₹");
        assert!(output.contains("Customer: ps chahuan"));
        assert!(output.contains("₹60.00/L"));
        assert!(output.contains("Entries:        1"));
        assert!(output.contains("Last Delivery:  2024-03-04"));
    }
}
