//! Entry display formatting

use crate::models::{Entry, Ledger};

/// Format entries as a table, resolving customer names through the ledger
pub fn format_entry_list(entries: &[&Entry], ledger: &Ledger, currency: &str) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }

    let names: Vec<String> = entries
        .iter()
        .map(|e| {
            ledger
                .customer(e.customer_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("{} (deleted)", e.customer_id))
        })
        .collect();

    let name_width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<name_width$}  {:>8}  {:>10}  {:>12}\n",
        "Date",
        "Customer",
        "Litres",
        "Rate",
        "Total",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<name_width$}  {:->8}  {:->10}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (entry, name) in entries.iter().zip(&names) {
        output.push_str(&format!(
            "{:<10}  {:<name_width$}  {:>8}  {:>10}  {:>12}\n",
            entry.date_key(),
            name,
            entry.quantity.to_string(),
            entry.rate.format_with_symbol(currency),
            entry.total.format_with_symbol(currency),
            name_width = name_width,
        ));
    }

    output
}
