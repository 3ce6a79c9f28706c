//! Status messages in Hindi
//!
//! Each action produces an [`Announcement`]; its `Display` output is the
//! sentence shown (or read aloud by a front end) after the action. This module
//! only produces text.

use std::fmt;

use crate::models::{Money, Quantity};

/// A human-readable status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    Welcome { owner: String },
    CustomerAdded { name: String },
    RateChanged { rate: Money },
    CustomerDeleted { name: Option<String> },
    EntryRecorded { name: Option<String>, quantity: Quantity },
    AllMarkedPresent,
    NoCustomersPresent,
    AttendanceSummary { present: usize, quantity: Quantity },
    DuplicateSkipped { name: String },
    DailyTotal { quantity: Quantity, amount: Money },
    NoEntriesToday,
    DateLocked,
}

const CUSTOMER_FALLBACK: &str = "ग्राहक";

/// Whole rupees, rounded half up
fn whole_rupees(amount: Money) -> i64 {
    let paise = amount.paise();
    if paise >= 0 {
        (paise + 50) / 100
    } else {
        (paise - 50) / 100
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome { owner } => {
                write!(f, "नमस्ते {} जी, दूध हिसाब में आपका स्वागत है।", owner)
            }
            Self::CustomerAdded { name } => write!(f, "{} ग्राहक जोड़ा गया।", name),
            Self::RateChanged { rate } => {
                write!(f, "दर बदली गई है, अब ₹{} प्रति लीटर।", rate.format_plain())
            }
            Self::CustomerDeleted { name } => write!(
                f,
                "{} हटाया गया।",
                name.as_deref().unwrap_or(CUSTOMER_FALLBACK)
            ),
            Self::EntryRecorded { name, quantity } => write!(
                f,
                "{} के लिए {} लीटर दूध दर्ज किया गया है।",
                name.as_deref().unwrap_or(CUSTOMER_FALLBACK),
                quantity
            ),
            Self::AllMarkedPresent => write!(f, "सभी ग्राहक उपस्थित कर दिए गए हैं।"),
            Self::NoCustomersPresent => write!(f, "कोई ग्राहक उपस्थित नहीं है।"),
            Self::AttendanceSummary { present, quantity } => write!(
                f,
                "आज की एंट्री सफल रही। कुल {} ग्राहक उपस्थित। कुल दूध {:.2} लीटर।",
                present,
                quantity.as_litres_f64()
            ),
            Self::DuplicateSkipped { name } => {
                write!(f, "{} की एंट्री पहले से दर्ज है।", name)
            }
            Self::DailyTotal { quantity, amount } => write!(
                f,
                "आज कुल {} लीटर दूध बेचा गया, कुल ₹{} रुपये।",
                quantity,
                whole_rupees(*amount)
            ),
            Self::NoEntriesToday => write!(f, "आज की कोई एंट्री नहीं है।"),
            Self::DateLocked => write!(f, "पिछली तारीख की एंट्री बंद है।"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_recorded() {
        let msg = Announcement::EntryRecorded {
            name: Some("Gupta".into()),
            quantity: Quantity::from_ml(1500),
        };
        assert_eq!(msg.to_string(), "Gupta के लिए 1.5 लीटर दूध दर्ज किया गया है।");
    }

    #[test]
    fn test_missing_customer_name_falls_back() {
        let msg = Announcement::CustomerDeleted { name: None };
        assert_eq!(msg.to_string(), "ग्राहक हटाया गया।");
    }

    #[test]
    fn test_attendance_summary() {
        let msg = Announcement::AttendanceSummary {
            present: 3,
            quantity: Quantity::from_ml(4500),
        };
        assert!(msg.to_string().contains("कुल 3 ग्राहक उपस्थित"));
        assert!(msg.to_string().contains("4.50 लीटर"));
    }

    #[test]
    fn test_daily_total_rounds_rupees() {
        let msg = Announcement::DailyTotal {
            quantity: Quantity::from_litres(3),
            amount: Money::from_paise(14950),
        };
        assert_eq!(msg.to_string(), "आज कुल 3 लीटर दूध बेचा गया, कुल ₹150 रुपये।");
    }

    #[test]
    fn test_rate_changed() {
        let msg = Announcement::RateChanged {
            rate: Money::from_rupees(60),
        };
        assert_eq!(msg.to_string(), "दर बदली गई है, अब ₹60 प्रति लीटर।");
    }
}
