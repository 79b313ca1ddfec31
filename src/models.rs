// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user record. The data files use numbers, but nothing stops
/// a record from carrying a string id, so both forms are kept as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(serde_json::Number),
    Text(String),
}

impl UserId {
    /// Loose comparison against an id coming from the page. Form values are
    /// always strings, so a numeric id is compared against the trimmed input
    /// read as a number, with an empty input counting as zero.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            UserId::Text(id) => id == raw,
            UserId::Number(id) => match (id.as_f64(), coerce_number(raw)) {
                (Some(id), Some(n)) => id == n,
                _ => false,
            },
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Reads a form value the way the page's script reads a string as a number:
/// surrounding whitespace is ignored, an empty string is zero, `0x`/`0o`/`0b`
/// prefixes select a radix and `Infinity` is the only spelling of infinity.
/// `None` stands for NaN.
fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let prefixed = trimmed.get(..2).map(str::to_ascii_lowercase);
    let radix = match prefixed.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        let sign = if trimmed.starts_with('-') { -1.0 } else { 1.0 };
        return (trimmed.len() - unsigned.len() <= 1).then_some(sign * f64::INFINITY);
    }
    // Rust also accepts "inf", "infinity" and "nan" in any case.
    if unsigned
        .chars()
        .next()
        .map_or(true, |c| c.is_ascii_alphabetic())
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Editable contact details of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub firstname: String,
    pub lastname: String,
    pub address: String,
    pub city: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub owned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "user")]
    pub contact: Contact,
    #[serde(default)]
    pub portfolio: Vec<Holding>,
}

impl User {
    /// Label shown in the user list.
    pub fn list_label(&self) -> String {
        format!("{}, {}", self.contact.lastname, self.contact.firstname)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub sub_industry: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numeric(n: i64) -> UserId {
        UserId::Number(n.into())
    }

    #[test]
    fn numeric_id_matches_loosely() {
        let id = numeric(1);
        assert!(id.matches("1"));
        assert!(id.matches(" 1 "));
        assert!(id.matches("1.0"));
        assert!(!id.matches("2"));
        assert!(!id.matches("abc"));
        assert!(!id.matches(""));
    }

    #[test]
    fn empty_input_matches_zero() {
        assert!(numeric(0).matches(""));
        assert!(numeric(0).matches("   "));
    }

    #[test]
    fn radix_prefixes_are_read_as_numbers() {
        let id = numeric(1);
        assert!(id.matches("0x1"));
        assert!(id.matches("0B1"));
        assert!(id.matches("0o1"));
        assert!(numeric(255).matches(" 0xff "));
        assert!(!id.matches("0x"));
        assert!(!id.matches("-0x1"));
        assert!(!id.matches("0x1g"));
    }

    #[test]
    fn only_javascript_spellings_of_infinity_count() {
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("infinity"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("+-Infinity"), None);
    }

    #[test]
    fn text_id_requires_exact_match() {
        let id = UserId::Text("u-7".to_string());
        assert!(id.matches("u-7"));
        assert!(!id.matches(" u-7"));
        assert!(!id.matches("U-7"));
    }

    #[test]
    fn user_record_uses_page_field_names() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "user": {
                "firstname": "Ada",
                "lastname": "Lovelace",
                "address": "12 St James's Square",
                "city": "London",
                "email": "ada@example.com"
            },
            "portfolio": [{ "symbol": "IBM", "owned": 25 }]
        }))
        .unwrap();

        assert_eq!(user.id.to_string(), "3");
        assert_eq!(user.list_label(), "Lovelace, Ada");
        assert_eq!(user.portfolio[0].owned, 25.0);

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["id"], json!(3));
        assert_eq!(back["user"]["city"], json!("London"));
    }

    #[test]
    fn stock_reads_sub_industry() {
        let stock: Stock = serde_json::from_value(json!({
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "sector": "Information Technology",
            "subIndustry": "Technology Hardware, Storage & Peripherals",
            "address": "Cupertino, California"
        }))
        .unwrap();
        assert_eq!(stock.sub_industry, "Technology Hardware, Storage & Peripherals");
    }
}
