//! Field-level validation shared by local pre-submit checks and 422 payloads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name -> messages. Ordered so the form shows errors deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages for a single field (empty slice when the field is valid).
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn require_text(&mut self, field: &str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", label));
        }
    }

    pub fn require_positive(&mut self, field: &str, label: &str, value: f64) {
        if value.is_nan() || value <= 0.0 {
            self.add(field, format!("{} must be greater than zero", label));
        }
    }

    pub fn require_non_negative(&mut self, field: &str, label: &str, value: f64) {
        if value < 0.0 || value.is_nan() {
            self.add(field, format!("{} cannot be negative", label));
        }
    }

    pub fn require_some<T>(&mut self, field: &str, label: &str, value: &Option<T>) {
        if value.is_none() {
            self.add(field, format!("{} is required", label));
        }
    }

    /// Phone is optional, but when present must be 7..=15 digits (`+`, spaces and dashes allowed).
    pub fn optional_phone(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if !is_valid_phone(value) {
            self.add(field, "Enter a valid phone number");
        }
    }

    pub fn optional_email(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        if !is_valid_email(value) {
            self.add(field, "Enter a valid email address");
        }
    }
}

impl From<BTreeMap<String, Vec<String>>> for ValidationErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for messages in self.0.values() {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

pub fn is_valid_phone(value: &str) -> bool {
    let rest = value.strip_prefix('+').unwrap_or(value);
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return false;
    }
    let digits = rest.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

/// Digits only, so "+880 1711-000000" and "8801711000000" compare equal.
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_messages_per_field() {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", "  ");
        errors.require_positive("price", "Price", 0.0);
        errors.add("price", "second");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.field("price").len(), 2);
        assert!(errors.field("code").is_empty());
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_empty_is_ok() {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", "Kilogram");
        errors.optional_phone("phone", "");
        errors.optional_email("email", "");
        assert_eq!(errors.into_result(), Ok(()));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("+880 1711-000000"));
        assert!(is_valid_phone("0171100000"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("abc1234567"));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("a", "first");
        errors.add("b", "second");
        assert_eq!(errors.to_string(), "first; second");
    }

    #[test]
    fn test_decodes_from_server_map() {
        let errors: ValidationErrors =
            serde_json::from_str(r#"{"email": ["taken"]}"#).unwrap();
        assert_eq!(errors.field("email"), ["taken".to_string()]);
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+880 1711-000000"), "8801711000000");
        assert_eq!(normalize_phone(" 017 "), "017");
        assert_eq!(normalize_phone(""), "");
    }
}
