use std::collections::BTreeMap;
use std::fmt;

/// Validation messages keyed by field name
///
/// Only the first message recorded for a field is kept, so rules can be
/// checked in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Record the outcome of a rule for `field`
    pub fn check(&mut self, field: &'static str, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.insert(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("password", "Password must be at least 8 characters");
        errors.insert("password", "Must contain symbol");
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_check_ignores_ok() {
        let mut errors = FieldErrors::new();
        errors.check("email", Ok(()));
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Invalid email address");
        assert_eq!(errors.to_string(), "email: Invalid email address");
    }
}
