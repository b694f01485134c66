//! Declarative validation rule for the host form
//!
//! The input only declares the rule. Evaluating it and surfacing the
//! message is the job of whatever form framework hosts the field;
//! [`ValidationRule::evaluate`] is there for hosts that want the stock check.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Exactly eight contiguous hex digits
pub const DEVADDR_PATTERN: &str = "^[A-Fa-f0-9]{8}$";

fn devaddr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DEVADDR_PATTERN).expect("DevAddr pattern is valid"))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    Required { field: String, message: String },
    #[error("{message}")]
    Pattern { field: String, message: String },
}

/// Rule registered with the host form for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRule {
    /// Field name in the form-state bag
    pub field: String,
    /// Whether an empty value is an error
    pub required: bool,
    /// Message shown by the host on failure
    pub message: String,
    /// Regular expression a non-empty value must match
    pub pattern: &'static str,
}

impl ValidationRule {
    /// Rule for a DevAddr field labelled `label`
    pub fn devaddr(field: impl Into<String>, label: &str, required: bool) -> Self {
        Self {
            field: field.into(),
            required,
            message: format!("Please enter a valid {}", label),
            pattern: DEVADDR_PATTERN,
        }
    }

    /// Evaluate the rule against a submitted value
    pub fn evaluate(&self, value: Option<&str>) -> Result<(), ValidationError> {
        let value = value.unwrap_or_default();

        if value.is_empty() {
            if self.required {
                return Err(ValidationError::Required {
                    field: self.field.clone(),
                    message: self.message.clone(),
                });
            }
            return Ok(());
        }

        if !devaddr_regex().is_match(value) {
            return Err(ValidationError::Pattern {
                field: self.field.clone(),
                message: self.message.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_declaration() {
        let rule = ValidationRule::devaddr("devAddr", "Device address", true);
        assert_eq!(rule.field, "devAddr");
        assert!(rule.required);
        assert_eq!(rule.message, "Please enter a valid Device address");
        assert_eq!(rule.pattern, "^[A-Fa-f0-9]{8}$");
    }

    #[test]
    fn test_required_and_empty() {
        let rule = ValidationRule::devaddr("devAddr", "Device address", true);
        assert!(matches!(
            rule.evaluate(None),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            rule.evaluate(Some("")),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_optional_and_empty() {
        let rule = ValidationRule::devaddr("devAddr", "Device address", false);
        assert_eq!(rule.evaluate(None), Ok(()));
    }

    #[test]
    fn test_pattern() {
        let rule = ValidationRule::devaddr("devAddr", "Device address", false);
        assert_eq!(rule.evaluate(Some("1a2B3c4D")), Ok(()));
        assert!(rule.evaluate(Some("1A2B3C4")).is_err());
        assert!(rule.evaluate(Some("1A2B3C4D5")).is_err());
        let err = rule.evaluate(Some("1A2B-C4D")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid Device address");
    }
}
