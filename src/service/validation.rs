//! Request validation from registry field rules.

use crate::error::AppError;
use crate::schema::{FieldRule, Format, ResourceSchema};
use crate::sql::is_truthy;
use serde_json::Value;
use std::collections::HashMap;

pub struct RequestValidator;

impl RequestValidator {
    /// Check every supplied (truthy) field that has a rule. Required-field presence is the
    /// builder's job; omitted fields are not checked here.
    pub fn validate(resource: &ResourceSchema, body: &HashMap<String, Value>) -> Result<(), AppError> {
        for rule in resource.rules {
            if let Some(v) = body.get(rule.column).filter(|v| is_truthy(v)) {
                validate_field(rule, v)?;
            }
        }
        Ok(())
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    let Some(s) = v.as_str() else { return Ok(()) };
    if let Some(max) = rule.max_length {
        if s.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                rule.column, max
            )));
        }
    }
    if let Some(Format::Email) = rule.format {
        let valid = match s.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
            None => false,
        };
        if !valid {
            return Err(AppError::Validation(format!("{} must be a valid email", rule.column)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::{CONTACT_MESSAGES, EVENTS};
    use serde_json::json;

    fn body(v: Value) -> HashMap<String, Value> {
        v.as_object().unwrap().clone().into_iter().collect()
    }

    #[test]
    fn email_format() {
        let ok = body(json!({"name": "A", "email": "a@b.co", "message": "hi"}));
        assert!(RequestValidator::validate(&CONTACT_MESSAGES, &ok).is_ok());
        for bad in ["ab.co", "@b.co", "a@bco", "a@.co"] {
            let b = body(json!({"email": bad}));
            assert!(RequestValidator::validate(&CONTACT_MESSAGES, &b).is_err(), "{bad}");
        }
    }

    #[test]
    fn max_length() {
        let b = body(json!({"phone": "1".repeat(41)}));
        let err = RequestValidator::validate(&CONTACT_MESSAGES, &b).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "phone must be at most 40 characters"));
    }

    #[test]
    fn resources_without_rules_pass() {
        let b = body(json!({"title": "x".repeat(5000)}));
        assert!(RequestValidator::validate(&EVENTS, &b).is_ok());
    }
}
