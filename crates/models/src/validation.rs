//! Field validation over a raw JSON request body.
//!
//! Errors are collected per field in declaration order. Messages and the
//! summary line use Laravel's wording so existing clients that display
//! `message` or walk `errors` keep working.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Field errors in the order the rules were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: String) {
        match self.fields.iter_mut().find(|(f, _)| f == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.iter().find(|(f, _)| f == field).map(|(_, m)| m.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(f, _)| f.as_str())
    }

    /// First message, followed by `(and N more error[s])` when there are more.
    pub fn message(&self) -> String {
        let total: usize = self.fields.iter().map(|(_, m)| m.len()).sum();
        let Some(first) = self.fields.first().and_then(|(_, m)| m.first()) else {
            return "The given data was invalid.".to_string();
        };
        match total - 1 {
            0 => first.clone(),
            1 => format!("{first} (and 1 more error)"),
            n => format!("{first} (and {n} more errors)"),
        }
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Field must be present and non-empty.
    Required,
    /// Field is validated only when the key is present in the body.
    Sometimes,
}

/// Rule runner over one request body.
pub struct Rules<'a> {
    input: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Rules<'a> {
    pub fn new(input: &'a Map<String, Value>) -> Self {
        Self { input, errors: ValidationErrors::default() }
    }

    pub fn string(&mut self, field: &str, presence: Presence, max_chars: usize) -> Option<String> {
        let value = self.present(field, presence)?;
        let Value::String(s) = value else {
            self.fail(field, "must be a string.");
            return None;
        };
        if s.chars().count() > max_chars {
            self.fail(field, &format!("must not be greater than {max_chars} characters."));
            return None;
        }
        Some(s.clone())
    }

    pub fn integer(&mut self, field: &str, presence: Presence, min: i64, max: i64) -> Option<i64> {
        let value = self.present(field, presence)?;
        let Some(n) = as_integer(value) else {
            self.fail(field, "must be an integer.");
            return None;
        };
        if n < min {
            self.fail(field, &format!("must be at least {min}."));
            return None;
        }
        if n > max {
            self.fail(field, &format!("must not be greater than {max}."));
            return None;
        }
        Some(n)
    }

    pub fn numeric(&mut self, field: &str, presence: Presence, min: f64) -> Option<f64> {
        let value = self.present(field, presence)?;
        let Some(n) = as_number(value) else {
            self.fail(field, "must be a number.");
            return None;
        };
        if n < min {
            self.fail(field, &format!("must be at least {min}."));
            return None;
        }
        Some(n)
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    fn present(&mut self, field: &str, presence: Presence) -> Option<&'a Value> {
        let input = self.input;
        let value = input.get(field);
        if presence == Presence::Sometimes && value.is_none() {
            return None;
        }
        match value {
            Some(v) if !is_empty(v) => Some(v),
            _ => {
                self.fail(field, "field is required.");
                None
            }
        }
    }

    fn fail(&mut self, field: &str, rule: &str) {
        let label = field.replace('_', " ");
        let message = if rule.starts_with("field ") {
            format!("The {label} {rule}")
        } else {
            format!("The {label} field {rule}")
        };
        self.errors.add(field, message);
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64).map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
