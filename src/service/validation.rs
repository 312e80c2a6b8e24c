//! Request validation for customer payloads.

use crate::model::{CustomerPatch, NewCustomer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_STRING: &str = "Not a valid string.";
pub const NOT_INTEGER: &str = "Not a valid integer.";
pub const BLANK: &str = "Field may not be blank.";
pub const UNKNOWN: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for failures that concern the body as a whole rather than one field.
pub const SCHEMA_KEY: &str = "_schema";

/// Per-field validation messages, serialized as `{field: [messages]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationFailure(BTreeMap<String, Vec<String>>);

impl ValidationFailure {
    pub fn schema(message: impl Into<String>) -> Self {
        let mut failure = Self::default();
        failure.push(SCHEMA_KEY, message);
        failure
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationFailure {}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text { max_length: usize, blank: bool },
    /// Read-only identifier: type-checked, then discarded.
    Id,
}

/// Rule for one recognized customer field.
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    name: &'static str,
    required: bool,
    nullable: bool,
    kind: Kind,
}

const CUSTOMER_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "customer_id",
        required: false,
        nullable: true,
        kind: Kind::Id,
    },
    FieldRule {
        name: "name",
        required: true,
        nullable: false,
        kind: Kind::Text { max_length: 255, blank: false },
    },
    FieldRule {
        name: "email",
        required: true,
        nullable: false,
        kind: Kind::Text { max_length: 320, blank: false },
    },
    FieldRule {
        name: "phone",
        required: false,
        nullable: true,
        kind: Kind::Text { max_length: 15, blank: true },
    },
];

/// Validated field values keyed by name. `Some(None)` is an explicit null.
type Loaded = BTreeMap<&'static str, Option<String>>;

pub struct CustomerSchema;

impl CustomerSchema {
    /// Validate a create body. `name` and `email` must be present.
    pub fn load(body: &Value) -> Result<NewCustomer, ValidationFailure> {
        let mut loaded = load_fields(body, false)?;
        let mut take = |field: &str| loaded.remove(field).flatten();
        match (take("name"), take("email")) {
            (Some(name), Some(email)) => Ok(NewCustomer {
                name,
                email,
                phone: take("phone"),
            }),
            // load_fields already rejected missing or null required fields
            _ => Err(ValidationFailure::schema(INVALID_INPUT)),
        }
    }

    /// Validate an update body. Only fields present are checked; omitted fields stay unset in the patch.
    pub fn load_partial(body: &Value) -> Result<CustomerPatch, ValidationFailure> {
        let mut loaded = load_fields(body, true)?;
        Ok(CustomerPatch {
            name: loaded.remove("name").flatten(),
            email: loaded.remove("email").flatten(),
            phone: loaded.remove("phone"),
        })
    }
}

fn load_fields(body: &Value, partial: bool) -> Result<Loaded, ValidationFailure> {
    let Value::Object(map) = body else {
        return Err(ValidationFailure::schema(INVALID_INPUT));
    };
    let mut failure = ValidationFailure::default();
    let mut loaded = Loaded::new();

    for key in map.keys() {
        if !CUSTOMER_FIELDS.iter().any(|r| r.name == key) {
            failure.push(key, UNKNOWN);
        }
    }

    for rule in CUSTOMER_FIELDS {
        match check_field(map, rule, partial) {
            Ok(Some(value)) => {
                if !matches!(rule.kind, Kind::Id) {
                    loaded.insert(rule.name, value);
                }
            }
            Ok(None) => {}
            Err(message) => failure.push(rule.name, message),
        }
    }

    if failure.is_empty() {
        Ok(loaded)
    } else {
        Err(failure)
    }
}

/// `Ok(None)` means the field was absent and that is allowed.
fn check_field(
    map: &Map<String, Value>,
    rule: &FieldRule,
    partial: bool,
) -> Result<Option<Option<String>>, String> {
    let Some(value) = map.get(rule.name) else {
        if rule.required && !partial {
            return Err(MISSING.into());
        }
        return Ok(None);
    };
    if value.is_null() {
        if !rule.nullable {
            return Err(NULL.into());
        }
        return Ok(Some(None));
    }
    match rule.kind {
        Kind::Id => {
            if !is_integer(value) {
                return Err(NOT_INTEGER.into());
            }
            Ok(Some(None))
        }
        Kind::Text { max_length, blank } => {
            let s = value.as_str().ok_or_else(|| NOT_STRING.to_string())?;
            if !blank && s.trim().is_empty() {
                return Err(BLANK.into());
            }
            if s.chars().count() > max_length {
                return Err(format!("Longer than maximum length {}.", max_length));
            }
            Ok(Some(Some(s.to_string())))
        }
    }
}

/// Integers, whole-valued floats, and strings holding an integer.
fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}
