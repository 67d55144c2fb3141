use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// The human-readable explanation attached to an error response.
///
/// The backend either sends a plain message (`{"detail": "Content not
/// found"}`) or a list of field-level validation errors
/// (`{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`).
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

impl Detail {
    /// Pull the `detail` field out of an error response body.
    pub fn from_body(body: &[u8]) -> Option<Detail> {
        let mut value: Value = serde_json::from_slice(body).ok()?;

        match value.get_mut("detail").map(Value::take) {
            None | Some(Value::Null) => None,
            Some(detail) => Some(Detail::from(detail)),
        }
    }

    /// The individual messages, in the order the backend sent them.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Detail::Message(msg) => vec![msg.clone()],
            Detail::Fields(fields) => {
                fields.iter().map(FieldError::to_string).collect()
            },
        }
    }
}

impl From<Value> for Detail {
    fn from(value: Value) -> Detail {
        match value {
            Value::String(msg) => Detail::Message(msg),
            Value::Array(items) => {
                Detail::Fields(items.into_iter().map(FieldError::from).collect())
            },
            obj @ Value::Object(_) => Detail::Fields(vec![FieldError::from(obj)]),
            other => Detail::Message(other.to_string()),
        }
    }
}

impl Display for Detail {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Message(msg) => write!(f, "{}", msg),
            Detail::Fields(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", field)?;
                }

                Ok(())
            },
        }
    }
}

/// A single validation error, e.g. `{"msg": "field required", "loc":
/// ["body", "email"]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    msg: Option<String>,
    raw: Value,
}

impl FieldError {
    pub fn msg(&self) -> Option<&str> { self.msg.as_deref() }

    /// Where the offending value was found, if the backend said.
    pub fn location(&self) -> Vec<String> {
        match self.raw.get("loc") {
            Some(Value::Array(parts)) => parts
                .iter()
                .map(|part| match part {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn raw(&self) -> &Value { &self.raw }
}

impl From<Value> for FieldError {
    fn from(raw: Value) -> FieldError {
        let msg = raw
            .get("msg")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(String::from);

        FieldError { msg, raw }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.msg {
            Some(ref msg) => write!(f, "{}", msg),
            None => match self.raw {
                Value::String(ref s) => write!(f, "{}", s),
                ref other => write!(f, "{}", other),
            },
        }
    }
}
