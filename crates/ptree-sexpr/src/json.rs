//! JSON array form of S-expressions.
//!
//! - atom → string
//! - integer → number
//! - text → `{"str": "..."}`
//! - list → array

use crate::SExpr;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("expected integer, got {0}")]
    ExpectedInteger(String),

    #[error("expected {{\"str\": text}}, got {0}")]
    ExpectedText(String),

    #[error("unexpected value: {0}")]
    Unexpected(String),
}

pub fn to_json(sexpr: &SExpr) -> Value {
    match sexpr {
        SExpr::Atom(name) => Value::String(name.clone()),
        SExpr::Int(v) => json!(v),
        SExpr::Text(s) => json!({ "str": s }),
        SExpr::Seq(items) => Value::Array(items.iter().map(to_json).collect()),
    }
}

pub fn from_json(value: &Value) -> Result<SExpr, JsonError> {
    match value {
        Value::String(name) => Ok(SExpr::Atom(name.clone())),
        Value::Number(n) => n
            .as_i64()
            .map(SExpr::Int)
            .ok_or_else(|| JsonError::ExpectedInteger(n.to_string())),
        Value::Object(map) => text_from_object(map),
        Value::Array(items) => {
            let items: Result<Vec<SExpr>, _> = items.iter().map(from_json).collect();
            Ok(SExpr::Seq(items?))
        }
        Value::Null | Value::Bool(_) => Err(JsonError::Unexpected(value.to_string())),
    }
}

fn text_from_object(map: &Map<String, Value>) -> Result<SExpr, JsonError> {
    match (map.len(), map.get("str")) {
        (1, Some(Value::String(s))) => Ok(SExpr::Text(s.clone())),
        _ => Err(JsonError::ExpectedText(Value::Object(map.clone()).to_string())),
    }
}
