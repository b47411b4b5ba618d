//! Convert serde_json::Value payload fields to typed statement arguments.

use crate::error::AppError;
use crate::schema::{ColumnDef, ColumnKind};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// A value bound to one positional placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlArg {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl SqlArg {
    /// Coerce a payload value for the given column. `null` binds as NULL.
    pub fn from_json(column: &ColumnDef, v: &Value) -> Result<Self, AppError> {
        if v.is_null() {
            return Ok(SqlArg::Null);
        }
        let invalid = || AppError::Validation(format!("{} has an invalid value", column.name));
        Ok(match column.kind {
            ColumnKind::Text => match v {
                Value::String(s) => SqlArg::Text(s.clone()),
                Value::Number(n) => SqlArg::Text(n.to_string()),
                Value::Bool(b) => SqlArg::Text(b.to_string()),
                _ => return Err(invalid()),
            },
            ColumnKind::Int => match v {
                Value::Number(n) => SqlArg::Int(n.as_i64().ok_or_else(invalid)?),
                Value::String(s) => SqlArg::Int(s.trim().parse().map_err(|_| invalid())?),
                _ => return Err(invalid()),
            },
            ColumnKind::Date => match v {
                Value::String(s) => SqlArg::Date(parse_date(s).ok_or_else(invalid)?),
                _ => return Err(invalid()),
            },
            // created_at is store-assigned; nothing in the registry writes a timestamp.
            ColumnKind::Timestamp => return Err(invalid()),
        })
    }
}

/// `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
}

/// A payload field counts as supplied only when truthy: `null`, `false`, `0` and `""` are omitted.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
