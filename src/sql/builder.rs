//! Builds parameterized INSERT, partial UPDATE, filtered SELECT and DELETE from a resource schema.

use crate::error::AppError;
use crate::schema::{ColumnDef, ColumnKind, FilterOp, ResourceSchema};
use crate::sql::params::{is_truthy, SqlArg};
use serde_json::Value;
use std::collections::HashMap;

/// Upper bound for any `LIMIT` taken from a query string.
pub const MAX_LIMIT: i64 = 100;

/// Filter value meaning "no filter".
pub const ALL_SENTINEL: &str = "all";

/// Body key listing optional columns to set to NULL on update.
pub const CLEAR_KEY: &str = "_clear";

/// Quote identifier for PostgreSQL (safe: only from the registry).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlArg>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: SqlArg) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Which ordering and filter set a list uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListScope {
    /// Declared filters apply; rows in `public_order`.
    Public,
    /// Filters ignored; rows in `admin_order`.
    Admin,
}

/// Query-string parameters of a list request.
#[derive(Clone, Debug, Default)]
pub struct ListParams {
    pub filters: HashMap<String, String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn from_query(mut query: HashMap<String, String>) -> Self {
        let limit = query.remove("limit");
        ListParams { filters: query, limit }
    }
}

/// Sparse update body: values to set plus columns explicitly cleared.
#[derive(Clone, Debug, Default)]
pub struct Patch {
    pub values: HashMap<String, Value>,
    pub clear: Vec<String>,
}

impl Patch {
    /// Split the reserved clear list out of a request body.
    pub fn from_body(mut values: HashMap<String, Value>) -> Result<Self, AppError> {
        let clear = match values.remove(CLEAR_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => Ok(s),
                    _ => Err(AppError::Validation(format!("{} must list column names", CLEAR_KEY))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(AppError::Validation(format!("{} must be an array", CLEAR_KEY)));
            }
        };
        Ok(Patch { values, clear })
    }
}

fn column_def<'a>(resource: &'a ResourceSchema, name: &str) -> Result<&'a ColumnDef, AppError> {
    resource
        .column(name)
        .ok_or_else(|| AppError::BadRequest(format!("{}: unknown column {}", resource.name, name)))
}

fn primary_key(resource: &ResourceSchema) -> Result<&'static str, AppError> {
    resource
        .primary_key
        .ok_or_else(|| AppError::BadRequest(format!("{} is read-only", resource.name)))
}

/// Placeholder with a cast for columns whose type text parameters do not coerce into implicitly.
fn placeholder(col: &ColumnDef, n: usize) -> String {
    match col.kind {
        ColumnKind::Date => format!("${}::date", n),
        ColumnKind::Timestamp => format!("${}::timestamptz", n),
        ColumnKind::Int | ColumnKind::Text => format!("${}", n),
    }
}

/// SELECT list in registry order.
fn select_column_list(resource: &ResourceSchema) -> String {
    resource
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Leading decimal integer of `raw` (`"5abc"` is 5). Digit runs too long for `i64` saturate.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -n } else { n })
}

/// Effective LIMIT: a positive leading integer clamps to `MAX_LIMIT`; anything else falls back to the resource default.
pub fn resolve_limit(resource: &ResourceSchema, raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    match leading_int(raw) {
        Some(n) if n > 0 => Some(n.min(MAX_LIMIT)),
        _ => resource.default_limit.map(|n| i64::from(n).min(MAX_LIMIT)),
    }
}

/// INSERT of every insertable column in registry order; optional columns without a truthy value bind NULL.
pub fn insert(resource: &ResourceSchema, body: &HashMap<String, Value>) -> Result<QueryBuf, AppError> {
    if !resource.supports_writes() {
        return Err(AppError::BadRequest(format!("{} is read-only", resource.name)));
    }
    let missing: Vec<&str> = resource
        .required
        .iter()
        .copied()
        .filter(|col| !body.get(*col).map(is_truthy).unwrap_or(false))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!("{} required", missing.join(", "))));
    }

    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(resource.insertable.len());
    let mut placeholders = Vec::with_capacity(resource.insertable.len());
    for name in resource.insertable {
        let col = column_def(resource, name)?;
        let arg = match body.get(*name) {
            Some(v) if is_truthy(v) => SqlArg::from_json(col, v)?,
            _ => SqlArg::Null,
        };
        let n = q.push_param(arg);
        cols.push(quoted(name));
        placeholders.push(placeholder(col, n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(resource.table),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(resource)
    );
    Ok(q)
}

/// UPDATE by id: SET only truthy updatable fields plus explicitly cleared ones, in registry order.
/// The id is always the last placeholder. Returns a validation error when nothing would change,
/// so a no-op never reaches the store.
pub fn partial_update(resource: &ResourceSchema, id: i64, patch: &Patch) -> Result<QueryBuf, AppError> {
    let pk = primary_key(resource)?;
    for col in &patch.clear {
        if !resource.is_clearable(col) {
            return Err(AppError::Validation(format!("{} cannot be cleared", col)));
        }
        if patch.values.get(col).map(is_truthy).unwrap_or(false) {
            return Err(AppError::Validation(format!("{} is both set and cleared", col)));
        }
    }

    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for name in resource.updatable {
        if patch.clear.iter().any(|c| c == name) {
            sets.push(format!("{} = NULL", quoted(name)));
            continue;
        }
        let Some(v) = patch.values.get(*name).filter(|v| is_truthy(v)) else { continue };
        let col = column_def(resource, name)?;
        let n = q.push_param(SqlArg::from_json(col, v)?);
        sets.push(format!("{} = {}", quoted(name), placeholder(col, n)));
    }
    if sets.is_empty() {
        return Err(AppError::Validation("nothing to update".into()));
    }

    let id_param = q.push_param(SqlArg::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(resource.table),
        sets.join(", "),
        quoted(pk),
        id_param,
        select_column_list(resource)
    );
    Ok(q)
}

/// SELECT list with the resource's declared filters (AND-ed), declared ordering and a bound LIMIT.
pub fn filtered_select(resource: &ResourceSchema, params: &ListParams, scope: ListScope) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    if scope == ListScope::Public {
        for f in resource.filters {
            let Some(value) = params.filters.get(f.param).map(|v| v.trim()) else { continue };
            match f.op {
                FilterOp::Equals => {
                    if value.is_empty() || value == ALL_SENTINEL {
                        continue;
                    }
                    let Ok(col) = column_def(resource, f.column) else { continue };
                    let n = q.push_param(SqlArg::Text(value.to_string()));
                    where_parts.push(format!("{} = {}", quoted(f.column), placeholder(col, n)));
                }
                FilterOp::OnOrAfterToday => {
                    if value == "true" {
                        where_parts.push(format!("{} >= CURRENT_DATE", quoted(f.column)));
                    }
                }
            }
        }
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    let order = match scope {
        ListScope::Public => resource.public_order,
        ListScope::Admin => resource.admin_order,
    };
    let limit_clause = match resolve_limit(resource, params.limit.as_deref()) {
        Some(n) => format!(" LIMIT ${}", q.push_param(SqlArg::Int(n))),
        None => String::new(),
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}{}",
        select_column_list(resource),
        quoted(resource.table),
        where_clause,
        order,
        limit_clause
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(resource: &ResourceSchema, id: i64) -> Result<QueryBuf, AppError> {
    let pk = primary_key(resource)?;
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlArg::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(resource),
        quoted(resource.table),
        quoted(pk),
        n
    );
    Ok(q)
}

/// DELETE by id; callers read the affected-row count.
pub fn delete(resource: &ResourceSchema, id: i64) -> Result<QueryBuf, AppError> {
    let pk = primary_key(resource)?;
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlArg::Int(id));
    q.sql = format!("DELETE FROM {} WHERE {} = ${}", quoted(resource.table), quoted(pk), n);
    Ok(q)
}
