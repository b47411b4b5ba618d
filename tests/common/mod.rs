#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use secrecy::SecretString;
use serde_json::{Map, Value};
use tower::ServiceExt;

use showcase_api::sql::{QueryBuf, SqlArg};
use showcase_api::{app, registry, AppState, SharedSecretAuthenticator, Store};

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const CREATED_AT: &str = "2025-01-01T00:00:00+00:00";

/// In-memory stand-in for PostgreSQL that understands the statements the SQL builder emits.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Map<String, Value>>>>,
    next_id: Mutex<i64>,
    log: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn statements(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Map<String, Value>> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }

    pub fn seed(&self, table: &str, row: Value) {
        let Value::Object(row) = row else { panic!("object expected") };
        self.tables.lock().unwrap().entry(table.to_string()).or_default().push(row);
    }

    fn run(&self, q: &QueryBuf) -> (Vec<Value>, u64) {
        self.log.lock().unwrap().push(q.sql.clone());
        let sql = q.sql.as_str();
        if let Some(rest) = sql.strip_prefix("INSERT INTO ") {
            self.insert(rest, &q.params)
        } else if let Some(rest) = sql.strip_prefix("UPDATE ") {
            self.update(rest, &q.params)
        } else if let Some(rest) = sql.strip_prefix("DELETE FROM ") {
            self.delete(rest, &q.params)
        } else if let Some(rest) = sql.strip_prefix("SELECT ") {
            self.select(rest, &q.params)
        } else {
            panic!("unsupported statement: {sql}")
        }
    }

    fn insert(&self, rest: &str, params: &[SqlArg]) -> (Vec<Value>, u64) {
        let (table, rest) = rest.split_once(" (").unwrap();
        let (cols, rest) = rest.split_once(") VALUES (").unwrap();
        let (vals, projection) = rest.split_once(") RETURNING ").unwrap();
        let table = unquote(table);

        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let mut row = Map::new();
        row.insert("id".into(), Value::from(*next));
        for (c, v) in split_list(cols).iter().zip(split_list(vals)) {
            row.insert(unquote(c), value_of(v, params));
        }
        let has_created_at = registry::ALL
            .iter()
            .any(|r| r.table == table && r.column("created_at").is_some());
        if has_created_at {
            row.insert("created_at".into(), Value::from(CREATED_AT));
        }
        let out = project(&row, projection);
        self.tables.lock().unwrap().entry(table).or_default().push(row);
        (vec![out], 1)
    }

    fn update(&self, rest: &str, params: &[SqlArg]) -> (Vec<Value>, u64) {
        let (table, rest) = rest.split_once(" SET ").unwrap();
        let (sets, rest) = rest.split_once(" WHERE ").unwrap();
        let (pred, projection) = rest.split_once(" RETURNING ").unwrap();
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(unquote(table)).or_default();
        let mut out = Vec::new();
        for row in rows.iter_mut().filter(|r| matches(r, pred, params)) {
            for assignment in split_list(sets) {
                let (col, v) = assignment.split_once(" = ").unwrap();
                row.insert(unquote(col), value_of(v, params));
            }
            out.push(project(row, projection));
        }
        let n = out.len() as u64;
        (out, n)
    }

    fn delete(&self, rest: &str, params: &[SqlArg]) -> (Vec<Value>, u64) {
        let (table, pred) = rest.split_once(" WHERE ").unwrap();
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(unquote(table)).or_default();
        let before = rows.len();
        rows.retain(|r| !matches(r, pred, params));
        (Vec::new(), (before - rows.len()) as u64)
    }

    fn select(&self, rest: &str, params: &[SqlArg]) -> (Vec<Value>, u64) {
        let (projection, rest) = rest.split_once(" FROM ").unwrap();
        let (head, limit) = match rest.split_once(" LIMIT ") {
            Some((h, l)) => (h, Some(value_of(l, params).as_i64().unwrap() as usize)),
            None => (rest, None),
        };
        let head = head.split_once(" ORDER BY ").map(|(h, _)| h).unwrap_or(head);
        let (table, pred) = match head.split_once(" WHERE ") {
            Some((t, p)) => (t, Some(p)),
            None => (head, None),
        };
        let tables = self.tables.lock().unwrap();
        let rows = tables.get(&unquote(table)).cloned().unwrap_or_default();
        let out: Vec<Value> = rows
            .iter()
            .filter(|r| pred.map(|p| matches(r, p, params)).unwrap_or(true))
            .take(limit.unwrap_or(usize::MAX))
            .map(|r| project(r, projection))
            .collect();
        let n = out.len() as u64;
        (out, n)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, sqlx::Error> {
        Ok(self.run(q).0)
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, sqlx::Error> {
        Ok(self.run(q).0.into_iter().next())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, sqlx::Error> {
        Ok(self.run(q).1)
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

/// Store whose every call fails, for error-mapping tests.
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn fetch_all(&self, _: &QueryBuf) -> Result<Vec<Value>, sqlx::Error> {
        Err(sqlx::Error::Protocol("connection reset by peer".into()))
    }

    async fn fetch_optional(&self, _: &QueryBuf) -> Result<Option<Value>, sqlx::Error> {
        Err(sqlx::Error::Protocol("connection reset by peer".into()))
    }

    async fn execute(&self, _: &QueryBuf) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::Protocol("connection reset by peer".into()))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

fn unquote(s: &str) -> String {
    s.trim().trim_matches('"').to_string()
}

fn split_list(s: &str) -> Vec<&str> {
    s.split(", ").map(str::trim).collect()
}

fn value_of(token: &str, params: &[SqlArg]) -> Value {
    let token = token.trim();
    if token == "NULL" {
        return Value::Null;
    }
    let n: usize = token
        .trim_start_matches('$')
        .split("::")
        .next()
        .unwrap()
        .parse()
        .unwrap_or_else(|_| panic!("unexpected value token {token}"));
    match &params[n - 1] {
        SqlArg::Null => Value::Null,
        SqlArg::Int(i) => Value::from(*i),
        SqlArg::Text(s) => Value::from(s.as_str()),
        SqlArg::Date(d) => Value::from(d.format("%Y-%m-%d").to_string()),
    }
}

fn matches(row: &Map<String, Value>, pred: &str, params: &[SqlArg]) -> bool {
    pred.split(" AND ").all(|p| {
        if let Some((col, v)) = p.split_once(" = ") {
            row.get(&unquote(col)).cloned().unwrap_or(Value::Null) == value_of(v, params)
        } else if let Some(col) = p.strip_suffix(" >= CURRENT_DATE") {
            let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
            row.get(&unquote(col))
                .and_then(Value::as_str)
                .map(|d| d >= today.as_str())
                .unwrap_or(false)
        } else {
            panic!("unsupported predicate: {p}")
        }
    })
}

fn project(row: &Map<String, Value>, projection: &str) -> Value {
    let mut out = Map::new();
    for col in split_list(projection) {
        let col = unquote(col);
        let v = row.get(&col).cloned().unwrap_or(Value::Null);
        out.insert(col, v);
    }
    Value::Object(out)
}

pub fn build_test_app(store: Arc<dyn Store>) -> Router {
    let auth = SharedSecretAuthenticator::new(SecretString::from(ADMIN_TOKEN.to_string()));
    let state = AppState::new(store, Arc::new(auth));
    app(state, 3 * 1024 * 1024)
}

pub fn memory_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let app = build_test_app(store.clone());
    (store, app)
}

pub async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("x-admin-token", t);
    }
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Request with a raw body and an optional content type, for malformed-input tests.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("x-admin-token", t);
    }
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn admin(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    send(app, method, uri, Some(ADMIN_TOKEN), body).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
