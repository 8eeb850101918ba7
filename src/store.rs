// src/store.rs
//
// Table store seam. Rows travel as JSON objects; typed helpers sit on top.

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Record;

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/* ---------------- Query model ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    Eq(String, String),
    Gte(String, String),
    Lte(String, String),
    /// `*` and `%` are wildcards
    Like(String, String),
}

impl Filter {
    pub fn eq(col: &str, v: impl ToString) -> Self { Self::Eq(s!(col), v.to_string()) }
    pub fn gte(col: &str, v: impl ToString) -> Self { Self::Gte(s!(col), v.to_string()) }
    pub fn lte(col: &str, v: impl ToString) -> Self { Self::Lte(s!(col), v.to_string()) }
    pub fn like(col: &str, v: impl ToString) -> Self { Self::Like(s!(col), v.to_string()) }

    pub fn column(&self) -> &str {
        match self {
            Self::Eq(c, _) | Self::Gte(c, _) | Self::Lte(c, _) | Self::Like(c, _) => c,
        }
    }

    /// PostgREST query parameter: `(col, "eq.value")`.
    pub fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq(c, v) => (c.clone(), format!("eq.{v}")),
            Self::Gte(c, v) => (c.clone(), format!("gte.{v}")),
            Self::Lte(c, v) => (c.clone(), format!("lte.{v}")),
            Self::Like(c, v) => (c.clone(), format!("like.{}", v.replace('%', "*"))),
        }
    }

    /// Evaluate against one row (in-memory store).
    pub fn matches(&self, row: &Value) -> bool {
        let Some(cell) = row.get(self.column()) else { return false };
        match self {
            Self::Eq(_, v) => value_text(cell).as_deref() == Some(v.as_str()),
            Self::Gte(_, v) => compare_cell(cell, v).is_some_and(|o| o != Ordering::Less),
            Self::Lte(_, v) => compare_cell(cell, v).is_some_and(|o| o != Ordering::Greater),
            Self::Like(_, v) => value_text(cell).is_some_and(|t| glob_match(v, &t)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Order {
    Asc(String),
    Desc(String),
}

impl Order {
    pub fn to_param(&self) -> String {
        match self {
            Self::Asc(c) => format!("{c}.asc"),
            Self::Desc(c) => format!("{c}.desc"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self { Self::default() }

    pub fn filter(mut self, f: Filter) -> Self {
        self.filters.push(f);
        self
    }

    pub fn order_asc(mut self, col: &str) -> Self {
        self.order = Some(Order::Asc(s!(col)));
        self
    }

    pub fn order_desc(mut self, col: &str) -> Self {
        self.order = Some(Order::Desc(s!(col)));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

/// Rows removed and added by one replace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub deleted: usize,
    pub inserted: usize,
}

/* ---------------- Store trait ---------------- */

pub trait Store: Send + Sync {
    /// Short name for logs (`rest`, `memory`).
    fn name(&self) -> &str;

    fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>>;

    /// Returns the number of rows written.
    fn insert(&self, table: &str, rows: &[Value]) -> Result<usize>;

    /// Delete rows matching every filter. An empty filter list is refused.
    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize>;

    /// Delete everything under `key` then insert `rows`.
    /// The default is two separate calls; stores that can do it atomically override.
    fn replace(&self, table: &str, key: &[Filter], rows: &[Value]) -> Result<ReplaceOutcome> {
        delete_then_insert(self, table, key, rows)
    }
}

/// Non-atomic replace. A failure after the delete leaves the key empty.
pub fn delete_then_insert<S: Store + ?Sized>(
    store: &S,
    table: &str,
    key: &[Filter],
    rows: &[Value],
) -> Result<ReplaceOutcome> {
    logw!("{}: replace on {table} is not atomic (delete, then insert)", store.name());
    let deleted = store.delete(table, key)?;
    let inserted = store.insert(table, rows)?;
    Ok(ReplaceOutcome { deleted, inserted })
}

/* ---------------- Typed helpers ---------------- */

pub fn to_rows<T: Record>(items: &[T]) -> Result<Vec<Value>> {
    items.iter().map(|r| Ok(serde_json::to_value(r)?)).collect()
}

pub fn select_as<T: Record>(store: &dyn Store, query: &Query) -> Result<Vec<T>> {
    store
        .select(T::TABLE, query)?
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(|e| Error::Store(format!("{}: {e}", T::TABLE))))
        .collect()
}

pub fn insert_as<T: Record>(store: &dyn Store, items: &[T]) -> Result<usize> {
    if items.is_empty() {
        return Ok(0);
    }
    store.insert(T::TABLE, &to_rows(items)?)
}

/* ---------------- Cell helpers ---------------- */

/// Cell as filter text. Null, arrays and objects have none.
pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers compare numerically, everything else as text (ISO dates sort as text).
fn compare_cell(cell: &Value, rhs: &str) -> Option<Ordering> {
    match cell {
        Value::Number(n) => {
            let l = n.as_f64()?;
            let r: f64 = rhs.parse().ok()?;
            l.partial_cmp(&r)
        }
        _ => Some(value_text(cell)?.as_str().cmp(rhs)),
    }
}

/// Order two cells for sorting. Missing and null sort first.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// SQL LIKE with `*`/`%` as any-run wildcards, case-sensitive.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '*' || p[pi] == '%') {
            star = Some((pi, ti));
            pi += 1;
        } else if pi < p.len() && p[pi] == t[ti] {
            pi += 1;
            ti += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*' || c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_params() {
        assert_eq!(Filter::eq("platform", "x").to_param(), (s!("platform"), s!("eq.x")));
        assert_eq!(Filter::gte("event_year", 2024).to_param(), (s!("event_year"), s!("gte.2024")));
        assert_eq!(Filter::like("created_at", "2026-02-13%").to_param().1, "like.2026-02-13*");
        assert_eq!(Order::Desc(s!("created_at")).to_param(), "created_at.desc");
    }

    #[test]
    fn filter_matching() {
        let row = json!({"event_year": 2025, "event_date": "2025-08-01", "title": "LIVE at Arena"});
        assert!(Filter::eq("event_year", 2025).matches(&row));
        assert!(Filter::gte("event_date", "2025-01-01").matches(&row));
        assert!(!Filter::lte("event_date", "2025-07-31").matches(&row));
        assert!(Filter::like("title", "*Arena").matches(&row));
        assert!(Filter::like("title", "LIVE%").matches(&row));
        assert!(!Filter::like("title", "TOUR*").matches(&row));
        assert!(!Filter::eq("missing", "x").matches(&row));
    }

    #[test]
    fn numeric_compare_is_numeric() {
        let row = json!({"views": 900});
        assert!(Filter::lte("views", "1000").matches(&row));
        assert_eq!(compare_values(Some(&json!(9)), Some(&json!(10))), Ordering::Less);
    }

    #[test]
    fn glob_edges() {
        assert!(glob_match("*", ""));
        assert!(glob_match("a*b*c", "aXXbYc"));
        assert!(!glob_match("a*b", "aXXc"));
        assert!(glob_match("東京*", "東京ドーム"));
    }
}
