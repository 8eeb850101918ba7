// src/store/memory.rs
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::{compare_values, Filter, Order, Query, ReplaceOutcome, Store};
use crate::error::{Error, Result};

/// Process-local tables. Used by `--dry-run` and the tests.
/// `replace` runs under one lock, so it is atomic.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Make every later write to `table` fail (simulates a store outage).
    pub fn fail_writes_to(&self, table: &str) {
        if let Ok(mut f) = self.failing.lock() {
            f.insert(s!(table));
        }
    }

    /// All rows of a table, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock()
            .map(|t| t.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Value>>>> {
        self.tables.lock().map_err(|_| Error::Store(s!("memory store poisoned")))
    }

    fn check_writable(&self, table: &str) -> Result<()> {
        let failing = self.failing.lock().map_err(|_| Error::Store(s!("memory store poisoned")))?;
        if failing.contains(table) {
            return Err(Error::Store(format!("writes to {table} are failing")));
        }
        Ok(())
    }
}

fn insert_into(tables: &mut HashMap<String, Vec<Value>>, table: &str, rows: &[Value]) -> Result<usize> {
    if let Some(bad) = rows.iter().find(|r| !r.is_object()) {
        return Err(Error::Store(format!("{table}: row is not an object: {bad}")));
    }
    tables.entry(s!(table)).or_default().extend(rows.iter().cloned());
    Ok(rows.len())
}

fn delete_from(tables: &mut HashMap<String, Vec<Value>>, table: &str, filters: &[Filter]) -> Result<usize> {
    if filters.is_empty() {
        return Err(Error::Store(format!("{table}: refusing unfiltered delete")));
    }
    let Some(rows) = tables.get_mut(table) else { return Ok(0) };
    let before = rows.len();
    rows.retain(|r| !filters.iter().all(|f| f.matches(r)));
    Ok(before - rows.len())
}

impl Store for MemoryStore {
    fn name(&self) -> &str { "memory" }

    fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>> {
        let tables = self.lock()?;
        let mut out: Vec<Value> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| query.filters.iter().all(|f| f.matches(r)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        match &query.order {
            Some(Order::Asc(c)) => out.sort_by(|a, b| compare_values(a.get(c), b.get(c))),
            Some(Order::Desc(c)) => out.sort_by(|a, b| compare_values(b.get(c), a.get(c))),
            None => {}
        }
        if let Some(n) = query.limit {
            out.truncate(n);
        }
        Ok(out)
    }

    fn insert(&self, table: &str, rows: &[Value]) -> Result<usize> {
        self.check_writable(table)?;
        insert_into(&mut *self.lock()?, table, rows)
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize> {
        self.check_writable(table)?;
        delete_from(&mut *self.lock()?, table, filters)
    }

    fn replace(&self, table: &str, key: &[Filter], rows: &[Value]) -> Result<ReplaceOutcome> {
        self.check_writable(table)?;
        let mut tables = self.lock()?;
        // validate first so a bad row leaves the old rows in place
        if let Some(bad) = rows.iter().find(|r| !r.is_object()) {
            return Err(Error::Store(format!("{table}: row is not an object: {bad}")));
        }
        let deleted = delete_from(&mut tables, table, key)?;
        let inserted = insert_into(&mut tables, table, rows)?;
        Ok(ReplaceOutcome { deleted, inserted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn select_filters_orders_limits() {
        let m = MemoryStore::new();
        m.insert("t", &[json!({"k":"a","n":2}), json!({"k":"b","n":10}), json!({"k":"a","n":5})]).unwrap();

        let q = Query::new().filter(Filter::eq("k", "a")).order_desc("n").limit(1);
        assert_eq!(m.select("t", &q).unwrap(), vec![json!({"k":"a","n":5})]);
        assert!(m.select("missing", &Query::new()).unwrap().is_empty());
    }

    #[test]
    fn delete_needs_filters() {
        let m = MemoryStore::new();
        m.insert("t", &[json!({"k":"a"})]).unwrap();
        assert!(m.delete("t", &[]).is_err());
        assert_eq!(m.delete("t", &[Filter::eq("k", "a")]).unwrap(), 1);
        assert!(m.rows("t").is_empty());
    }

    #[test]
    fn replace_swaps_rows_under_key_only() {
        let m = MemoryStore::new();
        m.insert("t", &[json!({"ev":"A","v":1}), json!({"ev":"B","v":1})]).unwrap();
        let out = m.replace("t", &[Filter::eq("ev", "A")], &[json!({"ev":"A","v":2})]).unwrap();
        assert_eq!(out, ReplaceOutcome { deleted: 1, inserted: 1 });
        let mut vs: Vec<_> = m.rows("t").iter().map(|r| r["v"].clone()).collect();
        vs.sort_by(|a, b| compare_values(Some(a), Some(b)));
        assert_eq!(vs, vec![json!(1), json!(2)]);
    }

    #[test]
    fn failing_table_rejects_writes_but_reads() {
        let m = MemoryStore::new();
        m.fail_writes_to("t");
        assert!(matches!(m.insert("t", &[json!({})]), Err(Error::Store(_))));
        assert!(m.select("t", &Query::new()).is_ok());
    }

    #[test]
    fn non_object_rows_rejected() {
        let m = MemoryStore::new();
        assert!(m.insert("t", &[json!(1)]).is_err());
        assert!(m.replace("t", &[Filter::eq("k", "a")], &[json!("x")]).is_err());
    }
}
