// src/reconcile.rs
//
// How a batch of fetched rows lands in its table.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Record;
use crate::store::{self, value_text, Filter, Query, Store};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Event log: every row is inserted.
    AppendOnly,
    /// Insert a row only when no row with the same values in `key` exists.
    InsertIfAbsent { key: Vec<String> },
    /// Drop everything matching `key`, then insert the batch.
    Replace { key: Vec<Filter> },
}

impl Policy {
    pub fn insert_if_absent(cols: &[&str]) -> Self {
        Self::InsertIfAbsent { key: cols.iter().map(|c| s!(*c)).collect() }
    }
}

/// Row counts from one reconcile call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub inserted: usize,
    pub deleted: usize,
    pub already_present: usize,
}

impl WriteReport {
    pub fn add(&mut self, other: WriteReport) {
        self.inserted += other.inserted;
        self.deleted += other.deleted;
        self.already_present += other.already_present;
    }
}

pub fn reconcile(store: &dyn Store, table: &str, policy: &Policy, rows: &[Value]) -> Result<WriteReport> {
    match policy {
        Policy::AppendOnly => Ok(WriteReport {
            inserted: if rows.is_empty() { 0 } else { store.insert(table, rows)? },
            ..WriteReport::default()
        }),
        Policy::InsertIfAbsent { key } => insert_if_absent(store, table, key, rows),
        Policy::Replace { key } => {
            if key.is_empty() {
                return Err(Error::Config(format!("{table}: replace needs a key")));
            }
            let out = store.replace(table, key, rows)?;
            Ok(WriteReport { inserted: out.inserted, deleted: out.deleted, already_present: 0 })
        }
    }
}

/// Typed front door for `reconcile`.
pub fn reconcile_records<T: Record>(store: &dyn Store, policy: &Policy, items: &[T]) -> Result<WriteReport> {
    reconcile(store, T::TABLE, policy, &store::to_rows(items)?)
}

fn key_filters(table: &str, key: &[String], row: &Value) -> Result<Vec<Filter>> {
    key.iter()
        .map(|col| {
            let v = row
                .get(col)
                .and_then(value_text)
                .ok_or_else(|| Error::Store(format!("{table}: row has no key column {col}")))?;
            Ok(Filter::Eq(col.clone(), v))
        })
        .collect()
}

fn insert_if_absent(store: &dyn Store, table: &str, key: &[String], rows: &[Value]) -> Result<WriteReport> {
    let mut report = WriteReport::default();
    let mut seen: HashSet<Vec<Filter>> = HashSet::new();
    let mut fresh = Vec::new();

    for row in rows {
        let filters = key_filters(table, key, row)?;
        if !seen.insert(filters.clone()) {
            // same key twice in one batch
            report.already_present += 1;
            continue;
        }
        let q = Query { filters, order: None, limit: Some(1) };
        if store.select(table, &q)?.is_empty() {
            fresh.push(row.clone());
        } else {
            report.already_present += 1;
        }
    }

    if !fresh.is_empty() {
        report.inserted = store.insert(table, &fresh)?;
    }
    Ok(report)
}
