// src/store/rest.rs
//
// PostgREST table API (`{url}/rest/v1/{table}`), as Supabase exposes it.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{json, Map, Value};

use super::{delete_then_insert, Filter, Query, ReplaceOutcome, Store};
use crate::config::consts::{INSERT_CHUNK, REST_PREFIX};
use crate::config::StoreConfig;
use crate::core::net::HttpClient;
use crate::error::{Error, Result};

pub struct RestStore {
    http: Client,
    base: String,
    key: String,
    replace_rpc: Option<String>,
}

impl RestStore {
    pub fn new(http: &HttpClient, cfg: &StoreConfig) -> Self {
        Self {
            http: http.raw().clone(),
            base: format!("{}{}", cfg.url.trim_end_matches('/'), REST_PREFIX),
            key: cfg.key.clone(),
            replace_rpc: cfg.replace_rpc.clone(),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base, table)
    }

    pub fn rpc_url(&self, func: &str) -> String {
        format!("{}/rpc/{}", self.base, func)
    }

    fn authed(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.header("apikey", &self.key).bearer_auth(&self.key)
    }

    /// Non-2xx becomes `Error::Store` carrying the server's message.
    fn read(resp: Response, what: &str) -> Result<Value> {
        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(Error::Store(format!("{what}: HTTP {}: {}", status.as_u16(), snippet(&body))));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn insert_chunk(&self, table: &str, rows: &[Value]) -> Result<usize> {
        let resp = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(rows)
            .send()?;
        let body = Self::read(resp, &format!("insert into {table}"))?;
        Ok(body.as_array().map_or(rows.len(), Vec::len))
    }

    /// Key filters as an RPC argument; only equality keys can be passed.
    fn rpc_key(key: &[Filter]) -> Option<Map<String, Value>> {
        key.iter()
            .map(|f| match f {
                Filter::Eq(c, v) => Some((c.clone(), Value::String(v.clone()))),
                _ => None,
            })
            .collect()
    }
}

fn query_params(q: &Query) -> Vec<(String, String)> {
    let mut params = vec![(s!("select"), s!("*"))];
    params.extend(q.filters.iter().map(Filter::to_param));
    if let Some(o) = &q.order {
        params.push((s!("order"), o.to_param()));
    }
    if let Some(n) = q.limit {
        params.push((s!("limit"), n.to_string()));
    }
    params
}

fn snippet(body: &str) -> String {
    let t = body.trim();
    match t.char_indices().nth(200) {
        Some((i, _)) => format!("{}…", &t[..i]),
        None => s!(t),
    }
}

impl Store for RestStore {
    fn name(&self) -> &str { "rest" }

    fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>> {
        logd!("select {table} {:?}", query);
        let resp = self
            .authed(self.http.get(self.table_url(table)))
            .query(&query_params(query))
            .send()?;
        match Self::read(resp, &format!("select {table}"))? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(Error::Store(format!("select {table}: expected an array, got {}", snippet(&other.to_string())))),
        }
    }

    fn insert(&self, table: &str, rows: &[Value]) -> Result<usize> {
        let mut written = 0;
        for chunk in rows.chunks(INSERT_CHUNK) {
            written += self.insert_chunk(table, chunk)?;
        }
        logd!("insert {table}: {written} row(s)");
        Ok(written)
    }

    fn delete(&self, table: &str, filters: &[Filter]) -> Result<usize> {
        if filters.is_empty() {
            return Err(Error::Store(format!("{table}: refusing unfiltered delete")));
        }
        let params: Vec<_> = filters.iter().map(Filter::to_param).collect();
        let resp = self
            .authed(self.http.delete(self.table_url(table)))
            .query(&params)
            .header("Prefer", "return=representation")
            .send()?;
        let body = Self::read(resp, &format!("delete from {table}"))?;
        Ok(body.as_array().map_or(0, Vec::len))
    }

    fn replace(&self, table: &str, key: &[Filter], rows: &[Value]) -> Result<ReplaceOutcome> {
        let (Some(func), Some(key_obj)) = (self.replace_rpc.as_deref(), Self::rpc_key(key)) else {
            return delete_then_insert(self, table, key, rows);
        };
        let payload = json!({ "target_table": table, "key": key_obj, "rows": rows });
        let resp = self.authed(self.http.post(self.rpc_url(func))).json(&payload).send()?;
        let body = Self::read(resp, &format!("rpc {func}"))?;

        let count = |field: &str| body.get(field).and_then(Value::as_u64).map(|n| n as usize);
        Ok(ReplaceOutcome {
            deleted: count("deleted").unwrap_or(0),
            inserted: count("inserted").unwrap_or(rows.len()),
        })
    }
}
