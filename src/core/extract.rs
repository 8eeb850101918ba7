// src/core/extract.rs
//
// Ordered extraction strategies over a response body. First match wins.

use regex::Regex;
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub enum Extractor {
    /// First capture group of the regex.
    Regex(Regex),
    /// RFC 6901 pointer into the body parsed as JSON. Strings and numbers both match.
    JsonPointer(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    Matched(String),
    NoMatch,
}

impl Extractor {
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|e| Error::Config(format!("bad pattern {pattern}: {e}")))
    }

    pub fn pointer(p: &str) -> Self {
        Self::JsonPointer(s!(p))
    }

    fn apply(&self, body: &str, json: &mut Option<Option<Value>>) -> Option<String> {
        match self {
            Self::Regex(re) => re.captures(body)?.get(1).map(|m| s!(m.as_str())),
            Self::JsonPointer(p) => {
                // parse once, lazily, shared by every pointer step
                let doc = json.get_or_insert_with(|| serde_json::from_str(body).ok());
                match doc.as_ref()?.pointer(p)? {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ExtractorChain {
    steps: Vec<Extractor>,
}

impl ExtractorChain {
    pub fn new(steps: Vec<Extractor>) -> Self {
        Self { steps }
    }

    pub fn regexes(patterns: &[&str]) -> Result<Self> {
        let steps = patterns.iter().map(|p| Extractor::regex(p)).collect::<Result<_>>()?;
        Ok(Self { steps })
    }

    pub fn then(mut self, step: Extractor) -> Self {
        self.steps.push(step);
        self
    }

    pub fn run(&self, body: &str) -> Extraction {
        let mut json = None;
        self.steps
            .iter()
            .find_map(|step| step.apply(body, &mut json))
            .map_or(Extraction::NoMatch, Extraction::Matched)
    }

    /// Run the chain and read the match as a non-negative count.
    /// `what` names the source in the error.
    pub fn count(&self, body: &str, what: &str) -> Result<u64> {
        match self.run(body) {
            Extraction::Matched(raw) => parse_count(&raw)
                .ok_or_else(|| Error::Parse(format!("{what}: not a count: {raw:?}"))),
            Extraction::NoMatch => Err(Error::NoMatch(s!(what))),
        }
    }
}

/// "12,345" and "12345" both parse; negatives and decimals do not.
pub fn parse_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    cleaned.parse().ok()
}
