// src/specs/schedule.rs
//
// Official schedule listing → ScheduleEvent rows.
//
// Page shape (loose): each entry is an <li>/<dl>/<div> whose class mentions
// schedule/list/item, holding a `YYYY.MM.DD` date, a weekday tag and a link
// whose text is "<CATEGORY> <title>". Markup changes often, so:
// - candidates are any block with a matching class (fallback: every <li>);
// - the first dotted date inside the block is the event date;
// - link text is preferred over the whole block text for the title.

use std::collections::HashSet;

use chrono::NaiveDate;
use regex::Regex;

use crate::core::html::{attr, next_tag_block_ci, open_tag, strip_tags, tag_block_ranges};
use crate::core::net::{Fetch, Request};
use crate::core::sanitize::{normalize_ws, strip_brackets};
use crate::error::{Error, Result};
use crate::models::{Category, ScheduleEvent};

const CATEGORY_WORDS: &str = "TOUR|LIVE|EVENT|RELEASE|TV|RADIO|MAGAZINE|GOODS|TICKET|INFO";

pub struct ScheduleParser {
    class_re: Regex,
    date_re: Regex,
    category_re: Regex,
    leading_category_re: Regex,
}

fn compile(p: &str) -> Result<Regex> {
    Regex::new(p).map_err(|e| Error::Config(format!("bad pattern {p}: {e}")))
}

impl ScheduleParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            class_re: compile("schedule|list|item")?,
            date_re: compile(r"(\d{4})\.(\d{2})\.(\d{2})")?,
            category_re: compile(&format!("({CATEGORY_WORDS})"))?,
            leading_category_re: compile(&format!(r"(?i)^({CATEGORY_WORDS})\s*"))?,
        })
    }

    /// Candidate entry blocks in document order.
    pub fn candidates<'a>(&self, html: &'a str) -> Vec<&'a str> {
        let mut ranges: Vec<(usize, usize)> = ["li", "dl", "div"]
            .iter()
            .flat_map(|tag| tag_block_ranges(html, tag))
            .filter(|&(b, e)| {
                attr(open_tag(&html[b..e]), "class").is_some_and(|c| self.class_re.is_match(&c))
            })
            .collect();

        if ranges.is_empty() {
            logd!("schedule: no classed entries, falling back to every <li>");
            ranges = tag_block_ranges(html, "li");
        }
        ranges.sort_unstable();
        ranges.into_iter().map(|(b, e)| &html[b..e]).collect()
    }

    /// One entry block → event. `None` when the block has no usable date.
    pub fn parse_item(&self, block: &str) -> Option<ScheduleEvent> {
        let text = strip_tags(block);
        let caps = self.date_re.captures(&text)?;
        let date_text = caps.get(0)?.as_str();
        let event_date = NaiveDate::parse_from_str(
            &format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]),
            "%Y-%m-%d",
        )
        .ok()?;

        let link_text = next_tag_block_ci(block, "a", 0)
            .map(|(b, e)| strip_tags(&block[b..e]))
            .filter(|t| !t.is_empty());
        let raw_title = link_text.unwrap_or_else(|| text.clone());

        let cat_text = self
            .category_re
            .captures(&raw_title.to_ascii_uppercase())
            .and_then(|c| c.get(1).map(|m| s!(m.as_str())))
            .unwrap_or_else(|| s!("OTHER"));

        let title = self.clean_title(&raw_title, date_text, &cat_text);

        Some(ScheduleEvent {
            event_date,
            category: Category::from_official(&cat_text),
            title,
            description: format!("Official Category: {cat_text}"),
        })
    }

    /// Drop the date, bracketed tags and a leading category word; tidy the rest.
    pub fn clean_title(&self, raw: &str, date_text: &str, cat_text: &str) -> String {
        let t = raw.replace(date_text, "");
        let t = strip_brackets(&t);
        let t = self.leading_category_re.replace(t.trim(), "");
        let t = t.trim_matches(|c| matches!(c, ' ' | '-' | ':' | '：'));
        let t = normalize_ws(t);
        if t.is_empty() { format!("{cat_text} (詳細不明)") } else { t }
    }

    /// All events on the page, first occurrence of each (event_date, title) kept.
    pub fn parse(&self, html: &str) -> Vec<ScheduleEvent> {
        let mut seen = HashSet::new();
        self.candidates(html)
            .into_iter()
            .filter_map(|block| self.parse_item(block))
            .filter(|ev| seen.insert((ev.event_date, ev.title.clone())))
            .collect()
    }
}

pub fn fetch(http: &dyn Fetch, parser: &ScheduleParser, url: &str) -> Result<Vec<ScheduleEvent>> {
    let html = http.get_text(&Request::get(url))?;
    let events = parser.parse(&html);
    logf!("schedule: {} event(s) on {url}", events.len());
    if events.is_empty() {
        return Err(Error::NoMatch(format!("schedule entries on {url}")));
    }
    Ok(events)
}
