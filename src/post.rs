use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;

use crate::frontmatter;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Header fields a post understands. Everything else in the block is dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PostHeader {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub excerpt: Option<String>,
}

impl PostHeader {
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let mut take = |key: &str| fields.remove(key).filter(|v| !v.is_empty());
        let header = Self {
            title: take("title"),
            date: take("date"),
            tags: take("tags").as_deref().map(split_tags).unwrap_or_default(),
            excerpt: take("excerpt"),
        };
        for key in fields.keys() {
            debug!("ignoring unknown header field `{key}`");
        }
        header
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct Post {
    pub slug: String,
    pub title: String,
    /// Date as written in the header.
    pub date: Option<String>,
    #[serde(skip_serializing)]
    pub published: Option<NaiveDateTime>,
    pub excerpt: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing)]
    pub body: String,
}

impl Post {
    /// Builds a post from the raw file content, falling back to the slug for a missing title.
    pub fn parse(slug: &str, content: &str) -> Self {
        let fm = frontmatter::parse(content);
        let body = fm.body.to_string();
        let header = PostHeader::from_fields(fm.fields);

        Self {
            slug: slug.to_string(),
            title: header.title.unwrap_or_else(|| slug.to_string()),
            published: header.date.as_deref().and_then(parse_date),
            date: header.date,
            excerpt: header.excerpt.unwrap_or_default(),
            tags: header.tags,
            body,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Comma separated list, each entry trimmed. Empty entries are dropped, duplicates kept.
pub(crate) fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the ISO-ish dates people put in headers. `None` means invalid.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
