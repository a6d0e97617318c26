//! View models for the blog pages and the routes they link to.

use std::collections::{HashMap, HashSet};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::tags::TagIndex;

pub(crate) mod detail;
pub(crate) mod list;

/// Characters left as is in a path segment.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Public URLs of every page, all under the configured base path.
#[derive(Debug, Clone)]
pub(crate) struct Routes {
    base: String,
    tag_slugs: HashMap<String, String>,
}

impl Routes {
    /// `base` must start and end with `/`.
    pub fn new(base: &str, tags: &TagIndex) -> Self {
        let mut tag_slugs = HashMap::new();
        let mut used = HashSet::new();
        for tag in tags.tags() {
            let stem = slugify(tag);
            let mut slug = stem.clone();
            let mut n = 1;
            while !used.insert(slug.clone()) {
                n += 1;
                slug = format!("{stem}-{n}");
            }
            tag_slugs.insert(tag.to_string(), slug);
        }
        Self {
            base: base.to_string(),
            tag_slugs,
        }
    }

    pub fn home(&self) -> String {
        self.base.clone()
    }

    pub fn blog(&self) -> String {
        format!("{}blog/", self.base)
    }

    pub fn feed(&self) -> String {
        format!("{}blog/atom.xml", self.base)
    }

    /// `slug` is the file stem on disk; it is percent-encoded in the link.
    pub fn post(&self, slug: &str) -> String {
        format!(
            "{}blog/{}.html",
            self.base,
            utf8_percent_encode(slug, SEGMENT_ENCODE_SET)
        )
    }

    pub fn tag(&self, tag: &str) -> String {
        format!("{}blog/tags/{}.html", self.base, self.tag_slug(tag))
    }

    /// File stem of a tag's page.
    pub fn tag_slug(&self, tag: &str) -> String {
        self.tag_slugs
            .get(tag)
            .cloned()
            .unwrap_or_else(|| slugify(tag))
    }
}

/// Lowercased alphanumerics; every other run of characters becomes a single `-`.
pub(crate) fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "tag".to_string()
    } else {
        slug.to_string()
    }
}
