use std::collections::BTreeMap;

use serde::Serialize;

use crate::post::Post;

/// Distinct tags of a collection with the number of posts carrying each.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TagIndex {
    counts: BTreeMap<String, usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagCount<'a> {
    pub name: &'a str,
    pub count: usize,
}

impl TagIndex {
    pub fn build(posts: &[Post]) -> Self {
        let mut counts = BTreeMap::new();
        for post in posts {
            let mut seen: Vec<&str> = Vec::with_capacity(post.tags.len());
            for tag in &post.tags {
                if seen.contains(&tag.as_str()) {
                    continue;
                }
                seen.push(tag);
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Tags in ascending lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> impl Iterator<Item = TagCount<'_>> {
        self.counts.iter().map(|(name, &count)| TagCount { name, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(slug: &str, tags: &str) -> Post {
        Post::parse(slug, &format!("---\ntags: {tags}\n---\n"))
    }

    #[test]
    fn test_tags_sorted_and_counted() {
        let posts = vec![
            post("a", "rust, web"),
            post("b", "web"),
            post("c", "Zig, rust"),
        ];
        let index = TagIndex::build(&posts);

        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["Zig", "rust", "web"]);
        assert_eq!(index.count("rust"), 2);
        assert_eq!(index.count("web"), 2);
        assert_eq!(index.count("Zig"), 1);
        assert_eq!(index.count("zig"), 0);
    }

    #[test]
    fn test_duplicate_tag_in_one_post_counts_once() {
        let index = TagIndex::build(&[post("a", "x, x, y")]);
        assert_eq!(
            index.counts().collect::<Vec<_>>(),
            vec![
                TagCount { name: "x", count: 1 },
                TagCount { name: "y", count: 1 }
            ]
        );
    }

    #[test]
    fn test_empty_collection() {
        let index = TagIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
