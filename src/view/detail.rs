use std::path::Path;

use log::{debug, warn};
use serde::Serialize;

use crate::{
    markdown,
    post::Post,
    repository::{self, LoadError},
};

pub(crate) const NOT_FOUND_BODY: &str =
    "# Post not found\n\nThe requested blog post could not be found.";

/// Identifies one load issued by [`DetailView::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DetailState {
    Idle,
    Loading { slug: String },
    Ready(Post),
    NotFound { slug: String },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetailModel {
    pub loading: bool,
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub excerpt: Option<String>,
    pub body: String,
}

/// A single post addressed by slug. Only the most recently issued load may
/// change what the view shows.
#[derive(Debug)]
pub(crate) struct DetailView {
    generation: u64,
    state: DetailState,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: DetailState::Idle,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn begin(&mut self, slug: &str) -> LoadTicket {
        self.generation += 1;
        self.state = DetailState::Loading {
            slug: slug.to_string(),
        };
        LoadTicket(self.generation)
    }

    /// Applies the outcome of `ticket`'s load. Returns `false`, leaving the
    /// view untouched, if a newer load has been issued since.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<Post, LoadError>) -> bool {
        if ticket.0 != self.generation {
            debug!("discarding stale load {ticket:?}");
            return false;
        }
        let slug = match &self.state {
            DetailState::Loading { slug } => slug.clone(),
            _ => return false,
        };
        self.state = match result {
            Ok(post) => DetailState::Ready(post),
            Err(e) => {
                if let LoadError::Unreadable { .. } = e {
                    warn!("{e}");
                }
                DetailState::NotFound { slug }
            }
        };
        true
    }

    /// Loads `slug` from `dir` and shows it.
    pub fn load(&mut self, dir: &Path, slug: &str) -> &DetailState {
        let ticket = self.begin(slug);
        let result = repository::load_post(dir, slug);
        self.finish(ticket, result);
        self.state()
    }

    pub fn model(&self) -> DetailModel {
        match &self.state {
            DetailState::Idle => DetailModel::loading(""),
            DetailState::Loading { slug } => DetailModel::loading(slug),
            DetailState::Ready(post) => DetailModel {
                loading: false,
                slug: post.slug.clone(),
                title: post.title.clone(),
                date: post.date.clone(),
                tags: post.tags.clone(),
                excerpt: Some(post.excerpt.clone()).filter(|e| !e.is_empty()),
                body: markdown::render(&post.body),
            },
            DetailState::NotFound { slug } => DetailModel {
                loading: false,
                slug: slug.clone(),
                title: if slug.is_empty() {
                    "Not found".to_string()
                } else {
                    slug.clone()
                },
                date: None,
                tags: vec![],
                excerpt: None,
                body: markdown::render(NOT_FOUND_BODY),
            },
        }
    }
}

impl DetailModel {
    fn loading(slug: &str) -> Self {
        Self {
            loading: true,
            slug: slug.to_string(),
            title: String::new(),
            date: None,
            tags: vec![],
            excerpt: None,
            body: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn post(slug: &str) -> Post {
        Post::parse(
            slug,
            "---\ntitle: Hello\ndate: 2024-01-02\ntags: a, b\nexcerpt: Hi\n---\n## Section\n\nText",
        )
    }

    #[test]
    fn test_missing_post_renders_fallback() {
        let temp = tempfile::tempdir().unwrap();
        let mut view = DetailView::new();
        let state = view.load(temp.path(), "missing");
        assert_eq!(
            state,
            &DetailState::NotFound {
                slug: "missing".to_string()
            }
        );

        let model = view.model();
        assert!(!model.loading);
        assert_eq!(model.title, "missing");
        assert!(model.body.contains("Post not found</h1>"));
        assert!(model.body.contains("The requested blog post could not be found."));
    }

    #[test]
    fn test_loaded_post_model() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-02\ntags: a, b\nexcerpt: Hi\n---\n## Section\n\nText",
        )
        .unwrap();
        let mut view = DetailView::new();
        view.load(temp.path(), "hello");

        let model = view.model();
        assert_eq!(model.title, "Hello");
        assert_eq!(model.date.as_deref(), Some("2024-01-02"));
        assert_eq!(model.tags, vec!["a", "b"]);
        assert_eq!(model.excerpt.as_deref(), Some("Hi"));
        assert!(model.body.contains(">Section</h2>"));
    }

    #[test]
    fn test_loading_shows_nothing_of_the_post() {
        let mut view = DetailView::new();
        view.begin("hello");
        let model = view.model();
        assert!(model.loading);
        assert_eq!(model.body, "");
        assert_eq!(model.title, "");
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut view = DetailView::new();
        let first = view.begin("first");
        let second = view.begin("second");

        assert!(!view.finish(first, Ok(post("first"))));
        assert_eq!(
            view.state(),
            &DetailState::Loading {
                slug: "second".to_string()
            }
        );

        assert!(view.finish(second, Err(LoadError::NotFound("second".to_string()))));
        assert_eq!(
            view.state(),
            &DetailState::NotFound {
                slug: "second".to_string()
            }
        );

        // a late answer for the first slug must not replace the second
        assert!(!view.finish(first, Ok(post("first"))));
        assert!(matches!(view.state(), DetailState::NotFound { .. }));
    }

    #[test]
    fn test_finished_ticket_cannot_apply_twice() {
        let mut view = DetailView::new();
        let ticket = view.begin("hello");
        assert!(view.finish(ticket, Ok(post("hello"))));
        assert!(!view.finish(ticket, Err(LoadError::NotFound("hello".to_string()))));
        assert!(matches!(view.state(), DetailState::Ready(_)));
    }
}
