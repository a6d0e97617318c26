use serde::Serialize;

use crate::{post::Post, tags::TagIndex};

use super::Routes;

/// Why a listing shows no posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EmptyState {
    NoPosts,
    NoPostsWithTag(String),
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoPosts => "No blog posts found.".to_string(),
            EmptyState::NoPostsWithTag(tag) => format!("No posts found with tag \"{tag}\""),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagButton {
    pub label: String,
    pub count: usize,
    pub href: String,
    pub active: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostSummary<'a> {
    pub title: &'a str,
    pub href: String,
    pub date: Option<&'a str>,
    pub excerpt: &'a str,
    pub tags: &'a [String],
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmptyMessage {
    pub message: String,
    /// Link back to the unfiltered listing, only when a filter is active.
    pub clear_href: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListModel<'a> {
    pub selected: Option<&'a str>,
    pub all: TagButton,
    /// Empty when no post has a tag; the tag bar is hidden then.
    pub tags: Vec<TagButton>,
    pub posts: Vec<PostSummary<'a>>,
    pub empty: Option<EmptyMessage>,
}

/// Post listing with an optional single-tag filter.
#[derive(Debug, Clone)]
pub(crate) struct ListView<'a> {
    posts: &'a [Post],
    tags: &'a TagIndex,
    selected: Option<String>,
}

impl<'a> ListView<'a> {
    /// `posts` must already be in display order.
    pub fn new(posts: &'a [Post], tags: &'a TagIndex) -> Self {
        Self {
            posts,
            tags,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Filters by `tag`. An empty tag clears the filter.
    pub fn select(&mut self, tag: &str) {
        if tag.is_empty() {
            self.clear();
        } else {
            self.selected = Some(tag.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Posts under the current filter, in collection order.
    pub fn visible(&self) -> Vec<&'a Post> {
        match self.selected() {
            Some(tag) => self.posts.iter().filter(|p| p.has_tag(tag)).collect(),
            None => self.posts.iter().collect(),
        }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.posts.is_empty() {
            return Some(EmptyState::NoPosts);
        }
        match self.selected() {
            Some(tag) if !self.posts.iter().any(|p| p.has_tag(tag)) => {
                Some(EmptyState::NoPostsWithTag(tag.to_string()))
            }
            _ => None,
        }
    }

    pub fn model(&self, routes: &Routes) -> ListModel<'_> {
        let selected = self.selected();
        let all = TagButton {
            label: "All".to_string(),
            count: self.posts.len(),
            href: routes.blog(),
            active: selected.is_none(),
        };
        let tags = self
            .tags
            .counts()
            .map(|tc| TagButton {
                label: tc.name.to_string(),
                count: tc.count,
                href: routes.tag(tc.name),
                active: selected == Some(tc.name),
            })
            .collect();
        let posts = self
            .visible()
            .into_iter()
            .map(|p| PostSummary {
                title: &p.title,
                href: routes.post(&p.slug),
                date: p.date.as_deref(),
                excerpt: &p.excerpt,
                tags: &p.tags,
            })
            .collect();
        let empty = self.empty_state().map(|state| EmptyMessage {
            message: state.message(),
            clear_href: match state {
                EmptyState::NoPosts => None,
                EmptyState::NoPostsWithTag(_) => Some(routes.blog()),
            },
        });

        ListModel {
            selected,
            all,
            tags,
            posts,
            empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::sort_posts;
    use pretty_assertions::assert_eq;

    fn collection() -> Vec<Post> {
        let mut posts = vec![
            Post::parse("a", "---\ndate: 2021-01-01\ntags: rust, web\n---\n"),
            Post::parse("b", "---\ndate: 2023-01-01\ntags: web\n---\n"),
            Post::parse("c", "---\ndate: 2022-01-01\ntags: rust\n---\n"),
            Post::parse("d", "---\ndate: 2020-01-01\n---\n"),
        ];
        sort_posts(&mut posts);
        posts
    }

    fn slugs(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn test_no_filter_shows_everything_in_order() {
        let posts = collection();
        let tags = TagIndex::build(&posts);
        let view = ListView::new(&posts, &tags);
        assert_eq!(view.selected(), None);
        assert_eq!(slugs(&view.visible()), vec!["b", "c", "a", "d"]);
        assert_eq!(view.empty_state(), None);
    }

    #[test]
    fn test_filter_is_order_preserving_subset() {
        let posts = collection();
        let tags = TagIndex::build(&posts);
        let mut view = ListView::new(&posts, &tags);

        view.select("rust");
        let visible = view.visible();
        assert_eq!(slugs(&visible), vec!["c", "a"]);
        let expected: Vec<&Post> = posts.iter().filter(|p| p.tags.contains(&"rust".to_string())).collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn test_reselecting_is_idempotent_and_all_restores() {
        let posts = collection();
        let tags = TagIndex::build(&posts);
        let mut view = ListView::new(&posts, &tags);
        let full = view.visible();

        view.select("web");
        view.select("web");
        assert_eq!(view.selected(), Some("web"));
        assert_eq!(slugs(&view.visible()), vec!["b", "a"]);

        view.select("");
        assert_eq!(view.selected(), None);
        assert_eq!(view.visible(), full);

        view.select("rust");
        view.clear();
        assert_eq!(view.visible(), full);
    }

    #[test]
    fn test_unknown_tag_gives_clearable_empty_state() {
        let posts = collection();
        let tags = TagIndex::build(&posts);
        let mut view = ListView::new(&posts, &tags);
        view.select("go");

        assert!(view.visible().is_empty());
        assert_eq!(view.empty_state(), Some(EmptyState::NoPostsWithTag("go".to_string())));

        let model = view.model(&Routes::new("/", &tags));
        assert_eq!(
            model.empty,
            Some(EmptyMessage {
                message: "No posts found with tag \"go\"".to_string(),
                clear_href: Some("/blog/".to_string()),
            })
        );
    }

    #[test]
    fn test_empty_collection_has_no_clear_control() {
        let tags = TagIndex::default();
        let mut view = ListView::new(&[], &tags);
        view.select("rust");
        assert_eq!(view.empty_state(), Some(EmptyState::NoPosts));

        let model = view.model(&Routes::new("/", &tags));
        assert_eq!(
            model.empty,
            Some(EmptyMessage {
                message: "No blog posts found.".to_string(),
                clear_href: None,
            })
        );
        assert!(model.tags.is_empty());
    }

    #[test]
    fn test_model_marks_active_tag() {
        let posts = collection();
        let tags = TagIndex::build(&posts);
        let routes = Routes::new("/", &tags);
        let mut view = ListView::new(&posts, &tags);
        view.select("web");
        let model = view.model(&routes);

        assert!(!model.all.active);
        assert_eq!(model.all.count, 4);
        assert_eq!(
            model.tags,
            vec![
                TagButton {
                    label: "rust".to_string(),
                    count: 2,
                    href: "/blog/tags/rust.html".to_string(),
                    active: false,
                },
                TagButton {
                    label: "web".to_string(),
                    count: 2,
                    href: "/blog/tags/web.html".to_string(),
                    active: true,
                },
            ]
        );
        assert_eq!(model.posts[0].href, "/blog/b.html");
        assert_eq!(model.posts[0].date, Some("2023-01-01"));
    }
}
