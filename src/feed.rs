use atom_syndication::{Category, Entry, Feed, FixedDateTime, Link, Person, Text};
use chrono::{TimeZone, Utc};

use crate::{config::SiteConfig, post::Post, view::Routes};

/// Atom feed of every post. Posts without a valid date are stamped with `now`.
pub(crate) fn generate_feed(
    config: &SiteConfig,
    routes: &Routes,
    posts: &[Post],
    now: FixedDateTime,
) -> String {
    let absolute = |path: String| format!("{}{path}", config.site_url);
    let stamp = |post: &Post| -> FixedDateTime {
        post.published
            .map(|d| Utc.from_utc_datetime(&d).into())
            .unwrap_or(now)
    };

    let entries: Vec<Entry> = posts
        .iter()
        .map(|post| {
            let url = absolute(routes.post(&post.slug));
            let mut link = Link::default();
            link.set_href(url.clone());

            let mut entry = Entry::default();
            entry.set_title(post.title.clone());
            entry.set_id(url);
            entry.set_updated(stamp(post));
            entry.set_links(vec![link]);
            if !post.excerpt.is_empty() {
                entry.set_summary(Some(Text::plain(post.excerpt.clone())));
            }
            entry.set_categories(
                post.tags
                    .iter()
                    .map(|t| {
                        let mut category = Category::default();
                        category.set_term(t.clone());
                        category
                    })
                    .collect::<Vec<_>>(),
            );
            entry
        })
        .collect();

    let mut author = Person::default();
    author.set_name(config.github.username.clone());

    let mut self_link = Link::default();
    self_link.set_href(absolute(routes.feed()));
    self_link.set_rel("self");
    let mut alternate = Link::default();
    alternate.set_href(absolute(routes.blog()));

    let mut feed = Feed::default();
    feed.set_title(format!("{} | {}", config.blog.title, config.seo.title));
    feed.set_id(absolute(routes.blog()));
    feed.set_updated(posts.iter().map(stamp).max().unwrap_or(now));
    feed.set_authors(vec![author]);
    feed.set_links(vec![self_link, alternate]);
    feed.set_entries(entries);
    feed.to_string()
}
