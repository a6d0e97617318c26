use std::{
    cmp::Ordering,
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::{debug, info, warn};

use crate::post::Post;

const POST_EXTENSION: &str = "md";

#[derive(Debug, thiserror::Error)]
pub(crate) enum LoadError {
    #[error("post `{0}` does not exist")]
    NotFound(String),
    #[error("failed to read {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads every post in `dir`, newest first.
///
/// A post that cannot be read is skipped; only failing to list `dir` is an error.
pub(crate) fn load_posts(dir: &Path) -> anyhow::Result<Vec<Post>> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("while listing {dir:?}"))?;
    let paths = post_paths(entries.map(|entry| entry.map(|e| e.path())));

    let mut posts = vec![];
    for path in paths {
        let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!("parsed {path:?}");
                posts.push(Post::parse(&slug, &content));
            }
            Err(e) => warn!("skipping {path:?}: {e}"),
        }
    }

    sort_posts(&mut posts);
    info!("loaded {} posts from {dir:?}", posts.len());
    Ok(posts)
}

/// Markdown files among `entries`, sorted. Entries that fail are skipped.
fn post_paths(entries: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<PathBuf> {
    let mut paths = vec![];
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping directory entry: {e}");
                continue;
            }
        };
        if path.is_file() && path.extension().is_some_and(|e| e == POST_EXTENSION) {
            paths.push(path);
        }
    }
    // discovery order breaks ties between equally dated posts
    paths.sort();
    paths
}

/// Loads the single post addressed by `slug`.
pub(crate) fn load_post(dir: &Path, slug: &str) -> Result<Post, LoadError> {
    if slug.is_empty() || slug.contains(['/', '\\']) || slug.contains("..") {
        return Err(LoadError::NotFound(slug.to_string()));
    }
    let path = dir.join(format!("{slug}.{POST_EXTENSION}"));
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Post::parse(slug, &content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadError::NotFound(slug.to_string())),
        Err(source) => Err(LoadError::Unreadable { path, source }),
    }
}

/// Dated posts newest first, undated or unparseable ones after them.
pub(crate) fn compare_posts(a: &Post, b: &Post) -> Ordering {
    match (a.published, b.published) {
        (Some(ref a_date), Some(ref b_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn sort_posts(posts: &mut [Post]) {
    // stable, so equal keys keep discovery order
    posts.sort_by(compare_posts);
}
