//! GitHub profile and repositories shown on the home page.

use std::{sync::Mutex, time::Duration};

use anyhow::Context as _;
use log::{debug, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use ureq::Agent;

use crate::config::{AutomaticProjects, GithubProjectsConfig, ProjectMode, SortBy};

const API_URL: &str = "https://api.github.com";
const TIMEOUT_SECS: u64 = 30;
/// Largest page the repository listing endpoint serves.
const REPOS_PER_PAGE: usize = 100;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct GithubProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

impl GithubProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.login)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct GithubRepo {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub fork: bool,
    /// RFC 3339, as served by the API.
    #[serde(default)]
    pub updated_at: String,
}

fn agent() -> Agent {
    Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(TIMEOUT_SECS)))
        .build()
        .into()
}

/// GETs `path` from the API and decodes the JSON body.
fn fetch_json<T: DeserializeOwned>(agent: &Agent, path: &str) -> anyhow::Result<T> {
    let url = format!("{API_URL}/{path}");

    info!("Fetching {url}...");
    let response = agent
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", concat!("folio/", env!("CARGO_PKG_VERSION")))
        .call()
        .with_context(|| format!("while fetching {url}"))?;
    response
        .into_body()
        .read_json()
        .with_context(|| format!("while decoding {url}"))
}

/// Runs `fetch` unless `offline`, refreshing `cache` under `github:<path>` on
/// success. Falls back to the cached value when offline or when `fetch` fails.
fn cached<T, F>(
    path: &str,
    cache: &Mutex<Map<String, Value>>,
    offline: bool,
    fetch: F,
) -> Option<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> anyhow::Result<T>,
{
    let key = format!("github:{path}");
    if !offline {
        match fetch() {
            Ok(fetched) => {
                if let Ok(value) = serde_json::to_value(&fetched) {
                    let mut cache = cache.lock().unwrap();
                    cache.insert(key, value);
                }
                return Some(fetched);
            }
            Err(e) => warn!("Could not fetch {path}: {e:#}. falling back to cache."),
        }
    }

    let cache = cache.lock().unwrap();
    let value = cache.get(&key)?;
    match serde_json::from_value(value.clone()) {
        Ok(found) => {
            debug!("using cached {path}");
            Some(found)
        }
        Err(e) => {
            warn!("Invalid cache entry for {path}: {e}");
            None
        }
    }
}

/// Returns the profile from the network, or from `cache` when offline or when
/// the request fails. Successful fetches refresh the cache.
pub(crate) fn resolve(
    username: &str,
    cache: &Mutex<Map<String, Value>>,
    offline: bool,
) -> Option<GithubProfile> {
    let path = format!("users/{username}");
    cached(&path, cache, offline, || fetch_json(&agent(), &path))
}

/// Repositories to show under `config`. Empty when the section is hidden.
pub(crate) fn resolve_projects(
    username: &str,
    config: &GithubProjectsConfig,
    cache: &Mutex<Map<String, Value>>,
    offline: bool,
) -> Vec<GithubRepo> {
    if !config.display {
        return vec![];
    }

    let agent = agent();
    match config.mode {
        ProjectMode::Automatic => {
            let path = format!("users/{username}/repos");
            let repos: Vec<GithubRepo> = cached(&path, cache, offline, || {
                fetch_json(
                    &agent,
                    &format!("{path}?type=owner&per_page={REPOS_PER_PAGE}"),
                )
            })
            .unwrap_or_default();
            select_repos(repos, &config.automatic)
        }
        ProjectMode::Manual => config
            .manual
            .projects
            .iter()
            .filter_map(|full_name| {
                let path = format!("repos/{full_name}");
                cached(&path, cache, offline, || fetch_json(&agent, &path))
            })
            .collect(),
    }
}

/// Applies the exclusions, the ordering and the limit of automatic mode.
pub(crate) fn select_repos(
    mut repos: Vec<GithubRepo>,
    config: &AutomaticProjects,
) -> Vec<GithubRepo> {
    let exclude = &config.exclude;
    repos.retain(|r| !(exclude.forks && r.fork) && !exclude.projects.contains(&r.full_name));
    match config.sort_by {
        SortBy::Stars => repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count)),
        SortBy::Updated => repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
    repos.truncate(config.limit);
    repos
}
