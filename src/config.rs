use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::theme::ThemeConfig;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct SiteConfig {
    /// Path prefix every link is generated under.
    pub base: String,
    /// Absolute URL of the deployed site, used by the feed.
    pub site_url: String,
    pub github: GithubConfig,
    pub seo: SeoConfig,
    pub social: SocialConfig,
    pub resume: Option<ResumeConfig>,
    pub projects: ProjectsConfig,
    pub skills: Vec<String>,
    pub experiences: Vec<Experience>,
    pub certifications: Vec<Certification>,
    pub educations: Vec<Education>,
    pub publications: Vec<Publication>,
    pub blog: BlogConfig,
    pub theme: ThemeConfig,
    /// Raw HTML.
    pub footer: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct GithubConfig {
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct SeoConfig {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct SocialConfig {
    pub linkedin: Option<String>,
    pub x: Option<String>,
    pub mastodon: Option<String>,
    pub research_gate: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub reddit: Option<String>,
    pub threads: Option<String>,
    pub youtube: Option<String>,
    pub udemy: Option<String>,
    pub dribbble: Option<String>,
    pub behance: Option<String>,
    pub medium: Option<String>,
    pub dev: Option<String>,
    pub stackoverflow: Option<String>,
    pub discord: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct SocialLink {
    pub label: &'static str,
    pub text: String,
    pub href: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ResumeConfig {
    pub file_url: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ProjectsConfig {
    pub github: GithubProjectsConfig,
    pub external: ExternalProjectsConfig,
}

/// Repositories of the GitHub user shown on the profile page.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct GithubProjectsConfig {
    pub display: bool,
    pub header: String,
    pub mode: ProjectMode,
    pub automatic: AutomaticProjects,
    pub manual: ManualProjects,
}

impl Default for GithubProjectsConfig {
    fn default() -> Self {
        Self {
            display: false,
            header: "Github Projects".to_string(),
            mode: ProjectMode::default(),
            automatic: AutomaticProjects::default(),
            manual: ManualProjects::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ProjectMode {
    /// The user's own repositories, filtered and sorted.
    #[default]
    Automatic,
    /// Exactly the listed `owner/name` repositories, in order.
    Manual,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortBy {
    #[default]
    Stars,
    Updated,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct AutomaticProjects {
    pub sort_by: SortBy,
    pub limit: usize,
    pub exclude: ExcludedProjects,
}

impl Default for AutomaticProjects {
    fn default() -> Self {
        Self {
            sort_by: SortBy::default(),
            limit: 8,
            exclude: ExcludedProjects::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ExcludedProjects {
    pub forks: bool,
    /// `owner/name`
    pub projects: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ManualProjects {
    /// `owner/name`
    pub projects: Vec<String>,
}

/// Hand-written project cards. The section is hidden while `projects` is empty.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct ExternalProjectsConfig {
    pub header: String,
    pub projects: Vec<ExternalProject>,
}

impl Default for ExternalProjectsConfig {
    fn default() -> Self {
        Self {
            header: "My Projects".to_string(),
            projects: vec![],
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct ExternalProject {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub link: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Publication {
    pub title: String,
    pub conference_name: Option<String>,
    pub journal_name: Option<String>,
    pub authors: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Experience {
    pub company: String,
    pub position: String,
    pub from: String,
    pub to: String,
    pub company_link: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Certification {
    pub name: String,
    pub body: String,
    pub year: String,
    pub link: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub(crate) struct Education {
    pub institution: String,
    pub degree: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct BlogConfig {
    pub title: String,
    /// Posts shown in the profile page's recent posts card.
    pub recent_limit: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Blog Posts".to_string(),
            recent_limit: 5,
        }
    }
}

impl SocialConfig {
    pub fn links(&self) -> Vec<SocialLink> {
        let mut links = vec![];
        let mut push = |label: &'static str, value: &Option<String>, href: &dyn Fn(&str) -> String| {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                links.push(SocialLink {
                    label,
                    text: v.to_string(),
                    href: href(v),
                });
            }
        };
        push("LinkedIn", &self.linkedin, &|v: &str| format!("https://www.linkedin.com/in/{v}"));
        push("X", &self.x, &|v: &str| format!("https://x.com/{v}"));
        push("Mastodon", &self.mastodon, &|v: &str| match v.trim_start_matches('@').split_once('@') {
            Some((user, instance)) => format!("https://{instance}/@{user}"),
            None => v.to_string(),
        });
        push("ResearchGate", &self.research_gate, &|v: &str| {
            format!("https://www.researchgate.net/profile/{v}")
        });
        push("Facebook", &self.facebook, &|v: &str| format!("https://www.facebook.com/{v}"));
        push("Instagram", &self.instagram, &|v: &str| format!("https://www.instagram.com/{v}"));
        push("Reddit", &self.reddit, &|v: &str| format!("https://www.reddit.com/user/{v}"));
        push("Threads", &self.threads, &|v: &str| format!("https://www.threads.net/@{v}"));
        push("YouTube", &self.youtube, &|v: &str| format!("https://www.youtube.com/@{v}"));
        push("Udemy", &self.udemy, &|v: &str| format!("https://www.udemy.com/user/{v}"));
        push("Dribbble", &self.dribbble, &|v: &str| format!("https://dribbble.com/{v}"));
        push("Behance", &self.behance, &|v: &str| format!("https://www.behance.net/{v}"));
        push("Medium", &self.medium, &|v: &str| format!("https://medium.com/@{v}"));
        push("Dev", &self.dev, &|v: &str| format!("https://dev.to/{v}"));
        push("Stack Overflow", &self.stackoverflow, &|v: &str| {
            format!("https://stackoverflow.com/users/{v}")
        });
        // discord has no public profile URL; the app is linked with the handle as text
        push("Discord", &self.discord, &|_: &str| "https://discord.com/app".to_string());
        push("Telegram", &self.telegram, &|v: &str| format!("https://t.me/{v}"));
        push("Website", &self.website, &|v: &str| v.to_string());
        push("Email", &self.email, &|v: &str| format!("mailto:{v}"));
        push("Phone", &self.phone, &|v: &str| format!("tel:{v}"));
        links
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("while reading {path:?}"))?;
        let mut config = Self::parse(&content).with_context(|| format!("while parsing {path:?}"))?;
        if let Ok(url) = std::env::var("FOLIO_SITE_URL") {
            config.site_url = url;
        }
        Ok(config)
    }

    /// Resume link, when one is configured.
    pub fn resume_url(&self) -> Option<&str> {
        self.resume
            .as_ref()
            .map(|r| r.file_url.trim())
            .filter(|url| !url.is_empty())
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        if config.github.username.trim().is_empty() {
            bail!("github.username is required");
        }
        config.base = normalize_base(&config.base);
        config.site_url = config.site_url.trim_end_matches('/').to_string();
        if config.seo.title.is_empty() {
            config.seo.title = format!("Portfolio of {}", config.github.username);
        }
        Ok(config)
    }
}

/// `blog` and `/blog` both become `/blog/`; empty becomes `/`.
fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
