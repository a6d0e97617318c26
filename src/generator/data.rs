use serde::Serialize;

use crate::{
    config::{
        Certification, Education, Experience, ExternalProject, Publication, SiteConfig, SocialLink,
    },
    profile::{GithubProfile, GithubRepo},
    view::{detail::DetailModel, list::ListModel, Routes},
};

/// Shared by every page through the layout partial.
#[derive(Serialize, Debug)]
pub(super) struct SiteData<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub theme: &'a str,
    pub theme_script: Option<String>,
    pub footer: Option<&'a str>,
    pub home: String,
    pub blog: String,
    pub feed: String,
    pub stylesheet: String,
}

impl<'a> SiteData<'a> {
    pub fn new(config: &'a SiteConfig, routes: &Routes) -> Self {
        Self {
            title: &config.seo.title,
            description: &config.seo.description,
            image_url: &config.seo.image_url,
            theme: config.theme.initial_theme(),
            theme_script: config.theme.bootstrap_script(),
            footer: config.footer.as_deref(),
            home: routes.home(),
            blog: routes.blog(),
            feed: routes.feed(),
            stylesheet: format!("{}folio.css", routes.home()),
        }
    }
}

#[derive(Serialize, Debug)]
pub(super) struct ArticlePageData<'a> {
    pub site: &'a SiteData<'a>,
    pub page_title: String,
    pub post: DetailModel,
}

#[derive(Serialize, Debug)]
pub(super) struct ListPageData<'a> {
    pub site: &'a SiteData<'a>,
    pub page_title: String,
    pub heading: &'a str,
    pub list: ListModel<'a>,
}

#[derive(Serialize, Debug)]
pub(super) struct RecentPost<'a> {
    pub title: &'a str,
    pub href: String,
    pub date: Option<&'a str>,
    pub relative: Option<String>,
    pub excerpt: &'a str,
}

#[derive(Serialize, Debug)]
pub(super) struct IndexPageData<'a> {
    pub site: &'a SiteData<'a>,
    pub username: &'a str,
    pub profile: Option<&'a GithubProfile>,
    pub display_name: &'a str,
    pub social: Vec<SocialLink>,
    pub resume: Option<&'a str>,
    pub skills: &'a [String],
    pub experiences: &'a [Experience],
    pub certifications: &'a [Certification],
    pub educations: &'a [Education],
    pub publications: &'a [Publication],
    pub github_projects_header: &'a str,
    pub github_projects: Vec<GithubRepo>,
    pub external_projects_header: &'a str,
    pub external_projects: &'a [ExternalProject],
    pub blog_title: &'a str,
    pub recent_posts: Vec<RecentPost<'a>>,
}
