use anyhow::Context as _;
use chrono::{Local, NaiveDateTime};
use fs_extra::dir::CopyOptions;
use log::{debug, info, warn};

use crate::{
    context::Context,
    feed,
    post::Post,
    profile,
    repository,
    tags::TagIndex,
    view::{
        detail::{DetailState, DetailView},
        list::ListView,
        Routes,
    },
};

mod data;
mod utils;

use data::{ArticlePageData, IndexPageData, ListPageData, RecentPost, SiteData};
use utils::{create_output, relative_time};

fn generate_index(
    ctx: &Context,
    site: &SiteData,
    routes: &Routes,
    posts: &[Post],
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    let config = &ctx.config;
    let username = config.github.username.as_str();
    let profile = profile::resolve(username, &ctx.profile_cache, ctx.offline);
    let github_projects = profile::resolve_projects(
        username,
        &config.projects.github,
        &ctx.profile_cache,
        ctx.offline,
    );

    let recent_posts = posts
        .iter()
        .take(config.blog.recent_limit)
        .map(|p| RecentPost {
            title: &p.title,
            href: routes.post(&p.slug),
            date: p.date.as_deref(),
            relative: p.published.map(|d| relative_time(d, now)),
            excerpt: &p.excerpt,
        })
        .collect();

    let data = IndexPageData {
        site,
        username,
        profile: profile.as_ref(),
        display_name: profile.as_ref().map_or(username, |p| p.display_name()),
        social: config.social.links(),
        resume: config.resume_url(),
        skills: &config.skills,
        experiences: &config.experiences,
        certifications: &config.certifications,
        educations: &config.educations,
        publications: &config.publications,
        github_projects_header: &config.projects.github.header,
        github_projects,
        external_projects_header: &config.projects.external.header,
        external_projects: &config.projects.external.projects,
        blog_title: &config.blog.title,
        recent_posts,
    };
    let fd = create_output(&ctx.out_dir.join("index.html"))?;
    ctx.handlebars
        .render_to_write("index", &data, fd)
        .context("while generating index.html")?;
    Ok(())
}

fn generate_lists(
    ctx: &Context,
    site: &SiteData,
    routes: &Routes,
    posts: &[Post],
    tags: &TagIndex,
) -> anyhow::Result<()> {
    let heading = ctx.config.blog.title.as_str();
    let mut view = ListView::new(posts, tags);

    // unfiltered listing
    {
        let fd = create_output(&ctx.out_dir.join("blog").join("index.html"))?;
        let data = ListPageData {
            site,
            page_title: heading.to_string(),
            heading,
            list: view.model(routes),
        };
        ctx.handlebars
            .render_to_write("list", &data, fd)
            .context("while generating blog/index.html")?;
    }

    if tags.is_empty() {
        return Ok(());
    }

    // one listing per tag filter
    let tags_dir = ctx.out_dir.join("blog").join("tags");
    for tag in tags.tags() {
        debug!("listing {} posts tagged {tag:?}", tags.count(tag));
        view.select(tag);
        let mut path = tags_dir.join(routes.tag_slug(tag));
        path.set_extension("html");
        let fd = create_output(&path)?;

        let data = ListPageData {
            site,
            page_title: format!("#{tag}"),
            heading,
            list: view.model(routes),
        };
        ctx.handlebars
            .render_to_write("list", &data, fd)
            .with_context(|| format!("while generating list for tag {tag:?}"))?;
    }

    Ok(())
}

fn generate_articles(ctx: &Context, site: &SiteData, posts: &[Post]) -> anyhow::Result<()> {
    let mut view = DetailView::new();
    for post in posts {
        if let DetailState::NotFound { slug } = view.load(&ctx.posts_dir, &post.slug) {
            warn!("{slug} disappeared after listing. writing the not found page instead");
        }

        let fd = create_output(&ctx.out_dir.join("blog").join(format!("{}.html", post.slug)))?;

        let model = view.model();
        let data = ArticlePageData {
            site,
            page_title: model.title.clone(),
            post: model,
        };
        ctx.handlebars
            .render_to_write("article", &data, fd)
            .with_context(|| format!("while generating from {:?}", post.slug))?;
    }
    Ok(())
}

/// `404.html`, rendered through the detail view's not-found state.
fn generate_not_found(ctx: &Context, site: &SiteData) -> anyhow::Result<()> {
    let mut view = DetailView::new();
    let ticket = view.begin("");
    view.finish(ticket, Err(repository::LoadError::NotFound(String::new())));

    let model = view.model();
    let data = ArticlePageData {
        site,
        page_title: model.title.clone(),
        post: model,
    };
    let fd = create_output(&ctx.out_dir.join("404.html"))?;
    ctx.handlebars
        .render_to_write("article", &data, fd)
        .context("while generating 404.html")?;
    Ok(())
}

pub(crate) fn generate(ctx: &Context) -> anyhow::Result<()> {
    fs_extra::dir::remove(&ctx.out_dir)?;
    fs_extra::dir::create_all(&ctx.out_dir, false)?;

    // copy `public_dir`
    let mut cp_opts = CopyOptions::new();
    cp_opts.content_only = true;
    cp_opts.overwrite = true;
    fs_extra::dir::copy(&ctx.public_dir, &ctx.out_dir, &cp_opts)
        .with_context(|| format!("while copying {:?}", ctx.public_dir))?;

    let posts = repository::load_posts(&ctx.posts_dir)?;
    let tags = TagIndex::build(&posts);
    let routes = Routes::new(&ctx.config.base, &tags);
    let site = SiteData::new(&ctx.config, &routes);
    let now = Local::now();

    generate_index(ctx, &site, &routes, &posts, now.naive_local())?;
    generate_lists(ctx, &site, &routes, &posts, &tags)?;
    generate_articles(ctx, &site, &posts)?;
    generate_not_found(ctx, &site)?;

    let xml = feed::generate_feed(&ctx.config, &routes, &posts, now.into());
    std::fs::write(ctx.out_dir.join("blog").join("atom.xml"), xml)
        .context("while generating blog/atom.xml")?;

    info!(
        "generated {} posts and {} tag pages into {:?}",
        posts.len(),
        tags.len(),
        ctx.out_dir
    );
    Ok(())
}
