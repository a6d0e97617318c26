use std::{path::PathBuf, sync::Mutex};

use anyhow::{bail, Context as _};
use clap::{command, Arg, ArgAction};

use crate::{config::SiteConfig, context::Context};

mod cache;
mod config;
mod context;
mod feed;
mod frontmatter;
mod generator;
mod markdown;
mod post;
mod profile;
mod renderer;
mod repository;
mod tags;
mod theme;
mod view;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("posts_dir")
                .help("Directory path of posts")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("posts"),
            Arg::new("out_dir")
                .help("Directory path of output. Existing contents will be removed.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("out"),
            Arg::new("public_dir")
                .help("Directory path of public. Contents will be copied as it is.")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("public"),
            Arg::new("template_dir")
                .help("Directory of template")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("template"),
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Site configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("folio.toml"),
            Arg::new("cache")
                .long("cache")
                .help("JSON file the GitHub profile is cached in")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("cache.json"),
            Arg::new("offline")
                .long("offline")
                .help("Do not fetch the GitHub profile; use the cached one")
                .action(ArgAction::SetTrue),
        ])
        .get_matches();

    let posts_dir: &PathBuf = matches.get_one("posts_dir").unwrap();
    if !posts_dir.is_dir() {
        bail!("posts_dir must be a directory.");
    }
    let out_dir: &PathBuf = matches.get_one("out_dir").unwrap();
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    let public_dir: &PathBuf = matches.get_one("public_dir").unwrap();
    if !public_dir.is_dir() {
        bail!("public_dir must be a directory.")
    }
    let template_dir: &PathBuf = matches.get_one("template_dir").unwrap();
    if !template_dir.is_dir() {
        bail!("template_dir must be a directory.")
    }

    let config_path: &PathBuf = matches.get_one("config").unwrap();
    let config = SiteConfig::load(config_path)?;
    let handlebars = renderer::generate_renderer(template_dir)?;

    let cache_path: &PathBuf = matches.get_one("cache").unwrap();
    let cache = cache::load_cache(cache_path)
        .with_context(|| format!("while loading {cache_path:?}"))?;

    Context::init(
        posts_dir.to_owned(),
        out_dir.to_owned(),
        public_dir.to_owned(),
        config,
        matches.get_flag("offline"),
        handlebars,
        Mutex::new(cache),
    );
    let ctx = Context::instance();

    generator::generate(ctx)?;

    // save cache
    {
        let cache = ctx.profile_cache.lock().unwrap();
        cache::save_cache(cache_path, &cache)?;
    }

    Ok(())
}
