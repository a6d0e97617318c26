use serde_json::{Map, Value};
use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use crate::config::SiteConfig;

#[derive(Debug)]
pub(crate) struct Context {
    pub posts_dir: PathBuf,
    pub out_dir: PathBuf,
    pub public_dir: PathBuf,

    pub config: SiteConfig,
    /// Never touch the network; the GitHub profile comes from the cache only.
    pub offline: bool,

    pub handlebars: handlebars::Handlebars<'static>,
    pub profile_cache: Mutex<Map<String, Value>>,
}

static CONTEXT: OnceLock<Context> = OnceLock::new();

impl Context {
    pub fn init(
        posts_dir: PathBuf,
        out_dir: PathBuf,
        public_dir: PathBuf,
        config: SiteConfig,
        offline: bool,
        handlebars: handlebars::Handlebars<'static>,
        profile_cache: Mutex<Map<String, Value>>,
    ) {
        CONTEXT
            .set(Self {
                posts_dir,
                out_dir,
                public_dir,
                config,
                offline,
                handlebars,
                profile_cache,
            })
            .unwrap();
    }

    pub fn instance() -> &'static Context {
        CONTEXT.get().unwrap()
    }
}
