use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::data::{self, HackerNewsSource};
use crate::hackernews;
use crate::launcher;
use crate::model::StoryList;
use crate::ui;
use crate::view::ViewOptions;

/// Fetches the configured stories, then hands the terminal to the story
/// list until the user quits.
pub fn run(cfg: Config) -> Result<()> {
    let count = cfg.feed.count;
    data::check_count(count).context("load stories")?;
    let user_agent = if !cfg.feed.user_agent.trim().is_empty() {
        cfg.feed.user_agent.clone()
    } else {
        format!("hn-front/{}", crate::VERSION)
    };

    let client = hackernews::Client::new(hackernews::ClientConfig {
        user_agent,
        base_url: cfg.feed.base_url.clone(),
        timeout: Some(cfg.feed.timeout),
        http_client: None,
    })
    .context("create hackernews client")?
    .with_story_type(cfg.feed.story_type);
    let source = HackerNewsSource::new(Arc::new(client));

    eprintln!("Fetching {count} stories…");
    log::info!(
        "fetching {count} {} from {}",
        cfg.feed.story_type.as_str(),
        cfg.feed.base_url
    );
    let stories = data::fetch_top(&source, count, cfg.feed.workers).context("load stories")?;
    log::info!("loaded {} stories", stories.len());

    let view = ViewOptions {
        header: cfg.ui.header.clone(),
        quit_keys: cfg.ui.quit_keys,
    };
    let launcher = launcher::from_mode(cfg.launcher.mode, cfg.launcher.opener_table());

    let mut shell = ui::Shell::new(StoryList::new(stories), view, launcher);
    shell.run()
}
