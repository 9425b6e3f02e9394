use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dispatch::QuitKeys;
use crate::hackernews::{StoryType, HN_API_BASE};
use crate::launcher::{self, LauncherMode, OpenerTable};
use crate::view::DEFAULT_HEADER;

const DEFAULT_ENV_PREFIX: &str = "HN_FRONT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub ui: UIConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub story_type: StoryType,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            story_type: StoryType::default(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            workers: default_workers(),
        }
    }
}

fn default_count() -> usize {
    10
}

fn default_base_url() -> String {
    HN_API_BASE.to_string()
}

fn default_user_agent() -> String {
    format!("hn-front/{}", crate::VERSION)
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UIConfig {
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default)]
    pub quit_keys: QuitKeys,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            quit_keys: QuitKeys::default(),
        }
    }
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LauncherConfig {
    #[serde(default)]
    pub mode: LauncherMode,
    /// Extra or replacement openers, merged over the built-in table.
    #[serde(default)]
    pub openers: OpenerTable,
}

impl LauncherConfig {
    pub fn opener_table(&self) -> OpenerTable {
        let mut table = launcher::default_openers();
        for (platform, command) in &self.openers {
            table.insert(platform.clone(), command.clone());
        }
        table
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hn-front").join("hn-front.log"))
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        let from_file = read_config_file(path)?;
        cfg = merge_config(cfg, from_file);
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    apply_env(&mut cfg, prefix);

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    base.feed.count = other.feed.count;
    base.feed.story_type = other.feed.story_type;
    if !other.feed.base_url.is_empty() {
        base.feed.base_url = other.feed.base_url;
    }
    if !other.feed.user_agent.is_empty() {
        base.feed.user_agent = other.feed.user_agent;
    }
    base.feed.timeout = other.feed.timeout;
    base.feed.workers = other.feed.workers;

    if !other.ui.header.is_empty() {
        base.ui.header = other.ui.header;
    }
    base.ui.quit_keys = other.ui.quit_keys;

    base.launcher.mode = other.launcher.mode;
    base.launcher.openers.extend(other.launcher.openers);

    if other.log.file.is_some() {
        base.log.file = other.log.file;
    }
    if !other.log.level.is_empty() {
        base.log.level = other.log.level;
    }

    base
}

fn apply_env(cfg: &mut Config, prefix: &str) {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    for (key, value) in map {
        apply_env_value(cfg, &key, value);
    }
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "feed.count" => {
            if let Ok(parsed) = value.trim().parse::<usize>() {
                cfg.feed.count = parsed;
            }
        }
        "feed.story_type" => {
            if let Some(story_type) = StoryType::parse(&value) {
                cfg.feed.story_type = story_type;
            }
        }
        "feed.base_url" => cfg.feed.base_url = value,
        "feed.user_agent" => cfg.feed.user_agent = value,
        "feed.timeout" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.feed.timeout = duration;
            }
        }
        "feed.workers" => {
            if let Ok(parsed) = value.trim().parse::<usize>() {
                cfg.feed.workers = parsed;
            }
        }
        "ui.header" => cfg.ui.header = value,
        "ui.quit_keys" => {
            if let Some(keys) = QuitKeys::parse(&value) {
                cfg.ui.quit_keys = keys;
            }
        }
        "launcher.mode" => {
            if let Some(mode) = LauncherMode::parse(&value) {
                cfg.launcher.mode = mode;
            }
        }
        "log.file" => cfg.log.file = Some(PathBuf::from(value)),
        "log.level" => cfg.log.level = value,
        _ => {}
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hn-front").join("config.yaml"))
}
