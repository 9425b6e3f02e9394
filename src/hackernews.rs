use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};

pub const HN_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub user_agent: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub http_client: Option<HttpClient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    #[default]
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl StoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::Top => "topstories",
            StoryType::New => "newstories",
            StoryType::Best => "beststories",
            StoryType::Ask => "askstories",
            StoryType::Show => "showstories",
            StoryType::Job => "jobstories",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(StoryType::Top),
            "new" => Some(StoryType::New),
            "best" => Some(StoryType::Best),
            "ask" => Some(StoryType::Ask),
            "show" => Some(StoryType::Show),
            "job" | "jobs" => Some(StoryType::Job),
            _ => None,
        }
    }
}

pub struct Client {
    http: HttpClient,
    user_agent: String,
    base_url: String,
    story_type: StoryType,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.user_agent.trim().is_empty() {
            bail!("hackernews client user agent required");
        }

        let http = match config.http_client {
            Some(client) => client,
            None => HttpClient::builder()
                .timeout(config.timeout.unwrap_or(Duration::from_secs(20)))
                .build()
                .context("build hackernews HTTP client")?,
        };

        let base_url = if config.base_url.trim().is_empty() {
            HN_API_BASE.to_string()
        } else {
            config.base_url.trim_end_matches('/').to_string()
        };

        Ok(Client {
            http,
            user_agent: config.user_agent,
            base_url,
            story_type: StoryType::Top,
        })
    }

    pub fn with_story_type(mut self, story_type: StoryType) -> Self {
        self.story_type = story_type;
        self
    }

    pub fn story_ids(&self) -> Result<Vec<i64>> {
        let url = format!("{}/{}.json", self.base_url, self.story_type.as_str());
        let ids: Vec<i64> = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .with_context(|| format!("request {url}"))?
            .error_for_status()?
            .json()
            .with_context(|| format!("decode story ids from {url}"))?;
        Ok(ids)
    }

    pub fn get_item(&self, id: i64) -> Result<Item> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        let body = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .with_context(|| format!("request {url}"))?
            .error_for_status()?
            .text()
            .with_context(|| format!("read item {id}"))?;
        parse_item(id, &body)
    }
}

/// Decodes an item body. The API answers `null` for identifiers it does not
/// know, which is reported as an error rather than an empty item.
pub fn parse_item(id: i64, body: &str) -> Result<Item> {
    let item: Option<Item> =
        serde_json::from_str(body).with_context(|| format!("decode item {id}"))?;
    item.ok_or_else(|| anyhow!("item {id} not found"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub poll: Option<i64>,
    #[serde(default)]
    pub kids: Option<Vec<i64>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<i64>>,
    #[serde(default)]
    pub descendants: Option<i64>,
}
