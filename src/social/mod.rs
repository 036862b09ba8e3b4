//! Outbound client for the community content feed.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::SocialConfig;
use crate::database::models::NewSocialLog;

/// Most items imported per fetch
pub const MAX_POSTS: usize = 5;

/// Titles assigned to imported items, cycled by position
pub const TITLES: [&str; 5] = [
    "PetCare Tip: Daily walking routine for dogs",
    "PetCare Story: Milo the cat\u{2019}s first vet visit",
    "PetCare Tip: How to keep your pet calm during checkups",
    "PetCare Update: Grooming reminders for long-hair pets",
    "PetCare Tip: Vaccination schedule for puppies and kittens",
];

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed answered with status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedPage {
    pub posts: Vec<FeedPost>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub user_id: Value,
}

impl FeedPost {
    /// `PetOwner-<userId>`
    pub fn username(&self) -> String {
        let user = match &self.user_id {
            Value::Null => "undefined".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        format!("PetOwner-{}", user)
    }
}

#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
    platform: String,
}

impl FeedClient {
    pub fn new(config: &SocialConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("petcare-api/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: config.feed_url.clone(),
            platform: config.platform.clone(),
        })
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// One GET against the feed; at most [`MAX_POSTS`] items in feed order.
    pub async fn fetch_posts(&self) -> Result<Vec<FeedPost>, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let page: FeedPage = response.json().await?;
        Ok(page.posts.into_iter().take(MAX_POSTS).collect())
    }

    /// Log rows for fetched posts; item `i` gets `TITLES[i % 5]`.
    pub fn log_entries(&self, posts: &[FeedPost]) -> Vec<NewSocialLog> {
        posts
            .iter()
            .enumerate()
            .map(|(i, post)| NewSocialLog {
                platform: self.platform.clone(),
                title: TITLES[i % TITLES.len()].to_string(),
                username: post.username(),
            })
            .collect()
    }
}
