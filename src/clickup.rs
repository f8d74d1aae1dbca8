use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::chain::TaskSource;

/// Classified failure of one task fetch. The `Display` text doubles as the
/// classification wording embedded in parent-chain warnings.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} Unauthorized/Forbidden")]
    Unauthorized { status: u16 },

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("Invalid JSON response from ClickUp")]
    InvalidJson(#[source] serde_json::Error),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Timeout applied to every task fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Minimal ClickUp REST client scoped to the task endpoint.
#[derive(Debug, Clone)]
pub struct ClickUpClient {
    http: reqwest::Client,
    api_base: String,
    api_token: String,
    custom_task_ids: bool,
    team_id: String,
}

impl ClickUpClient {
    pub fn new(
        api_base: impl Into<String>,
        api_token: impl Into<String>,
        custom_task_ids: bool,
        team_id: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            custom_task_ids,
            team_id: team_id.into(),
        })
    }

    /// GET one task record as raw JSON, classifying every failure mode.
    pub async fn fetch_task(&self, task_id: &str) -> Result<Value, FetchError> {
        let endpoint = format!("{}/task/{}", self.api_base, task_id);
        let mut request = self
            .http
            .get(&endpoint)
            .header(AUTHORIZATION, self.api_token.as_str())
            .header(ACCEPT, "application/json")
            .query(&[("include_markdown_description", "true")]);
        if self.custom_task_ids {
            request = request.query(&[
                ("custom_task_ids", "true"),
                ("team_id", self.team_id.as_str()),
            ]);
        }

        tracing::debug!(task_id, endpoint = %endpoint, "fetching task");
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(FetchError::InvalidJson)
    }
}

#[async_trait::async_trait]
impl TaskSource for ClickUpClient {
    async fn fetch_task(&self, task_id: &str) -> Result<Value, FetchError> {
        ClickUpClient::fetch_task(self, task_id).await
    }
}

/// Task coordinates recovered from a ClickUp task URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocator {
    pub task_id: String,
    /// First path segment after `/t/` when more than one is present; numeric
    /// values can stand in for a missing team id.
    pub team_id_hint: String,
}

static TASK_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/t/([^/?#]+(?:/[^/?#]+)*)").expect("task path regex"));

impl TaskLocator {
    /// Pull the task id (and optional team hint) out of a task URL. `None`
    /// for URLs without a `/t/` segment.
    pub fn from_url(raw: &str) -> Option<Self> {
        let parsed = Url::parse(raw).ok()?;
        let captures = TASK_PATH.captures(parsed.path())?;
        let tail = captures.get(1)?.as_str().trim_matches('/');
        let parts: Vec<&str> = tail.split('/').filter(|part| !part.is_empty()).collect();
        let task_id = (*parts.last()?).to_string();
        let team_id_hint = if parts.len() > 1 {
            parts[0].to_string()
        } else {
            String::new()
        };
        Some(Self {
            task_id,
            team_id_hint,
        })
    }
}

/// True for identifiers in the store's default numeric namespace.
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}
