use anyhow::{Context, Result};
use regex::Regex;

use crate::comments::ReviewComment;
use crate::config::SpecUrlConfig;

/// Compiled search patterns for pulling a spec URL out of comment bodies.
pub struct SpecUrlFinder {
    marker: Option<Regex>,
    task_link: Regex,
}

impl SpecUrlFinder {
    pub fn new(config: &SpecUrlConfig) -> Result<Self> {
        let marker = if config.marker.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i){}\s*(https?://\S+)", regex::escape(&config.marker));
            Some(Regex::new(&pattern).context("invalid spec marker pattern")?)
        };
        let task_link = Regex::new(&format!(
            r"(?i)https?://{}/t/\S+",
            regex::escape(&config.host)
        ))
        .context("invalid task link pattern")?;
        Ok(Self { marker, task_link })
    }

    /// First marker match across the comment stream wins; otherwise the
    /// first task link.
    pub fn find(&self, comments: &[ReviewComment]) -> Option<String> {
        self.find_by_marker(comments)
            .or_else(|| self.find_task_link(comments))
    }

    fn find_by_marker(&self, comments: &[ReviewComment]) -> Option<String> {
        let marker = self.marker.as_ref()?;
        comments.iter().find_map(|comment| {
            let body = comment.body.as_deref().unwrap_or("");
            marker
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map(|m| clean_url(m.as_str()))
        })
    }

    fn find_task_link(&self, comments: &[ReviewComment]) -> Option<String> {
        comments.iter().find_map(|comment| {
            let body = comment.body.as_deref().unwrap_or("");
            self.task_link.find(body).map(|m| clean_url(m.as_str()))
        })
    }
}

/// Drop punctuation that tends to trail URLs pasted into prose.
fn clean_url(url: &str) -> String {
    url.trim()
        .trim_end_matches([')', ']', '}', '>', '.', ',', ';'])
        .to_string()
}
