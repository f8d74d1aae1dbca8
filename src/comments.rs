use chrono::DateTime;
use serde::Deserialize;

/// One PR review comment as delivered by the hosting API. Every field is
/// optional so partial payloads still render.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewComment {
    #[serde(default)]
    pub user: Option<CommentAuthor>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub login: Option<String>,
}

/// PR description payload: only the body matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct PrBody {
    #[serde(default)]
    pub body: Option<String>,
}

/// Render the comment digest: one `##` section per comment with author and
/// normalized timestamp in the heading.
pub fn comments_markdown(comments: &[ReviewComment]) -> String {
    let mut lines = vec!["# PR Comments".to_string(), String::new()];
    for comment in comments {
        let author = comment
            .user
            .as_ref()
            .and_then(|user| user.login.as_deref())
            .unwrap_or("unknown");
        let created = comment
            .created_at
            .as_deref()
            .map(normalize_timestamp)
            .unwrap_or_default();
        let body = comment.body.as_deref().unwrap_or("");
        lines.push(format!("## {author} ({created})"));
        lines.push(String::new());
        lines.push(body.trim().to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn pr_body_markdown(payload: &PrBody) -> String {
    let body = payload.body.as_deref().unwrap_or("");
    ["# PR Description", "", body.trim(), ""].join("\n")
}

/// Re-render RFC 3339 timestamps canonically; anything else passes through
/// verbatim.
fn normalize_timestamp(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.to_rfc3339(),
        Err(_) => raw.to_string(),
    }
}
