use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://api.clickup.com/api/v2";
pub const DEFAULT_OUTPUT_FILE: &str = "spec.md";
pub const DEFAULT_SPEC_MARKER: &str = "SPEC:";
pub const DEFAULT_CLICKUP_HOST: &str = "app.clickup.com";

/// Settings for `fetch-task`, resolved once from the environment and passed
/// into the command explicitly.
#[derive(Debug, Clone)]
pub struct FetchTaskConfig {
    /// Source task URL (`CLICKUP_URL`). Empty when unset.
    pub task_url: String,
    /// API token sent as the raw `Authorization` header (`CLICKUP_API_TOKEN`).
    pub api_token: String,
    /// Workspace id for custom task id lookups (`CLICKUP_TEAM_ID`).
    pub team_id: String,
    /// Force the custom task id namespace (`CLICKUP_CUSTOM_TASK_IDS=true`).
    pub custom_task_ids: bool,
    /// Where the rendered document lands (`OUTPUT_FILE`, default `spec.md`).
    pub out_file: PathBuf,
    /// API base path (`CLICKUP_API_BASE`). Defaults to the production
    /// endpoint; tests point it at a local mock server.
    pub api_base: String,
}

impl FetchTaskConfig {
    pub fn from_env() -> Self {
        Self {
            task_url: env_trimmed("CLICKUP_URL"),
            api_token: env_trimmed("CLICKUP_API_TOKEN"),
            team_id: env_trimmed("CLICKUP_TEAM_ID"),
            custom_task_ids: env_trimmed("CLICKUP_CUSTOM_TASK_IDS").eq_ignore_ascii_case("true"),
            out_file: PathBuf::from(env_or("OUTPUT_FILE", DEFAULT_OUTPUT_FILE)),
            api_base: env_or("CLICKUP_API_BASE", DEFAULT_API_BASE),
        }
    }
}

/// Settings for `find-spec-url`.
#[derive(Debug, Clone)]
pub struct SpecUrlConfig {
    /// Marker preceding an explicit spec link (`SPEC_COMMENT_MARKER`, default
    /// `SPEC:`). Setting it to an empty string disables marker matching.
    pub marker: String,
    /// Hostname of task links to fall back to (`CLICKUP_HOST`, default
    /// `app.clickup.com`).
    pub host: String,
}

impl SpecUrlConfig {
    pub fn from_env() -> Self {
        Self {
            marker: env::var("SPEC_COMMENT_MARKER")
                .map(|value| value.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_SPEC_MARKER.to_string()),
            host: env_or("CLICKUP_HOST", DEFAULT_CLICKUP_HOST).to_lowercase(),
        }
    }
}

/// Placeholder values for `render-prompt`, one per `{{KEY}}` marker in the
/// template. Unset variables substitute as empty strings.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub role: String,
    pub output_file: String,
    pub language: String,
    pub custom_instructions: String,
    pub agent_files: String,
    pub comments_file: String,
    pub pr_description_file: String,
}

impl PromptContext {
    pub fn from_env() -> Self {
        Self {
            role: env_raw("ROLE"),
            output_file: env_raw("OUTPUT_FILE"),
            language: env_raw("LANGUAGE"),
            custom_instructions: env_trimmed("CUSTOM_INSTRUCTIONS"),
            agent_files: env_raw("AGENT_FILES"),
            comments_file: env_raw("COMMENTS_FILE"),
            pr_description_file: env_raw("PR_DESCRIPTION_FILE"),
        }
    }

    /// Placeholder key/value pairs in substitution order.
    pub fn replacements(&self) -> [(&'static str, &str); 7] {
        [
            ("ROLE", &self.role),
            ("OUTPUT_FILE", &self.output_file),
            ("LANGUAGE", &self.language),
            ("CUSTOM_INSTRUCTIONS", &self.custom_instructions),
            ("AGENT_FILES", &self.agent_files),
            ("COMMENTS_FILE", &self.comments_file),
            ("PR_DESCRIPTION_FILE", &self.pr_description_file),
        ]
    }
}

fn env_raw(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

fn env_trimmed(key: &str) -> String {
    env::var(key)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}
