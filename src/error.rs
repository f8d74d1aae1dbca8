use thiserror::Error;

use crate::clickup::FetchError;

/// Errors surfaced at the binary edge. Each variant maps to the process exit
/// code the surrounding pipeline is contracted to observe.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No CLICKUP_URL provided.")]
    MissingTaskUrl,

    #[error("No CLICKUP_API_TOKEN provided.")]
    MissingApiToken,

    #[error("ClickUp Docs URL detected; public Docs API is not supported.")]
    DocsUrlUnsupported,

    #[error("custom_task_ids enabled but CLICKUP_TEAM_ID is missing.")]
    MissingTeamId,

    #[error("Could not extract ClickUp task ID from URL.")]
    TaskIdNotFound,

    /// Failure fetching the task named on the command line. Ancestor fetch
    /// failures never reach this type; they become warnings in the document.
    #[error("{}", initial_fetch_message(.0))]
    InitialFetch(FetchError),

    #[error("Invalid JSON input for comments.")]
    InvalidCommentsJson,

    #[error("Invalid JSON input for PR body.")]
    InvalidPrBodyJson,

    /// `find-spec-url` miss. Exits 1 without printing anything; the empty
    /// stdout is the signal.
    #[error("no spec URL found in comments")]
    SpecUrlNotFound,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::MissingTaskUrl => 2,
            CliError::MissingApiToken => 3,
            CliError::DocsUrlUnsupported | CliError::MissingTeamId => 4,
            CliError::TaskIdNotFound => 5,
            CliError::InitialFetch(FetchError::InvalidJson(_)) => 7,
            CliError::InitialFetch(_) => 6,
            CliError::InvalidCommentsJson | CliError::InvalidPrBodyJson => 2,
            CliError::SpecUrlNotFound => 1,
            CliError::Other(_) => 1,
        }
    }

    /// Whether the error should be reported on stderr before exiting.
    pub fn is_silent(&self) -> bool {
        matches!(self, CliError::SpecUrlNotFound)
    }
}

fn initial_fetch_message(err: &FetchError) -> String {
    match err {
        FetchError::InvalidJson(_) => "Invalid JSON response from ClickUp.".to_string(),
        other => format!("Failed to fetch ClickUp task: {other}"),
    }
}
