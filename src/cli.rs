use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::agents::{self, AgentEntry};
use crate::chain;
use crate::clickup::{is_numeric_id, ClickUpClient, TaskLocator};
use crate::comments::{self, PrBody, ReviewComment};
use crate::config::{FetchTaskConfig, PromptContext, SpecUrlConfig};
use crate::error::CliError;
use crate::report;
use crate::spec_url::SpecUrlFinder;
use crate::task::TaskView;
use crate::template;

/// `comments-md`: JSON comment array on stdin, Markdown digest on stdout.
pub fn comments_md() -> Result<(), CliError> {
    let comments = read_comments_from_stdin()?;
    print!("{}", comments::comments_markdown(&comments));
    Ok(())
}

/// `pr-body-md`: PR description payload on stdin, Markdown on stdout.
pub fn pr_body_md() -> Result<(), CliError> {
    let input = read_stdin().map_err(|_| CliError::InvalidPrBodyJson)?;
    let payload: PrBody = serde_json::from_str(&input).map_err(|_| CliError::InvalidPrBodyJson)?;
    print!("{}", comments::pr_body_markdown(&payload));
    Ok(())
}

/// `find-spec-url`: print the first spec URL found in the comment stream.
pub fn find_spec_url(config: SpecUrlConfig) -> Result<(), CliError> {
    let comments = read_comments_from_stdin()?;
    let finder = SpecUrlFinder::new(&config)?;
    match finder.find(&comments) {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => Err(CliError::SpecUrlNotFound),
    }
}

/// `fetch-task`: fetch the task behind the configured URL, resolve its
/// parent chain, and write the assembled document.
pub async fn fetch_task(config: FetchTaskConfig) -> Result<(), CliError> {
    if config.task_url.is_empty() {
        return Err(CliError::MissingTaskUrl);
    }
    if config.api_token.is_empty() {
        return Err(CliError::MissingApiToken);
    }
    if config.task_url.contains("/docs/") || config.task_url.contains("/doc/") {
        return Err(CliError::DocsUrlUnsupported);
    }

    let locator = TaskLocator::from_url(&config.task_url).ok_or(CliError::TaskIdNotFound)?;

    // Non-numeric ids only exist in the custom namespace, so the flag is
    // implied even when unset.
    let custom_task_ids = config.custom_task_ids || !is_numeric_id(&locator.task_id);
    let mut team_id = config.team_id.clone();
    if custom_task_ids {
        if team_id.is_empty() && is_numeric_id(&locator.team_id_hint) {
            team_id = locator.team_id_hint.clone();
        }
        if team_id.is_empty() {
            return Err(CliError::MissingTeamId);
        }
    }

    let client = ClickUpClient::new(
        config.api_base.as_str(),
        config.api_token.as_str(),
        custom_task_ids,
        team_id,
    )
    .map_err(CliError::InitialFetch)?;

    let payload = client
        .fetch_task(&locator.task_id)
        .await
        .map_err(CliError::InitialFetch)?;
    let main_task = TaskView::from_json(&payload);
    debug!(task_id = %locator.task_id, parent_id = %main_task.parent_id, "fetched root task");

    let resolution = chain::resolve_parent_chain(&client, &main_task.parent_id).await;
    for warning in &resolution.warnings {
        warn!("{warning}");
    }

    let document = report::spec_document(&config.task_url, &locator.task_id, &main_task, &resolution);
    tokio::fs::write(&config.out_file, document)
        .await
        .with_context(|| format!("failed to write {}", config.out_file.display()))?;
    info!(
        path = %config.out_file.display(),
        ancestors = resolution.ancestors.len(),
        "wrote task document"
    );
    Ok(())
}

/// `list-agents`: print `name|role|prompt` for each usable manifest entry.
pub fn list_agents(manifest_path: &Path) -> Result<(), CliError> {
    let manifest = agents::load_manifest(manifest_path)?;
    for line in manifest.agents.iter().filter_map(AgentEntry::listing_line) {
        println!("{line}");
    }
    Ok(())
}

/// `render-prompt`: substitute placeholders in a template file.
pub fn render_prompt(
    context: &PromptContext,
    template_path: &Path,
    output_path: &Path,
) -> Result<(), CliError> {
    let contents = std::fs::read_to_string(template_path)
        .with_context(|| format!("failed to read template {}", template_path.display()))?;
    let rendered = template::render(&contents, context);
    std::fs::write(output_path, rendered)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    Ok(())
}

fn read_comments_from_stdin() -> Result<Vec<ReviewComment>, CliError> {
    let input = read_stdin().map_err(|_| CliError::InvalidCommentsJson)?;
    serde_json::from_str(&input).map_err(|_| CliError::InvalidCommentsJson)
}

fn read_stdin() -> std::io::Result<String> {
    std::io::read_to_string(std::io::stdin())
}
