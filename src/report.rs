use crate::chain::ChainResolution;
use crate::task::TaskView;

const NO_DESCRIPTION: &str = "(No description provided in ClickUp task.)";

/// Assemble the output document: task header, description, the ancestor
/// chain nearest-to-root, and any warnings gathered along the way.
pub fn spec_document(
    source_url: &str,
    task_id: &str,
    task: &TaskView,
    chain: &ChainResolution,
) -> String {
    let mut lines: Vec<String> = vec![
        "# ClickUp Task".to_string(),
        format!("- URL: {source_url}"),
        format!("- ID: {task_id}"),
    ];
    if !task.name.is_empty() {
        lines.push(format!("- Title: {}", task.name));
    }
    lines.push(String::new());
    lines.push("## Description".to_string());
    lines.push(or_placeholder(&task.description));
    lines.push(String::new());

    lines.push("## Parent Tasks (nearest -> root)".to_string());
    if chain.ancestors.is_empty() {
        lines.push("- None".to_string());
    } else {
        for (idx, parent) in chain.ancestors.iter().enumerate() {
            lines.push(format!("### Parent {}", idx + 1));
            lines.extend(task_section(parent));
            lines.push(String::new());
        }
    }

    if !chain.warnings.is_empty() {
        lines.push("## Parent Fetch Warnings".to_string());
        for warning in &chain.warnings {
            lines.push(format!("- {warning}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn task_section(task: &TaskView) -> Vec<String> {
    let id = if task.id.is_empty() {
        "(Unknown)"
    } else {
        task.id.as_str()
    };
    let mut lines = vec![format!("- ID: {id}")];
    if !task.url.is_empty() {
        lines.push(format!("- URL: {}", task.url));
    }
    if !task.name.is_empty() {
        lines.push(format!("- Title: {}", task.name));
    }
    lines.push("- Description:".to_string());
    lines.push(or_placeholder(&task.description));
    lines
}

fn or_placeholder(description: &str) -> String {
    if description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        description.to_string()
    }
}
