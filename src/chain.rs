use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;

use crate::clickup::FetchError;
use crate::task::TaskView;

/// Remote store the resolver walks. Implemented by `ClickUpClient`; tests
/// substitute an in-memory source.
#[async_trait]
pub trait TaskSource {
    async fn fetch_task(&self, task_id: &str) -> Result<Value, FetchError>;
}

/// Ordered ancestor views (nearest parent first, root last) plus the
/// warnings produced by whatever ended the walk early.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainResolution {
    pub ancestors: Vec<TaskView>,
    pub warnings: Vec<String>,
}

/// Walk state: either about to fetch `current`, or finished.
enum Walk {
    Step(String),
    Done,
}

impl Walk {
    fn from_parent_id(parent_id: &str) -> Self {
        let trimmed = parent_id.trim();
        if trimmed.is_empty() {
            Walk::Done
        } else {
            Walk::Step(trimmed.to_string())
        }
    }
}

/// Follow the has-parent relation from `start_parent_id` until the chain
/// runs out, revisits an id, or a fetch fails.
///
/// Failures never escape the walk: each one becomes a warning string and
/// ends traversal at that point. Every id is fetched at most once, which
/// also bounds the loop on cyclic data.
pub async fn resolve_parent_chain(source: &dyn TaskSource, start_parent_id: &str) -> ChainResolution {
    let mut visited = HashSet::new();
    let mut resolution = ChainResolution::default();
    let mut state = Walk::from_parent_id(start_parent_id);

    while let Walk::Step(current) = state {
        if !visited.insert(current.clone()) {
            resolution.warnings.push(format!(
                "Cycle detected in parent chain at task ID {current}. Stopped traversal."
            ));
            break;
        }

        state = match source.fetch_task(&current).await {
            Ok(payload) => {
                let view = TaskView::from_json(&payload);
                let next = Walk::from_parent_id(&view.parent_id);
                resolution.ancestors.push(view);
                next
            }
            Err(err) => {
                resolution
                    .warnings
                    .push(format!("Parent task {current} fetch failed: {err}"));
                Walk::Done
            }
        };
    }

    resolution
}
