use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// On-disk agent manifest: `{ "agents": [ { name, role, prompt } ] }`.
#[derive(Debug, Default, Deserialize)]
pub struct AgentManifest {
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub prompt: String,
}

impl AgentEntry {
    /// Pipe-delimited listing line, or `None` when the entry is unusable
    /// (missing name or prompt). The role may be empty.
    pub fn listing_line(&self) -> Option<String> {
        let name = self.name.trim();
        let role = self.role.trim();
        let prompt = self.prompt.trim();
        if name.is_empty() || prompt.is_empty() {
            return None;
        }
        Some(format!("{name}|{role}|{prompt}"))
    }
}

pub fn load_manifest(path: &Path) -> Result<AgentManifest> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read agents manifest {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid agents manifest {}", path.display()))
}
