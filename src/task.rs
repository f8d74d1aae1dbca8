use serde_json::Value;

/// Normalized view of one ClickUp task record. Every field is a plain
/// string; `parent_id` is empty when the task has no parent, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub parent_id: String,
}

impl TaskView {
    /// Build a view from a raw task payload. The payload is open-shaped, so
    /// every field degrades to an empty string rather than failing.
    pub fn from_json(data: &Value) -> Self {
        Self {
            id: id_field(data.get("id")),
            name: str_field(data.get("name")),
            description: description_field(data),
            url: str_field(data.get("url")),
            parent_id: parent_id_field(data.get("parent")),
        }
    }
}

fn str_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn id_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// `markdown_description` wins whenever it is present and non-empty.
fn description_field(data: &Value) -> String {
    for key in ["markdown_description", "description"] {
        if let Some(text) = data.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return text.trim().to_string();
            }
        }
    }
    String::new()
}

/// The parent relation arrives either as a bare id string or as an embedded
/// object carrying an `id`.
fn parent_id_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Object(map)) => map
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string(),
        _ => String::new(),
    }
}
