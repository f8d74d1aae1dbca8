use crate::config::PromptContext;

/// Substitute every `{{KEY}}` marker with its context value. Markers without
/// a known key stay as-is.
pub fn render(template: &str, context: &PromptContext) -> String {
    let mut rendered = template.to_string();
    for (key, value) in context.replacements() {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}
