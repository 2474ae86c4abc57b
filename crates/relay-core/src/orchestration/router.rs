//! Workflow Router
//!
//! Picks a pipeline for a free-text prompt by keyword matching.

use super::types::WorkflowKind;

/// Terms that mark a prompt as a development task
pub const DEV_KEYWORDS: &[&str] = &[
    "code",
    "function",
    "script",
    "python",
    "javascript",
    "java",
    "implement",
    "unit test",
    "test",
    "api",
    "endpoint",
    "docker",
    "kubernetes",
    "bug",
    "refactor",
    "validate",
    "schema",
    "database",
    "sql",
    "cli",
];

/// Terms that mark a prompt as a writing task
pub const EDITORIAL_KEYWORDS: &[&str] = &[
    "write",
    "draft",
    "email",
    "blog",
    "article",
    "summary",
    "press",
    "copy",
    "landing",
    "headline",
    "marketing",
];

/// Classify a prompt; dev keywords win, editorial is the default
pub fn classify(text: &str) -> WorkflowKind {
    let lowered = text.to_lowercase();

    if DEV_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        WorkflowKind::Dev
    } else if is_editorial(&lowered) {
        WorkflowKind::Editorial
    } else {
        tracing::debug!("No workflow keyword matched, defaulting to editorial");
        WorkflowKind::Editorial
    }
}

/// Whether the prompt hits any editorial keyword
pub fn is_editorial(text: &str) -> bool {
    let text = text.to_lowercase();
    EDITORIAL_KEYWORDS.iter().any(|k| text.contains(k))
}
