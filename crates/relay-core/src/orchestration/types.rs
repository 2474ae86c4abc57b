//! Orchestration types
//!
//! Defines the request, timeline and workflow types shared by the pipelines
//! and the front-ends.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Incoming prompt with an optional workflow selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    #[serde(default)]
    pub workflow: Option<String>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            workflow: None,
        }
    }

    pub fn with_workflow(mut self, workflow: impl Into<String>) -> Self {
        self.workflow = Some(workflow.into());
        self
    }
}

/// Supported pipelines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    /// Researcher → CodeWriter → Tester
    Dev,
    /// Planner → Writer → Reviewer
    Editorial,
}

impl WorkflowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::Dev => "dev",
            WorkflowKind::Editorial => "editorial",
        }
    }
}

impl std::fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" => Ok(WorkflowKind::Dev),
            "editorial" => Ok(WorkflowKind::Editorial),
            _ => Err(format!("Unknown workflow: {}", s)),
        }
    }
}

/// One completed pipeline step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStep {
    /// Agent display name, e.g. "Planner"
    pub agent: String,
    /// Normalized upstream output
    pub text: String,
    /// Completion time, ISO-8601 UTC
    pub timestamp: String,
}

impl AgentStep {
    /// Record a step finishing now
    pub fn completed(agent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            text: text.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Ordered, append-only record of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline(Vec<AgentStep>);

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: AgentStep) {
        self.0.push(step);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn steps(&self) -> &[AgentStep] {
        &self.0
    }

    /// Agent names in execution order
    pub fn agents(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.agent.as_str()).collect()
    }

    /// Output of the most recent step
    pub fn last_text(&self) -> Option<&str> {
        self.0.last().map(|s| s.text.as_str())
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a AgentStep;
    type IntoIter = std::slice::Iter<'a, AgentStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of a full pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub timeline: Timeline,
    pub workflow: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_kind_parse() {
        assert_eq!("dev".parse::<WorkflowKind>(), Ok(WorkflowKind::Dev));
        assert_eq!(" Editorial ".parse::<WorkflowKind>(), Ok(WorkflowKind::Editorial));
        assert!("bogus".parse::<WorkflowKind>().is_err());
    }

    #[test]
    fn test_step_timestamp_is_utc_iso() {
        let step = AgentStep::completed("Planner", "1. do it");
        assert!(step.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&step.timestamp).is_ok());
    }

    #[test]
    fn test_timeline_serializes_as_list() {
        let mut timeline = Timeline::new();
        timeline.push(AgentStep {
            agent: "Writer".to_string(),
            text: "draft".to_string(),
            timestamp: "2024-01-01T00:00:00.000000Z".to_string(),
        });

        let json = serde_json::to_value(&timeline).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"agent": "Writer", "text": "draft", "timestamp": "2024-01-01T00:00:00.000000Z"}
            ])
        );
    }

    #[test]
    fn test_request_workflow_is_optional() {
        let req: CompletionRequest = serde_json::from_str(r#"{"prompt": "hi"}"#).unwrap();
        assert_eq!(req, CompletionRequest::new("hi"));
    }
}
