//! Workflow Orchestrator
//!
//! Resolves which pipeline to run and drives its agents one after another,
//! feeding each agent's output into the next.

use super::pipelines::{pipeline, StepContext};
use super::router::classify;
use super::types::{AgentStep, Timeline, WorkflowKind, WorkflowRun};
use crate::llm::{UpstreamClient, UpstreamError};

/// Workflow selector that defers to the keyword router
pub const AUTO_WORKFLOW: &str = "auto";

/// Pipeline failure
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("Unknown workflow: {0}")]
    UnknownWorkflow(String),

    #[error("{agent} step failed: {source}")]
    Step {
        agent: &'static str,
        #[source]
        source: UpstreamError,
    },
}

/// Pick the workflow name for a request
///
/// An explicit selector (trimmed, lower-cased, not "auto") is used verbatim,
/// even if no such pipeline exists; otherwise the prompt is classified.
pub fn resolve_workflow(prompt: &str, requested: Option<&str>) -> String {
    let supplied = requested.unwrap_or_default().trim().to_lowercase();

    if !supplied.is_empty() && supplied != AUTO_WORKFLOW {
        supplied
    } else {
        classify(prompt).as_str().to_string()
    }
}

/// Runs the three-agent pipelines against the upstream client
#[derive(Clone)]
pub struct WorkflowOrchestrator {
    client: UpstreamClient,
}

impl WorkflowOrchestrator {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Resolve the workflow and run it to completion
    ///
    /// Either every step succeeds and the full timeline is returned, or the
    /// first failure is returned and the partial timeline is dropped.
    pub fn run(
        &self,
        prompt: &str,
        requested: Option<&str>,
    ) -> Result<WorkflowRun, OrchestrationError> {
        let workflow = resolve_workflow(prompt, requested);
        let kind: WorkflowKind = workflow
            .parse()
            .map_err(|_| OrchestrationError::UnknownWorkflow(workflow.clone()))?;

        tracing::info!(workflow = kind.as_str(), "Running agent workflow");
        let timeline = self.run_pipeline(kind, prompt)?;

        Ok(WorkflowRun {
            timeline,
            workflow: kind.as_str().to_string(),
        })
    }

    /// Run one pipeline; steps are strictly sequential
    pub fn run_pipeline(
        &self,
        kind: WorkflowKind,
        prompt: &str,
    ) -> Result<Timeline, OrchestrationError> {
        let mut timeline = Timeline::new();

        for step in pipeline(kind) {
            let ctx = StepContext {
                prompt,
                previous: timeline.last_text().unwrap_or_default(),
            };
            let input = (step.build_input)(&ctx);

            tracing::debug!(agent = step.agent, "Agent step started");
            let output = self
                .client
                .call(&input, Some(step.system_prompt))
                .map_err(|source| {
                    tracing::error!(agent = step.agent, error = %source, "Agent step failed");
                    OrchestrationError::Step {
                        agent: step.agent,
                        source,
                    }
                })?;

            timeline.push(AgentStep::completed(step.agent, output));
        }

        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::llm::{HttpResponse, TransportError};
    use crate::testing::{RecordingSleeper, ScriptedTransport};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn orchestrator(transport: &Arc<ScriptedTransport>) -> WorkflowOrchestrator {
        let client = UpstreamClient::new(Arc::new(ProviderConfig::default()))
            .with_transport(transport.clone())
            .with_sleeper(Arc::new(RecordingSleeper::default()));
        WorkflowOrchestrator::new(client)
    }

    #[test]
    fn test_resolve_explicit_workflow_is_normalized() {
        assert_eq!(resolve_workflow("write a blog", Some("DEV ")), "dev");
        assert_eq!(resolve_workflow("anything", Some("Bogus")), "bogus");
    }

    #[test]
    fn test_resolve_falls_back_to_router() {
        assert_eq!(resolve_workflow("fix this bug", None), "dev");
        assert_eq!(resolve_workflow("fix this bug", Some("  ")), "dev");
        assert_eq!(resolve_workflow("fix this bug", Some("AUTO")), "dev");
        assert_eq!(resolve_workflow("a poem", Some("auto")), "editorial");
    }

    #[test]
    fn test_editorial_run_builds_ordered_timeline() {
        let transport = Arc::new(ScriptedTransport::texts(["plan", "draft", "review"]));

        let run = orchestrator(&transport)
            .run("Launch announcement", Some("editorial"))
            .unwrap();

        assert_eq!(run.workflow, "editorial");
        assert_eq!(run.timeline.agents(), vec!["Planner", "Writer", "Reviewer"]);
        let texts: Vec<&str> = run.timeline.steps().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["plan", "draft", "review"]);
    }

    #[test]
    fn test_each_step_receives_previous_output() {
        let transport = Arc::new(ScriptedTransport::texts(["notes", "code", "tests"]));

        orchestrator(&transport).run("parse a csv", Some("dev")).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);

        let inputs: Vec<String> = requests
            .iter()
            .map(|r| r.body["input"].as_str().unwrap().to_string())
            .collect();
        assert!(inputs[0].starts_with("You are ResearcherAgent."));
        assert!(inputs[0].contains("Dev task: parse a csv"));
        assert!(inputs[1].contains("Research notes:\nnotes"));
        assert!(inputs[1].contains("Task: parse a csv"));
        assert!(inputs[2].contains("Code:\ncode"));
    }

    #[test]
    fn test_auto_workflow_uses_router() {
        let transport = Arc::new(ScriptedTransport::texts(["a", "b", "c"]));

        let run = orchestrator(&transport)
            .run("Refactor the SQL schema", Some("auto"))
            .unwrap();

        assert_eq!(run.workflow, "dev");
        assert_eq!(run.timeline.agents(), vec!["Researcher", "CodeWriter", "Tester"]);
    }

    #[test]
    fn test_unknown_workflow_makes_no_calls() {
        let transport = Arc::new(ScriptedTransport::texts(["unused"]));

        let err = orchestrator(&transport).run("hi", Some("bogus")).unwrap_err();

        assert!(matches!(err, OrchestrationError::UnknownWorkflow(ref w) if w == "bogus"));
        assert_eq!(err.to_string(), "Unknown workflow: bogus");
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_failing_step_aborts_pipeline() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(HttpResponse::new(200, r#"{"output": "plan"}"#)),
            Ok(HttpResponse::new(400, "bad request")),
        ]));

        let err = orchestrator(&transport)
            .run("newsletter", Some("editorial"))
            .unwrap_err();

        match err {
            OrchestrationError::Step { agent, source } => {
                assert_eq!(agent, "Writer");
                assert_eq!(source.status(), Some(400));
            }
            other => panic!("Expected step failure, got {other:?}"),
        }
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_network_failure_is_wrapped() {
        let transport = Arc::new(ScriptedTransport::repeating(Err(TransportError(
            "down".to_string(),
        ))));

        let err = orchestrator(&transport).run("an essay", None).unwrap_err();

        assert!(matches!(
            err,
            OrchestrationError::Step {
                agent: "Planner",
                source: UpstreamError::Network(_)
            }
        ));
        assert_eq!(transport.request_count(), 3);
    }
}
