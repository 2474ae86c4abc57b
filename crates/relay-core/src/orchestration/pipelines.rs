//! Pipeline definitions
//!
//! Each workflow is three agents run in order. An agent is a fixed system
//! prompt plus a function that builds its input from the original request and
//! the previous agent's output.

use super::types::WorkflowKind;

/// What a step can see when building its input
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// The user's original prompt
    pub prompt: &'a str,
    /// Output of the previous step; empty for the first step
    pub previous: &'a str,
}

/// One agent in a pipeline
#[derive(Clone, Copy)]
pub struct StepSpec {
    /// Name recorded in the timeline
    pub agent: &'static str,
    /// Fixed role instruction sent as the system text
    pub system_prompt: &'static str,
    /// Builds the user text for this step
    pub build_input: fn(&StepContext<'_>) -> String,
}

impl std::fmt::Debug for StepSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSpec").field("agent", &self.agent).finish()
    }
}

const PLANNER_SYSTEM_PROMPT: &str = "You are PlannerAgent. Given the user's request, produce 3 concise subtasks or steps to accomplish it.";

const WRITER_SYSTEM_PROMPT: &str = "You are WriterAgent. Use the PlannerAgent subtasks and the original request to produce a high-quality deliverable.";

const REVIEWER_SYSTEM_PROMPT: &str = "You are ReviewerAgent. Critique the WriterAgent output for clarity, correctness, and tone; return a short critique and an improved version.";

const RESEARCHER_SYSTEM_PROMPT: &str = "You are ResearcherAgent. For the developer task provided, gather a concise list of facts, best practices, pitfalls, and example resources the CodeWriter should use.";

const CODE_WRITER_SYSTEM_PROMPT: &str = "You are CodeWriterAgent. Produce working, commented code to implement the task. Refer to ResearcherAgent notes when relevant. Return code in a markdown fenced block.";

const TESTER_SYSTEM_PROMPT: &str = "You are TesterAgent. Review the code from CodeWriterAgent, identify bugs or edge-cases, and provide unit tests or validation steps.";

/// Planner → Writer → Reviewer
pub static EDITORIAL_PIPELINE: [StepSpec; 3] = [
    StepSpec {
        agent: "Planner",
        system_prompt: PLANNER_SYSTEM_PROMPT,
        build_input: planner_input,
    },
    StepSpec {
        agent: "Writer",
        system_prompt: WRITER_SYSTEM_PROMPT,
        build_input: writer_input,
    },
    StepSpec {
        agent: "Reviewer",
        system_prompt: REVIEWER_SYSTEM_PROMPT,
        build_input: reviewer_input,
    },
];

/// Researcher → CodeWriter → Tester
pub static DEV_PIPELINE: [StepSpec; 3] = [
    StepSpec {
        agent: "Researcher",
        system_prompt: RESEARCHER_SYSTEM_PROMPT,
        build_input: researcher_input,
    },
    StepSpec {
        agent: "CodeWriter",
        system_prompt: CODE_WRITER_SYSTEM_PROMPT,
        build_input: code_writer_input,
    },
    StepSpec {
        agent: "Tester",
        system_prompt: TESTER_SYSTEM_PROMPT,
        build_input: tester_input,
    },
];

fn planner_input(ctx: &StepContext<'_>) -> String {
    format!(
        "User request: {}\n\nOutput: Provide numbered subtasks with a one-line purpose each.",
        ctx.prompt
    )
}

fn writer_input(ctx: &StepContext<'_>) -> String {
    format!(
        "Original request: {}\n\nPlanner subtasks:\n{}\n\nPlease produce the final output now.",
        ctx.prompt, ctx.previous
    )
}

fn reviewer_input(ctx: &StepContext<'_>) -> String {
    format!(
        "Writer output:\n{}\n\nProvide: (1) short critique, (2) an improved version of the output.",
        ctx.previous
    )
}

fn researcher_input(ctx: &StepContext<'_>) -> String {
    format!(
        "Dev task: {}\n\nOutput: Provide bullet points with relevant facts and links (if applicable).",
        ctx.prompt
    )
}

fn code_writer_input(ctx: &StepContext<'_>) -> String {
    format!(
        "Task: {}\n\nResearch notes:\n{}\n\nProduce the implementation now.",
        ctx.prompt, ctx.previous
    )
}

fn tester_input(ctx: &StepContext<'_>) -> String {
    format!(
        "Code:\n{}\n\nProvide: (1) short review of correctness, (2) unit tests or validation steps.",
        ctx.previous
    )
}

/// Steps for a workflow, in execution order
pub fn pipeline(kind: WorkflowKind) -> &'static [StepSpec] {
    match kind {
        WorkflowKind::Editorial => &EDITORIAL_PIPELINE,
        WorkflowKind::Dev => &DEV_PIPELINE,
    }
}
