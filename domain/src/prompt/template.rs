//! Prompt templates for the pipeline steps

use crate::agent::entities::Agent;

/// Templates for generating prompts at each step
///
/// The reviewer's reply format here must stay in sync with
/// [`crate::pipeline::parsing::parse_review_reply`].
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the routing step
    pub fn routing_system() -> &'static str {
        "You are a query routing orchestrator."
    }

    /// User prompt for the routing step
    ///
    /// Lists every registered agent with its description and instructs the
    /// model to answer with a bare agent id.
    pub fn routing_request(query: &str, agents: &[Agent]) -> String {
        let agent_lines = agents
            .iter()
            .map(|agent| format!("- {}: {} - {}", agent.id, agent.name, agent.description))
            .collect::<Vec<_>>()
            .join("\n");
        let valid_ids = agents
            .iter()
            .map(|agent| agent.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"Analyze the user's query and decide which of the following agents
should handle it:

{}

User query: {}

Answer with the agent id only ({}), no explanations."#,
            agent_lines, query, valid_ids
        )
    }

    /// User prompt for a dispatch call
    ///
    /// The agent's own stored prompt is the system message; this builds the
    /// user message, appending reviewer feedback on redispatch so the agent
    /// can course-correct.
    pub fn agent_request(query: &str, feedback: Option<&str>) -> String {
        match feedback {
            Some(feedback) => format!(
                "{}\n\nAdditional instructions from the reviewer: {}",
                query, feedback
            ),
            None => query.to_string(),
        }
    }

    /// System prompt for the review step
    pub fn review_system() -> &'static str {
        "You review agent answers."
    }

    /// User prompt for the review step
    pub fn review_request(query: &str, draft: &str) -> String {
        format!(
            r#"Check the agent's answer against the user's query.

User query: {}

Agent answer: {}

Assess the answer:
- If it is complete, correct, and on topic, reply "approved"
- If it needs work, reply "needs_revision" and say briefly what to fix

Reply format: <status>|<comment if revision is needed>"#,
            query, draft
        )
    }
}
