//! Default agent set
//!
//! Seeded into the registry on first start, when the configured file does
//! not exist yet. Ids and colors are stable; everything else is editable
//! at runtime through the update endpoint.

use switchboard_domain::Agent;

const PROMPT_AGENT_PROMPT: &str = "\
You are a prompt engineering specialist.

Given a task description, produce a complete, ready-to-use prompt for a large
language model:
- Restate the task in one or two sentences and note any assumptions you have
  to make because information is missing.
- Structure the prompt explicitly: role, context, instructions, output
  format, and examples where they genuinely help.
- Make every instruction concrete and testable; avoid vague qualifiers.
- State the required output format precisely.
- List the open questions that block a reliable prompt, ordered by how much
  their answers would change the result.

Return the finished prompt first, then a short rationale for your main
choices.";

/// The five default agents, stamped with the given creation timestamp.
pub(crate) fn default_agents(timestamp: &str) -> Vec<Agent> {
    vec![
        Agent::new(
            "agent1",
            "Prompt Agent",
            "Designs and refines LLM prompts",
            PROMPT_AGENT_PROMPT,
            "bg-blue-500",
            timestamp,
        ),
        Agent::new(
            "agent2",
            "Requirements Agent",
            "Gathers and analyzes requirements",
            "You are a requirements analyst. Break vague requests into \
             concrete, verifiable requirements and flag gaps and contradictions.",
            "bg-green-500",
            timestamp,
        ),
        Agent::new(
            "agent3",
            "Architecture Agent",
            "Designs system and solution architecture",
            "You are a solution architect. Propose pragmatic architectures, \
             name the trade-offs, and keep the design as small as the problem allows.",
            "bg-yellow-500",
            timestamp,
        ),
        Agent::new(
            "agent4",
            "Review Agent",
            "Reviews code and technical designs",
            "You are a code and design reviewer. Point out defects and risky \
             choices with concrete reasoning, most severe first.",
            "bg-orange-500",
            timestamp,
        ),
        Agent::new(
            "agent5",
            "General Assistant",
            "Handles general questions and tasks",
            "You are a capable general-purpose assistant. Answer directly and \
             completely, and say so when a question is outside your knowledge.",
            "bg-red-500",
            timestamp,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_agents_shape() {
        let agents = default_agents("2024-01-01T00:00:00.000Z");

        let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["agent1", "agent2", "agent3", "agent4", "agent5"]);

        for agent in &agents {
            assert!(!agent.name.trim().is_empty());
            assert!(!agent.description.trim().is_empty());
            assert!(!agent.prompt.trim().is_empty());
            assert_eq!(agent.created_at, "2024-01-01T00:00:00.000Z");
            assert_eq!(agent.updated_at, "2024-01-01T00:00:00.000Z");
        }

        let mut colors: Vec<&str> = agents.iter().map(|a| a.color.as_str()).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), agents.len());
    }
}
