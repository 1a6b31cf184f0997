//! Agent domain entities

use super::value_objects::AgentId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A specialized responder registered with the service
///
/// The system prompt conditions the agent's completion behavior and is
/// editable at runtime through the registry. The color tag is presentation
/// metadata carried through unchanged. Timestamps are RFC 3339 strings set
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier, never changes after seeding
    pub id: AgentId,
    /// Display name
    pub name: String,
    /// Short description used by the router to classify queries
    pub description: String,
    /// System prompt governing the agent's answers
    pub prompt: String,
    /// Presentation color tag
    pub color: String,
    /// When the record was first created
    pub created_at: String,
    /// When the record was last updated
    pub updated_at: String,
}

impl Agent {
    /// Creates a new agent record with both timestamps set to `timestamp`.
    pub fn new(
        id: impl Into<AgentId>,
        name: impl Into<String>,
        description: impl Into<String>,
        prompt: impl Into<String>,
        color: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let timestamp = timestamp.into();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            prompt: prompt.into(),
            color: color.into(),
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }

    /// Projects the browse view of this agent. The prompt is withheld.
    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
        }
    }

    /// Applies a validated partial update and refreshes `updated_at`.
    ///
    /// Provided fields replace the current values verbatim; absent fields
    /// are left untouched. Fails without modifying the record when a
    /// required field would become empty.
    pub fn apply_update(
        &mut self,
        update: AgentUpdate,
        timestamp: impl Into<String>,
    ) -> Result<(), DomainError> {
        update.validate()?;

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(prompt) = update.prompt {
            self.prompt = prompt;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        self.updated_at = timestamp.into();

        Ok(())
    }
}

/// Browse view of an agent: everything except the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Partial update payload for one agent record
///
/// All fields are optional; only provided fields are applied. `name`,
/// `description`, and `prompt` must not be blank when provided. `color`
/// is presentation-only and not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub color: Option<String>,
}

impl AgentUpdate {
    /// Checks that no provided required field is empty or whitespace.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("prompt", &self.prompt),
        ] {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(DomainError::EmptyAgentField(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agent() -> Agent {
        Agent::new(
            "agent2",
            "Requirements Agent",
            "Gathers and analyzes requirements",
            "You are a requirements analyst.",
            "bg-green-500",
            "2024-01-01T00:00:00+00:00",
        )
    }

    #[test]
    fn test_new_sets_both_timestamps() {
        let agent = sample_agent();
        assert_eq!(agent.created_at, agent.updated_at);
    }

    #[test]
    fn test_summary_withholds_prompt() {
        let agent = sample_agent();
        let summary = agent.summary();
        assert_eq!(summary.id, agent.id);
        assert_eq!(summary.name, agent.name);

        let json = serde_json::to_value(&summary).expect("serialize");
        assert!(json.get("prompt").is_none());
    }

    #[test]
    fn test_apply_update_partial() {
        let mut agent = sample_agent();
        let update = AgentUpdate {
            prompt: Some("You gather requirements, tersely.".to_string()),
            ..Default::default()
        };

        agent
            .apply_update(update, "2024-02-01T00:00:00+00:00")
            .expect("valid update");

        assert_eq!(agent.prompt, "You gather requirements, tersely.");
        assert_eq!(agent.name, "Requirements Agent");
        assert_eq!(agent.updated_at, "2024-02-01T00:00:00+00:00");
        assert_eq!(agent.created_at, "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_apply_update_rejects_blank_prompt() {
        let mut agent = sample_agent();
        let before = agent.clone();
        let update = AgentUpdate {
            prompt: Some("   ".to_string()),
            ..Default::default()
        };

        let err = agent
            .apply_update(update, "2024-02-01T00:00:00+00:00")
            .unwrap_err();

        assert!(matches!(err, DomainError::EmptyAgentField("prompt")));
        assert_eq!(agent, before);
    }

    #[test]
    fn test_validate_reports_first_blank_field() {
        let update = AgentUpdate {
            name: Some(String::new()),
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            update.validate(),
            Err(DomainError::EmptyAgentField("name"))
        ));
    }

    #[test]
    fn test_validate_allows_blank_color() {
        let update = AgentUpdate {
            color: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_preserves_submitted_values_verbatim() {
        let mut agent = sample_agent();
        let update = AgentUpdate {
            name: Some("  Spaced Name  ".to_string()),
            ..Default::default()
        };
        agent
            .apply_update(update, "2024-02-01T00:00:00+00:00")
            .expect("valid update");
        assert_eq!(agent.name, "  Spaced Name  ");
    }
}
