//! Routing step
//!
//! Asks the gateway to classify the query against the registered agents'
//! descriptions. The reply is expected to be a bare agent id; anything else
//! falls back to the first registered agent so a sloppy upstream reply
//! degrades the route, not the run.

use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
use crate::use_cases::process_query::ProcessQueryError;
use switchboard_domain::{Agent, PromptTemplate, Query, RoutingDecision, normalize_route_reply};
use tracing::{debug, warn};

pub(crate) async fn route(
    gateway: &dyn LlmGateway,
    agents: &[Agent],
    query: &Query,
) -> Result<RoutingDecision, ProcessQueryError> {
    let Some(first) = agents.first() else {
        return Err(ProcessQueryError::NoAgentAvailable);
    };

    let request = ChatRequest::new(
        PromptTemplate::routing_system(),
        PromptTemplate::routing_request(query.content(), agents),
    );
    let reply = gateway.complete(request).await?;
    let candidate = normalize_route_reply(&reply);

    let chosen = agents
        .iter()
        .find(|agent| agent.id.as_str() == candidate)
        .unwrap_or_else(|| {
            warn!(
                "Router reply {candidate:?} names no registered agent, falling back to {}",
                first.id
            );
            first
        });
    debug!("Router selected {}", chosen.id);

    Ok(RoutingDecision::new(
        chosen.id.clone(),
        chosen.name.clone(),
        reply.trim(),
    ))
}
