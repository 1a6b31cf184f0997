//! Dispatch step
//!
//! Sends the query to the routed agent: the agent's stored prompt is the
//! system message, the query (plus any reviewer feedback on redispatch) is
//! the user message.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use switchboard_domain::{Agent, PromptTemplate, Query};

pub(crate) async fn dispatch(
    gateway: &dyn LlmGateway,
    agent: &Agent,
    query: &Query,
    feedback: Option<&str>,
) -> Result<String, GatewayError> {
    let request = ChatRequest::new(
        agent.prompt.clone(),
        PromptTemplate::agent_request(query.content(), feedback),
    );
    gateway.complete(request).await
}
