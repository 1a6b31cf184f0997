//! Review step
//!
//! Asks the gateway to judge the draft against the original query and parses
//! the `<status>|<comment>` reply into a verdict. A reply that parses into
//! neither verdict is an upstream contract violation and aborts the run.

use crate::ports::llm_gateway::{ChatRequest, LlmGateway};
use crate::use_cases::process_query::ProcessQueryError;
use switchboard_domain::{PromptTemplate, Query, ReviewVerdict, parse_review_reply};

pub(crate) async fn review(
    gateway: &dyn LlmGateway,
    query: &Query,
    draft: &str,
) -> Result<ReviewVerdict, ProcessQueryError> {
    let request = ChatRequest::new(
        PromptTemplate::review_system(),
        PromptTemplate::review_request(query.content(), draft),
    );
    let reply = gateway.complete(request).await?;
    parse_review_reply(&reply).map_err(|error| ProcessQueryError::InvalidVerdict(error.to_string()))
}
