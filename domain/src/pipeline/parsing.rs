//! Reply parsing for the routing and review steps.
//!
//! These functions extract structured decisions from free-form LLM replies.
//! They are pure domain logic: no I/O, no transport concerns, just text
//! handling.
//!
//! The reviewer is instructed to answer on a single line,
//! `<status>|<comment>`, where the status is `approved` or `needs_revision`
//! and the comment is required only for revisions. The router is instructed
//! to answer with a bare agent id.

use crate::core::error::DomainError;
use crate::pipeline::value_objects::ReviewVerdict;

/// Parse a reviewer reply into a verdict.
///
/// Splits on the first `|`; the left side is the status, matched
/// case-insensitively after trimming, and the right side is revision
/// feedback. Anything other than the two known statuses as well as a
/// revision request without feedback is an error: the reviewer has not
/// produced a usable verdict and the run cannot safely continue.
pub fn parse_review_reply(reply: &str) -> Result<ReviewVerdict, DomainError> {
    let (status, feedback) = match reply.split_once('|') {
        Some((status, feedback)) => (status, feedback),
        None => (reply, ""),
    };

    match status.trim().to_lowercase().as_str() {
        // A comment after an approval carries no decision; drop it.
        "approved" => Ok(ReviewVerdict::approved()),
        "needs_revision" => ReviewVerdict::needs_revision(feedback.trim()),
        _ => Err(DomainError::UnrecognizedVerdict(reply.trim().to_string())),
    }
}

/// Normalize a router reply into candidate agent-id form.
///
/// Ids are lowercase, so the reply is trimmed and lowercased. Whether the
/// result names a registered agent is the router's decision, not this
/// function's.
pub fn normalize_route_reply(reply: &str) -> String {
    reply.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::value_objects::ReviewStatus;

    #[test]
    fn test_parse_approved() {
        let verdict = parse_review_reply("approved").expect("parses");
        assert!(verdict.is_approved());
        assert!(verdict.feedback.is_none());
    }

    #[test]
    fn test_parse_approved_case_and_whitespace() {
        assert!(parse_review_reply("  Approved  ").expect("parses").is_approved());
        assert!(parse_review_reply("APPROVED").expect("parses").is_approved());
    }

    #[test]
    fn test_parse_approved_with_stray_comment() {
        let verdict = parse_review_reply("approved|looks good").expect("parses");
        assert!(verdict.is_approved());
        assert!(verdict.feedback.is_none());
    }

    #[test]
    fn test_parse_needs_revision_with_feedback() {
        let verdict =
            parse_review_reply("needs_revision|add concrete numbers").expect("parses");
        assert_eq!(verdict.status, ReviewStatus::NeedsRevision);
        assert_eq!(verdict.feedback.as_deref(), Some("add concrete numbers"));
    }

    #[test]
    fn test_parse_needs_revision_trims_feedback() {
        let verdict = parse_review_reply("Needs_Revision |  cite sources  ").expect("parses");
        assert_eq!(verdict.feedback.as_deref(), Some("cite sources"));
    }

    #[test]
    fn test_parse_needs_revision_without_feedback_fails() {
        assert!(matches!(
            parse_review_reply("needs_revision"),
            Err(DomainError::EmptyReviewFeedback)
        ));
        assert!(matches!(
            parse_review_reply("needs_revision|   "),
            Err(DomainError::EmptyReviewFeedback)
        ));
    }

    #[test]
    fn test_parse_unknown_status_fails() {
        assert!(matches!(
            parse_review_reply("looks great!"),
            Err(DomainError::UnrecognizedVerdict(_))
        ));
        assert!(matches!(
            parse_review_reply(""),
            Err(DomainError::UnrecognizedVerdict(_))
        ));
        assert!(matches!(
            parse_review_reply("rejected|because"),
            Err(DomainError::UnrecognizedVerdict(_))
        ));
    }

    #[test]
    fn test_feedback_may_contain_pipes() {
        let verdict = parse_review_reply("needs_revision|use a | separator table").expect("parses");
        assert_eq!(verdict.feedback.as_deref(), Some("use a | separator table"));
    }

    #[test]
    fn test_normalize_route_reply() {
        assert_eq!(normalize_route_reply("agent2"), "agent2");
        assert_eq!(normalize_route_reply("  Agent2\n"), "agent2");
        assert_eq!(normalize_route_reply("AGENT5"), "agent5");
    }

    #[test]
    fn test_normalize_keeps_unknown_text() {
        assert_eq!(
            normalize_route_reply("I think agent2 fits best"),
            "i think agent2 fits best"
        );
    }
}
