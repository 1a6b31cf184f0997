//! Prompt domain
//!
//! Templates for the prompts sent at each pipeline step.

mod template;

pub use template::PromptTemplate;
