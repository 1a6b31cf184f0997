//! Agent registry adapters

mod json_store;
mod seed;

pub use json_store::JsonAgentStore;
