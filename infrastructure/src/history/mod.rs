//! Run history adapters

mod jsonl_store;

pub use jsonl_store::JsonlRunStore;
