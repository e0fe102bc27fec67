//! `ledgerstat-cli` — operator surface over the statement engine.
//!
//! Reads ledger API envelopes, aggregates them and emits a JSON report.

pub mod report;

pub use report::{build_context, load_pages, ContextOverrides, StatementReport};
