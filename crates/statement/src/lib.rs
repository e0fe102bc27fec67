//! Statement aggregation (ledger rows → per-customer summary rows).
//!
//! Pure domain logic plus the typed input boundary: no HTTP, no persistence.

pub mod context;
pub mod engine;
pub mod naming;
pub mod row;
pub mod source;
pub mod summary;

pub use context::StatementContext;
pub use engine::{
    aggregate_statement, aggregate_with_totals, GroupKey, RowFigures, Statement,
    StatementAggregator, StatementEngine,
};
pub use naming::{normalize_name, resolve_display_name, strip_prefix_guarded, MISSING_NAME};
pub use row::{DigitClass, LedgerRow};
pub use source::{collect_rows, LedgerPage, LedgerRecord, SourceError};
pub use summary::{format_fixed, FormattedFigures, StatementFigures, StatementSummary, StatementTotals};
