//! Report assembly: page loading, context overrides and JSON output.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use ledgerstat_core::{UserId, ViewerRole};
use ledgerstat_statement::{
    aggregate_with_totals, collect_rows, LedgerPage, StatementContext, StatementSummary,
    StatementTotals,
};

/// JSON document written by `ledgerstat aggregate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementReport {
    pub generated_at: DateTime<Utc>,
    pub context: StatementContext,
    pub rows: Vec<StatementSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<StatementTotals>,
}

impl StatementReport {
    pub fn build(pages: Vec<LedgerPage>, context: StatementContext, with_totals: bool) -> Result<Self> {
        let rows = collect_rows(pages).context("failed to assemble ledger pages")?;
        let statement = aggregate_with_totals(&rows, &context);
        tracing::info!(
            rows = rows.len(),
            groups = statement.rows.len(),
            role = %context.role,
            "statement built"
        );

        Ok(Self {
            generated_at: Utc::now(),
            context,
            rows: statement.rows,
            totals: with_totals.then_some(statement.totals),
        })
    }
}

/// Read envelope pages from files; no paths (or `-`) means stdin.
pub fn load_pages(paths: &[PathBuf]) -> Result<Vec<LedgerPage>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin()?]);
    }

    paths
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                read_stdin()
            } else {
                read_file(path)
            }
        })
        .collect()
}

fn read_stdin() -> Result<LedgerPage> {
    LedgerPage::from_reader(io::stdin().lock()).context("failed to read ledger page from stdin")
}

fn read_file(path: &Path) -> Result<LedgerPage> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    LedgerPage::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read ledger page from {}", path.display()))
}

/// Context values given on the command line or via environment.
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    pub context_file: Option<PathBuf>,
    pub role: Option<String>,
    pub current_user: Option<String>,
    pub name_prefix: Option<String>,
    pub agent_discount: bool,
}

/// Base context from the optional JSON file, then individual overrides.
pub fn build_context(overrides: &ContextOverrides) -> Result<StatementContext> {
    let mut ctx = match &overrides.context_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open context {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("invalid context in {}", path.display()))?
        }
        None => StatementContext::default(),
    };

    if let Some(role) = &overrides.role {
        ctx.role = ViewerRole::parse_lenient(role);
    }
    if let Some(user) = &overrides.current_user {
        ctx.current_user = Some(UserId::from_str(user).context("invalid --current-user")?);
    }
    if let Some(prefix) = &overrides.name_prefix {
        ctx.name_prefix = prefix.clone();
    }
    if overrides.agent_discount {
        ctx.use_agent_discount = true;
    }

    if ctx.role == ViewerRole::Agent && ctx.current_user.is_none() {
        tracing::warn!("agent view without a current user; every row is shown under its agent name");
    }

    Ok(ctx)
}
