//! Statement aggregation: ledger rows → per-customer, per-term summary rows.
//!
//! Pure and stateless. Each row is evaluated on its own, truncated toward zero
//! and then folded into its group, reproducing the legacy truncate-then-sum
//! behaviour (which is not the same as rounding the final sum).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ledgerstat_core::{TermId, UserId};

use crate::context::StatementContext;
use crate::naming::resolve_display_name;
use crate::row::{DigitClass, LedgerRow};
use crate::summary::{StatementFigures, StatementSummary, StatementTotals};

/// Per-row intermediate quantities, before truncation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowFigures {
    pub class: DigitClass,
    pub is_hit: bool,
    pub is_t_hit: bool,
    /// Selected discount on the 0–100 scale.
    pub discount_percent: f64,
    /// `discount_percent / 100`.
    pub discount_rate: f64,
    pub stake_value: f64,
    pub discount_amount: f64,
    pub hit_prize: f64,
    pub t_hit_prize: f64,
    pub total_prize: f64,
    /// Net settlement for the row.
    ///
    /// Applies the raw percentage to the unit count and only then multiplies
    /// by unit price, unlike `discount_amount` which is based on
    /// `stake_value`. Both bases are kept as-is.
    pub sub_total: f64,
}

impl RowFigures {
    pub fn compute(row: &LedgerRow, use_agent_discount: bool) -> Self {
        let class = row.digit_class();
        let is_hit = row.win_num.as_deref() == Some(row.number.as_str());
        let is_t_hit =
            class == DigitClass::ThreeDigit && row.t_numbers.iter().any(|n| *n == row.number);

        let discount_percent = match (class, use_agent_discount) {
            (DigitClass::TwoDigit, false) => row.discount_2d,
            (DigitClass::ThreeDigit, false) => row.discount_3d,
            (DigitClass::TwoDigit, true) => row.agent_discount_2d,
            (DigitClass::ThreeDigit, true) => row.agent_discount_3d,
            (DigitClass::Other, _) => 0.0,
        };
        let discount_rate = discount_percent / 100.0;

        let prize_multiplier = match class {
            DigitClass::TwoDigit => row.prize_2d,
            DigitClass::ThreeDigit => row.prize_3d,
            DigitClass::Other => 0.0,
        };

        let amount = row.amount as f64;
        let stake_value = amount * row.unit_price;
        let discount_amount = stake_value * discount_rate;

        let hit_prize = if is_hit {
            prize_multiplier * amount * row.unit_price
        } else {
            0.0
        };
        let t_hit_prize = if is_t_hit {
            row.t_prize * amount * row.unit_price
        } else {
            0.0
        };

        let hit_units = if is_hit { prize_multiplier * amount } else { 0.0 };
        let t_hit_units = if is_t_hit { row.t_prize * amount } else { 0.0 };
        let sub_total = (amount - amount * discount_percent / 100.0 - hit_units - t_hit_units)
            * row.unit_price;

        Self {
            class,
            is_hit,
            is_t_hit,
            discount_percent,
            discount_rate,
            stake_value,
            discount_amount,
            hit_prize,
            t_hit_prize,
            total_prize: hit_prize + t_hit_prize,
            sub_total,
        }
    }

    /// Truncated contribution of this row to its group.
    pub fn contribution(&self, amount: i64) -> StatementFigures {
        StatementFigures {
            discount_amount: truncate(self.discount_amount),
            amount_with_discount: truncate(self.stake_value),
            units: amount,
            amount_without_discount: truncate(self.stake_value - self.discount_amount),
            win_units: if self.is_hit { amount } else { 0 },
            t_units: if self.is_t_hit { amount } else { 0 },
            prize_amount: truncate(self.total_prize),
            sub_total: truncate(self.sub_total),
        }
    }
}

/// Truncate toward zero. NaN maps to 0 and out-of-range values saturate.
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

/// Structured grouping key; no delimiter juggling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub display_name: String,
    pub term_id: TermId,
    pub user_id: UserId,
}

#[derive(Debug)]
struct Group {
    key: GroupKey,
    term_name: String,
    figures: StatementFigures,
}

/// Statement rows plus their grand totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub rows: Vec<StatementSummary>,
    pub totals: StatementTotals,
}

/// Seam for callers that want the aggregation injected.
pub trait StatementAggregator {
    fn aggregate(&self, rows: &[LedgerRow], ctx: &StatementContext) -> Vec<StatementSummary>;
}

/// Stateless aggregation service; safe to share across threads.
#[derive(Debug, Copy, Clone, Default)]
pub struct StatementEngine;

impl StatementAggregator for StatementEngine {
    fn aggregate(&self, rows: &[LedgerRow], ctx: &StatementContext) -> Vec<StatementSummary> {
        aggregate_statement(rows, ctx)
    }
}

/// Groups in first-seen order.
fn group_rows(rows: &[LedgerRow], ctx: &StatementContext) -> Vec<Group> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for row in rows {
        let key = GroupKey {
            display_name: resolve_display_name(row, ctx),
            term_id: row.term_id.clone(),
            user_id: row.user_id.clone(),
        };
        let contribution =
            RowFigures::compute(row, ctx.use_agent_discount).contribution(row.amount);

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push(Group {
                    key: key.clone(),
                    term_name: row.term_name.clone(),
                    figures: StatementFigures::default(),
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].figures.merge(&contribution);
    }

    groups
}

fn into_sorted_summaries(groups: &[Group]) -> Vec<StatementSummary> {
    let mut summaries: Vec<StatementSummary> = groups
        .iter()
        .map(|g| StatementSummary {
            customer: g.key.display_name.clone(),
            term_id: g.key.term_id.to_string(),
            term_name: g.term_name.clone(),
            user_id: g.key.user_id.to_string(),
            figures: (&g.figures).into(),
        })
        .collect();

    // Stable: equal customers keep first-seen group order.
    summaries.sort_by(|a, b| a.customer.cmp(&b.customer));
    summaries
}

/// Aggregate ledger rows into statement rows sorted by customer.
///
/// Total over its input: an empty slice yields an empty statement.
pub fn aggregate_statement(rows: &[LedgerRow], ctx: &StatementContext) -> Vec<StatementSummary> {
    let groups = group_rows(rows, ctx);
    tracing::debug!(
        rows = rows.len(),
        groups = groups.len(),
        role = %ctx.role,
        "statement aggregated"
    );
    into_sorted_summaries(&groups)
}

/// Like [`aggregate_statement`], with a grand-totals footer.
pub fn aggregate_with_totals(rows: &[LedgerRow], ctx: &StatementContext) -> Statement {
    let groups = group_rows(rows, ctx);

    let mut grand = StatementFigures::default();
    for group in &groups {
        grand.merge(&group.figures);
    }
    tracing::debug!(rows = rows.len(), groups = groups.len(), "statement totals computed");

    Statement {
        rows: into_sorted_summaries(&groups),
        totals: StatementTotals::from_figures(groups.len(), &grand),
    }
}
