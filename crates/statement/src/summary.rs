//! Statement output rows and legacy fixed-decimal formatting.

use serde::{Deserialize, Serialize};

/// Decimal places per output column, matching the legacy report.
pub mod decimals {
    pub const SUB_TOTAL: usize = 6;
    pub const AMOUNT_WITH_DISCOUNT: usize = 2;
    pub const AMOUNT_WITH_PRIZE: usize = 6;
    pub const AMOUNT_WITHOUT_DISCOUNT: usize = 2;
    pub const T_UNITS: usize = 0;
    pub const UNITS: usize = 2;
    pub const WIN_UNITS: usize = 0;
    pub const DISCOUNT: usize = 2;
}

/// Render an integral accumulator with a fixed number of zero decimals.
///
/// Accumulators only ever hold truncated whole values, so the fractional part
/// is always zero; formatting the integer directly avoids float round-trips
/// for large totals.
pub fn format_fixed(value: i64, decimals: usize) -> String {
    if decimals == 0 {
        value.to_string()
    } else {
        format!("{value}.{}", "0".repeat(decimals))
    }
}

/// Integral running totals for one statement group (or a whole statement).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StatementFigures {
    pub discount_amount: i64,
    pub amount_with_discount: i64,
    pub units: i64,
    pub amount_without_discount: i64,
    pub win_units: i64,
    pub t_units: i64,
    pub prize_amount: i64,
    pub sub_total: i64,
}

impl StatementFigures {
    /// Saturates at the `i64` bounds instead of overflowing.
    pub fn merge(&mut self, other: &StatementFigures) {
        self.discount_amount = self.discount_amount.saturating_add(other.discount_amount);
        self.amount_with_discount = self.amount_with_discount.saturating_add(other.amount_with_discount);
        self.units = self.units.saturating_add(other.units);
        self.amount_without_discount = self.amount_without_discount.saturating_add(other.amount_without_discount);
        self.win_units = self.win_units.saturating_add(other.win_units);
        self.t_units = self.t_units.saturating_add(other.t_units);
        self.prize_amount = self.prize_amount.saturating_add(other.prize_amount);
        self.sub_total = self.sub_total.saturating_add(other.sub_total);
    }
}

/// Pre-formatted numeric columns shared by group rows and the totals footer.
///
/// Consumers must render these strings as-is; re-parsing and re-formatting
/// would lose the truncate-then-sum semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedFigures {
    #[serde(rename = "discountAmount")]
    pub discount_amount: String,
    #[serde(rename = "TotalAmountWithDiscount")]
    pub total_amount_with_discount: String,
    #[serde(rename = "TotalUnitWithDiscount")]
    pub total_unit_with_discount: String,
    #[serde(rename = "TotalAmountWithoutDiscount")]
    pub total_amount_without_discount: String,
    #[serde(rename = "TotalWinAmountWithoutPrize")]
    pub total_win_amount_without_prize: String,
    #[serde(rename = "TotalTAmountWithoutPrize")]
    pub total_t_amount_without_prize: String,
    #[serde(rename = "TotalAmountWithPrize")]
    pub total_amount_with_prize: String,
    #[serde(rename = "SubTotalAmount")]
    pub sub_total_amount: String,
}

impl From<&StatementFigures> for FormattedFigures {
    fn from(f: &StatementFigures) -> Self {
        Self {
            discount_amount: format_fixed(f.discount_amount, decimals::DISCOUNT),
            total_amount_with_discount: format_fixed(
                f.amount_with_discount,
                decimals::AMOUNT_WITH_DISCOUNT,
            ),
            total_unit_with_discount: format_fixed(f.units, decimals::UNITS),
            total_amount_without_discount: format_fixed(
                f.amount_without_discount,
                decimals::AMOUNT_WITHOUT_DISCOUNT,
            ),
            total_win_amount_without_prize: format_fixed(f.win_units, decimals::WIN_UNITS),
            total_t_amount_without_prize: format_fixed(f.t_units, decimals::T_UNITS),
            total_amount_with_prize: format_fixed(f.prize_amount, decimals::AMOUNT_WITH_PRIZE),
            sub_total_amount: format_fixed(f.sub_total, decimals::SUB_TOTAL),
        }
    }
}

/// One statement row: a `(customer, term, user)` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub customer: String,
    #[serde(rename = "termId")]
    pub term_id: String,
    #[serde(rename = "termName")]
    pub term_name: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub figures: FormattedFigures,
}

/// Grand totals across every group of one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    #[serde(rename = "groupCount")]
    pub group_count: usize,
    #[serde(flatten)]
    pub figures: FormattedFigures,
}

impl StatementTotals {
    pub fn from_figures(group_count: usize, figures: &StatementFigures) -> Self {
        Self {
            group_count,
            figures: figures.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_fixed_pads_zero_decimals() {
        assert_eq!(format_fixed(1, 2), "1.00");
        assert_eq!(format_fixed(400, 6), "400.000000");
        assert_eq!(format_fixed(-395, 6), "-395.000000");
        assert_eq!(format_fixed(5, 0), "5");
        assert_eq!(format_fixed(0, 2), "0.00");
    }

    #[test]
    fn summary_serializes_with_legacy_column_names() {
        let figures = StatementFigures {
            discount_amount: 1,
            amount_with_discount: 10,
            units: 10,
            amount_without_discount: 9,
            win_units: 0,
            t_units: 0,
            prize_amount: 0,
            sub_total: 9,
        };
        let summary = StatementSummary {
            customer: "@BUY".to_string(),
            term_id: "38".to_string(),
            term_name: "T38".to_string(),
            user_id: "28".to_string(),
            figures: (&figures).into(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["customer"], "@BUY");
        assert_eq!(json["termId"], "38");
        assert_eq!(json["discountAmount"], "1.00");
        assert_eq!(json["TotalUnitWithDiscount"], "10.00");
        assert_eq!(json["TotalWinAmountWithoutPrize"], "0");
        assert_eq!(json["SubTotalAmount"], "9.000000");
    }
}
