//! Typed ledger input rows.
//!
//! Optional upstream fields are resolved to their defaults here, once, so the
//! aggregation code never has to null-check.

use serde::{Deserialize, Serialize};

use ledgerstat_core::{TermId, UserId};

/// Bet classification derived from the length of the wagered number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigitClass {
    TwoDigit,
    ThreeDigit,
    /// Any other length; carries no discount or prize terms.
    Other,
}

impl DigitClass {
    pub fn of(number: &str) -> Self {
        match number.chars().count() {
            2 => DigitClass::TwoDigit,
            3 => DigitClass::ThreeDigit,
            _ => DigitClass::Other,
        }
    }
}

/// One wagered number within a ledger.
///
/// Percentages (`discount_*`) are on a 0–100 scale. Prize fields are payout
/// multipliers per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub number: String,
    pub win_num: Option<String>,
    pub t_numbers: Vec<String>,
    /// Stake in ledger units.
    pub amount: i64,
    pub unit_price: f64,
    pub discount_2d: f64,
    pub discount_3d: f64,
    pub agent_discount_2d: f64,
    pub agent_discount_3d: f64,
    pub prize_2d: f64,
    pub prize_3d: f64,
    pub t_prize: f64,
    pub name: Option<String>,
    pub customer: Option<String>,
    pub user_id: UserId,
    pub term_id: TermId,
    pub term_name: String,
}

impl LedgerRow {
    /// A row with every optional field at its default (`unit_price` = 1).
    pub fn new(
        number: impl Into<String>,
        amount: i64,
        user_id: impl Into<UserId>,
        term_id: impl Into<TermId>,
        term_name: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            win_num: None,
            t_numbers: Vec::new(),
            amount,
            unit_price: 1.0,
            discount_2d: 0.0,
            discount_3d: 0.0,
            agent_discount_2d: 0.0,
            agent_discount_3d: 0.0,
            prize_2d: 0.0,
            prize_3d: 0.0,
            t_prize: 0.0,
            name: None,
            customer: None,
            user_id: user_id.into(),
            term_id: term_id.into(),
            term_name: term_name.into(),
        }
    }

    pub fn digit_class(&self) -> DigitClass {
        DigitClass::of(&self.number)
    }

    pub fn with_win_num(mut self, win_num: impl Into<String>) -> Self {
        self.win_num = Some(win_num.into());
        self
    }

    pub fn with_t_numbers<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.t_numbers = numbers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_discounts(mut self, discount_2d: f64, discount_3d: f64) -> Self {
        self.discount_2d = discount_2d;
        self.discount_3d = discount_3d;
        self
    }

    pub fn with_agent_discounts(mut self, discount_2d: f64, discount_3d: f64) -> Self {
        self.agent_discount_2d = discount_2d;
        self.agent_discount_3d = discount_3d;
        self
    }

    pub fn with_prizes(mut self, prize_2d: f64, prize_3d: f64) -> Self {
        self.prize_2d = prize_2d;
        self.prize_3d = prize_3d;
        self
    }

    pub fn with_t_prize(mut self, t_prize: f64) -> Self {
        self.t_prize = t_prize;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }
}
