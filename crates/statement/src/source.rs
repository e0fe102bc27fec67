//! Ledger data source adapter.
//!
//! Maps the paginated JSON envelope served by the ledger API into typed
//! [`LedgerRow`]s. Upstream records are loosely typed (numbers arrive as
//! strings, ids as integers, garbage where a discount should be), so every
//! field is coerced here and defaults are applied once.

use std::io::Read;

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::row::LedgerRow;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to decode ledger page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to read ledger page: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate ledger page {0}")]
    DuplicatePage(u64),
}

/// One page of the ledger API response.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerPage {
    pub data: Vec<LedgerRecord>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, alias = "limit", rename = "pageSize", deserialize_with = "lenient_u64")]
    pub page_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(default, rename = "totalPages", deserialize_with = "lenient_u64")]
    pub total_pages: Option<u64>,
}

impl LedgerPage {
    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Whether the API reports a page after this one.
    pub fn has_more(&self) -> bool {
        match (self.page, self.total_pages, self.page_size, self.total) {
            (Some(page), Some(total_pages), _, _) => page < total_pages,
            (Some(page), None, Some(size), Some(total)) => page.saturating_mul(size) < total,
            _ => false,
        }
    }

    pub fn into_rows(self) -> Vec<LedgerRow> {
        self.data.into_iter().map(LedgerRow::from).collect()
    }
}

/// Concatenate pages into one row list, in page order.
///
/// Pages without a page number keep their position relative to each other
/// and sort after numbered pages.
pub fn collect_rows(pages: Vec<LedgerPage>) -> Result<Vec<LedgerRow>, SourceError> {
    let mut pages = pages;
    pages.sort_by_key(|p| p.page.unwrap_or(u64::MAX));

    for pair in pages.windows(2) {
        if let (Some(a), Some(b)) = (pair[0].page, pair[1].page) {
            if a == b {
                return Err(SourceError::DuplicatePage(a));
            }
        }
    }

    let rows: Vec<LedgerRow> = pages.into_iter().flat_map(LedgerPage::into_rows).collect();
    tracing::debug!(rows = rows.len(), "ledger pages collected");
    Ok(rows)
}

/// Raw ledger record as served by the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LedgerRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(rename = "winNum", deserialize_with = "lenient_string")]
    pub win_num: Option<String>,
    #[serde(rename = "tNumbers", deserialize_with = "lenient_list")]
    pub t_numbers: Vec<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: Option<f64>,
    #[serde(rename = "unitPrice", deserialize_with = "lenient_f64")]
    pub unit_price: Option<f64>,
    #[serde(rename = "discount2D", deserialize_with = "lenient_f64")]
    pub discount_2d: Option<f64>,
    #[serde(rename = "discount3D", deserialize_with = "lenient_f64")]
    pub discount_3d: Option<f64>,
    #[serde(rename = "agentDiscount2D", deserialize_with = "lenient_f64")]
    pub agent_discount_2d: Option<f64>,
    #[serde(rename = "agentDiscount3D", deserialize_with = "lenient_f64")]
    pub agent_discount_3d: Option<f64>,
    #[serde(rename = "prize2D", deserialize_with = "lenient_f64")]
    pub prize_2d: Option<f64>,
    #[serde(rename = "prize3D", deserialize_with = "lenient_f64")]
    pub prize_3d: Option<f64>,
    #[serde(rename = "tPrize", deserialize_with = "lenient_f64")]
    pub t_prize: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub customer: Option<String>,
    #[serde(rename = "userId", deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(rename = "termId", deserialize_with = "lenient_string")]
    pub term_id: Option<String>,
    #[serde(rename = "termName", deserialize_with = "lenient_string")]
    pub term_name: Option<String>,
}

impl From<LedgerRecord> for LedgerRow {
    fn from(r: LedgerRecord) -> Self {
        // Units are whole; fractional upstream values are cut toward zero.
        let amount = r.amount.map(|a| a.trunc() as i64).unwrap_or(0);

        let mut row = LedgerRow::new(
            r.number.unwrap_or_default(),
            amount,
            r.user_id.unwrap_or_default(),
            r.term_id.unwrap_or_default(),
            r.term_name.unwrap_or_default(),
        );
        row.win_num = r.win_num;
        row.t_numbers = r.t_numbers;
        row.unit_price = r.unit_price.unwrap_or(1.0);
        row.discount_2d = r.discount_2d.unwrap_or(0.0);
        row.discount_3d = r.discount_3d.unwrap_or(0.0);
        row.agent_discount_2d = r.agent_discount_2d.unwrap_or(0.0);
        row.agent_discount_3d = r.agent_discount_3d.unwrap_or(0.0);
        row.prize_2d = r.prize_2d.unwrap_or(0.0);
        row.prize_3d = r.prize_3d.unwrap_or(0.0);
        row.t_prize = r.t_prize.unwrap_or(0.0);
        row.name = r.name;
        row.customer = r.customer;
        row
    }
}

fn number_from_json(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn string_from_json(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(number_from_json(&value))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(number_from_json(&value)
        .filter(|v| *v >= 0.0)
        .map(|v| v.trunc() as u64))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(string_from_json(value))
}

/// Accepts `["123", 456]`, `"123,456"` or null.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    let items = match value {
        JsonValue::Array(items) => items
            .into_iter()
            .filter_map(string_from_json)
            .map(|s| s.trim().to_string())
            .collect(),
        JsonValue::String(s) => s.split(',').map(|part| part.trim().to_string()).collect(),
        _ => Vec::new(),
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}
