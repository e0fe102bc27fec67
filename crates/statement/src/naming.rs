//! Display-name resolution for statement groups.

use crate::context::StatementContext;
use crate::row::LedgerRow;

/// Placeholder for rows without a usable name.
pub const MISSING_NAME: &str = "∅";

const SUFFIX_SEPARATOR: &str = " - ";

/// Remove `prefix` from the front of `value`.
///
/// Leaves `value` untouched when it equals the prefix or does not start with
/// it, so a name never collapses to the empty string.
pub fn strip_prefix_guarded<'a>(value: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() || value == prefix {
        return value;
    }
    value.strip_prefix(prefix).unwrap_or(value)
}

/// Drop any `" - suffix"` segment; `None` becomes [`MISSING_NAME`].
pub fn normalize_name(value: Option<&str>) -> &str {
    match value {
        Some(name) => name.split(SUFFIX_SEPARATOR).next().unwrap_or(name),
        None => MISSING_NAME,
    }
}

/// Name a row is grouped and sorted under for the given viewer.
pub fn resolve_display_name(row: &LedgerRow, ctx: &StatementContext) -> String {
    if ctx.shows_agent_name(&row.user_id) {
        let name = normalize_name(row.name.as_deref());
        strip_prefix_guarded(name, &ctx.name_prefix).to_string()
    } else {
        normalize_name(row.customer.as_deref()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerstat_core::ViewerRole;

    #[test]
    fn prefix_is_stripped_only_when_something_remains() {
        assert_eq!(strip_prefix_guarded("AG-Somchai", "AG-"), "Somchai");
        assert_eq!(strip_prefix_guarded("AG-", "AG-"), "AG-");
        assert_eq!(strip_prefix_guarded("Somchai", "AG-"), "Somchai");
        assert_eq!(strip_prefix_guarded("Somchai", ""), "Somchai");
    }

    #[test]
    fn suffix_is_cut_at_first_separator() {
        assert_eq!(normalize_name(Some("Anan - 0812345678")), "Anan");
        assert_eq!(normalize_name(Some("A - B - C")), "A");
        assert_eq!(normalize_name(Some("Anan-B")), "Anan-B");
        assert_eq!(normalize_name(None), MISSING_NAME);
    }

    #[test]
    fn owner_view_uses_agent_name_with_prefix_removed() {
        let row = LedgerRow::new("12", 1, "28", "38", "T38")
            .with_name("AG-Malee - line 2")
            .with_customer("@BUY");
        let ctx = StatementContext::new(ViewerRole::Owner).with_name_prefix("AG-");
        assert_eq!(resolve_display_name(&row, &ctx), "Malee");
    }

    #[test]
    fn user_view_never_strips_prefix() {
        let row = LedgerRow::new("12", 1, "28", "38", "T38")
            .with_name("AG-Malee")
            .with_customer("AG-Buyer");
        let ctx = StatementContext::new(ViewerRole::User).with_name_prefix("AG-");
        assert_eq!(resolve_display_name(&row, &ctx), "AG-Buyer");
    }

    #[test]
    fn missing_agent_name_becomes_placeholder() {
        let row = LedgerRow::new("12", 1, "28", "38", "T38");
        let ctx = StatementContext::new(ViewerRole::Owner).with_name_prefix("∅");
        // The placeholder equals the prefix, so it survives stripping.
        assert_eq!(resolve_display_name(&row, &ctx), MISSING_NAME);
    }
}
