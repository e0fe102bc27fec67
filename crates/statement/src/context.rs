//! Caller-supplied viewing context for an aggregation call.

use serde::{Deserialize, Serialize};

use ledgerstat_core::{UserId, ViewerRole};

/// Caller-supplied business context for one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatementContext {
    pub role: ViewerRole,
    /// Only consulted for `ViewerRole::Agent`.
    pub current_user: Option<UserId>,
    /// Stripped from the front of agent/owner names.
    pub name_prefix: String,
    /// Use the agent's discount fields instead of the bettor's own.
    pub use_agent_discount: bool,
}

impl StatementContext {
    pub fn new(role: ViewerRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn with_current_user(mut self, user: impl Into<UserId>) -> Self {
        self.current_user = Some(user.into());
        self
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn with_agent_discount(mut self, enabled: bool) -> Self {
        self.use_agent_discount = enabled;
        self
    }

    /// Whether rows owned by `owner` are shown under the agent/owner name
    /// rather than the end customer's.
    pub fn shows_agent_name(&self, owner: &UserId) -> bool {
        match self.role {
            ViewerRole::Owner => true,
            ViewerRole::Agent => self.current_user.as_ref() != Some(owner),
            ViewerRole::User => false,
        }
    }
}
