use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

/// Whose perspective a statement is rendered from.
///
/// Parsing is total: anything that is not `owner` or `agent` is treated as a
/// plain `user` view.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
    Owner,
    Agent,
    #[default]
    User,
}

impl ViewerRole {
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => ViewerRole::Owner,
            "agent" => ViewerRole::Agent,
            _ => ViewerRole::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerRole::Owner => "owner",
            ViewerRole::Agent => "agent",
            ViewerRole::User => "user",
        }
    }
}

impl core::fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerRole {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl<'de> Deserialize<'de> for ViewerRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}
