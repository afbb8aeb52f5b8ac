//! Member privilege levels.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Privilege level of a member. Lower ordinal means higher privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grant {
    Admin,
    SubAdmin,
    #[default]
    User,
}

impl Grant {
    /// Ordinal persisted in `member.grant`.
    pub fn ordinal(self) -> i64 {
        match self {
            Self::Admin => 0,
            Self::SubAdmin => 1,
            Self::User => 2,
        }
    }

    /// Maps a persisted ordinal back to a grant, `None` for unknown values.
    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Admin),
            1 => Some(Self::SubAdmin),
            2 => Some(Self::User),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::SubAdmin => "SUB_ADMIN",
            Self::User => "USER",
        }
    }
}

impl Display for Grant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
