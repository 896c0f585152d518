//! Merge policy and per-group merge outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// How a group's statements are committed.
///
/// Both modes run a group inside one transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Any failing statement rolls back the whole group.
    #[default]
    Atomic,
    /// Each statement runs in its own savepoint; failures are recorded and
    /// the group carries on with the remaining tables.
    BestEffort,
}

impl MergeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::BestEffort => "best_effort",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atomic" => Ok(Self::Atomic),
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            _ => Err(CoreError::InvalidValue { kind: "merge mode", value: s.to_owned() }),
        }
    }
}

/// Rows touched in one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: u64,
}

/// A statement that failed inside a best-effort merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFailure {
    pub table: &'static str,
    pub error: String,
}

/// What a committed group merge did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOutcome {
    pub repointed: Vec<TableCount>,
    pub discarded: Vec<TableCount>,
    pub locations_deleted: u64,
    /// Always empty in atomic mode.
    pub failures: Vec<TableFailure>,
}

impl GroupOutcome {
    /// Rows repointed in `table`, zero when the table failed or was untouched.
    #[must_use]
    pub fn repointed_rows(&self, table: &str) -> u64 {
        self.repointed.iter().filter(|c| c.table == table).map(|c| c.rows).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!("atomic".parse::<MergeMode>(), Ok(MergeMode::Atomic));
        assert_eq!("best_effort".parse::<MergeMode>(), Ok(MergeMode::BestEffort));
        assert_eq!(" Best-Effort ".parse::<MergeMode>(), Ok(MergeMode::BestEffort));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!("yolo".parse::<MergeMode>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in [MergeMode::Atomic, MergeMode::BestEffort] {
            assert_eq!(mode.to_string().parse::<MergeMode>(), Ok(mode));
        }
    }

    #[test]
    fn repointed_rows_for_missing_table_is_zero() {
        let outcome = GroupOutcome {
            repointed: vec![TableCount { table: "posts", rows: 3 }],
            ..GroupOutcome::default()
        };
        assert_eq!(outcome.repointed_rows("posts"), 3);
        assert_eq!(outcome.repointed_rows("reviews"), 0);
    }
}
