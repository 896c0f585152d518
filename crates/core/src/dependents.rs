//! Catalogue of tables holding a foreign key to `locations.id`.
//!
//! Table and column names are compile-time constants and are interpolated
//! into SQL by the storage layer; never build a `DependentTable` from input.

/// A table with a column referencing a location id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependentTable {
    pub table: &'static str,
    pub column: &'static str,
}

impl DependentTable {
    const fn location_fk(table: &'static str) -> Self {
        Self { table, column: "location_id" }
    }
}

pub const POSTS_TABLE: &str = "posts";
pub const REVIEWS_TABLE: &str = "reviews";

/// Content tables whose location reference is rewritten to the kept id.
///
/// Order is fixed; it only affects how far a best-effort merge gets before a
/// failing table.
pub const REPOINTED_TABLES: &[DependentTable] = &[
    DependentTable::location_fk(POSTS_TABLE),
    DependentTable::location_fk(REVIEWS_TABLE),
    DependentTable::location_fk("user_saved_locations"),
    DependentTable::location_fk("location_likes"),
    DependentTable::location_fk("location_swipes"),
    DependentTable::location_fk("location_view_durations"),
    DependentTable::location_fk("location_media"),
    DependentTable::location_fk("stories"),
    DependentTable::location_fk("folder_locations"),
    DependentTable::location_fk("reservations"),
    DependentTable::location_fk("trip_locations"),
    DependentTable::location_fk("location_shares"),
    DependentTable::location_fk("user_location_rankings"),
    DependentTable::location_fk("chat_messages"),
    DependentTable::location_fk("direct_messages"),
    DependentTable::location_fk("marketing_campaigns"),
    DependentTable::location_fk("event_registrations"),
];

/// Per-user toggle tables. Rows pointing at a redundant location are deleted,
/// never copied onto the kept location.
pub const DISCARDED_TABLES: &[DependentTable] = &[
    DependentTable::location_fk("user_muted_locations"),
    DependentTable::location_fk("location_notification_settings"),
    DependentTable::location_fk("location_recommendations"),
];

/// Every dependent table, repointed first.
pub fn all_dependent_tables() -> impl Iterator<Item = &'static DependentTable> {
    REPOINTED_TABLES.iter().chain(DISCARDED_TABLES.iter())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalogue_has_no_duplicates() {
        let names: HashSet<&str> = all_dependent_tables().map(|t| t.table).collect();
        assert_eq!(names.len(), REPOINTED_TABLES.len() + DISCARDED_TABLES.len());
    }

    #[test]
    fn posts_and_reviews_lead_the_repoint_order() {
        assert_eq!(REPOINTED_TABLES[0].table, POSTS_TABLE);
        assert_eq!(REPOINTED_TABLES[1].table, REVIEWS_TABLE);
    }

    #[test]
    fn muted_locations_are_discarded_not_repointed() {
        assert!(DISCARDED_TABLES.iter().any(|t| t.table == "user_muted_locations"));
        assert!(!REPOINTED_TABLES.iter().any(|t| t.table == "user_muted_locations"));
    }

    #[test]
    fn names_are_plain_identifiers() {
        for t in all_dependent_tables() {
            assert!(
                t.table.chars().chain(t.column.chars()).all(|c| c.is_ascii_lowercase() || c == '_'),
                "unexpected identifier in {t:?}"
            );
        }
    }
}
