//! Shared constants for the resolver.

/// Half-width of the proximity bounding box, in degrees, on both axes.
///
/// Roughly 11 meters of latitude. Longitude degrees shrink toward the poles,
/// so this is not a constant physical radius.
pub const DEFAULT_PROXIMITY_THRESHOLD_DEG: f64 = 0.0001;

/// Rows fetched per keyset page when listing locations.
pub const DEFAULT_LOCATION_PAGE_SIZE: usize = 1000;

/// Upper bound for a configured page size.
pub const MAX_LOCATION_PAGE_SIZE: usize = 10_000;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 5;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Table holding the canonical location rows.
pub const LOCATIONS_TABLE: &str = "locations";
