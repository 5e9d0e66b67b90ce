//! Domain constants
//!
//! Centralized location for the fixed values the client relies on.

/// Path prefix of the OpenProject v3 API, joined in front of every request path.
pub const API_PREFIX: &str = "/api/v3";

/// Fixed page size used when walking paginated collections.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Time-to-live for reference-data cache entries, in seconds.
///
/// Deliberately a constant rather than configuration: reference collections
/// (types, statuses, priorities, activities) change rarely enough that a
/// uniform five-minute window is always acceptable.
pub const REFERENCE_CACHE_TTL_SECS: u64 = 300;

/// Upper bound on project names and work package subjects.
pub const MAX_SUBJECT_LENGTH: usize = 255;

/// A single time entry may not book more than one day of work.
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

/// Relation types accepted by the remote service.
pub const VALID_RELATION_TYPES: [&str; 7] =
    ["follows", "precedes", "blocks", "blocked", "relates", "duplicates", "duplicated"];

// Default link targets for newly created entities
pub const DEFAULT_TYPE_ID: u64 = 1;
pub const DEFAULT_STATUS_ID: u64 = 1;
pub const DEFAULT_PRIORITY_ID: u64 = 2;
pub const DEFAULT_ACTIVITY_ID: u64 = 1;
