/// Fixed key the sync envelope is stored under in the local storage area.
pub const DATA_KEY: &str = "coffee_atlas_data";

/// Local storage quota in bytes (5 MiB), mirroring the browser allowance
/// the mobile app runs against.
pub const STORAGE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Prefix for exported backup file names; the current ISO date and a
/// `.json` suffix are appended.
pub const BACKUP_FILE_PREFIX: &str = "coffee_atlas_backup_";

/// Maximum number of community notes fetched from the shared catalog.
pub const COMMUNITY_NOTES_LIMIT: u32 = 50;
