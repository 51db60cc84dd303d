//! Shared helper utilities for factory methods.

/// Base SteamID64 for individual accounts; factory ids are offsets from it.
const STEAM_ID64_BASE: u64 = 76561197960265728;

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Produces a unique, well-formed SteamID64 string.
///
/// # Returns
/// - `String` - 17 digit decimal SteamID64
pub fn next_steam_id() -> String {
    (STEAM_ID64_BASE + next_id()).to_string()
}
