//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (content ids, timeouts), update only this file.

/// Request timeout for test clients
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Content IDs used by fixtures
// ============================================================================

pub const SONG_A_ID: &str = "song-a";
pub const SONG_B_ID: &str = "song-b";
pub const SONG_C_ID: &str = "song-c";
pub const ALBUM_1_ID: &str = "album-1";
