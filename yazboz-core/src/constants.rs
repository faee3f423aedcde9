//! Table rules and storage layout shared by every game variant.
//!
//! Thresholds are fixed by the games themselves; only the Pişti target
//! score and the Cezalı 101 hand count can be changed at the table.

// Round limits -------------------------------------------------------------
/// Okey ends once this many rounds have been written down.
pub const OKEY_ROUND_LIMIT: usize = 15;
/// Batak ends after a full deal of thirteen hands.
pub const BATAK_ROUND_LIMIT: usize = 13;

// Adjustable thresholds ----------------------------------------------------
pub const DEFAULT_HAND_TARGET: u32 = 9;
pub const DEFAULT_TARGET_SCORE: i64 = 151;

// Table size ---------------------------------------------------------------
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const DEFAULT_PLAYER_COUNT: usize = 4;

// Quick entry --------------------------------------------------------------
pub const PENALTY101_BONUS: i64 = 200;
pub const PENALTY101_FINISH: i64 = -100;
/// One-tap Pişti targets offered beside the editable target.
pub const PISTI_TARGET_PRESETS: [i64; 4] = [151, 251, 351, 501];

// Storage layout -----------------------------------------------------------
// Key names match what the first browser release wrote, so tables saved
// there keep loading.
pub const SESSION_KEY_PREFIX: &str = "oyunVerisi_";
pub const ARCHIVE_KEY: &str = "kayitliOyunlar";

// Archive timestamps (tr-TR short forms) -----------------------------------
pub const SAVED_DATE_FORMAT: &str = "%d.%m.%Y";
pub const SAVED_TIME_FORMAT: &str = "%H:%M";
