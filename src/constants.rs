// Data directory and file names
pub const DATA_DIR_NAME: &str = ".ca-tracker";
pub const CATALOG_FILE: &str = "combat_achievements.json";
pub const PINNED_FILE: &str = "pinned.json";
pub const PLANNER_FILE: &str = "planner.json";
pub const LOG_FILE: &str = "ca-tracker.log";

// Completion lookup service
pub const DEFAULT_API_BASE_URL: &str = "https://sync.runescape.wiki/runelite/player";
pub const DEFAULT_ACCOUNT_TYPE: &str = "STANDARD";
pub const LOOKUP_USER_AGENT: &str = "ca-tracker";
pub const LOOKUP_TIMEOUT_SECONDS: u64 = 15;

// Team comparison
pub const MAX_TEAM_PLAYERS: usize = 4;
pub const MIN_TEAM_SLOTS: usize = 2;

// Terminal loop
pub const INPUT_POLL_MS: u64 = 50;
pub const STATUS_MESSAGE_SECONDS: i64 = 4;

// Environment overrides
pub const ENV_DATA_DIR: &str = "CA_TRACKER_DATA_DIR";
pub const ENV_CATALOG: &str = "CA_TRACKER_CATALOG";
pub const ENV_API_URL: &str = "CA_TRACKER_API_URL";
pub const ENV_ACCOUNT_TYPE: &str = "CA_TRACKER_ACCOUNT_TYPE";
pub const ENV_LOG: &str = "CA_TRACKER_LOG";
