//! Error types for the tracker.
//!
//! Each operation owns its error enum so a failure stays local to the
//! operation that produced it: a failed lookup never touches the catalog,
//! a bad goal never touches the plan.

use std::io;

/// Failure to load the achievement catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A catalog key that is not a positive integer.
    #[error("invalid achievement id {0:?}")]
    InvalidId(String),
}

/// Failure to fetch a player's completion state.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("player name is empty")]
    EmptyPlayerName,

    #[error("Player \"{player}\" not found (HTTP {status})")]
    NotFound { player: String, status: u16 },

    #[error("lookup failed: {0}")]
    Transport(String),

    /// The response decoded but carried no `combat_achievements` array.
    #[error("no combat achievement data for \"{0}\"")]
    MissingField(String),

    #[error("malformed lookup response: {0}")]
    Decode(String),
}

impl LookupError {
    /// Short message for inline display.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::NotFound { .. } | LookupError::MissingField(_) => {
                "Player not found or API error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Goal input the planner refuses to act on. Callers ignore it silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalInputError {
    #[error("goal is not a number")]
    NotNumeric,

    #[error("goal must be positive")]
    NonPositive,
}

/// Failure to assemble a team comparison.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("Please enter at least one username")]
    NoPlayers,

    #[error("a team has at most {0} players")]
    TooManyPlayers(usize),

    #[error("Player \"{player}\" not found")]
    Player {
        player: String,
        #[source]
        source: LookupError,
    },
}

/// Failure to read or write persisted state.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("persistence I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("persistence encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}
