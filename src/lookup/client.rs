//! Completion lookup against the WikiSync player endpoint.

use super::types::PlayerCompletion;
use crate::constants::{
    DEFAULT_ACCOUNT_TYPE, DEFAULT_API_BASE_URL, LOOKUP_TIMEOUT_SECONDS, LOOKUP_USER_AGENT,
};
use crate::error::LookupError;
use crate::persistence::decode_id_list;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that can report which combat achievements a player completed.
pub trait CompletionSource: Send + Sync {
    fn fetch(&self, player: &str) -> Result<PlayerCompletion, LookupError>;
}

/// HTTP client for `{base_url}/{player}/{account_type}`.
#[derive(Clone)]
pub struct WikiSyncClient {
    base_url: String,
    account_type: String,
    agent: ureq::Agent,
}

impl WikiSyncClient {
    pub fn new(base_url: impl Into<String>, account_type: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECONDS))
            .user_agent(LOOKUP_USER_AGENT)
            .build();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_type: account_type.into(),
            agent,
        }
    }

    /// Request URL for a player, with the name escaped.
    pub fn player_url(&self, player: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            escape_player_name(player),
            self.account_type
        )
    }
}

impl Default for WikiSyncClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_ACCOUNT_TYPE)
    }
}

impl CompletionSource for WikiSyncClient {
    fn fetch(&self, player: &str) -> Result<PlayerCompletion, LookupError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(LookupError::EmptyPlayerName);
        }

        let url = self.player_url(player);
        debug!(%url, "fetching player completion");

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                warn!(player, status, "player lookup rejected");
                return Err(LookupError::NotFound {
                    player: player.to_string(),
                    status,
                });
            }
            Err(ureq::Error::Transport(e)) => {
                warn!(player, error = %e, "player lookup transport failure");
                return Err(LookupError::Transport(e.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let completion = decode_completion(player, &body)?;
        info!(player, completed = completion.completed.len(), "player lookup succeeded");
        Ok(completion)
    }
}

/// Escape a player name for the URL path: trimmed, spaces as `%20`.
pub fn escape_player_name(player: &str) -> String {
    player.trim().replace(' ', "%20")
}

/// Decode a lookup response body.
///
/// The body must be a JSON object with a `combat_achievements` array; ids in
/// it may be numbers or numeric strings.
pub fn decode_completion(player: &str, body: &str) -> Result<PlayerCompletion, LookupError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    let Some(ids) = value
        .get("combat_achievements")
        .and_then(serde_json::Value::as_array)
    else {
        return Err(LookupError::MissingField(player.to_string()));
    };

    Ok(PlayerCompletion::new(player, decode_id_list(ids.clone())))
}
