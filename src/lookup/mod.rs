//! Player completion lookup.
//!
//! Fetches the ids of the combat achievements a player has completed from
//! the public WikiSync endpoint. The lookup is read-only and never retried;
//! a failure is reported to the caller and nothing else.

pub mod client;
pub mod types;
pub mod worker;

pub use client::{decode_completion, escape_player_name, CompletionSource, WikiSyncClient};
pub use types::{LookupOutcome, LookupTicket, PlayerCompletion};
pub use worker::{LookupReply, LookupWorker};
