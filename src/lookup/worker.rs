//! Background lookups for the terminal UI.
//!
//! Each request runs on its own thread and posts its reply on a channel the
//! UI drains every frame. Requests are never cancelled; replies carry the
//! ticket or sequence they were issued with so the receiver can drop stale
//! ones.

use super::client::CompletionSource;
use super::types::{LookupTicket, PlayerCompletion};
use crate::error::{LookupError, TeamError};
use crate::team::fetch_team;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

/// A finished background lookup.
#[derive(Debug)]
pub enum LookupReply {
    Player {
        ticket: LookupTicket,
        result: Result<PlayerCompletion, LookupError>,
    },
    Team {
        seq: u64,
        result: Result<Vec<PlayerCompletion>, TeamError>,
    },
}

pub struct LookupWorker {
    source: Arc<dyn CompletionSource>,
    tx: Sender<LookupReply>,
    rx: Receiver<LookupReply>,
}

impl LookupWorker {
    pub fn new(source: Arc<dyn CompletionSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    /// Fetch one player's completion in the background.
    pub fn request_player(&self, ticket: LookupTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch(&ticket.player);
            // Receiver gone means the UI exited.
            let _ = tx.send(LookupReply::Player { ticket, result });
        });
    }

    /// Fetch a whole team in the background.
    pub fn request_team(&self, seq: u64, names: Vec<String>) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = fetch_team(source.as_ref(), &names);
            let _ = tx.send(LookupReply::Team { seq, result });
        });
    }

    /// Next finished reply, if any, without blocking.
    pub fn poll(&self) -> Option<LookupReply> {
        match self.rx.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next reply arrives.
    pub fn wait(&self) -> Option<LookupReply> {
        self.rx.recv().ok()
    }
}
