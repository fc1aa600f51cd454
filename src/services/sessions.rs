use crate::core::MatchResult;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised by per-session browse state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Match request already sent to player #{0}")]
    AlreadySent(String),

    #[error("Cannot send a match request to yourself")]
    SelfRequest,

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Too many active browse sessions, try again later")]
    RegistryFull,
}

/// Outcome of a search run through a [`SearchCoordinator`]
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The newest search for the session; its result is now published
    Fresh(Arc<MatchResult>),
    /// A newer search started while this one was waiting
    Superseded,
}

/// Orders overlapping searches from one session so the newest always wins
///
/// Every search takes a generation ticket up front. After the cosmetic delay
/// only the holder of the latest ticket computes its result; older searches
/// drop out and report [`SearchOutcome::Superseded`].
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    latest: AtomicU64,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Wait `delay`, then run `compute` unless a newer search has started
    pub async fn run<F>(&self, delay: Duration, compute: F) -> SearchOutcome
    where
        F: FnOnce() -> MatchResult,
    {
        let ticket = self.begin();

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if !self.is_current(ticket) {
            tracing::debug!("Search #{} superseded before computing", ticket);
            return SearchOutcome::Superseded;
        }

        let result = Arc::new(compute());

        // A newer ticket may have been issued while computing
        if !self.is_current(ticket) {
            tracing::debug!("Search #{} superseded before returning", ticket);
            return SearchOutcome::Superseded;
        }

        SearchOutcome::Fresh(result)
    }
}

/// Players a session has already sent a match request to
#[derive(Debug, Default)]
pub struct MatchRequestLedger {
    sent: Mutex<HashSet<String>>,
}

impl MatchRequestLedger {
    /// Record a request; a second one to the same player is refused
    pub async fn record(&self, player_id: &str) -> Result<(), SessionError> {
        let mut sent = self.sent.lock().await;
        if !sent.insert(player_id.to_string()) {
            return Err(SessionError::AlreadySent(player_id.to_string()));
        }
        Ok(())
    }

    pub async fn has_sent(&self, player_id: &str) -> bool {
        self.sent.lock().await.contains(player_id)
    }
}

/// Browse state for one client session
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub search: SearchCoordinator,
    pub requests: MatchRequestLedger,
}

impl Session {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            search: SearchCoordinator::new(),
            requests: MatchRequestLedger::default(),
        }
    }
}

/// Idle-expiring registry of sessions
///
/// Live sessions are only dropped after sitting idle for the TTL. Once
/// `max_sessions` are open, new session ids are refused instead of evicting
/// an existing session and its request ledger.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: moka::future::Cache<String, Arc<Session>>,
    max_sessions: u64,
}

impl SessionRegistry {
    pub fn new(max_sessions: u64, idle_ttl_secs: u64) -> Self {
        let sessions = moka::future::Cache::builder()
            .time_to_idle(Duration::from_secs(idle_ttl_secs))
            .build();

        Self {
            sessions,
            max_sessions,
        }
    }

    /// Existing session for `id`, or a fresh one while there is room
    pub async fn get_or_create(&self, id: &str) -> Result<Arc<Session>, SessionError> {
        if let Some(session) = self.sessions.get(id).await {
            return Ok(session);
        }

        // Flush pending inserts and idle expiries so the count is exact
        self.sessions.run_pending_tasks().await;
        if self.len() >= self.max_sessions {
            tracing::warn!("Session registry full ({} sessions), refusing session {}", self.len(), id);
            return Err(SessionError::RegistryFull);
        }

        let session = self
            .sessions
            .get_with(id.to_string(), async {
                tracing::debug!("Opening browse session {}", id);
                Arc::new(Session::new(id))
            })
            .await;

        Ok(session)
    }

    fn len(&self) -> u64 {
        self.sessions.entry_count()
    }
}
