// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session resolution for guarded routes.
//!
//! Decides, from the tokens a request carries, whether it may proceed and
//! whether a fresh credential pair has to be written back:
//! 1. No access token → login
//! 2. Access token accepted → proceed, nothing to rewrite
//! 3. Access token refused, no refresh token → login
//! 4. Refresh exchange refused (or failed) → login
//! 5. Refresh exchange succeeded → proceed with the new pair
//!
//! Concurrent refreshes of the same refresh token are single-flighted so
//! that they all receive the same new pair.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::models::{CredentialPair, Principal, Session};
use crate::services::auth_provider::{AuthError, AuthProvider};

/// How long a freshly exchanged session is handed to other requests that
/// present the same (now spent) refresh token.
const REFRESH_REUSE_WINDOW: Duration = Duration::from_secs(10);

/// What the guard observed about the request's credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoToken,
    Valid,
    ExpiredRefreshable,
    ExpiredUnrefreshable,
}

/// Terminal decision for a guarded request.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Continue to the handler; `refreshed` holds a new pair to write back.
    Proceed {
        principal: Principal,
        refreshed: Option<CredentialPair>,
    },
    RedirectLogin(SessionState),
}

impl GuardOutcome {
    pub fn state(&self) -> SessionState {
        match self {
            GuardOutcome::Proceed {
                refreshed: None, ..
            } => SessionState::Valid,
            GuardOutcome::Proceed {
                refreshed: Some(_),
                ..
            } => SessionState::ExpiredRefreshable,
            GuardOutcome::RedirectLogin(state) => *state,
        }
    }
}

#[derive(Clone)]
struct RecentRefresh {
    session: Session,
    issued_at: Instant,
}

/// Resolves request credentials against the auth service.
pub struct SessionService {
    auth: Arc<dyn AuthProvider>,
    /// Sessions recently issued per refresh token.
    recent_refreshes: DashMap<String, RecentRefresh>,
    /// Per-refresh-token mutex to serialize exchanges.
    refresh_locks: DashMap<String, Arc<Mutex<()>>>,
    reuse_window: Duration,
}

impl SessionService {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_reuse_window(auth, REFRESH_REUSE_WINDOW)
    }

    pub fn with_reuse_window(auth: Arc<dyn AuthProvider>, reuse_window: Duration) -> Self {
        Self {
            auth,
            recent_refreshes: DashMap::new(),
            refresh_locks: DashMap::new(),
            reuse_window,
        }
    }

    /// Run the guard algorithm. Empty tokens count as absent.
    pub async fn authenticate(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> GuardOutcome {
        let Some(access_token) = access_token.filter(|t| !t.is_empty()) else {
            return GuardOutcome::RedirectLogin(SessionState::NoToken);
        };

        match self.auth.get_user(access_token).await {
            Ok(principal) => {
                return GuardOutcome::Proceed {
                    principal,
                    refreshed: None,
                }
            }
            Err(err) => tracing::debug!(error = %err, "Access token not accepted"),
        }

        let Some(refresh_token) = refresh_token.filter(|t| !t.is_empty()) else {
            return GuardOutcome::RedirectLogin(SessionState::ExpiredUnrefreshable);
        };

        match self.refresh(refresh_token).await {
            Ok(session) => {
                tracing::info!(user_id = %session.principal.id, "Session refreshed");
                GuardOutcome::Proceed {
                    principal: session.principal,
                    refreshed: Some(session.credentials),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Session refresh failed");
                GuardOutcome::RedirectLogin(SessionState::ExpiredUnrefreshable)
            }
        }
    }

    /// Exchange `refresh_token`, coalescing concurrent exchanges of the same token.
    ///
    /// Failed exchanges are not remembered.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        if let Some(session) = self.recent(refresh_token) {
            return Ok(session);
        }

        let lock = self
            .refresh_locks
            .entry(refresh_token.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = lock.lock().await;

        // Another request may have finished the exchange while we waited.
        if let Some(session) = self.recent(refresh_token) {
            return Ok(session);
        }

        let result = self.auth.refresh_session(refresh_token).await;
        if let Ok(session) = &result {
            self.recent_refreshes.insert(
                refresh_token.to_string(),
                RecentRefresh {
                    session: session.clone(),
                    issued_at: Instant::now(),
                },
            );
        }

        drop(guard);
        drop(lock);
        self.prune();

        result
    }

    fn recent(&self, refresh_token: &str) -> Option<Session> {
        self.recent_refreshes
            .get(refresh_token)
            .filter(|recent| recent.issued_at.elapsed() < self.reuse_window)
            .map(|recent| recent.session.clone())
    }

    /// Drop expired sessions and locks nobody is waiting on.
    fn prune(&self) {
        let window = self.reuse_window;
        self.recent_refreshes
            .retain(|_, recent| recent.issued_at.elapsed() < window);
        self.refresh_locks.retain(|token, lock| {
            Arc::strong_count(lock) > 1 || self.recent_refreshes.contains_key(token)
        });
    }
}
