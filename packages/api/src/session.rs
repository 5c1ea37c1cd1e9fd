//! # Session store: the single owner of "who is logged in"
//!
//! [`SessionStore`] holds the current [`Identity`] and its bearer token and
//! persists the token through a [`KeyValueStore`] so it survives reloads. One
//! instance exists per running application; it is a cheap `Clone` handle that
//! callers receive explicitly (the UI puts it in a Dioxus context).
//!
//! ## Lifecycle
//!
//! | Transition | From | To | Notes |
//! |------------|------|----|-------|
//! | [`open`](SessionStore::open) | none | `Pending` / `Anonymous` | a persisted token makes the session pending until a profile fetch confirms it |
//! | [`confirm`](SessionStore::confirm) | `Pending` | `Authenticated` | only if no login/logout happened since the fetch was issued |
//! | [`login`](SessionStore::login) | any | `Authenticated` | replaces identity and token wholesale |
//! | [`update`](SessionStore::update) | `Authenticated` | `Authenticated` | merges profile fields, `NoActiveSession` otherwise |
//! | [`logout`](SessionStore::logout) | any | `Anonymous` | idempotent |
//! | [`expire`](SessionStore::expire) / [`reject`](SessionStore::reject) | `Pending` / `Authenticated` | `Anonymous` | forced endings, recorded for the redirector |
//!
//! ## Generations
//!
//! Every login and every ending bumps a generation counter. Requests record the
//! generation they were issued under; a response arriving under a different
//! generation belongs to a session that no longer exists and is dropped by
//! the gateway. Mutations are applied under one lock in the order they
//! complete, so the last completed write wins.
//!
//! ## Notifications
//!
//! [`subscribe`](SessionStore::subscribe) hands out a `tokio::sync::watch`
//! receiver of [`SessionSnapshot`]s. Snapshots are published while the state
//! lock is held, so observers never see changes out of order.
//!
//! ## Tokens without identity
//!
//! A pending token is not trusted: [`credential`](SessionStore::credential)
//! only presents it to requests that explicitly ask to validate it
//! ([`Auth::Validate`]). Ordinary requests go out unauthenticated until an
//! identity is confirmed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use store::{KeyValueStore, PersistedToken};
use tokio::sync::watch;

use crate::error::ApiError;
use crate::models::{Identity, IdentityPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    /// A persisted token exists but has not been validated yet.
    Pending,
    Authenticated,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user logged out.
    SignedOut,
    /// The backend answered 401 to a credentialed request.
    Expired,
    /// An auth response carried a role the client does not know.
    Rejected,
}

impl SessionEnd {
    /// Endings the user did not ask for.
    pub fn is_forced(&self) -> bool {
        !matches!(self, SessionEnd::SignedOut)
    }
}

/// Immutable view of the session published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub identity: Option<Identity>,
    pub generation: u64,
    pub ended: Option<SessionEnd>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

/// Which credential a request presents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Auth {
    /// Never attach a token (login, registration).
    None,
    /// Attach the token of an authenticated session, if there is one.
    #[default]
    Session,
    /// Attach a pending token so the backend can confirm or refute it.
    Validate,
}

/// Token selected for a request, with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: Option<String>,
    pub generation: u64,
}

#[derive(Debug)]
struct State {
    status: SessionStatus,
    identity: Option<Identity>,
    token: Option<String>,
    generation: u64,
    ended: Option<SessionEnd>,
}

impl State {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            identity: self.identity.clone(),
            generation: self.generation,
            ended: self.ended,
        }
    }
}

struct Inner<S: KeyValueStore> {
    state: Mutex<State>,
    persisted: PersistedToken<S>,
    notify: watch::Sender<SessionSnapshot>,
}

/// Process-wide session state, shared by cloning the handle.
pub struct SessionStore<S: KeyValueStore> {
    inner: Arc<Inner<S>>,
}

impl<S: KeyValueStore> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Two handles are equal when they share the same session.
impl<S: KeyValueStore> PartialEq for SessionStore<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Open the store, picking up a token persisted by a previous run.
    pub fn open(store: S, token_key: &str) -> Self {
        let persisted = PersistedToken::new(store, token_key);
        let token = persisted.load();
        let status = if token.is_some() {
            SessionStatus::Pending
        } else {
            SessionStatus::Anonymous
        };
        let state = State {
            status,
            identity: None,
            token,
            generation: 0,
            ended: None,
        };
        let (notify, _) = watch::channel(state.snapshot());
        tracing::debug!(?status, "session store opened");

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                persisted,
                notify,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.inner.notify.send_replace(state.snapshot());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.notify.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        self.state().status
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state().identity.clone()
    }

    /// Select the token a request should carry.
    pub fn credential(&self, auth: Auth) -> Credential {
        let state = self.state();
        let token = match (auth, state.status) {
            (Auth::Session, SessionStatus::Authenticated) => state.token.clone(),
            (Auth::Validate, SessionStatus::Pending) => state.token.clone(),
            _ => None,
        };
        Credential {
            token,
            generation: state.generation,
        }
    }

    /// Whether no login or ending happened since `generation` was observed.
    pub fn is_current(&self, generation: u64) -> bool {
        self.state().generation == generation
    }

    /// Establish a session, replacing whatever was there.
    pub fn login(&self, identity: Identity, token: String) {
        let mut state = self.state();
        if let Err(e) = self.inner.persisted.save(&token) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
        tracing::info!(user = %identity.id, role = %identity.role, "session started");
        state.status = SessionStatus::Authenticated;
        state.identity = Some(identity);
        state.token = Some(token);
        state.generation += 1;
        state.ended = None;
        self.publish(&state);
    }

    /// Clear the session. Calling it on an empty session does nothing.
    pub fn logout(&self) {
        let mut state = self.state();
        self.end(&mut state, SessionEnd::SignedOut);
    }

    /// Merge profile fields into the current identity.
    pub fn update(&self, patch: &IdentityPatch) -> Result<Identity, ApiError> {
        let mut state = self.state();
        let identity = state.identity.as_mut().ok_or(ApiError::NoActiveSession)?;
        patch.apply(identity);
        let updated = identity.clone();
        self.publish(&state);
        Ok(updated)
    }

    /// Complete a pending session with the identity the backend returned for
    /// its token. Fails with `SessionChanged` if the session moved on since
    /// `generation`.
    pub fn confirm(&self, identity: Identity, generation: u64) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.generation != generation || state.status == SessionStatus::Anonymous {
            return Err(ApiError::SessionChanged);
        }
        tracing::info!(user = %identity.id, role = %identity.role, "persisted session confirmed");
        state.status = SessionStatus::Authenticated;
        state.identity = Some(identity);
        self.publish(&state);
        Ok(())
    }

    /// End the session after a 401, unless it already moved on since
    /// `generation`. Returns whether anything was cleared.
    pub fn expire(&self, generation: u64) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        self.end(&mut state, SessionEnd::Expired)
    }

    /// End the session after an auth response with an unknown role.
    pub fn reject(&self) -> bool {
        let mut state = self.state();
        self.end(&mut state, SessionEnd::Rejected)
    }

    fn end(&self, state: &mut State, reason: SessionEnd) -> bool {
        if state.status == SessionStatus::Anonymous && state.token.is_none() {
            return false;
        }
        if let Err(e) = self.inner.persisted.clear() {
            tracing::warn!(error = %e, "failed to remove persisted session token");
        }
        tracing::info!(?reason, "session ended");
        state.status = SessionStatus::Anonymous;
        state.identity = None;
        state.token = None;
        state.generation += 1;
        state.ended = Some(reason);
        self.publish(state);
        true
    }
}
