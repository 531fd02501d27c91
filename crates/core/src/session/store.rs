//! The single owner of the signed-in session
//!
//! Reads and writes go through one [`SessionStore`] shared by `Arc`.
//! Persistence uses the `userToken` / `userName` keys, and every change is
//! published on a watch channel so views can react to sign-in and sign-out.

use std::sync::Arc;

use mizan_domain::constants::{STORAGE_KEY_TOKEN, STORAGE_KEY_USER_NAME};
use mizan_domain::{ApiError, Result, Session};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ports::KeyValueStorage;

pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    state: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Mirror whatever session is persisted in `storage`.
    ///
    /// A session exists only when both keys hold a non-empty value.
    ///
    /// # Errors
    /// Storage read failures.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let token = non_empty(storage.get_item(STORAGE_KEY_TOKEN)?);
        let user_name = non_empty(storage.get_item(STORAGE_KEY_USER_NAME)?);

        let session = match (token, user_name) {
            (Some(token), Some(user_name)) => Some(Session::new(token, user_name)),
            _ => None,
        };
        debug!(authenticated = session.is_some(), "session loaded");

        let (state, _) = watch::channel(session);
        Ok(Self { storage, state })
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user_name(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.user_name.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Token for an authenticated call, or the "please sign in" failure.
    pub fn require_token(&self) -> std::result::Result<String, ApiError> {
        self.token().ok_or_else(ApiError::missing_session)
    }

    /// Persist both keys, then publish the new session.
    ///
    /// When the name cannot be written the previous token is put back, so
    /// storage never pairs one user's token with another user's name.
    ///
    /// # Errors
    /// Storage write failures; subscribers are not notified in that case.
    pub fn sign_in(&self, session: Session) -> Result<()> {
        let previous_token = self.storage.get_item(STORAGE_KEY_TOKEN)?;
        self.storage.set_item(STORAGE_KEY_TOKEN, &session.token)?;

        if let Err(err) = self.storage.set_item(STORAGE_KEY_USER_NAME, &session.user_name) {
            let restored = match previous_token.as_deref() {
                Some(token) => self.storage.set_item(STORAGE_KEY_TOKEN, token),
                None => self.storage.remove_item(STORAGE_KEY_TOKEN),
            };
            if let Err(rollback) = restored {
                warn!(error = %rollback, "could not restore the previous token");
            }
            return Err(err);
        }

        info!(user = %session.user_name, "signed in");
        self.state.send_replace(Some(session));
        Ok(())
    }

    /// Remove both keys, then publish the absence.
    ///
    /// # Errors
    /// Storage write failures.
    pub fn sign_out(&self) -> Result<()> {
        self.storage.remove_item(STORAGE_KEY_TOKEN)?;
        self.storage.remove_item(STORAGE_KEY_USER_NAME)?;

        info!("signed out");
        self.state.send_replace(None);
        Ok(())
    }

    /// Receiver that sees every later sign-in and sign-out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("session", &*self.state.borrow()).finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
