//! # Role router
//!
//! Pure navigation decisions. Nothing here navigates by itself: views and the
//! UI shell ask these functions where to go and do the navigation.
//!
//! - [`route_after_auth`] picks the landing page after login or registration.
//! - [`require_role`] gates a view on the current identity's role.
//! - [`landing`] resolves `/` from a session snapshot.
//! - [`Redirector`] turns forced session endings into exactly one redirect to
//!   the login page.

use crate::error::ApiError;
use crate::models::{Identity, Role};
use crate::session::{SessionSnapshot, SessionStatus};

pub const LOGIN: &str = "/login";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const USER_DASHBOARD: &str = "/user/dashboard";

pub fn task_details(id: &str) -> String {
    format!("/user/task-details/{id}")
}

pub fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD,
        Role::User => USER_DASHBOARD,
    }
}

/// Landing page for a role string taken from an auth response.
pub fn route_after_auth(role: &str) -> Result<&'static str, ApiError> {
    let role: Role = role.parse()?;
    Ok(dashboard_for(role))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied { redirect: &'static str },
}

/// Decide whether a view restricted to `required` may render.
///
/// Anonymous visitors go to the login page; signed-in users with the wrong
/// role go to their own dashboard.
pub fn require_role(identity: Option<&Identity>, required: Role) -> Access {
    match identity {
        None => Access::Denied { redirect: LOGIN },
        Some(identity) if identity.role == required => Access::Allowed,
        Some(identity) => Access::Denied {
            redirect: dashboard_for(identity.role),
        },
    }
}

/// Where `/` leads. `None` while a persisted token is still being validated.
pub fn landing(snapshot: &SessionSnapshot) -> Option<&'static str> {
    match snapshot.status {
        SessionStatus::Pending => None,
        SessionStatus::Anonymous => Some(LOGIN),
        SessionStatus::Authenticated => snapshot
            .identity
            .as_ref()
            .map(|identity| dashboard_for(identity.role))
            .or(Some(LOGIN)),
    }
}

/// Subscriber that sends the user to the login page after a forced logout.
///
/// Each forced ending happens under its own generation, so the redirect is
/// issued at most once per ending no matter how many snapshots arrive.
#[derive(Debug, Default)]
pub struct Redirector {
    handled: Option<u64>,
}

impl Redirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a snapshot; returns the path to navigate to, if any.
    pub fn on_session(
        &mut self,
        snapshot: &SessionSnapshot,
        current_path: &str,
    ) -> Option<&'static str> {
        let forced = snapshot.ended.is_some_and(|end| end.is_forced());
        if !forced || snapshot.status != SessionStatus::Anonymous {
            return None;
        }
        if self.handled == Some(snapshot.generation) {
            return None;
        }
        self.handled = Some(snapshot.generation);
        if current_path == LOGIN {
            None
        } else {
            tracing::debug!(from = current_path, "redirecting to login after forced logout");
            Some(LOGIN)
        }
    }
}
