//! Session context and hooks for the UI.
//!
//! [`AuthProvider`] owns the one [`AppClient`] of the application and mirrors
//! its session store into a signal, so components re-render on login, logout
//! and forced session endings without polling.

use std::cell::RefCell;
use std::rc::Rc;

use api::routes::{self, Access, Redirector};
use api::{ApiError, Role, SessionSnapshot, SessionStatus, ViewScope};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaRightFromBracket;
use dioxus_free_icons::Icon;

use crate::client::{make_client, AppClient};
use crate::dashboard::ErrorNotice;

/// Outcome of the last attempt to confirm a persisted token, and a counter
/// that starts a new attempt when bumped.
#[derive(Clone, Copy)]
struct RestoreState {
    error: Signal<Option<ApiError>>,
    attempt: Signal<u32>,
}

/// Current session snapshot; updates whenever the session store publishes.
pub fn use_session() -> Signal<SessionSnapshot> {
    use_context::<Signal<SessionSnapshot>>()
}

/// The application's client.
pub fn use_client() -> AppClient {
    use_context::<AppClient>()
}

/// A scope closed when the calling component unmounts.
pub fn use_view_scope() -> Rc<ViewScope> {
    let scope = use_hook(|| Rc::new(ViewScope::new()));
    use_drop({
        let scope = scope.clone();
        move || scope.close()
    });
    scope
}

/// Provider component that creates the client and bridges its session.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_hook(make_client);

    match client {
        Ok(client) => rsx! {
            SessionProvider { client, {children} }
        },
        Err(e) => {
            tracing::error!(error = %e, "failed to create the HTTP client");
            rsx! {
                div {
                    class: "p-8 text-red-600",
                    "The application could not start: {e}"
                }
            }
        }
    }
}

#[component]
fn SessionProvider(client: AppClient, children: Element) -> Element {
    let mut snapshot = use_signal(|| client.session().snapshot());

    let bridge = client.clone();
    use_future(move || {
        let mut rx = bridge.session().subscribe();
        async move {
            snapshot.set(rx.borrow_and_update().clone());
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    // Confirm or discard a token left by a previous visit
    let mut error = use_signal(|| Option::<ApiError>::None);
    let attempt = use_signal(|| 0u32);
    let restorer = client.clone();
    use_resource(move || {
        let client = restorer.clone();
        let round = attempt();
        async move {
            match client.restore().await {
                Ok(_) => error.set(None),
                Err(e) => {
                    tracing::warn!(error = %e, round, "could not restore the previous session");
                    error.set(Some(e));
                }
            }
        }
    });

    use_context_provider(|| client);
    use_context_provider(|| snapshot);
    use_context_provider(|| RestoreState { error, attempt });

    rsx! {
        {children}
    }
}

/// Renders `children` only for an identity with `role`.
///
/// Visitors without a session go to the login page, users with another role
/// to their own dashboard. After a forced logout the redirect belongs to
/// [`SessionRedirect`], so the gate only shows a notice.
#[component]
pub fn RoleGate(role: Role, children: Element) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let snapshot = session();

    if snapshot.status == SessionStatus::Pending {
        return rsx! {
            PendingSession {}
        };
    }

    match routes::require_role(snapshot.identity.as_ref(), role) {
        Access::Allowed => rsx! {
            {children}
        },
        Access::Denied { redirect } => {
            let forced = snapshot.ended.is_some_and(|end| end.is_forced());
            if forced && redirect == routes::LOGIN {
                return rsx! {
                    div {
                        class: "p-8 text-neutral-600",
                        "Your session has ended. "
                        Link { to: routes::LOGIN, "Log in again" }
                    }
                };
            }
            nav.replace(redirect);
            rsx! {}
        }
    }
}

/// Placeholder while a persisted token is being confirmed.
///
/// When the confirmation failed (backend unreachable, server error) the
/// failure is shown with a button that tries again.
#[component]
pub fn PendingSession() -> Element {
    let RestoreState { error, mut attempt } = use_context::<RestoreState>();

    match error() {
        Some(e) => rsx! {
            div {
                class: "p-8",
                ErrorNotice { error: e }
                button {
                    class: "btn-primary text-sm",
                    onclick: move |_| attempt += 1,
                    "Try again"
                }
            }
        },
        None => rsx! {
            div { class: "p-8 text-neutral-500", "Loading..." }
        },
    }
}

/// Navigates to the login page once per forced logout.
///
/// Mount it once in a layout that stays mounted across routes.
#[component]
pub fn SessionRedirect(current: String) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let redirector = use_hook(|| Rc::new(RefCell::new(Redirector::new())));

    if let Some(path) = redirector.borrow_mut().on_session(&session.read(), &current) {
        nav.replace(path);
    }

    rsx! {}
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_client();
    let nav = use_navigator();

    let onclick = move |_| {
        client.logout();
        nav.replace(routes::LOGIN);
    };

    rsx! {
        button {
            class: "flex items-center gap-2 {class}",
            onclick: onclick,
            Icon { width: 14, height: 14, icon: FaRightFromBracket }
            "{label}"
        }
    }
}
