//! Layout shared by every route, and the `/` redirect.

use api::{routes, Role};
use dioxus::prelude::*;
use ui::{use_session, LogoutButton, PendingSession, SessionRedirect};

use crate::Route;

#[component]
pub fn Shell() -> Element {
    let route = use_route::<Route>();
    let session = use_session();
    let snapshot = session();

    rsx! {
        SessionRedirect { current: route.to_string() }

        if let Some(identity) = snapshot.identity {
            header {
                class: "flex items-center justify-between px-6 py-3 border-b border-gray-200 bg-white",
                h2 { class: "text-lg font-semibold", "TaskDesk" }
                nav {
                    class: "flex gap-4 text-sm",
                    {match identity.role {
                        Role::Admin => rsx! {
                            Link { to: Route::AdminDashboard {}, "Dashboard" }
                            Link { to: Route::ManageTasks {}, "Manage Tasks" }
                        },
                        Role::User => rsx! {
                            Link { to: Route::UserDashboard {}, "Dashboard" }
                            Link { to: Route::MyTasks {}, "My Tasks" }
                        },
                    }}
                }
                div {
                    class: "flex items-center gap-3",
                    if let Some(url) = identity.profile_image_url {
                        img { class: "w-8 h-8 rounded-full", src: "{url}" }
                    }
                    div {
                        p { class: "text-sm font-medium", "{identity.name}" }
                        p { class: "text-xs text-neutral-500", "{identity.email}" }
                    }
                    LogoutButton { class: "text-sm text-rose-500" }
                }
            }
        }

        main {
            class: "p-5",
            Outlet::<Route> {}
        }
    }
}

/// Redirect `/` to the login page or the signed-in user's dashboard.
#[component]
pub fn Root() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let target = routes::landing(&session.read());

    match target {
        Some(path) => {
            tracing::debug!(path, "redirecting from the root route");
            nav.replace(path);
            rsx! {}
        }
        None => rsx! {
            PendingSession {}
        },
    }
}
