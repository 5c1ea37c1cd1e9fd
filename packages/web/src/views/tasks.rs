//! Task list pages: "My Tasks" for users and "Manage Tasks" for admins.

use api::{Role, StatusFilter};
use dioxus::prelude::*;
use ui::{use_client, use_view_scope, ErrorNotice, RoleGate, StatusTabs, TaskCard};

use crate::Route;

#[component]
pub fn MyTasks() -> Element {
    let nav = use_navigator();
    rsx! {
        RoleGate {
            role: Role::User,
            TaskBoard {
                title: "My Tasks",
                on_open: move |id: String| {
                    nav.push(Route::TaskDetails { id });
                },
            }
        }
    }
}

#[component]
pub fn ManageTasks() -> Element {
    rsx! {
        RoleGate {
            role: Role::Admin,
            TaskBoard { title: "Manage Tasks" }
        }
    }
}

/// Status tabs over a grid of task cards; refetches when the tab changes.
#[component]
fn TaskBoard(title: String, on_open: Option<EventHandler<String>>) -> Element {
    let client = use_client();
    let scope = use_view_scope();
    let mut filter = use_signal(StatusFilter::default);

    let list = use_resource(move || {
        let client = client.clone();
        let status = filter();
        let load = scope.run(async move { client.tasks(status).await });
        async move { load.await }
    });

    rsx! {
        div {
            class: "my-5",
            {match &*list.read_unchecked() {
                None => rsx! {
                    h2 { class: "text-xl font-medium", "{title}" }
                    p { class: "text-neutral-500", "Loading..." }
                },
                Some(None) => rsx! {},
                Some(Some(Err(error))) => rsx! {
                    h2 { class: "text-xl font-medium", "{title}" }
                    ErrorNotice { error: error.clone() }
                },
                Some(Some(Ok(list))) => rsx! {
                    div {
                        class: "flex flex-col lg:flex-row lg:items-center justify-between",
                        h2 { class: "text-xl font-medium", "{title}" }
                        if list.show_tabs() {
                            StatusTabs {
                                tabs: list.tabs.clone(),
                                active: filter(),
                                on_select: move |next: StatusFilter| filter.set(next),
                            }
                        }
                    }
                    div {
                        class: "grid grid-cols-1 md:grid-cols-3 gap-4 mt-4",
                        for task in list.tasks.iter().cloned() {
                            if let Some(handler) = on_open {
                                TaskCard { key: "{task.id}", task, on_open: handler }
                            } else {
                                TaskCard { key: "{task.id}", task }
                            }
                        }
                    }
                },
            }}
        }
    }
}
