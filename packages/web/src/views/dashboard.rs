//! Admin and user dashboards.

use api::dashboard::{long_date, priority_series, status_series, DashboardData};
use api::Role;
use chrono::Local;
use dioxus::prelude::*;
use ui::icons::FaArrowRight;
use ui::{
    use_client, use_session, use_view_scope, ChartBars, ErrorNotice, Icon, InfoCard, RoleGate,
    TaskTable,
};

use crate::Route;

#[component]
pub fn AdminDashboard() -> Element {
    rsx! {
        RoleGate { role: Role::Admin, AdminDashboardBody {} }
    }
}

#[component]
pub fn UserDashboard() -> Element {
    rsx! {
        RoleGate { role: Role::User, UserDashboardBody {} }
    }
}

#[component]
fn AdminDashboardBody() -> Element {
    let client = use_client();
    let scope = use_view_scope();
    let data = use_resource(move || {
        let client = client.clone();
        let load = scope.run(async move { client.admin_dashboard().await });
        async move { load.await }
    });

    rsx! {
        Greeting {}
        {match &*data.read_unchecked() {
            None => rsx! { p { class: "text-neutral-500", "Loading..." } },
            Some(None) => rsx! {},
            Some(Some(Ok(data))) => rsx! {
                DashboardBody { data: data.clone(), admin: true, see_all: Route::ManageTasks {} }
            },
            Some(Some(Err(error))) => rsx! { ErrorNotice { error: error.clone() } },
        }}
    }
}

#[component]
fn UserDashboardBody() -> Element {
    let client = use_client();
    let scope = use_view_scope();
    let data = use_resource(move || {
        let client = client.clone();
        let load = scope.run(async move { client.user_dashboard().await });
        async move { load.await }
    });

    rsx! {
        Greeting {}
        {match &*data.read_unchecked() {
            None => rsx! { p { class: "text-neutral-500", "Loading..." } },
            Some(None) => rsx! {},
            Some(Some(Ok(data))) => rsx! {
                DashboardBody { data: data.clone(), admin: false, see_all: Route::MyTasks {} }
            },
            Some(Some(Err(error))) => rsx! { ErrorNotice { error: error.clone() } },
        }}
    }
}

#[component]
fn Greeting() -> Element {
    let session = use_session();
    let name = session
        .read()
        .identity
        .as_ref()
        .map(|identity| identity.name.clone())
        .unwrap_or_default();
    let today = long_date(&Local::now());

    rsx! {
        div {
            class: "card my-5",
            h2 { class: "text-xl md:text-2xl", "Good Morning! {name}" }
            p { class: "text-xs md:text-[13px] text-gray-400 mt-1.5", "{today}" }
        }
    }
}

#[component]
fn DashboardBody(data: DashboardData, admin: bool, see_all: Route) -> Element {
    let nav = use_navigator();
    let status = data.summary.status;
    let total = if admin {
        data.statistics.total_tasks.max(status.all)
    } else {
        status.all
    };

    rsx! {
        div {
            class: "grid grid-cols-2 md:grid-cols-4 gap-3 md:gap-6 mt-5",
            InfoCard { label: "Total Tasks", value: total, color: "bg-primary" }
            InfoCard { label: "Pending Tasks", value: status.pending, color: "bg-violet-500" }
            InfoCard { label: "In Progress Tasks", value: status.in_progress, color: "bg-cyan-500" }
            InfoCard { label: "Completed Tasks", value: status.completed, color: "bg-lime-500" }
            if admin {
                InfoCard { label: "Overdue Tasks", value: data.statistics.overdue_tasks, color: "bg-rose-500" }
            }
        }

        div {
            class: "grid grid-cols-1 md:grid-cols-2 gap-6 my-4 md:my-6",
            ChartBars { title: "Task Distribution", points: status_series(&status).to_vec() }
            ChartBars { title: "Task Priority Levels", points: priority_series(&data.summary.priority).to_vec() }

            div {
                class: "md:col-span-2 card",
                div {
                    class: "flex items-center justify-between",
                    h5 { class: "text-lg", "Recent Tasks" }
                    button {
                        class: "card-btn flex items-center gap-2",
                        onclick: move |_| {
                            nav.push(see_all.clone());
                        },
                        "See All"
                        Icon { width: 12, height: 12, icon: FaArrowRight }
                    }
                }
                TaskTable { tasks: data.summary.recent_tasks.clone() }
            }
        }
    }
}
