//! Read-only view of a single task.

use api::dashboard::short_date;
use api::{Role, Task};
use dioxus::prelude::*;
use ui::{use_client, use_view_scope, ErrorNotice, RoleGate};

#[component]
pub fn TaskDetails(id: String) -> Element {
    rsx! {
        RoleGate { role: Role::User, TaskDetailsBody { id } }
    }
}

#[component]
fn TaskDetailsBody(id: String) -> Element {
    let client = use_client();
    let scope = use_view_scope();
    let task = use_resource(use_reactive!(|(id,)| {
        let client = client.clone();
        let load = scope.run(async move { client.task(&id).await });
        async move { load.await }
    }));

    rsx! {
        {match &*task.read_unchecked() {
            None => rsx! { p { class: "text-neutral-500", "Loading..." } },
            Some(None) => rsx! {},
            Some(Some(Ok(task))) => rsx! { TaskSheet { task: task.clone() } },
            Some(Some(Err(error))) => rsx! { ErrorNotice { error: error.clone() } },
        }}
    }
}

#[component]
fn TaskSheet(task: Task) -> Element {
    rsx! {
        div {
            class: "card mt-4",
            div {
                class: "flex items-center justify-between",
                h2 { class: "text-xl font-medium", "{task.title}" }
                span { class: "text-[13px] font-medium px-4 py-0.5 rounded", "{task.status}" }
            }

            div {
                class: "mt-4",
                label { class: "text-xs text-slate-500", "Description" }
                p { class: "text-[13px] text-gray-700 mt-0.5", "{task.description}" }
            }

            div {
                class: "grid grid-cols-3 gap-4 mt-4",
                div {
                    label { class: "text-xs text-slate-500", "Priority" }
                    p { "{task.priority}" }
                }
                div {
                    label { class: "text-xs text-slate-500", "Due Date" }
                    p { "{short_date(task.due_date)}" }
                }
                div {
                    label { class: "text-xs text-slate-500", "Progress" }
                    p { "{task.progress}%" }
                }
            }

            if !task.assigned_to.is_empty() {
                div {
                    class: "mt-4",
                    label { class: "text-xs text-slate-500", "Assigned To" }
                    div {
                        class: "flex -space-x-2 mt-1",
                        for (i, assignee) in task.assigned_to.iter().enumerate() {
                            if let Some(avatar) = assignee.avatar() {
                                img { key: "{i}", class: "w-8 h-8 rounded-full", src: "{avatar}" }
                            }
                        }
                    }
                }
            }

            if !task.todo_checklist.is_empty() {
                div {
                    class: "mt-4",
                    label { class: "text-xs text-slate-500", "Todo Checklist" }
                    for (i, item) in task.todo_checklist.iter().enumerate() {
                        div {
                            key: "{i}",
                            class: "flex items-center gap-3 p-3",
                            input { r#type: "checkbox", checked: item.completed, disabled: true }
                            p { class: "text-[13px] text-gray-800", "{item.text}" }
                        }
                    }
                }
            }

            if !task.attachments.is_empty() {
                div {
                    class: "mt-4",
                    label { class: "text-xs text-slate-500", "Attachments" }
                    for (i, link) in task.attachments.iter().enumerate() {
                        a {
                            key: "{i}",
                            class: "block text-[13px] text-primary-500",
                            href: "{link}",
                            target: "_blank",
                            "{link}"
                        }
                    }
                }
            }
        }
    }
}
