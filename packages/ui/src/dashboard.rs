//! Dashboard and task-list widgets.
//!
//! All of these render already coerced records from [`api::dashboard`]; none
//! of them fetch.

use api::dashboard::{short_date, thousands, ChartPoint, StatusTab, TaskCardMeta};
use api::{ApiError, StatusFilter, Task, TaskStatus};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaPaperclip;
use dioxus_free_icons::Icon;

fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "text-violet-500 bg-violet-50 border-violet-500/20",
        TaskStatus::InProgress => "text-cyan-500 bg-cyan-50 border-cyan-500/20",
        TaskStatus::Completed => "text-lime-500 bg-lime-50 border-lime-500/20",
    }
}

/// A labelled headline number.
#[component]
pub fn InfoCard(label: String, value: u64, color: String) -> Element {
    rsx! {
        div {
            class: "flex items-center gap-3",
            div { class: "w-2 h-5 rounded-full {color}" }
            p {
                class: "text-xs md:text-sm text-neutral-500",
                span { class: "text-sm md:text-base font-semibold text-black", "{thousands(value)} " }
                "{label}"
            }
        }
    }
}

/// Horizontal bars, one per point, scaled to the largest count.
#[component]
pub fn ChartBars(title: String, points: Vec<ChartPoint>) -> Element {
    let max = points.iter().map(|p| p.count).max().unwrap_or(0);
    rsx! {
        div {
            class: "card",
            h5 { class: "font-medium mb-4", "{title}" }
            for point in points {
                div {
                    key: "{point.label}",
                    class: "flex items-center gap-3 mb-2",
                    span { class: "w-24 text-xs text-neutral-600", "{point.label}" }
                    div {
                        class: "h-3 rounded bg-primary",
                        style: "width: {point.percent_of(max)}%",
                    }
                    span { class: "text-xs", "{point.count}" }
                }
            }
        }
    }
}

/// Recent tasks as a table.
#[component]
pub fn TaskTable(tasks: Vec<Task>) -> Element {
    rsx! {
        table {
            class: "min-w-full",
            thead {
                tr {
                    th { "Name" }
                    th { "Status" }
                    th { "Priority" }
                    th { "Created On" }
                }
            }
            tbody {
                for task in tasks {
                    tr {
                        key: "{task.id}",
                        td { class: "line-clamp-1", "{task.title}" }
                        td {
                            span {
                                class: "px-2 py-1 text-xs rounded inline-block {status_class(task.status)}",
                                "{task.status}"
                            }
                        }
                        td { "{task.priority}" }
                        td { "{short_date(task.created_at)}" }
                    }
                }
            }
        }
    }
}

/// Filter tabs with counts.
#[component]
pub fn StatusTabs(
    tabs: Vec<StatusTab>,
    active: StatusFilter,
    on_select: EventHandler<StatusFilter>,
) -> Element {
    rsx! {
        div {
            class: "flex gap-2",
            for tab in tabs {
                button {
                    key: "{tab.label()}",
                    class: if tab.filter == active { "tab tab-active" } else { "tab" },
                    onclick: move |_| on_select.call(tab.filter),
                    "{tab.label()} "
                    span { class: "text-xs rounded-full px-2", "{tab.count}" }
                }
            }
        }
    }
}

/// One task as a card: status, priority, progress, dates, checklist and
/// attachment counts, and assignee avatars.
#[component]
pub fn TaskCard(task: Task, on_open: Option<EventHandler<String>>) -> Element {
    let meta = TaskCardMeta::of(&task);
    let id = task.id.clone();

    rsx! {
        div {
            class: "card cursor-pointer",
            onclick: move |_| {
                if let Some(handler) = &on_open {
                    handler.call(id.clone());
                }
            },
            div {
                class: "flex gap-3",
                span { class: "text-[11px] font-medium px-4 py-0.5 rounded {status_class(task.status)}", "{task.status}" }
                span { class: "text-[11px] font-medium px-4 py-0.5 rounded", "{task.priority} Priority" }
            }
            p { class: "text-sm font-medium mt-4 line-clamp-2", "{task.title}" }
            p { class: "text-xs text-neutral-500 mt-1.5 line-clamp-2", "{task.description}" }
            p {
                class: "text-[13px] text-neutral-700 mt-2",
                "Task Done: "
                span { class: "font-semibold", "{meta.completed_todos} / {meta.total_todos}" }
            }
            div {
                class: "w-full bg-gray-200 rounded-full h-1.5",
                div {
                    class: "h-1.5 rounded-full bg-primary",
                    style: "width: {task.progress.min(100)}%",
                }
            }
            div {
                class: "flex justify-between mt-3 text-[13px]",
                div {
                    label { class: "text-xs text-neutral-500", "Start Date" }
                    p { "{short_date(task.created_at)}" }
                }
                div {
                    label { class: "text-xs text-neutral-500", "Due Date" }
                    p { "{short_date(task.due_date)}" }
                }
            }
            div {
                class: "flex items-center justify-between mt-3",
                div {
                    class: "flex -space-x-2",
                    for (i, avatar) in meta.avatars.iter().enumerate() {
                        img { key: "{i}", class: "w-7 h-7 rounded-full", src: "{avatar}" }
                    }
                }
                if meta.attachments > 0 {
                    div {
                        class: "flex items-center gap-2 bg-blue-50 px-2.5 py-1.5 rounded-lg",
                        Icon { width: 12, height: 12, icon: FaPaperclip }
                        span { class: "text-xs", "{meta.attachments}" }
                    }
                }
            }
        }
    }
}

/// Inline notice for a failed fetch.
///
/// Errors that ended the session, and responses dropped because the session
/// changed, render nothing: the redirect to login takes over.
#[component]
pub fn ErrorNotice(error: ApiError) -> Element {
    if error.ends_session() || error == ApiError::SessionChanged {
        return rsx! {};
    }
    rsx! {
        div {
            class: "px-2.5 py-2.5 my-4 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
            "{error}"
        }
    }
}
