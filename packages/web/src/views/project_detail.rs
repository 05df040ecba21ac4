use api::{ModuleUpdate, Project, ProjectModule, ProjectStatus};
use dioxus::prelude::*;
use ui::icons::{FaArrowLeft, FaPen};
use ui::{
    expire_on_unauthorized, format_money, notify, use_api, use_auth, use_notices, EmptyState,
    FormController, Icon, Modal, ModuleUpdateDraft, NoticeLevel, Spinner, StatusBadge,
};

use crate::Route;

#[derive(Clone, Debug, PartialEq)]
enum Loaded {
    Loading,
    Found(Project),
    Missing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Timeline,
    Details,
}

#[component]
pub fn ProjectDetail(id: String) -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut project = use_signal(|| Loaded::Loading);
    let mut tab = use_signal(|| Tab::Timeline);
    let mut form = use_signal(FormController::<ModuleUpdateDraft>::new);
    let mut editing = use_signal(|| Option::<String>::None);

    use_effect(use_reactive((&id,), move |(id,)| {
        project.set(Loaded::Loading);
        spawn(async move {
            match api.client().get_project(&id).await {
                Ok(found) => project.set(Loaded::Found(found)),
                Err(e) => {
                    tracing::error!("Error fetching project {id}: {e}");
                    project.set(Loaded::Missing);
                    expire_on_unauthorized(session, &api, Err(e));
                }
            }
        });
    }));

    let mut edit_module = move |module: ProjectModule| {
        form.write().open(Some(&module));
        editing.set(Some(module.id));
    };

    let project_id = id.clone();
    let save_module = move |update: ModuleUpdate| {
        let Some(module_id) = editing() else {
            return;
        };
        let project_id = project_id.clone();
        spawn(async move {
            match api.client().update_module(&project_id, &module_id, &update).await {
                Ok(()) => {
                    if let Loaded::Found(p) = &mut *project.write() {
                        if let Some(m) = p.modules.iter_mut().find(|m| m.id == module_id) {
                            m.status = update.status.clone();
                            m.progress = f64::from(update.progress);
                            m.description = update.description.clone();
                        }
                    }
                    form.write().save_succeeded();
                    editing.set(None);
                    notify(&mut notices, NoticeLevel::Success, "Module updated");
                }
                Err(e) => {
                    let message = e.user_message("Failed to update module");
                    form.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let current = project();
    let p = match current {
        Loaded::Loading => return rsx! { Spinner {} },
        Loaded::Missing => {
            return rsx! {
                EmptyState { message: "Project not found" }
                Link { class: "btn btn-outline", to: Route::Projects {}, "Back to projects" }
            }
        }
        Loaded::Found(p) => p,
    };

    let (draft, submitting, error, open) = {
        let f = form.read();
        (
            f.draft().clone(),
            f.is_submitting(),
            f.error().map(str::to_string),
            f.is_open(),
        )
    };

    rsx! {
        div {
            class: "page-header",
            div {
                Link {
                    class: "link-button",
                    to: Route::Projects {},
                    Icon { icon: FaArrowLeft, width: 12, height: 12 }
                    " All projects"
                }
                h1 { class: "page-title", "{p.project_name}" }
                p { class: "page-subtitle", "{p.client_name} · {p.location}" }
            }
            StatusBadge { status: p.status.to_string() }
        }

        div {
            class: "stat-grid",
            div {
                class: "card",
                div { class: "stat-label", "Project Value" }
                div { class: "stat-value", {format_money(p.project_value)} }
            }
            div {
                class: "card",
                div { class: "stat-label", "Amount Paid" }
                div { class: "stat-value", {format_money(p.amount_paid)} }
            }
            div {
                class: "card",
                div { class: "stat-label", "Balance Due" }
                div { class: "stat-value", {format_money(p.balance_due())} }
            }
            div {
                class: "card",
                div { class: "stat-label", "Progress" }
                div { class: "stat-value", "{p.progress}%" }
                div {
                    class: "progress",
                    div {
                        class: if p.progress >= 75.0 { "progress-bar done" } else { "progress-bar" },
                        style: "width: {p.progress}%",
                    }
                }
            }
        }

        div {
            class: "tabs",
            button {
                class: if tab() == Tab::Timeline { "tab active" } else { "tab" },
                onclick: move |_| tab.set(Tab::Timeline),
                "Timeline"
            }
            button {
                class: if tab() == Tab::Details { "tab active" } else { "tab" },
                onclick: move |_| tab.set(Tab::Details),
                "Details"
            }
        }

        if tab() == Tab::Timeline {
            if p.modules.is_empty() {
                EmptyState { message: "This project has no modules yet." }
            }
            for module in p.modules.iter().cloned() {
                div {
                    key: "{module.id}",
                    class: "card module-row",
                    div {
                        class: "module-row-text",
                        span { class: "module-name", "{module.name}" }
                        span { class: "module-description", "{module.description}" }
                        if let Some(start) = &module.start_date {
                            span { class: "card-meta", "Started {start}" }
                        }
                    }
                    StatusBadge { status: module.status.to_string() }
                    span { class: "module-progress", "{module.progress}%" }
                    button {
                        class: "icon-button",
                        title: "Edit module",
                        onclick: {
                            let module = module.clone();
                            move |_| edit_module(module.clone())
                        },
                        Icon { icon: FaPen, width: 14, height: 14 }
                    }
                }
            }
        } else {
            dl {
                class: "card detail-list",
                dt { "Client" }
                dd { "{p.client_name}" }
                dt { "Email" }
                dd { "{p.email}" }
                dt { "Phone" }
                dd { "{p.phone}" }
                dt { "Initial payment" }
                dd { {p.initial_payment_date.clone().unwrap_or_else(|| "—".into())} }
                dt { "Second due date" }
                dd { {p.second_due_date.clone().unwrap_or_else(|| "—".into())} }
                dt { "Description" }
                dd { "{p.description}" }
            }
        }

        if open {
            Modal {
                title: "Update Module",
                locked: submitting,
                on_close: move |_| {
                    form.write().close();
                    editing.set(None);
                },
                form {
                    class: "form-grid",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        let result = form.write().submit();
                        if let Ok(update) = result {
                            save_module(update);
                        }
                    },
                    if let Some(error) = error {
                        div { class: "form-error", "{error}" }
                    }
                    div {
                        label { class: "field-label", "Status" }
                        select {
                            class: "field-input",
                            value: "{draft.status}",
                            onchange: move |e| form.write().draft_mut().status = ProjectStatus::from(e.value()),
                            for status in ProjectStatus::ALL {
                                option { value: "{status}", "{status}" }
                            }
                        }
                    }
                    div {
                        label { class: "field-label", "Progress: {draft.progress}%" }
                        input {
                            class: "field-input",
                            r#type: "range",
                            min: "0",
                            max: "100",
                            value: "{draft.progress}",
                            oninput: move |e| {
                                let value = e.value().parse::<f64>().unwrap_or(0.0);
                                form.write().draft_mut().set_progress(value);
                            },
                        }
                    }
                    div {
                        label { class: "field-label", "Description" }
                        textarea {
                            class: "field-input",
                            rows: 3,
                            value: "{draft.description}",
                            oninput: move |e| form.write().draft_mut().description = e.value(),
                        }
                    }
                    div {
                        class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: submitting,
                            if submitting { "Saving..." } else { "Save Changes" }
                        }
                    }
                }
            }
        }
    }
}
