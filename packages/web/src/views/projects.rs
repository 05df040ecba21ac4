use api::{NewProject, Project};
use dioxus::prelude::*;
use ui::icons::{FaEye, FaPlus};
use ui::{
    expire_on_unauthorized, format_money, notify, use_api, use_auth, use_notices, EmptyState,
    FormController, Icon, ListState, NoticeLevel, ProjectDraft, ProjectModal, Spinner, StatusBadge,
};

use crate::Route;

#[component]
pub fn Projects() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let nav = use_navigator();
    let mut projects = use_signal(ListState::<Project>::default);
    let mut form = use_signal(FormController::<ProjectDraft>::new);

    let reload = move || {
        spawn(async move {
            let result = api.client().list_projects().await;
            let outcome = projects.write().loaded(result, "projects");
            expire_on_unauthorized(session, &api, outcome);
        });
    };

    use_hook(move || reload());

    let create = move |project: NewProject| {
        spawn(async move {
            match api.client().create_project(&project).await {
                Ok(()) => {
                    form.write().save_succeeded();
                    notify(&mut notices, NoticeLevel::Success, "Project created");
                    reload();
                }
                Err(e) => {
                    let message = e.user_message("Failed to create project");
                    form.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let body = {
        let list = projects.read();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No projects yet. Create the first one." } }
        } else {
            let items = list.items().to_vec();
            rsx! {
                div {
                    class: "card-grid",
                    for project in items {
                        div {
                            key: "{project.id}",
                            class: "card",
                            div {
                                class: "page-header",
                                div {
                                    h3 { class: "card-title", "{project.project_name}" }
                                    div { class: "card-meta", "{project.client_name}" }
                                }
                                StatusBadge { status: project.status.to_string() }
                            }
                            div {
                                class: "card-meta",
                                {format!(
                                    "Value {} · Paid {}",
                                    format_money(project.project_value),
                                    format_money(project.amount_paid)
                                )}
                            }
                            div {
                                class: "progress",
                                div {
                                    class: if project.progress >= 75.0 { "progress-bar done" } else { "progress-bar" },
                                    style: "width: {project.progress}%",
                                }
                            }
                            div {
                                class: "card-meta",
                                {format!("{} modules · {}% complete", project.modules.len(), project.progress)}
                            }
                            div {
                                class: "card-actions",
                                button {
                                    class: "btn btn-outline btn-small",
                                    onclick: {
                                        let id = project.id.clone();
                                        move |_| {
                                            nav.push(Route::ProjectDetail { id: id.clone() });
                                        }
                                    },
                                    Icon { icon: FaEye, width: 12, height: 12 }
                                    "View"
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Projects" }
                p { class: "page-subtitle", "Manage all client projects" }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| form.write().open(None),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "New Project"
            }
        }

        {body}

        ProjectModal { form, on_submit: create }
    }
}
