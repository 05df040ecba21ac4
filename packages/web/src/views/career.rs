use api::{ApplicationStatus, Job, JobApplication, JobPayload};
use dioxus::prelude::*;
use ui::icons::{FaFilePdf, FaPen, FaPlus, FaTrash};
use ui::{
    expire_on_unauthorized, notify, use_api, use_auth, use_notices, ConfirmDialog, EmptyState,
    FormController, Icon, JobDraft, JobModal, ListState, NoticeLevel, PendingConfirm, Spinner,
    StatusBadge,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Jobs,
    Applications,
}

#[component]
pub fn Career() -> Element {
    let mut tab = use_signal(|| Tab::Jobs);

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Career" }
                p { class: "page-subtitle", "Job openings and the applications they received" }
            }
        }

        div {
            class: "tabs",
            button {
                class: if tab() == Tab::Jobs { "tab active" } else { "tab" },
                onclick: move |_| tab.set(Tab::Jobs),
                "Job Openings"
            }
            button {
                class: if tab() == Tab::Applications { "tab active" } else { "tab" },
                onclick: move |_| tab.set(Tab::Applications),
                "Applications"
            }
        }

        if tab() == Tab::Jobs {
            JobsPanel {}
        } else {
            ApplicationsPanel {}
        }
    }
}

#[component]
fn JobsPanel() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut jobs = use_signal(ListState::<Job>::default);
    let mut form = use_signal(FormController::<JobDraft>::new);
    let mut editing = use_signal(|| Option::<String>::None);
    let mut deleting = use_signal(PendingConfirm::<Job>::default);

    let reload = move || {
        spawn(async move {
            let result = api.client().list_jobs().await;
            let outcome = jobs.write().loaded(result, "jobs");
            expire_on_unauthorized(session, &api, outcome);
        });
    };

    use_hook(move || reload());

    // One handler for both create and edit; `editing` decides the route.
    let save = move |payload: JobPayload| {
        let id = editing();
        spawn(async move {
            let client = api.client();
            let (result, done, fallback) = match &id {
                Some(id) => (
                    client.update_job(id, &payload).await,
                    "Job updated",
                    "Failed to update job",
                ),
                None => (
                    client.create_job(&payload).await,
                    "Job created",
                    "Failed to create job",
                ),
            };
            match result {
                Ok(()) => {
                    form.write().save_succeeded();
                    editing.set(None);
                    notify(&mut notices, NoticeLevel::Success, done);
                    reload();
                }
                Err(e) => {
                    let message = e.user_message(fallback);
                    form.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let confirmed = deleting.write().confirm();
        let Some(job) = confirmed else {
            return;
        };
        spawn(async move {
            let result = api.client().delete_job(&job.id).await;
            let outcome = jobs.write().apply_removal(&job.id, result, "Failed to delete job");
            match outcome {
                Ok(()) => notify(&mut notices, NoticeLevel::Success, "Job deleted"),
                Err(message) => notify(&mut notices, NoticeLevel::Error, &message),
            }
        });
    };

    let body = {
        let list = jobs.read();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No job openings. Post the first one." } }
        } else {
            let rows = list.items().to_vec();
            rsx! {
                div {
                    class: "card-grid",
                    for job in rows {
                        div {
                            key: "{job.id}",
                            class: "card",
                            div {
                                class: "page-header",
                                div {
                                    h3 { class: "card-title", "{job.title}" }
                                    div { class: "card-meta", "{job.department} · {job.location} · {job.job_type}" }
                                }
                                StatusBadge { status: job.status.to_string() }
                            }
                            p { class: "card-meta", "{job.description}" }
                            if !job.requirements.is_empty() {
                                ul {
                                    for requirement in job.requirements.iter() {
                                        li { class: "card-meta", "{requirement}" }
                                    }
                                }
                            }
                            div {
                                class: "card-actions",
                                button {
                                    class: "btn btn-outline btn-small",
                                    onclick: {
                                        let job = job.clone();
                                        move |_| {
                                            form.write().open(Some(&job));
                                            editing.set(Some(job.id.clone()));
                                        }
                                    },
                                    Icon { icon: FaPen, width: 12, height: 12 }
                                    "Edit"
                                }
                                button {
                                    class: "btn btn-danger btn-small",
                                    onclick: {
                                        let job = job.clone();
                                        move |_| deleting.write().ask(job.clone())
                                    },
                                    Icon { icon: FaTrash, width: 12, height: 12 }
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    let pending_title = deleting.read().pending().map(|j| j.title.clone());

    rsx! {
        div {
            class: "toolbar",
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    editing.set(None);
                    form.write().open(None);
                },
                Icon { icon: FaPlus, width: 14, height: 14 }
                "New Job"
            }
        }

        {body}

        JobModal { form, editing: editing().is_some(), on_submit: save }

        if let Some(title) = pending_title {
            ConfirmDialog {
                message: "Delete the \"{title}\" opening?",
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.write().cancel(),
            }
        }
    }
}

#[component]
fn ApplicationsPanel() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut applications = use_signal(ListState::<JobApplication>::default);

    use_hook(move || {
        spawn(async move {
            let result = api.client().list_applications().await;
            let outcome = applications.write().loaded(result, "applications");
            expire_on_unauthorized(session, &api, outcome);
        })
    });

    let set_status = move |id: String, status: ApplicationStatus| {
        spawn(async move {
            match api.client().set_application_status(&id, &status).await {
                Ok(()) => {
                    applications.write().patch(&id, |a| a.status = status.clone());
                    notify(&mut notices, NoticeLevel::Success, "Application updated");
                }
                Err(e) => notify(
                    &mut notices,
                    NoticeLevel::Error,
                    &e.user_message("Failed to update application"),
                ),
            }
        });
    };

    let list = applications.read();
    if list.is_loading() {
        return rsx! { Spinner {} };
    }
    if list.is_empty() {
        return rsx! { EmptyState { message: "No applications received yet." } };
    }
    let rows = list.items().to_vec();
    drop(list);

    rsx! {
        table {
            class: "data-table",
            thead {
                tr {
                    th { "Candidate" }
                    th { "Position" }
                    th { "Experience" }
                    th { "Applied" }
                    th { "Status" }
                    th { "" }
                }
            }
            tbody {
                for application in rows {
                    tr {
                        key: "{application.id}",
                        td {
                            div { "{application.name}" }
                            div { class: "card-meta", "{application.email}" }
                        }
                        td { "{application.position}" }
                        td { {application.experience.clone().unwrap_or_default()} }
                        td { {application.created_at.clone().unwrap_or_default()} }
                        td {
                            select {
                                class: "field-input",
                                value: "{application.status}",
                                onchange: {
                                    let id = application.id.clone();
                                    move |e: Event<FormData>| set_status(id.clone(), ApplicationStatus::from(e.value()))
                                },
                                for status in ApplicationStatus::ALL {
                                    option { value: "{status}", "{status}" }
                                }
                            }
                        }
                        td {
                            if let Some(url) = &application.resume_url {
                                a {
                                    class: "icon-button",
                                    href: "{url}",
                                    target: "_blank",
                                    rel: "noopener",
                                    title: "Open resume",
                                    Icon { icon: FaFilePdf, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
