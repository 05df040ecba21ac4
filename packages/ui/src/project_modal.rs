use api::{NewProject, ProjectStatus, SearchCandidate};
use dioxus::prelude::*;

use crate::badge::StatusBadge;
use crate::drafts::ProjectDraft;
use crate::form::FormController;
use crate::icons::{FaPlus, FaTrash};
use crate::modal::Modal;
use crate::search::ClientSearch;
use crate::Icon;

/// The plain text fields of the project form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Text {
    ClientName,
    Email,
    Phone,
    ProjectName,
    Location,
    ProjectValue,
    AmountPaid,
    InitialPaymentDate,
    SecondDueDate,
    Thumbnail,
}

impl Text {
    fn slot(self, draft: &mut ProjectDraft) -> &mut String {
        match self {
            Text::ClientName => &mut draft.client_name,
            Text::Email => &mut draft.email,
            Text::Phone => &mut draft.phone,
            Text::ProjectName => &mut draft.project_name,
            Text::Location => &mut draft.location,
            Text::ProjectValue => &mut draft.project_value,
            Text::AmountPaid => &mut draft.amount_paid,
            Text::InitialPaymentDate => &mut draft.initial_payment_date,
            Text::SecondDueDate => &mut draft.second_due_date,
            Text::Thumbnail => &mut draft.thumbnail,
        }
    }
}

/// Text input bound to one `ProjectDraft` field.
#[component]
fn ProjectField(
    form: Signal<FormController<ProjectDraft>>,
    label: String,
    value: String,
    #[props(default = "text".to_string())] kind: String,
    field: Text,
) -> Element {
    let mut form = form;
    rsx! {
        div {
            label { class: "field-label", "{label}" }
            input {
                class: "field-input",
                r#type: "{kind}",
                value: "{value}",
                oninput: move |e| *field.slot(form.write().draft_mut()) = e.value(),
            }
        }
    }
}

/// Create a project for a client, with its initial modules.
#[component]
pub fn ProjectModal(
    form: Signal<FormController<ProjectDraft>>,
    on_submit: EventHandler<NewProject>,
) -> Element {
    let mut form = form;
    if !form.read().is_open() {
        return rsx! {};
    }

    let (draft, submitting, error) = {
        let f = form.read();
        (f.draft().clone(), f.is_submitting(), f.error().map(str::to_string))
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let result = form.write().submit();
        if let Ok(project) = result {
            on_submit.call(project);
        }
    };

    rsx! {
        Modal {
            title: "Create New Project",
            wide: true,
            locked: submitting,
            on_close: move |_| form.write().close(),
            form {
                class: "form-grid",
                onsubmit: submit,

                if let Some(error) = error {
                    div { class: "form-error", "{error}" }
                }

                ClientSearch {
                    on_select: move |client: SearchCandidate| {
                        form.write().draft_mut().select_client(&client);
                    },
                }

                div {
                    class: "form-row three",
                    ProjectField { form, label: "Client Name *", value: draft.client_name.clone(), field: Text::ClientName }
                    ProjectField { form, label: "Email", value: draft.email.clone(), kind: "email", field: Text::Email }
                    ProjectField { form, label: "Phone", value: draft.phone.clone(), field: Text::Phone }
                }

                div {
                    class: "form-row two",
                    ProjectField { form, label: "Project Name *", value: draft.project_name.clone(), field: Text::ProjectName }
                    ProjectField { form, label: "Location", value: draft.location.clone(), field: Text::Location }
                }

                div {
                    class: "form-row two",
                    ProjectField { form, label: "Project Value", value: draft.project_value.clone(), kind: "number", field: Text::ProjectValue }
                    ProjectField { form, label: "Amount Paid", value: draft.amount_paid.clone(), kind: "number", field: Text::AmountPaid }
                }

                div {
                    class: "form-row three",
                    ProjectField { form, label: "Initial Payment Date", value: draft.initial_payment_date.clone(), kind: "date", field: Text::InitialPaymentDate }
                    ProjectField { form, label: "Second Due Date", value: draft.second_due_date.clone(), kind: "date", field: Text::SecondDueDate }
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
                }

                ProjectField { form, label: "Thumbnail URL", value: draft.thumbnail.clone(), kind: "url", field: Text::Thumbnail }

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
                    class: "module-editor",
                    h4 { class: "section-title", "Project Modules" }

                    for module in draft.modules.iter().cloned() {
                        div {
                            key: "{module.id}",
                            class: "module-row",
                            div {
                                class: "module-row-text",
                                span { class: "module-name", "{module.name}" }
                                if !module.description.is_empty() {
                                    span { class: "module-description", "{module.description}" }
                                }
                            }
                            StatusBadge { status: module.status.to_string() }
                            span { class: "module-progress", "{module.progress}%" }
                            button {
                                r#type: "button",
                                class: "icon-button danger",
                                onclick: {
                                    let id = module.id.clone();
                                    move |_| form.write().draft_mut().remove_module(&id)
                                },
                                Icon { icon: FaTrash, width: 14, height: 14 }
                            }
                        }
                    }

                    div {
                        class: "module-add-row",
                        input {
                            class: "field-input",
                            placeholder: "Module name",
                            value: "{draft.new_module.name}",
                            oninput: move |e| form.write().draft_mut().new_module.name = e.value(),
                        }
                        input {
                            class: "field-input",
                            placeholder: "Description",
                            value: "{draft.new_module.description}",
                            oninput: move |e| form.write().draft_mut().new_module.description = e.value(),
                        }
                        select {
                            class: "field-input",
                            value: "{draft.new_module.status}",
                            onchange: move |e| form.write().draft_mut().new_module.status = ProjectStatus::from(e.value()),
                            for status in ProjectStatus::ALL {
                                option { value: "{status}", "{status}" }
                            }
                        }
                        input {
                            class: "field-input narrow",
                            r#type: "number",
                            min: "0",
                            max: "100",
                            value: "{draft.new_module.progress}",
                            oninput: move |e| {
                                let value = e.value().parse::<f64>().unwrap_or(0.0);
                                form.write().draft_mut().new_module.set_progress(value);
                            },
                        }
                        button {
                            r#type: "button",
                            class: "btn btn-outline",
                            onclick: move |_| {
                                form.write().draft_mut().add_module();
                            },
                            Icon { icon: FaPlus, width: 12, height: 12 }
                            " Add"
                        }
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-outline",
                        disabled: submitting,
                        onclick: move |_| form.write().close(),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: submitting,
                        if submitting { "Creating..." } else { "Create Project" }
                    }
                }
            }
        }
    }
}
