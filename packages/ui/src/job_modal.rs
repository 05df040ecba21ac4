use api::{JobPayload, JobStatus, JobType};
use dioxus::prelude::*;

use crate::drafts::JobDraft;
use crate::form::FormController;
use crate::icons::{FaPlus, FaTrash};
use crate::modal::Modal;
use crate::Icon;

/// Create or edit a job opening.
///
/// The page owns `form` and opens it with the job being edited (or `None`).
/// `on_submit` receives the validated payload; the page reports the outcome
/// back through `save_succeeded` / `save_failed`.
#[component]
pub fn JobModal(
    form: Signal<FormController<JobDraft>>,
    editing: bool,
    on_submit: EventHandler<JobPayload>,
) -> Element {
    let mut form = form;
    if !form.read().is_open() {
        return rsx! {};
    }

    let (draft, submitting, error) = {
        let f = form.read();
        (f.draft().clone(), f.is_submitting(), f.error().map(str::to_string))
    };
    let can_remove = draft.requirements.can_remove();
    let title = if editing {
        "Edit Job Opening"
    } else {
        "Create New Job Opening"
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let result = form.write().submit();
        if let Ok(payload) = result {
            on_submit.call(payload);
        }
    };

    rsx! {
        Modal {
            title: "{title}",
            wide: true,
            locked: submitting,
            on_close: move |_| form.write().close(),
            form {
                class: "form-grid",
                onsubmit: submit,

                if let Some(error) = error {
                    div { class: "form-error", "{error}" }
                }

                div {
                    class: "form-row two",
                    div {
                        label { class: "field-label", "Job Title *" }
                        input {
                            class: "field-input",
                            value: "{draft.title}",
                            oninput: move |e| form.write().draft_mut().title = e.value(),
                        }
                    }
                    div {
                        label { class: "field-label", "Department *" }
                        input {
                            class: "field-input",
                            value: "{draft.department}",
                            oninput: move |e| form.write().draft_mut().department = e.value(),
                        }
                    }
                }

                div {
                    class: "form-row three",
                    div {
                        label { class: "field-label", "Location *" }
                        input {
                            class: "field-input",
                            value: "{draft.location}",
                            oninput: move |e| form.write().draft_mut().location = e.value(),
                        }
                    }
                    div {
                        label { class: "field-label", "Type" }
                        select {
                            class: "field-input",
                            value: "{draft.job_type}",
                            onchange: move |e| form.write().draft_mut().job_type = JobType::from(e.value()),
                            for job_type in JobType::ALL {
                                option { value: "{job_type}", "{job_type}" }
                            }
                        }
                    }
                    div {
                        label { class: "field-label", "Status" }
                        select {
                            class: "field-input",
                            value: "{draft.status}",
                            onchange: move |e| form.write().draft_mut().status = JobStatus::from(e.value()),
                            for status in JobStatus::ALL {
                                option { value: "{status}", "{status}" }
                            }
                        }
                    }
                }

                div {
                    label { class: "field-label", "Description *" }
                    textarea {
                        class: "field-input",
                        rows: 4,
                        value: "{draft.description}",
                        oninput: move |e| form.write().draft_mut().description = e.value(),
                    }
                }

                div {
                    div {
                        class: "field-label-row",
                        label { class: "field-label", "Requirements" }
                        button {
                            r#type: "button",
                            class: "link-button",
                            onclick: move |_| form.write().draft_mut().requirements.push_blank(),
                            Icon { icon: FaPlus, width: 12, height: 12 }
                            " Add Requirement"
                        }
                    }
                    for (index, requirement) in draft.requirements.entries().iter().enumerate() {
                        div {
                            key: "{index}",
                            class: "repeatable-row",
                            input {
                                class: "field-input",
                                placeholder: format!("Requirement {}", index + 1),
                                value: "{requirement}",
                                oninput: move |e| form.write().draft_mut().requirements.set(index, e.value()),
                            }
                            button {
                                r#type: "button",
                                class: "icon-button danger",
                                disabled: !can_remove,
                                onclick: move |_| form.write().draft_mut().requirements.remove(index),
                                Icon { icon: FaTrash, width: 14, height: 14 }
                            }
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
                        if submitting {
                            "Saving..."
                        } else if editing {
                            "Update Job"
                        } else {
                            "Create Job"
                        }
                    }
                }
            }
        }
    }
}
