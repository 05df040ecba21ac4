use api::{InvoiceStatus, SearchCandidate};
use dioxus::prelude::*;

use crate::drafts::{invoice_file, InvoiceUpload, InvoiceUploadDraft};
use crate::form::FormController;
use crate::icons::FaCloudArrowUp;
use crate::modal::Modal;
use crate::search::ClientSearch;
use crate::Icon;

/// Upload an invoice document (PDF, JPEG or PNG) for a client.
#[component]
pub fn InvoiceUploadModal(
    form: Signal<FormController<InvoiceUploadDraft>>,
    on_submit: EventHandler<InvoiceUpload>,
) -> Element {
    let mut form = form;
    let mut file_error = use_signal(|| Option::<String>::None);

    if !form.read().is_open() {
        return rsx! {};
    }

    let (draft, submitting, error) = {
        let f = form.read();
        (f.draft().clone(), f.is_submitting(), f.error().map(str::to_string))
    };
    let error = file_error().or(error);

    let pick_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        let Some(bytes) = engine.read_file(&name).await else {
            tracing::warn!("Could not read {name}");
            return;
        };
        match invoice_file(&name, bytes) {
            Ok(file) => {
                file_error.set(None);
                form.write().draft_mut().file = Some(file);
            }
            // An unsupported file leaves any previous pick in place.
            Err(e) => file_error.set(Some(e.to_string())),
        }
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        file_error.set(None);
        let result = form.write().submit();
        if let Ok(upload) = result {
            on_submit.call(upload);
        }
    };

    let mut close = move || {
        file_error.set(None);
        form.write().close();
    };

    rsx! {
        Modal {
            title: "Upload Invoice",
            locked: submitting,
            on_close: move |_| close(),
            form {
                class: "form-grid",
                onsubmit: submit,

                if let Some(error) = error {
                    div { class: "form-error", "{error}" }
                }

                ClientSearch {
                    label: "Client",
                    placeholder: "Search and select client...",
                    on_select: move |client: SearchCandidate| {
                        form.write().draft_mut().select_client(&client);
                    },
                }

                div {
                    label { class: "field-label", "Name" }
                    input {
                        class: "field-input",
                        placeholder: "Client name",
                        value: "{draft.name}",
                        oninput: move |e| form.write().draft_mut().name = e.value(),
                    }
                }
                div {
                    class: "form-row two",
                    div {
                        label { class: "field-label", "Email" }
                        input {
                            class: "field-input",
                            r#type: "email",
                            value: "{draft.email}",
                            oninput: move |e| form.write().draft_mut().email = e.value(),
                        }
                    }
                    div {
                        label { class: "field-label", "Phone" }
                        input {
                            class: "field-input",
                            r#type: "tel",
                            value: "{draft.phone}",
                            oninput: move |e| form.write().draft_mut().phone = e.value(),
                        }
                    }
                }

                div {
                    class: "form-row two",
                    div {
                        label { class: "field-label", "Amount" }
                        input {
                            class: "field-input",
                            r#type: "number",
                            value: "{draft.amount}",
                            oninput: move |e| form.write().draft_mut().amount = e.value(),
                        }
                    }
                    div {
                        label { class: "field-label", "Status" }
                        select {
                            class: "field-input",
                            value: "{draft.status}",
                            onchange: move |e| form.write().draft_mut().status = InvoiceStatus::from(e.value()),
                            for status in InvoiceStatus::ALL {
                                option { value: "{status}", "{status}" }
                            }
                        }
                    }
                }

                div {
                    class: "form-row two",
                    div {
                        label { class: "field-label", "Due Date" }
                        input {
                            class: "field-input",
                            r#type: "date",
                            value: "{draft.due_date}",
                            oninput: move |e| form.write().draft_mut().due_date = e.value(),
                        }
                    }
                    div {
                        label { class: "field-label", "Project" }
                        input {
                            class: "field-input",
                            value: "{draft.project}",
                            oninput: move |e| form.write().draft_mut().project = e.value(),
                        }
                    }
                }

                label {
                    class: "file-drop",
                    Icon { icon: FaCloudArrowUp, width: 28, height: 28 }
                    if let Some(name) = draft.file_name() {
                        span { class: "file-name", "{name}" }
                    } else {
                        span { "Click to choose a PDF or image" }
                    }
                    input {
                        class: "file-input",
                        r#type: "file",
                        accept: ".pdf,.jpg,.jpeg,.png",
                        onchange: pick_file,
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-outline",
                        disabled: submitting,
                        onclick: move |_| close(),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: submitting,
                        if submitting { "Uploading..." } else { "Upload Invoice" }
                    }
                }
            }
        }
    }
}
