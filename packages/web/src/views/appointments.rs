use api::{Appointment, AppointmentStatus};
use dioxus::prelude::*;
use ui::icons::{FaPen, FaTrash};
use ui::{
    expire_on_unauthorized, notify, use_api, use_auth, use_notices, ConfirmDialog, EmptyState,
    FormController, Icon, ListState, Modal, NoticeLevel, PendingConfirm, Spinner, StatusBadge,
    StatusDraft,
};

#[component]
pub fn Appointments() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut appointments = use_signal(ListState::<Appointment>::default);
    let mut form = use_signal(FormController::<StatusDraft<Appointment>>::new);
    let mut deleting = use_signal(PendingConfirm::<Appointment>::default);

    use_hook(move || {
        spawn(async move {
            let result = api.client().list_appointments().await;
            let outcome = appointments.write().loaded(result, "appointments");
            expire_on_unauthorized(session, &api, outcome);
        })
    });

    let save_status = move |evt: FormEvent| {
        evt.prevent_default();
        let result = form.write().submit();
        let Ok((id, status)) = result else {
            return;
        };
        spawn(async move {
            match api.client().set_appointment_status(&id, &status).await {
                Ok(()) => {
                    appointments.write().patch(&id, |a| a.status = status.clone());
                    form.write().save_succeeded();
                    notify(&mut notices, NoticeLevel::Success, "Appointment updated");
                }
                Err(e) => {
                    let message = e.user_message("Failed to update appointment");
                    form.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let confirmed = deleting.write().confirm();
        let Some(appointment) = confirmed else {
            return;
        };
        spawn(async move {
            let result = api.client().delete_appointment(&appointment.id).await;
            let outcome = appointments
                .write()
                .apply_removal(&appointment.id, result, "Failed to delete appointment");
            match outcome {
                Ok(()) => notify(&mut notices, NoticeLevel::Success, "Appointment deleted"),
                Err(message) => notify(&mut notices, NoticeLevel::Error, &message),
            }
        });
    };

    let body = {
        let list = appointments.read();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No appointments booked." } }
        } else {
            let rows = list.items().to_vec();
            rsx! {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Contact" }
                            th { "When" }
                            th { "Purpose" }
                            th { "Status" }
                            th { "" }
                        }
                    }
                    tbody {
                        for appointment in rows {
                            tr {
                                key: "{appointment.id}",
                                td { "{appointment.name}" }
                                td {
                                    div { "{appointment.email}" }
                                    div { class: "card-meta", {appointment.phone.clone().unwrap_or_default()} }
                                }
                                td { "{appointment.date} {appointment.time}" }
                                td { "{appointment.purpose}" }
                                td { StatusBadge { status: appointment.status.to_string() } }
                                td {
                                    div {
                                        class: "row-actions",
                                        button {
                                            class: "icon-button",
                                            title: "Change status",
                                            onclick: {
                                                let appointment = appointment.clone();
                                                move |_| form.write().open(Some(&appointment))
                                            },
                                            Icon { icon: FaPen, width: 14, height: 14 }
                                        }
                                        button {
                                            class: "icon-button danger",
                                            title: "Delete",
                                            onclick: {
                                                let appointment = appointment.clone();
                                                move |_| deleting.write().ask(appointment.clone())
                                            },
                                            Icon { icon: FaTrash, width: 14, height: 14 }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    let (draft, open, submitting, error) = {
        let f = form.read();
        (
            f.draft().clone(),
            f.is_open(),
            f.is_submitting(),
            f.error().map(str::to_string),
        )
    };
    let pending_name = deleting.read().pending().map(|a| a.name.clone());

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Appointments" }
                p { class: "page-subtitle", "Consultations booked through the website" }
            }
        }

        {body}

        if open {
            Modal {
                title: "Update Appointment",
                locked: submitting,
                on_close: move |_| form.write().close(),
                form {
                    class: "form-grid",
                    onsubmit: save_status,
                    if let Some(error) = error {
                        div { class: "form-error", "{error}" }
                    }
                    div {
                        label { class: "field-label", "Status" }
                        select {
                            class: "field-input",
                            value: "{draft.status}",
                            onchange: move |e| form.write().draft_mut().status = AppointmentStatus::from(e.value()),
                            for status in AppointmentStatus::ALL {
                                option { value: "{status}", "{status}" }
                            }
                        }
                    }
                    div {
                        class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary",
                            disabled: submitting,
                            if submitting { "Saving..." } else { "Update" }
                        }
                    }
                }
            }
        }

        if let Some(name) = pending_name {
            ConfirmDialog {
                message: "Delete the appointment with {name}?",
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.write().cancel(),
            }
        }
    }
}
