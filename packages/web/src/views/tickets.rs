use api::{Ticket, TicketStatus};
use dioxus::prelude::*;
use ui::icons::{FaPen, FaTrash};
use ui::{
    expire_on_unauthorized, notify, use_api, use_auth, use_notices, ConfirmDialog, EmptyState,
    FormController, Icon, ListState, Modal, NoticeLevel, PendingConfirm, Spinner, StatusBadge,
    StatusDraft,
};

#[component]
pub fn Tickets() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut tickets = use_signal(ListState::<Ticket>::default);
    let mut query = use_signal(String::new);
    let mut form = use_signal(FormController::<StatusDraft<Ticket>>::new);
    let mut deleting = use_signal(PendingConfirm::<Ticket>::default);

    use_hook(move || {
        spawn(async move {
            let result = api.client().list_tickets().await;
            let outcome = tickets.write().loaded(result, "tickets");
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
            match api.client().set_ticket_status(&id, &status).await {
                Ok(()) => {
                    tickets.write().patch(&id, |t| t.status = status.clone());
                    form.write().save_succeeded();
                    notify(&mut notices, NoticeLevel::Success, "Ticket status updated");
                }
                Err(e) => {
                    let message = e.user_message("Failed to update ticket");
                    form.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let confirmed = deleting.write().confirm();
        let Some(ticket) = confirmed else {
            return;
        };
        spawn(async move {
            let result = api.client().delete_ticket(&ticket.id).await;
            let outcome = tickets
                .write()
                .apply_removal(&ticket.id, result, "Failed to delete ticket");
            match outcome {
                Ok(()) => notify(&mut notices, NoticeLevel::Success, "Ticket deleted"),
                Err(message) => notify(&mut notices, NoticeLevel::Error, &message),
            }
        });
    };

    let body = {
        let list = tickets.read();
        let q = query();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No support tickets." } }
        } else {
            let rows = list.filtered(|t| t.matches(&q));
            rsx! {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Subject" }
                            th { "Client" }
                            th { "Priority" }
                            th { "Status" }
                            th { "Opened" }
                            th { "" }
                        }
                    }
                    tbody {
                        for ticket in rows {
                            tr {
                                key: "{ticket.id}",
                                td {
                                    div { class: "module-name", "{ticket.subject}" }
                                    div { class: "card-meta", "{ticket.description}" }
                                }
                                td {
                                    div { "{ticket.name}" }
                                    div { class: "card-meta", "{ticket.email}" }
                                }
                                td { StatusBadge { status: ticket.priority.to_string() } }
                                td { StatusBadge { status: ticket.status.to_string() } }
                                td { {ticket.created_at.clone().unwrap_or_default()} }
                                td {
                                    div {
                                        class: "row-actions",
                                        button {
                                            class: "icon-button",
                                            title: "Change status",
                                            onclick: {
                                                let ticket = ticket.clone();
                                                move |_| form.write().open(Some(&ticket))
                                            },
                                            Icon { icon: FaPen, width: 14, height: 14 }
                                        }
                                        button {
                                            class: "icon-button danger",
                                            title: "Delete",
                                            onclick: {
                                                let ticket = ticket.clone();
                                                move |_| deleting.write().ask(ticket.clone())
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
    let pending_subject = deleting.read().pending().map(|t| t.subject.clone());

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Support Tickets" }
                p { class: "page-subtitle", "Requests raised by clients" }
            }
            input {
                class: "field-input narrow",
                r#type: "search",
                placeholder: "Search tickets",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
            }
        }

        {body}

        if open {
            Modal {
                title: "Update Ticket Status",
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
                            onchange: move |e| form.write().draft_mut().status = TicketStatus::from(e.value()),
                            for status in TicketStatus::ALL {
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

        if let Some(subject) = pending_subject {
            ConfirmDialog {
                message: "Delete the ticket \"{subject}\"?",
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.write().cancel(),
            }
        }
    }
}
