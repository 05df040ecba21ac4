use api::{AdminUser, SearchCandidate};
use dioxus::prelude::*;
use ui::icons::{FaBan, FaFileArrowUp, FaLockOpen, FaTrash};
use ui::{
    expire_on_unauthorized, notify, use_api, use_auth, use_notices, ConfirmDialog, EmptyState,
    FormController, Icon, InvoiceUpload, InvoiceUploadDraft, InvoiceUploadModal, ListState,
    NoticeLevel, PendingConfirm, Spinner, StatusBadge,
};

fn as_candidate(user: &AdminUser) -> SearchCandidate {
    SearchCandidate {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
    }
}

#[component]
pub fn Users() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut users = use_signal(ListState::<AdminUser>::default);
    let mut query = use_signal(String::new);
    let mut deleting = use_signal(PendingConfirm::<AdminUser>::default);
    let mut upload = use_signal(FormController::<InvoiceUploadDraft>::new);

    use_hook(move || {
        spawn(async move {
            let result = api.client().list_users().await;
            let outcome = users.write().loaded(result, "users");
            expire_on_unauthorized(session, &api, outcome);
        })
    });

    let toggle_block = move |user: AdminUser| {
        let blocked = !user.blocked;
        spawn(async move {
            match api.client().set_user_blocked(&user.id, blocked).await {
                Ok(()) => {
                    users.write().patch(&user.id, |u| u.blocked = blocked);
                    let verb = if blocked { "blocked" } else { "unblocked" };
                    notify(&mut notices, NoticeLevel::Success, &format!("User {verb}"));
                }
                Err(e) => notify(
                    &mut notices,
                    NoticeLevel::Error,
                    &e.user_message("Failed to update user"),
                ),
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let confirmed = deleting.write().confirm();
        let Some(user) = confirmed else {
            return;
        };
        spawn(async move {
            let result = api.client().delete_user(&user.id).await;
            let outcome = users.write().apply_removal(&user.id, result, "Failed to delete user");
            match outcome {
                Ok(()) => notify(&mut notices, NoticeLevel::Success, "User deleted"),
                Err(message) => notify(&mut notices, NoticeLevel::Error, &message),
            }
        });
    };

    let send_invoice = move |InvoiceUpload { client_id, file, meta }: InvoiceUpload| {
        spawn(async move {
            match api
                .client()
                .upload_invoice(client_id.as_deref(), file, &meta)
                .await
            {
                Ok(()) => {
                    upload.write().save_succeeded();
                    notify(&mut notices, NoticeLevel::Success, "Invoice uploaded");
                }
                Err(e) => {
                    let message = e.user_message("Failed to upload invoice");
                    upload.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let body = {
        let list = users.read();
        let q = query();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No users registered yet." } }
        } else {
            let rows = list.filtered(|u| u.matches(&q));
            rsx! {
                if rows.is_empty() {
                    EmptyState { message: "No users match \"{q}\"." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Phone" }
                                th { "Status" }
                                th { "Joined" }
                                th { "" }
                            }
                        }
                        tbody {
                            for user in rows {
                                tr {
                                    key: "{user.id}",
                                    td { "{user.name}" }
                                    td { "{user.email}" }
                                    td { {user.phone.clone().unwrap_or_default()} }
                                    td {
                                        StatusBadge {
                                            status: if user.blocked { "Blocked".to_string() } else { "Active".to_string() },
                                        }
                                    }
                                    td { {user.created_at.clone().unwrap_or_default()} }
                                    td {
                                        div {
                                            class: "row-actions",
                                            button {
                                                class: "icon-button",
                                                title: "Upload invoice",
                                                onclick: {
                                                    let client = as_candidate(&user);
                                                    move |_| upload.write().open(Some(&client))
                                                },
                                                Icon { icon: FaFileArrowUp, width: 14, height: 14 }
                                            }
                                            button {
                                                class: "icon-button",
                                                title: if user.blocked { "Unblock" } else { "Block" },
                                                onclick: {
                                                    let user = user.clone();
                                                    move |_| toggle_block(user.clone())
                                                },
                                                if user.blocked {
                                                    Icon { icon: FaLockOpen, width: 14, height: 14 }
                                                } else {
                                                    Icon { icon: FaBan, width: 14, height: 14 }
                                                }
                                            }
                                            button {
                                                class: "icon-button danger",
                                                title: "Delete",
                                                onclick: {
                                                    let user = user.clone();
                                                    move |_| deleting.write().ask(user.clone())
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
        }
    };

    let pending_name = deleting.read().pending().map(|u| u.name.clone());

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Users" }
                p { class: "page-subtitle", {format!("{} registered clients", users.read().len())} }
            }
            input {
                class: "field-input narrow",
                r#type: "search",
                placeholder: "Search by name, email or phone",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
            }
        }

        {body}

        if let Some(name) = pending_name {
            ConfirmDialog {
                message: "Delete {name}? This cannot be undone.",
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.write().cancel(),
            }
        }

        InvoiceUploadModal { form: upload, on_submit: send_invoice }
    }
}
