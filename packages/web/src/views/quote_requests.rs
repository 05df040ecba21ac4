//! Quote requests from the public price calculator.
//!
//! Status changes are one click per row; the detail modal shows the stored
//! calculator breakdown. The search box filters on client and project type.

use api::{QuoteRequest, QuoteStatus};
use dioxus::prelude::*;
use ui::icons::{FaEye, FaTrash};
use ui::{
    expire_on_unauthorized, format_money, notify, use_api, use_auth, use_notices, ConfirmDialog,
    EmptyState, Icon, ListState, Modal, NoticeLevel, PendingConfirm, Spinner, StatusBadge,
};

#[component]
pub fn QuoteRequests() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut requests = use_signal(ListState::<QuoteRequest>::default);
    let mut query = use_signal(String::new);
    let mut viewing = use_signal(|| Option::<QuoteRequest>::None);
    let mut deleting = use_signal(PendingConfirm::<QuoteRequest>::default);

    use_hook(move || {
        spawn(async move {
            let result = api.client().list_quote_requests().await;
            let outcome = requests.write().loaded(result, "quote requests");
            expire_on_unauthorized(session, &api, outcome);
        })
    });

    let set_status = move |id: String, status: QuoteStatus| {
        spawn(async move {
            match api.client().set_quote_status(&id, &status).await {
                Ok(()) => {
                    requests.write().patch(&id, |r| r.status = status.clone());
                    if let Some(open) = viewing.write().as_mut().filter(|r| r.id == id) {
                        open.status = status.clone();
                    }
                    notify(
                        &mut notices,
                        NoticeLevel::Success,
                        &format!("Quote marked {status}"),
                    );
                }
                Err(e) => notify(
                    &mut notices,
                    NoticeLevel::Error,
                    &e.user_message("Failed to update quote request"),
                ),
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let confirmed = deleting.write().confirm();
        let Some(request) = confirmed else {
            return;
        };
        spawn(async move {
            let result = api.client().delete_quote_request(&request.id).await;
            let outcome = requests
                .write()
                .apply_removal(&request.id, result, "Failed to delete quote request");
            match outcome {
                Ok(()) => notify(&mut notices, NoticeLevel::Success, "Quote request deleted"),
                Err(message) => notify(&mut notices, NoticeLevel::Error, &message),
            }
        });
    };

    let body = {
        let list = requests.read();
        let q = query();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No quote requests yet." } }
        } else {
            let rows = list.filtered(|r| r.matches(&q));
            rsx! {
                if rows.is_empty() {
                    EmptyState { message: "No quote requests match \"{q}\"." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Client" }
                                th { "Project Type" }
                                th { "Quote" }
                                th { "Status" }
                                th { "" }
                            }
                        }
                        tbody {
                            for request in rows {
                                tr {
                                    key: "{request.id}",
                                    td {
                                        div { "{request.client_name}" }
                                        div { class: "card-meta", "{request.client_email}" }
                                    }
                                    td { "{request.project_type}" }
                                    td { {format_money(request.total_price())} }
                                    td {
                                        select {
                                            class: "field-input",
                                            value: "{request.status}",
                                            onchange: {
                                                let id = request.id.clone();
                                                move |e: Event<FormData>| set_status(id.clone(), QuoteStatus::from(e.value()))
                                            },
                                            for status in QuoteStatus::ALL {
                                                option { value: "{status}", "{status}" }
                                            }
                                        }
                                    }
                                    td {
                                        div {
                                            class: "row-actions",
                                            button {
                                                class: "icon-button",
                                                title: "View details",
                                                onclick: {
                                                    let request = request.clone();
                                                    move |_| viewing.set(Some(request.clone()))
                                                },
                                                Icon { icon: FaEye, width: 14, height: 14 }
                                            }
                                            button {
                                                class: "icon-button danger",
                                                title: "Delete",
                                                onclick: {
                                                    let request = request.clone();
                                                    move |_| deleting.write().ask(request.clone())
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

    let detail = if let Some(request) = viewing() {
        let breakdown = request
            .calculated_quote
            .as_ref()
            .map(|q| q.breakdown.clone())
            .unwrap_or_default();
        let extras = [
            ("Business type", request.business_type.clone()),
            ("Website type", request.web_type.clone()),
            ("Platform", request.platform.clone()),
            ("SEO", request.seo.clone()),
            ("Payment gateway", request.payment_gateway.clone()),
        ];
        rsx! {
            Modal {
                title: "Quote Request",
                wide: true,
                on_close: move |_| viewing.set(None),
                dl {
                    class: "detail-list",
                    dt { "Client" }
                    dd { "{request.client_name}" }
                    dt { "Email" }
                    dd { "{request.client_email}" }
                    dt { "Phone" }
                    dd { {request.client_phone.clone().unwrap_or_default()} }
                    dt { "Project type" }
                    dd { "{request.project_type}" }
                    for (label, value) in extras {
                        if let Some(value) = value {
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                    dt { "Status" }
                    dd { StatusBadge { status: request.status.to_string() } }
                }
                h4 { class: "section-title", "Breakdown" }
                if breakdown.is_empty() {
                    p { class: "card-meta", "No breakdown was stored with this request." }
                } else {
                    table {
                        class: "data-table",
                        tbody {
                            for line in breakdown {
                                tr {
                                    td { "{line.item}" }
                                    td { {format_money(line.price)} }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "stat-value",
                    {format!("Total {}", format_money(request.total_price()))}
                }
                div {
                    class: "form-actions",
                    for status in [QuoteStatus::Accepted, QuoteStatus::Rejected] {
                        button {
                            class: if status == QuoteStatus::Accepted { "btn btn-primary" } else { "btn btn-danger" },
                            disabled: request.status == status,
                            onclick: {
                                let id = request.id.clone();
                                let status = status.clone();
                                move |_| set_status(id.clone(), status.clone())
                            },
                            "Mark {status}"
                        }
                    }
                }
            }
        }
    } else {
        rsx! {}
    };

    let pending_name = deleting.read().pending().map(|r| r.client_name.clone());

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Quote Requests" }
                p { class: "page-subtitle", "Estimates requested through the price calculator" }
            }
            input {
                class: "field-input narrow",
                r#type: "search",
                placeholder: "Search by client or project type",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
            }
        }

        {body}

        {detail}

        if let Some(name) = pending_name {
            ConfirmDialog {
                message: "Delete the quote request from {name}?",
                on_confirm: confirm_delete,
                on_cancel: move |_| deleting.write().cancel(),
            }
        }
    }
}
