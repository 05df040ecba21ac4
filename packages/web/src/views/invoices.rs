use api::{Invoice, InvoiceStatus};
use dioxus::prelude::*;
use ui::icons::{FaDownload, FaPlus};
use ui::{
    expire_on_unauthorized, format_money, notify, use_api, use_auth, use_notices, EmptyState,
    FormController, Icon, InvoiceUpload, InvoiceUploadDraft, InvoiceUploadModal, ListState,
    NoticeLevel, Spinner, StatusBadge,
};

/// Totals shown above the invoice table.
#[derive(Debug, Default, PartialEq)]
struct InvoiceTotals {
    billed: f64,
    paid: f64,
    outstanding: f64,
}

fn totals(invoices: &[Invoice]) -> InvoiceTotals {
    invoices.iter().fold(InvoiceTotals::default(), |mut t, inv| {
        t.billed += inv.amount;
        if inv.status == InvoiceStatus::Paid {
            t.paid += inv.amount;
        } else {
            t.outstanding += inv.amount;
        }
        t
    })
}

#[component]
pub fn Invoices() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut invoices = use_signal(ListState::<Invoice>::default);
    let mut filter = use_signal(|| Option::<InvoiceStatus>::None);
    let mut form = use_signal(FormController::<InvoiceUploadDraft>::new);

    let reload = move || {
        spawn(async move {
            let result = api.client().list_invoices().await;
            let outcome = invoices.write().loaded(result, "invoices");
            expire_on_unauthorized(session, &api, outcome);
        });
    };

    use_hook(move || reload());

    let upload = move |InvoiceUpload { client_id, file, meta }: InvoiceUpload| {
        spawn(async move {
            match api
                .client()
                .upload_invoice(client_id.as_deref(), file, &meta)
                .await
            {
                Ok(()) => {
                    form.write().save_succeeded();
                    notify(&mut notices, NoticeLevel::Success, "Invoice uploaded");
                    reload();
                }
                Err(e) => {
                    let message = e.user_message("Failed to upload invoice");
                    form.write().save_failed(message.clone());
                    notify(&mut notices, NoticeLevel::Error, &message);
                }
            }
        });
    };

    let stats = totals(invoices.read().items());

    let body = {
        let list = invoices.read();
        let wanted = filter();
        if list.is_loading() {
            rsx! { Spinner {} }
        } else if list.is_empty() {
            rsx! { EmptyState { message: "No invoices uploaded yet." } }
        } else {
            let rows = list.filtered(|inv| wanted.as_ref().is_none_or(|s| &inv.status == s));
            rsx! {
                if rows.is_empty() {
                    EmptyState { message: "No invoices with this status." }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Client" }
                                th { "Project" }
                                th { "Amount" }
                                th { "Status" }
                                th { "Due" }
                                th { "" }
                            }
                        }
                        tbody {
                            for invoice in rows {
                                tr {
                                    key: "{invoice.id}",
                                    td { "{invoice.client_name}" }
                                    td { "{invoice.project}" }
                                    td { {format_money(invoice.amount)} }
                                    td { StatusBadge { status: invoice.status.to_string() } }
                                    td { {invoice.due_date.clone().unwrap_or_default()} }
                                    td {
                                        if let Some(url) = &invoice.file_url {
                                            a {
                                                class: "icon-button",
                                                href: "{url}",
                                                target: "_blank",
                                                rel: "noopener",
                                                title: "Open file",
                                                Icon { icon: FaDownload, width: 14, height: 14 }
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

    let chip = move |label: &'static str, status: Option<InvoiceStatus>| {
        let active = filter() == status;
        let mut filter = filter;
        rsx! {
            button {
                class: if active { "tab active" } else { "tab" },
                onclick: move |_| filter.set(status.clone()),
                "{label}"
            }
        }
    };

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Invoices" }
                p { class: "page-subtitle", "Uploaded invoices and their payment state" }
            }
            button {
                class: "btn btn-primary",
                onclick: move |_| form.write().open(None),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "Upload Invoice"
            }
        }

        div {
            class: "stat-grid",
            div {
                class: "card",
                div { class: "stat-label", "Total Billed" }
                div { class: "stat-value", {format_money(stats.billed)} }
            }
            div {
                class: "card",
                div { class: "stat-label", "Paid" }
                div { class: "stat-value", {format_money(stats.paid)} }
            }
            div {
                class: "card",
                div { class: "stat-label", "Outstanding" }
                div { class: "stat-value", {format_money(stats.outstanding)} }
            }
        }

        div {
            class: "tabs",
            {chip("All", None)}
            {chip("Paid", Some(InvoiceStatus::Paid))}
            {chip("Pending", Some(InvoiceStatus::Pending))}
            {chip("Overdue", Some(InvoiceStatus::Overdue))}
        }

        {body}

        InvoiceUploadModal { form, on_submit: upload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(amount: f64, status: InvoiceStatus) -> Invoice {
        Invoice {
            amount,
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_totals_split_paid_from_outstanding() {
        let t = totals(&[
            invoice(1000.0, InvoiceStatus::Paid),
            invoice(250.5, InvoiceStatus::Pending),
            invoice(99.5, InvoiceStatus::Overdue),
        ]);
        assert_eq!(
            t,
            InvoiceTotals {
                billed: 1350.0,
                paid: 1000.0,
                outstanding: 350.0,
            }
        );
    }
}
