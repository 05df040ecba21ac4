//! Price sheet behind the public quote calculator.
//!
//! The whole sheet is fetched once and saved in one request. Each input
//! stores its leading integer; anything else becomes 0.

use api::{PriceTable, PricingCategory, QuotePricing};
use dioxus::prelude::*;
use ui::icons::{FaCheck, FaRotate};
use ui::{
    expire_on_unauthorized, notify, use_api, use_auth, use_notices, EmptyState, Icon,
    NoticeLevel, Spinner,
};

#[component]
pub fn PricingSettings() -> Element {
    let api = use_api();
    let session = use_auth();
    let mut notices = use_notices();
    let mut pricing = use_signal(|| Option::<QuotePricing>::None);
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);

    let fetch = move || {
        spawn(async move {
            match api.client().get_quote_pricing().await {
                Ok(sheet) => pricing.set(Some(sheet)),
                Err(e) => {
                    tracing::error!("Error fetching pricing: {e}");
                    expire_on_unauthorized(session, &api, Err(e));
                }
            }
            loading.set(false);
        });
    };

    use_hook(move || fetch());

    let save = move |_: MouseEvent| {
        let Some(sheet) = pricing() else {
            return;
        };
        if saving() {
            return;
        }
        saving.set(true);
        spawn(async move {
            match api.client().update_quote_pricing(&sheet).await {
                Ok(()) => notify(&mut notices, NoticeLevel::Success, "Pricing updated"),
                Err(e) => notify(
                    &mut notices,
                    NoticeLevel::Error,
                    &e.user_message("Failed to save pricing"),
                ),
            }
            saving.set(false);
        });
    };

    if loading() {
        return rsx! { Spinner {} };
    }

    let sections: Vec<(&'static str, PricingCategory, PriceTable)> = pricing
        .read()
        .as_ref()
        .map(|sheet| {
            PricingCategory::ALL
                .into_iter()
                .map(|c| (c.title(), c, sheet.table(c).clone()))
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "Quote Pricing Settings" }
                p { class: "page-subtitle", "Set prices for different project options" }
            }
            div {
                class: "toolbar",
                button {
                    class: "btn btn-outline",
                    onclick: move |_| fetch(),
                    Icon { icon: FaRotate, width: 14, height: 14 }
                    "Refresh"
                }
                button {
                    class: "btn btn-primary",
                    disabled: saving(),
                    onclick: save,
                    Icon { icon: FaCheck, width: 14, height: 14 }
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            }
        }

        if sections.is_empty() {
            EmptyState { message: "Pricing could not be loaded." }
        } else {
            div {
                class: "card-grid",
                for (title, category, table) in sections {
                    div {
                        key: "{title}",
                        class: "card",
                        h3 { class: "card-title", "{title}" }
                        if table.is_empty() {
                            p { class: "card-meta", "No options in this category." }
                        }
                        for (option, price) in table {
                            div {
                                key: "{option}",
                                class: "price-row",
                                label { class: "field-label", "{option}" }
                                input {
                                    class: "field-input",
                                    r#type: "number",
                                    value: "{price}",
                                    oninput: {
                                        let option = option.clone();
                                        move |e: Event<FormData>| {
                                            let mut sheet = pricing.write();
                                            if let Some(sheet) = sheet.as_mut() {
                                                sheet.set_price(category, &option, &e.value());
                                            }
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
