//! Login page: email and password against `/auth/login`.

use dioxus::prelude::*;
use ui::{sign_in, use_api, use_auth, FormController, LoginDraft};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let session = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut form = use_signal(|| {
        let mut form = FormController::<LoginDraft>::new();
        form.open(None);
        form
    });

    // Already signed in (or just signed in): go to the app.
    use_effect(move || {
        if session().user.is_some() {
            nav.replace(Route::Projects {});
        }
    });

    let (draft, submitting, error) = {
        let f = form.read();
        (f.draft().clone(), f.is_submitting(), f.error().map(str::to_string))
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let result = form.write().submit();
        let Ok((email, password)) = result else {
            return;
        };
        spawn(async move {
            match sign_in(session, &api, &email, &password).await {
                Ok(()) => form.write().save_succeeded(),
                Err(message) => form.write().save_failed(message),
            }
        });
    };

    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                h2 { class: "login-title", "Admin Login" }

                if let Some(error) = error {
                    div { class: "form-error", "{error}" }
                }

                form {
                    class: "form-grid",
                    onsubmit: submit,
                    div {
                        label { class: "field-label", "Email" }
                        input {
                            class: "field-input",
                            r#type: "email",
                            autocomplete: "username",
                            value: "{draft.email}",
                            oninput: move |e| form.write().draft_mut().email = e.value(),
                        }
                    }
                    div {
                        label { class: "field-label", "Password" }
                        input {
                            class: "field-input",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{draft.password}",
                            oninput: move |e| form.write().draft_mut().password = e.value(),
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary btn-block",
                        disabled: submitting,
                        if submitting { "Signing in..." } else { "Login" }
                    }
                }
            }
        }
    }
}
