use api::routes;
use api::LoginRequest;
use dioxus::prelude::*;

use crate::auth::{use_client, use_session, use_view_scope};

/// Email/password sign-in form.
#[component]
pub fn LoginForm() -> Element {
    let client = use_client();
    let session = use_session();
    let nav = use_navigator();
    let scope = use_view_scope();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in
    if let Some(identity) = session().identity {
        nav.replace(routes::dashboard_for(identity.role));
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        let form = LoginRequest::new(email().trim(), password());
        if let Err(e) = form.validate() {
            error.set(Some(e.to_string()));
            return;
        }

        loading.set(true);
        let client = client.clone();
        let attempt = scope.run(async move { client.login(&form).await });
        spawn(async move {
            let Some(result) = attempt.await else {
                return;
            };
            loading.set(false);
            match result {
                Ok(route) => {
                    nav.replace(route);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    rsx! {
        form {
            onsubmit: handle_login,
            class: "flex flex-col gap-3 w-full max-w-[320px]",

            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }

            input {
                class: "w-full",
                r#type: "email",
                placeholder: "Email address",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }

            input {
                class: "w-full",
                r#type: "password",
                placeholder: "Password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }

            button {
                class: "w-full btn-primary text-[0.9375rem] font-medium",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Log in" }
            }
        }
    }
}
