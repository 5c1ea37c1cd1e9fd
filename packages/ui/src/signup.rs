use api::routes;
use api::{FilePart, RegisterRequest};
use dioxus::prelude::*;

use crate::auth::{use_client, use_session, use_view_scope};

/// MIME type of an uploaded profile image, from its file name.
pub fn image_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Registration form with an optional profile photo and admin invite token.
#[component]
pub fn SignUpForm() -> Element {
    let client = use_client();
    let session = use_session();
    let nav = use_navigator();
    let scope = use_view_scope();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut invite = use_signal(String::new);
    let mut photo = use_signal(|| Option::<FilePart>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if let Some(identity) = session().identity {
        nav.replace(routes::dashboard_for(identity.role));
    }

    let pick_photo = move |evt: FormEvent| async move {
        let Some(files) = evt.files() else {
            return;
        };
        let Some(file_name) = files.files().into_iter().next() else {
            photo.set(None);
            return;
        };
        match files.read_file(&file_name).await {
            Some(bytes) => {
                let mime = image_mime(&file_name);
                photo.set(Some(FilePart::image(file_name, mime, bytes)));
            }
            None => error.set(Some(format!("Could not read {file_name}."))),
        }
    };

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        let form = RegisterRequest {
            name: name().trim().to_string(),
            email: email().trim().to_string(),
            password: password(),
            profile_image_url: String::new(),
            admin_invite_token: invite().trim().to_string(),
        };
        if let Err(e) = form.validate() {
            error.set(Some(e.to_string()));
            return;
        }

        loading.set(true);
        let client = client.clone();
        let image = photo();
        let attempt = scope.run(async move { client.register(&form, image).await });
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
            onsubmit: handle_signup,
            class: "flex flex-col gap-3 w-full max-w-[420px]",

            if let Some(err) = error() {
                div {
                    class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                    "{err}"
                }
            }

            label {
                class: "text-sm text-neutral-600",
                "Profile photo"
                input {
                    class: "w-full",
                    r#type: "file",
                    accept: "image/*",
                    onchange: pick_photo,
                }
            }
            if let Some(part) = photo() {
                p { class: "text-xs text-neutral-500", "{part.file_name}" }
            }

            input {
                class: "w-full",
                r#type: "text",
                placeholder: "Full name",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
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

            input {
                class: "w-full",
                r#type: "text",
                placeholder: "Admin invite token (optional)",
                value: invite(),
                oninput: move |evt: FormEvent| invite.set(evt.value()),
            }

            button {
                class: "w-full btn-primary text-[0.9375rem] font-medium",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Sign up" }
            }
        }
    }
}
