//! Login page view with the email/password form.

use dioxus::prelude::*;
use ui::LoginForm;

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",

            h1 {
                class: "mb-2 text-neutral-800 font-bold text-[1.75rem]",
                "Welcome Back"
            }

            p {
                class: "mb-8 text-neutral-600 text-[0.9375rem]",
                "Please enter your details to log in"
            }

            LoginForm {}

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Don't have an account? "
                Link {
                    class: "text-primary-500 no-underline",
                    to: Route::SignUp {},
                    "Sign up"
                }
            }
        }
    }
}
