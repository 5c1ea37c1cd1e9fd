//! Registration page view.

use dioxus::prelude::*;
use ui::SignUpForm;

use crate::Route;

#[component]
pub fn SignUp() -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",

            h1 {
                class: "mb-2 text-neutral-800 font-bold text-[1.75rem]",
                "Create an Account"
            }

            p {
                class: "mb-8 text-neutral-600 text-[0.9375rem]",
                "Join us today by entering your details below."
            }

            SignUpForm {}

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Already have an account? "
                Link {
                    class: "text-primary-500 no-underline",
                    to: Route::Login {},
                    "Log in"
                }
            }
        }
    }
}
