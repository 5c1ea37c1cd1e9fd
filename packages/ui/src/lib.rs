//! This crate contains all shared UI for the workspace.

mod client;
pub use client::{make_client, AppClient, PlatformStore};

mod auth;
pub use auth::{
    use_client, use_session, use_view_scope, AuthProvider, LogoutButton, PendingSession,
    RoleGate, SessionRedirect,
};

mod login;
pub use login::LoginForm;

mod signup;
pub use signup::{image_mime, SignUpForm};

mod dashboard;
pub use dashboard::{ChartBars, ErrorNotice, InfoCard, StatusTabs, TaskCard, TaskTable};

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
