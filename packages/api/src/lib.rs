//! # API crate: client core of TaskDesk
//!
//! Everything the frontends need to talk to the TaskDesk REST backend, with no
//! UI code. The `ui` crate wraps these types in Dioxus components; the tests in
//! this crate drive them against a scripted transport.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`validate`] | Login and registration forms, email/required-field checks run before any request |
//! | [`session`] | The session store: identity, persisted bearer token, lifecycle, change notifications |
//! | [`gateway`] | Wraps every request: attaches the token, maps 401/403/5xx/transport failures to [`ApiError`] |
//! | [`client`] | [`TaskClient`], one method per backend endpoint |
//! | [`routes`] | Post-login routing, role gates, the forced-logout [`Redirector`](routes::Redirector) |
//! | [`dashboard`] | Coerces dashboard and task-list payloads into fixed-shape records |
//! | [`scope`] | [`ViewScope`]: cancels a view's in-flight work when it unmounts |
//! | [`settings`] | Layered client settings (defaults, `taskdesk.toml`, environment) |
//! | [`models`] | Identity and task records as exchanged with the backend |
//!
//! ## Request flow
//!
//! ```text
//! view ──► TaskClient ──► AuthGateway ──► Transport (reqwest)
//!               │              │
//!               │              └── SessionStore: credential, expire on 401
//!               └── SessionStore: login / confirm / update
//! ```

pub mod client;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod models;
pub mod paths;
pub mod routes;
pub mod scope;
pub mod session;
pub mod settings;
pub mod validate;

#[cfg(test)]
mod testing;

pub use client::TaskClient;
pub use error::{ApiError, Field, TransportError, ValidationError};
pub use gateway::{ApiRequest, ApiResponse, AuthGateway, FilePart, HttpTransport, Transport};
pub use models::{Identity, IdentityPatch, Role, StatusFilter, Task, TaskStatus};
pub use scope::ViewScope;
pub use session::{Auth, SessionEnd, SessionSnapshot, SessionStatus, SessionStore};
pub use validate::{LoginRequest, RegisterRequest};
