//! # Task client: one method per backend endpoint
//!
//! [`TaskClient`] is what the UI talks to. It validates input, builds the
//! request, sends it through the [`AuthGateway`] and decodes the answer into
//! the typed records of [`crate::models`] and [`crate::dashboard`].
//!
//! Auth responses (login, registration) all take the same path: the role is
//! routed first, so an unknown role never reaches the session store, then the
//! identity and token replace the current session wholesale.

use serde::Deserialize;
use store::KeyValueStore;

use crate::dashboard::{DashboardData, DashboardPayload, TaskList, TaskListPayload};
use crate::error::ApiError;
use crate::gateway::{ApiRequest, ApiResponse, AuthGateway, FilePart, Transport};
use crate::models::{AuthPayload, Identity, IdentityPatch, StatusFilter, Task};
use crate::paths;
use crate::routes::route_after_auth;
use crate::session::{Auth, SessionStatus, SessionStore};
use crate::validate::{LoginRequest, RegisterRequest};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedImage {
    image_url: String,
}

pub struct TaskClient<T, S: KeyValueStore> {
    gateway: AuthGateway<T, S>,
}

impl<T: Clone, S: KeyValueStore> Clone for TaskClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<T, S: KeyValueStore> PartialEq for TaskClient<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.session() == other.session()
    }
}

impl<T, S: KeyValueStore> TaskClient<T, S> {
    pub fn new(transport: T, session: SessionStore<S>) -> Self {
        Self {
            gateway: AuthGateway::new(transport, session),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        self.gateway.session()
    }
}

impl<T: Transport, S: KeyValueStore> TaskClient<T, S> {
    /// Sign in. Returns the dashboard path for the user's role.
    pub async fn login(&self, form: &LoginRequest) -> Result<&'static str, ApiError> {
        form.validate()?;
        let request = ApiRequest::post(paths::LOGIN).auth(Auth::None).json(form)?;
        let response = self.gateway.send(request).await?;
        self.accept(&response)
    }

    /// Create an account, uploading the profile image first when one is given.
    pub async fn register(
        &self,
        form: &RegisterRequest,
        image: Option<FilePart>,
    ) -> Result<&'static str, ApiError> {
        form.validate()?;
        let mut form = form.clone();
        if let Some(image) = image {
            form.profile_image_url = self.upload_image(image).await?;
        }
        let request = ApiRequest::post(paths::REGISTER)
            .auth(Auth::None)
            .json(&form)?;
        let response = self.gateway.send(request).await?;
        self.accept(&response)
    }

    /// Upload a profile image; returns its public URL.
    pub async fn upload_image(&self, image: FilePart) -> Result<String, ApiError> {
        let request = ApiRequest::post(paths::UPLOAD_IMAGE)
            .auth(Auth::None)
            .multipart(image);
        let uploaded: UploadedImage = self.gateway.send(request).await?.json()?;
        Ok(uploaded.image_url)
    }

    /// Validate a token persisted by a previous run.
    ///
    /// Does nothing unless the session is pending. A 401 ends the session, an
    /// unknown role rejects it, and transport or server failures leave it
    /// pending so the caller can retry.
    pub async fn restore(&self) -> Result<Option<Identity>, ApiError> {
        let snapshot = self.session().snapshot();
        if snapshot.status != SessionStatus::Pending {
            return Ok(snapshot.identity);
        }

        let request = ApiRequest::get(paths::PROFILE).auth(Auth::Validate);
        let payload: AuthPayload = self.gateway.send(request).await?.json()?;
        let identity = match payload.identity() {
            Ok(identity) => identity,
            Err(e) => {
                if self.session().is_current(snapshot.generation) {
                    self.session().reject();
                }
                return Err(e);
            }
        };
        self.session().confirm(identity.clone(), snapshot.generation)?;
        Ok(Some(identity))
    }

    /// Save profile changes and merge what the backend stored into the session.
    pub async fn update_profile(&self, patch: &IdentityPatch) -> Result<Identity, ApiError> {
        if !self.session().snapshot().is_authenticated() {
            return Err(ApiError::NoActiveSession);
        }
        let request = ApiRequest::put(paths::PROFILE).json(patch)?;
        let payload: AuthPayload = self.gateway.send(request).await?.json()?;
        let stored = payload.identity()?;
        self.session().update(&IdentityPatch::from_identity(&stored))
    }

    pub async fn tasks(&self, filter: StatusFilter) -> Result<TaskList, ApiError> {
        let request = ApiRequest::get(paths::TASKS).query("status", filter.query_value());
        let payload: TaskListPayload = self.gateway.send(request).await?.json()?;
        Ok(payload.into())
    }

    pub async fn task(&self, id: &str) -> Result<Task, ApiError> {
        self.gateway
            .send(ApiRequest::get(paths::task(id)))
            .await?
            .json()
    }

    pub async fn user_dashboard(&self) -> Result<DashboardData, ApiError> {
        self.dashboard(paths::USER_DASHBOARD).await
    }

    pub async fn admin_dashboard(&self) -> Result<DashboardData, ApiError> {
        self.dashboard(paths::ADMIN_DASHBOARD).await
    }

    async fn dashboard(&self, path: &str) -> Result<DashboardData, ApiError> {
        let payload: DashboardPayload = self.gateway.send(ApiRequest::get(path)).await?.json()?;
        Ok(payload.into())
    }

    /// Local only; the backend keeps no session state.
    pub fn logout(&self) {
        self.session().logout();
    }

    fn accept(&self, response: &ApiResponse) -> Result<&'static str, ApiError> {
        let payload: AuthPayload = response.json()?;
        let route = match route_after_auth(&payload.role) {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(role = %payload.role, "auth response carried an unknown role");
                self.session().reject();
                return Err(e);
            }
        };
        let Some(token) = payload.token() else {
            return Err(ApiError::Server {
                status: response.status,
                message: "auth response did not include a token".to_string(),
            });
        };
        self.session().login(payload.identity()?, token.to_string());
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, TransportError, ValidationError};
    use crate::gateway::{Method, RequestBody};
    use crate::models::{Role, TaskStatus};
    use crate::routes::{Redirector, LOGIN, USER_DASHBOARD};
    use crate::session::SessionEnd;
    use crate::testing::{auth_body, client, client_with, identity};
    use serde_json::json;
    use store::MemoryStore;

    fn credentials() -> LoginRequest {
        LoginRequest::new("a@b.com", "secret123")
    }

    #[tokio::test]
    async fn test_login_routes_user_to_dashboard() {
        let (client, transport) = client();
        transport.reply(200, auth_body("user", "t1"));

        let route = client.login(&credentials()).await.unwrap();

        assert_eq!(route, USER_DASHBOARD);
        let snapshot = client.session().snapshot();
        assert_eq!(snapshot.identity.unwrap().role, Role::User);
        assert_eq!(client.session().credential(Auth::Session).token.as_deref(), Some("t1"));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/api/auth/login");
        assert_eq!(sent.bearer, None);
        assert_eq!(
            sent.body,
            RequestBody::Json(json!({ "email": "a@b.com", "password": "secret123" }))
        );
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let (client, transport) = client();

        let result = client.login(&LoginRequest::new("a@b.com", "")).await;

        assert_eq!(
            result,
            Err(ApiError::Validation(ValidationError::MissingField(Field::Password)))
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_backend_message_is_surfaced() {
        let (client, transport) = client();
        transport.reply(400, json!({ "message": "Invalid email or password" }));

        let err = client.login(&credentials()).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(client.session().identity().is_none());
    }

    #[tokio::test]
    async fn test_unknown_role_is_not_stored() {
        let backing = MemoryStore::new();
        let (client, transport) = client_with(backing.clone());
        transport.reply(200, auth_body("superuser", "t1"));

        let result = client.login(&credentials()).await;

        assert_eq!(result, Err(ApiError::UnknownRole("superuser".into())));
        assert_eq!(client.session().status(), SessionStatus::Anonymous);
        assert!(backing.get("token").is_none());
    }

    #[tokio::test]
    async fn test_unknown_role_ends_existing_session() {
        let (client, transport) = client();
        client.session().login(identity(Role::Admin), "t0".into());
        transport.reply(200, auth_body("guest", "t1"));

        assert!(client.login(&credentials()).await.unwrap_err().ends_session());
        assert_eq!(client.session().snapshot().ended, Some(SessionEnd::Rejected));
    }

    #[tokio::test]
    async fn test_missing_token_is_a_server_fault() {
        let (client, transport) = client();
        transport.reply(200, json!({ "_id": "66a1", "role": "user" }));

        let result = client.login(&credentials()).await;
        assert!(matches!(result, Err(ApiError::Server { status: 200, .. })));
        assert!(client.session().identity().is_none());
    }

    #[tokio::test]
    async fn test_401_logs_out_and_redirects_once() {
        let (client, transport) = client();
        client.session().login(identity(Role::User), "t1".into());
        let mut redirector = Redirector::new();
        let mut rx = client.session().subscribe();
        rx.borrow_and_update();

        transport.reply(401, json!({ "message": "Not authorized, token failed" }));
        transport.reply(401, json!({}));
        assert_eq!(client.tasks(StatusFilter::All).await, Err(ApiError::AuthExpired));
        // A second request after the logout goes out without a token
        assert!(matches!(
            client.tasks(StatusFilter::All).await,
            Err(ApiError::Rejected { status: 401, .. })
        ));

        let snapshot = client.session().snapshot();
        assert!(snapshot.identity.is_none());
        assert_eq!(client.session().credential(Auth::Session).token, None);

        let mut redirects = Vec::new();
        while rx.has_changed().unwrap() {
            let snapshot = rx.borrow_and_update().clone();
            redirects.extend(redirector.on_session(&snapshot, "/user/tasks"));
        }
        redirects.extend(redirector.on_session(&snapshot, "/user/tasks"));
        assert_eq!(redirects, vec![LOGIN]);
    }

    #[tokio::test]
    async fn test_403_and_network_errors_keep_session() {
        let (client, transport) = client();
        client.session().login(identity(Role::User), "t1".into());
        transport.reply(403, json!({ "message": "Access denied, admin only" }));
        transport.fail(TransportError::new("connection refused"));

        assert!(matches!(
            client.admin_dashboard().await,
            Err(ApiError::PermissionDenied(_))
        ));
        assert!(matches!(
            client.user_dashboard().await,
            Err(ApiError::Network(_))
        ));
        assert!(client.session().snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_response_after_logout_is_discarded() {
        let (client, transport) = client();
        client.session().login(identity(Role::User), "t1".into());
        let release = transport.hold();
        transport.reply(
            200,
            json!({ "_id": "user-1", "name": "Renamed", "email": "bat@b.com", "role": "user" }),
        );

        let patch = IdentityPatch {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        let (result, _) = tokio::join!(client.update_profile(&patch), async {
            client.logout();
            release.send(()).unwrap();
        });

        assert_eq!(result, Err(ApiError::SessionChanged));
        assert!(client.session().identity().is_none());
        assert_eq!(client.session().snapshot().ended, Some(SessionEnd::SignedOut));
    }

    #[tokio::test]
    async fn test_update_profile_merges_stored_fields() {
        let (client, transport) = client();
        client.session().login(identity(Role::User), "t1".into());
        transport.reply(
            200,
            json!({
                "_id": "user-1",
                "name": "Renamed",
                "email": "bat@b.com",
                "role": "user",
                "profileImageUrl": "http://img/new.png",
                "token": "ignored"
            }),
        );

        let updated = client
            .update_profile(&IdentityPatch {
                name: Some("Renamed".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.profile_image_url.as_deref(), Some("http://img/new.png"));
        assert_eq!(client.session().identity(), Some(updated));
        assert_eq!(client.session().credential(Auth::Session).token.as_deref(), Some("t1"));
        assert_eq!(transport.requests()[0].method, Method::Put);
    }

    #[tokio::test]
    async fn test_update_profile_requires_session() {
        let (client, transport) = client();
        assert_eq!(
            client.update_profile(&IdentityPatch::default()).await,
            Err(ApiError::NoActiveSession)
        );
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_restore_confirms_pending_token() {
        let backing = MemoryStore::new();
        backing.set("token", "t0").unwrap();
        let (client, transport) = client_with(backing);
        transport.reply(200, auth_body("admin", ""));

        let identity = client.restore().await.unwrap().unwrap();

        assert_eq!(identity.role, Role::Admin);
        assert!(client.session().snapshot().is_authenticated());
        let sent = &transport.requests()[0];
        assert_eq!(sent.path, "/api/auth/profile");
        assert_eq!(sent.bearer.as_deref(), Some("t0"));
        // The persisted token is now trusted for ordinary requests
        assert_eq!(client.session().credential(Auth::Session).token.as_deref(), Some("t0"));
    }

    #[tokio::test]
    async fn test_restore_with_expired_token() {
        let backing = MemoryStore::new();
        backing.set("token", "t0").unwrap();
        let (client, transport) = client_with(backing.clone());
        transport.reply(401, json!({ "message": "Not authorized, token failed" }));

        assert_eq!(client.restore().await, Err(ApiError::AuthExpired));
        assert_eq!(client.session().status(), SessionStatus::Anonymous);
        assert!(backing.get("token").is_none());
    }

    #[tokio::test]
    async fn test_restore_offline_stays_pending() {
        let backing = MemoryStore::new();
        backing.set("token", "t0").unwrap();
        let (client, transport) = client_with(backing.clone());
        transport.fail(TransportError::timeout("timed out"));

        assert!(matches!(client.restore().await, Err(ApiError::Network(_))));
        assert_eq!(client.session().status(), SessionStatus::Pending);
        assert_eq!(backing.get("token").as_deref(), Some("t0"));
    }

    #[tokio::test]
    async fn test_restore_can_be_retried_after_server_error() {
        let backing = MemoryStore::new();
        backing.set("token", "t0").unwrap();
        let (client, transport) = client_with(backing);
        transport.reply(503, json!({ "message": "Service unavailable" }));
        transport.reply(200, auth_body("user", ""));

        assert!(matches!(
            client.restore().await,
            Err(ApiError::Server { status: 503, .. })
        ));
        assert_eq!(client.session().status(), SessionStatus::Pending);

        let identity = client.restore().await.unwrap().unwrap();
        assert_eq!(identity.role, Role::User);
        assert!(client.session().snapshot().is_authenticated());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_restore_with_unknown_role_rejects() {
        let backing = MemoryStore::new();
        backing.set("token", "t0").unwrap();
        let (client, transport) = client_with(backing.clone());
        transport.reply(200, auth_body("superuser", ""));

        assert_eq!(
            client.restore().await,
            Err(ApiError::UnknownRole("superuser".to_string()))
        );
        let snapshot = client.session().snapshot();
        assert_eq!(snapshot.ended, Some(SessionEnd::Rejected));
        assert_eq!(snapshot.status, SessionStatus::Anonymous);
        assert!(snapshot.identity.is_none());
        assert!(backing.get("token").is_none());
    }

    #[tokio::test]
    async fn test_restore_without_token_sends_nothing() {
        let (client, transport) = client();
        assert_eq!(client.restore().await, Ok(None));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_task_queries() {
        let (client, transport) = client();
        client.session().login(identity(Role::User), "t1".into());
        transport.reply(
            200,
            json!({
                "tasks": [{ "_id": "t-1", "title": "Ship", "priority": "Low", "status": "In Progress" }],
                "statusSummary": { "all": 1, "inProgressTasks": 1 }
            }),
        );
        transport.reply(200, json!({ "tasks": [], "statusSummary": {} }));
        transport.reply(
            200,
            json!({ "_id": "t-1", "title": "Ship", "priority": "Low", "status": "In Progress" }),
        );

        let list = client.tasks(StatusFilter::All).await.unwrap();
        assert_eq!(list.tasks[0].status, TaskStatus::InProgress);
        assert_eq!(list.tabs[2].count, 1);

        let list = client
            .tasks(StatusFilter::Only(TaskStatus::InProgress))
            .await
            .unwrap();
        assert!(!list.show_tabs());

        let task = client.task("t-1").await.unwrap();
        assert_eq!(task.title, "Ship");

        let sent = transport.requests();
        assert_eq!(sent[0].query, vec![("status".to_string(), String::new())]);
        assert_eq!(
            sent[1].query,
            vec![("status".to_string(), "In Progress".to_string())]
        );
        assert_eq!(sent[2].path, "/api/tasks/t-1");
        assert!(sent.iter().all(|r| r.bearer.as_deref() == Some("t1")));
    }

    #[tokio::test]
    async fn test_dashboard_is_zero_filled() {
        let (client, transport) = client();
        client.session().login(identity(Role::User), "t1".into());
        transport.reply(200, json!({ "charts": { "taskDistribution": { "Pending": 3 } } }));

        let data = client.user_dashboard().await.unwrap();
        assert_eq!(data.summary.status.pending, 3);
        assert_eq!(data.summary.status.completed, 0);
        assert!(data.summary.recent_tasks.is_empty());
        assert_eq!(transport.requests()[0].path, "/api/tasks/user-dashboard-data");
    }

    #[tokio::test]
    async fn test_register_uploads_image_first() {
        let (client, transport) = client();
        transport.reply(200, json!({ "imageUrl": "http://img/u.png" }));
        transport.reply(201, auth_body("admin", "t9"));

        let form = RegisterRequest {
            name: "Bat".into(),
            email: "a@b.com".into(),
            password: "secret123".into(),
            admin_invite_token: "4821".into(),
            ..Default::default()
        };
        let image = FilePart::image("me.png", "image/png", vec![1, 2, 3]);
        let route = client.register(&form, Some(image.clone())).await.unwrap();

        assert_eq!(route, "/admin/dashboard");
        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/auth/upload-image");
        assert_eq!(sent[0].body, RequestBody::Multipart(image));
        assert_eq!(sent[1].path, "/api/auth/register");
        let RequestBody::Json(body) = &sent[1].body else {
            panic!("expected a JSON body");
        };
        assert_eq!(body["profileImageUrl"], "http://img/u.png");
        assert_eq!(body["adminInviteToken"], "4821");
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let (client, _) = client();
        client.session().login(identity(Role::User), "t1".into());
        client.logout();
        let once = client.session().snapshot();
        client.logout();
        assert_eq!(client.session().snapshot(), once);
    }
}
