//! Backend endpoint paths.

pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const PROFILE: &str = "/api/auth/profile";
pub const UPLOAD_IMAGE: &str = "/api/auth/upload-image";

pub const TASKS: &str = "/api/tasks";
pub const USER_DASHBOARD: &str = "/api/tasks/user-dashboard-data";
pub const ADMIN_DASHBOARD: &str = "/api/tasks/dashboard-data";

pub fn task(id: &str) -> String {
    format!("{TASKS}/{id}")
}
