use dioxus::prelude::*;

use ui::AuthProvider;
use views::{
    AdminDashboard, Login, ManageTasks, MyTasks, Root, Shell, SignUp, TaskDetails,
    UserDashboard,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        SignUp {},
        #[route("/admin/dashboard")]
        AdminDashboard {},
        #[route("/admin/tasks")]
        ManageTasks {},
        #[route("/user/dashboard")]
        UserDashboard {},
        #[route("/user/tasks")]
        MyTasks {},
        #[route("/user/task-details/:id")]
        TaskDetails { id: String },
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AuthProvider {
            Router::<Route> {}
        }
    }
}
