mod shell;
pub use shell::{Root, Shell};

mod login;
pub use login::Login;

mod signup;
pub use signup::SignUp;

mod dashboard;
pub use dashboard::{AdminDashboard, UserDashboard};

mod tasks;
pub use tasks::{ManageTasks, MyTasks};

mod task_details;
pub use task_details::TaskDetails;
