mod add_employee;
mod dashboard;
mod employee_list;
mod employee_profile;
mod login;
mod manage_users;

pub use add_employee::AddEmployee;
pub use dashboard::Dashboard;
pub use employee_list::EmployeeList;
pub use employee_profile::EmployeeProfile;
pub use login::Login;
pub use manage_users::ManageUsers;
