use hrms_common::routes::{self, ADMIN_ONLY, EMPLOYEE_EDITORS};
use hrms_common::LOGIN_PATH;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

mod api;
mod auth;
mod browser;
mod components;
mod error;
mod pages;
mod storage;

use components::{Layout, ProtectedRoute};
use pages::{AddEmployee, Dashboard, EmployeeList, EmployeeProfile, Login, ManageUsers};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    auth::provide_auth();

    view! {
        <Stylesheet id="leptos" href="/pkg/hrms-ui.css"/>
        <Title text="HRMS - Employee Management"/>
        <Meta name="description" content="Human resources management system"/>

        <Router>
            <Routes>
                <Route path=LOGIN_PATH view=Login/>
                <Route
                    path="/"
                    view=|| view! {
                        <ProtectedRoute>
                            <Layout/>
                        </ProtectedRoute>
                    }
                >
                    <Route path="" view=|| view! { <Redirect path=routes::DASHBOARD/> }/>
                    <Route path=routes::DASHBOARD view=Dashboard/>
                    <Route path=routes::EMPLOYEES view=EmployeeList/>
                    <Route path=routes::EMPLOYEE_PROFILE view=EmployeeProfile/>
                    <Route
                        path=routes::ADD_EMPLOYEE
                        view=|| view! {
                            <ProtectedRoute roles=EMPLOYEE_EDITORS>
                                <AddEmployee/>
                            </ProtectedRoute>
                        }
                    />
                    <Route
                        path=routes::MANAGE_USERS
                        view=|| view! {
                            <ProtectedRoute roles=ADMIN_ONLY>
                                <ManageUsers/>
                            </ProtectedRoute>
                        }
                    />
                </Route>
                <Route path="/*any" view=|| view! { <Redirect path=routes::DASHBOARD/> }/>
            </Routes>
        </Router>
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
