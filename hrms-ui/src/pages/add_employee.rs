use crate::auth::use_auth;
use crate::browser::{self, js_error};
use crate::components::{EmployeeForm, FormMode};
use crate::error::{ApiError, ErrorAlert};
use hrms_common::employee::{template_csv, BulkUploadReport, TEMPLATE_FILE_NAME};
use hrms_common::forms::{BULK_ACCEPT, BULK_FILE_FIELD};
use hrms_common::SubmitGate;
use leptos::html::Input;
use leptos::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Single,
    Bulk,
}

#[component]
pub fn AddEmployee() -> impl IntoView {
    let (tab, set_tab) = create_signal(Tab::Single);
    let on_saved = Callback::new(|_| browser::alert("Employee added successfully!"));

    let tab_class = move |t: Tab| move || if tab.get() == t { "tab active" } else { "tab" };

    view! {
        <div class="add-employee">
            <div class="page-header">
                <h1>"Add Employee"</h1>
                <p>"Register a single employee or import many at once"</p>
            </div>

            <nav class="tabs">
                <button class=tab_class(Tab::Single) on:click=move |_| set_tab.set(Tab::Single)>
                    "Single Entry"
                </button>
                <button class=tab_class(Tab::Bulk) on:click=move |_| set_tab.set(Tab::Bulk)>
                    "Bulk Upload"
                </button>
            </nav>

            <Show
                when=move || tab.get() == Tab::Single
                fallback=|| view! { <BulkUpload/> }
            >
                <div class="card">
                    <EmployeeForm mode=FormMode::Add on_saved=on_saved/>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn BulkUpload() -> impl IntoView {
    let auth = use_auth();
    let file_ref = create_node_ref::<Input>();
    let (report, set_report) = create_signal(None::<BulkUploadReport>);
    let (error, set_error) = create_signal(None::<ApiError>);
    let (uploading, set_uploading) = create_signal(false);
    let gate = SubmitGate::new();

    let upload = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let file = file_ref
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        let Some(file) = file else {
            browser::alert("Please select a file");
            return;
        };
        let Some(ticket) = gate.try_begin() else {
            return;
        };

        let form = match web_sys::FormData::new()
            .and_then(|form| form.append_with_blob_and_filename(BULK_FILE_FIELD, &file, &file.name()).map(|_| form))
        {
            Ok(form) => form,
            Err(e) => {
                set_error.set(Some(js_error(e)));
                return;
            }
        };

        set_error.set(None);
        set_report.set(None);
        set_uploading.set(true);
        let client = auth.client();
        spawn_local(async move {
            let _ticket = ticket;
            let result = client.bulk_upload(form).await;
            set_uploading.set(false);
            match result {
                Ok(summary) => {
                    if let Some(input) = file_ref.get_untracked() {
                        input.set_value("");
                    }
                    set_report.set(Some(summary));
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let download_template = move |_| {
        if let Err(e) = browser::download_text(TEMPLATE_FILE_NAME, "text/csv;charset=utf-8", &template_csv()) {
            set_error.set(Some(e));
        }
    };

    view! {
        <div class="card bulk-upload">
            <h3>"Bulk Upload"</h3>
            <p class="muted">
                "Upload an Excel or CSV file with one employee per row. "
                "Use the template for the expected columns."
            </p>
            <button type="button" class="btn btn-secondary" on:click=download_template>
                "⬇ Download Template"
            </button>

            <form on:submit=upload>
                <div class="form-group">
                    <label>"Spreadsheet"</label>
                    <input type="file" accept=BULK_ACCEPT node_ref=file_ref/>
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || uploading.get()>
                    {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                </button>
            </form>

            {move || error.get().map(|e| view! {
                <ErrorAlert error=e on_dismiss=Callback::new(move |_| set_error.set(None))/>
            })}
            {move || report.get().map(|r| view! { <UploadReport report=r/> })}
        </div>
    }
}

#[component]
fn UploadReport(report: BulkUploadReport) -> impl IntoView {
    let failed = report.error_count;

    view! {
        <div class="upload-report">
            <p class="text-success">{format!("✅ {} employees imported", report.success_count)}</p>
            <Show when=move || (failed > 0)>
                <p class="text-danger">{format!("⚠ {} rows failed", failed)}</p>
            </Show>
            <ul class="upload-errors">
                {report.errors.into_iter().map(|err| view! {
                    <li>{format!("Row {}: {}", err.row, err.message)}</li>
                }).collect_view()}
            </ul>
        </div>
    }
}
