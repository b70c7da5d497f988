///! Employee record form, shared by the add page and the profile editor

use crate::auth::use_auth;
use crate::browser::js_error;
use crate::error::{ApiError, ErrorAlert};
use hrms_common::forms::{
    self, FieldKind, FormField, FormSection, CODE_FIELD, CV_ACCEPT, CV_FIELD, EMPLOYEE_FORM,
    PHOTO_ACCEPT, PHOTO_FIELD,
};
use hrms_common::SubmitGate;
use leptos::html::Input;
use leptos::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub enum FormMode {
    /// All sections stacked, posts a new record
    Add,
    /// Tabbed sections, updates the record with this code
    Edit { code: String },
}

#[component]
pub fn EmployeeForm(
    mode: FormMode,
    /// Values to prefill; missing keys get the blank-form defaults
    #[prop(optional)]
    initial: BTreeMap<String, String>,
    on_saved: Callback<()>,
    #[prop(optional)]
    on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth();
    let editing = matches!(mode, FormMode::Edit { .. });

    let mut start = forms::blank_values();
    start.extend(initial);
    let values = create_rw_signal(start);

    let (problems, set_problems) = create_signal(Vec::<String>::new());
    let (api_error, set_api_error) = create_signal(None::<ApiError>);
    let (submitting, set_submitting) = create_signal(false);
    let gate = SubmitGate::new();
    let photo_ref = create_node_ref::<Input>();
    let cv_ref = create_node_ref::<Input>();

    let sections: Vec<&'static FormSection> = if editing {
        forms::edit_sections().collect()
    } else {
        EMPLOYEE_FORM.iter().collect()
    };
    let (active_tab, set_active_tab) = create_signal(sections.first().map(|s| s.tab).unwrap_or_default());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let current = values.get_untracked();
        if let Err(list) = forms::validate(&current) {
            set_problems.set(list);
            return;
        }
        set_problems.set(Vec::new());

        let Some(ticket) = gate.try_begin() else {
            return;
        };
        let form = match build_form_data(&current, &[(PHOTO_FIELD, photo_ref), (CV_FIELD, cv_ref)]) {
            Ok(form) => form,
            Err(e) => {
                set_api_error.set(Some(e));
                return;
            }
        };

        set_api_error.set(None);
        set_submitting.set(true);
        let client = auth.client();
        let mode = mode.clone();
        spawn_local(async move {
            let _ticket = ticket;
            let result = match &mode {
                FormMode::Add => client.create_employee(form).await,
                FormMode::Edit { code } => client.update_employee(code, form).await,
            };
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    if mode == FormMode::Add {
                        values.set(forms::blank_values());
                        for input in [photo_ref, cv_ref] {
                            if let Some(input) = input.get_untracked() {
                                input.set_value("");
                            }
                        }
                    }
                    on_saved.call(());
                }
                Err(e) => {
                    logging::warn!("employee save failed: {}", e.message);
                    set_api_error.set(Some(e));
                }
            }
        });
    };

    let tabs = editing.then(|| {
        let tab_buttons = forms::edit_tabs()
            .into_iter()
            .map(|tab| {
                view! {
                    <button
                        type="button"
                        class=move || if active_tab.get() == tab { "tab active" } else { "tab" }
                        on:click=move |_| set_active_tab.set(tab)
                    >
                        {tab}
                    </button>
                }
            })
            .collect_view();
        view! { <nav class="tabs">{tab_buttons}</nav> }
    });

    let section_views = sections
        .iter()
        .map(|section| {
            let id = section.id;
            let tab = section.tab;
            let readonly_code = editing;
            view! {
                <section class="form-section" class:hidden=move || editing && active_tab.get() != tab>
                    <h3>{section.title}</h3>
                    <div class="form-grid">
                        {section
                            .fields
                            .iter()
                            .map(|field| {
                                let readonly = readonly_code && field.name == CODE_FIELD;
                                view! { <FieldInput field=field values=values readonly=readonly/> }
                            })
                            .collect_view()}
                        {(id == "personal").then(|| view! {
                            <FileInput label="Profile Photo" name=PHOTO_FIELD accept=PHOTO_ACCEPT node_ref=photo_ref/>
                        })}
                        {(id == "skills").then(|| view! {
                            <FileInput label="Upload CV" name=CV_FIELD accept=CV_ACCEPT node_ref=cv_ref/>
                        })}
                    </div>
                </section>
            }
        })
        .collect_view();

    view! {
        <form class="employee-form" on:submit=on_submit>
            {tabs}
            {section_views}

            <Show when=move || !problems.get().is_empty()>
                <ul class="form-problems">
                    {move || problems.get().into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                </ul>
            </Show>
            {move || api_error.get().map(|error| view! {
                <ErrorAlert error=error on_dismiss=Callback::new(move |_| set_api_error.set(None))/>
            })}

            <div class="form-actions">
                {on_cancel.map(|on_cancel| view! {
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.call(())>
                        "Cancel"
                    </button>
                })}
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {move || match (submitting.get(), editing) {
                        (true, _) => "Saving...",
                        (false, true) => "Save Changes",
                        (false, false) => "Add Employee",
                    }}
                </button>
            </div>
        </form>
    }
}

#[component]
fn FieldInput(
    field: &'static FormField,
    values: RwSignal<BTreeMap<String, String>>,
    #[prop(optional)]
    readonly: bool,
) -> impl IntoView {
    let name = field.name;
    let value = move || values.with(|v| v.get(name).cloned().unwrap_or_default());
    let set = move |ev: ev::Event| {
        values.update(|v| {
            v.insert(name.to_string(), event_target_value(&ev));
        })
    };
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    let control = match field.kind {
        FieldKind::Select(options) => view! {
            <select name=name on:change=set disabled=readonly>
                {options
                    .iter()
                    .map(|option| {
                        let option = *option;
                        view! { <option value=option selected=move || value() == option>{option}</option> }
                    })
                    .collect_view()}
            </select>
        }
        .into_view(),
        FieldKind::TextArea => view! {
            <textarea name=name rows="3" prop:value=value on:input=set readonly=readonly></textarea>
        }
        .into_view(),
        kind => view! {
            <input
                type=kind.input_type()
                name=name
                prop:value=value
                on:input=set
                required=field.required
                readonly=readonly
            />
        }
        .into_view(),
    };

    view! {
        <div class="form-group">
            <label>{label}</label>
            {control}
        </div>
    }
}

#[component]
fn FileInput(
    label: &'static str,
    name: &'static str,
    accept: &'static str,
    node_ref: NodeRef<Input>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input type="file" name=name accept=accept node_ref=node_ref/>
        </div>
    }
}

/// Multipart body: every form value as a text part plus any chosen files
fn build_form_data(
    values: &BTreeMap<String, String>,
    files: &[(&str, NodeRef<Input>)],
) -> Result<web_sys::FormData, ApiError> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    for (name, value) in values {
        form.append_with_str(name, value).map_err(js_error)?;
    }
    for (name, input) in files {
        let file = input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        if let Some(file) = file {
            form.append_with_blob_and_filename(name, &file, &file.name())
                .map_err(js_error)?;
        }
    }
    Ok(form)
}
