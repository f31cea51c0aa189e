//! Labelled inputs bound to one field of a draft record.
//!
//! Getters and setters are plain fn pointers so entity forms stay one line
//! per field: `text_field(draft, errors, "name", "Name", |u| u.name.clone(), |u, v| u.name = v)`.

use contracts::domain::common::EntityId;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::crud::field_errors;
use crate::shared::format::parse_amount;

fn field_id(field: &'static str) -> String {
    format!("field-{}", field.replace('.', "-"))
}

pub fn text_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    label: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> AnyView {
    typed_field(draft, errors, field, label, "text", get, set)
}

pub fn date_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    label: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> AnyView {
    typed_field(draft, errors, field, label, "date", get, set)
}

fn typed_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    label: &'static str,
    input_type: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> AnyView {
    let id = field_id(field);
    view! {
        <div class="form-group" class:form-group--invalid=move || errors.with(|e| !e.field(field).is_empty())>
            <label for=id.clone()>{label}</label>
            <input
                type=input_type
                id=id
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
            {field_errors(errors, field)}
        </div>
    }
    .into_any()
}

pub fn textarea_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    label: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> AnyView {
    let id = field_id(field);
    view! {
        <div class="form-group">
            <label for=id.clone()>{label}</label>
            <textarea
                id=id
                rows="3"
                prop:value=move || draft.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            ></textarea>
            {field_errors(errors, field)}
        </div>
    }
    .into_any()
}

/// Numeric input, committed on change so partial text like "1." survives
/// typing. Text that does not parse becomes zero.
pub fn number_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    label: &'static str,
    get: fn(&T) -> f64,
    set: fn(&mut T, f64),
) -> AnyView {
    let id = field_id(field);
    view! {
        <div class="form-group" class:form-group--invalid=move || errors.with(|e| !e.field(field).is_empty())>
            <label for=id.clone()>{label}</label>
            <input
                type="number"
                step="any"
                id=id
                prop:value=move || draft.with(get).to_string()
                on:change=move |ev| {
                    let value = parse_amount(&event_target_value(&ev));
                    draft.update(|d| set(d, value));
                }
            />
            {field_errors(errors, field)}
        </div>
    }
    .into_any()
}

pub fn checkbox_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    label: &'static str,
    get: fn(&T) -> bool,
    set: fn(&mut T, bool),
) -> AnyView {
    view! {
        <div class="form-group form-group--inline">
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(get)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        draft.update(|d| set(d, checked));
                    }
                />
                {label}
            </label>
        </div>
    }
    .into_any()
}

/// Select over `(id, label)` options loaded elsewhere. The empty option
/// maps to `None`.
pub fn select_field<T: Send + Sync + 'static>(
    draft: RwSignal<T>,
    errors: RwSignal<ValidationErrors>,
    field: &'static str,
    label: &'static str,
    options: Signal<Vec<(EntityId, String)>>,
    get: fn(&T) -> Option<EntityId>,
    set: fn(&mut T, Option<EntityId>),
) -> AnyView {
    let id = field_id(field);
    view! {
        <div class="form-group" class:form-group--invalid=move || errors.with(|e| !e.field(field).is_empty())>
            <label for=id.clone()>{label}</label>
            <select
                id=id
                on:change=move |ev| {
                    let value = event_target_value(&ev).parse::<EntityId>().ok();
                    draft.update(|d| set(d, value));
                }
            >
                <option value="" selected=move || draft.with(get).is_none()>"-- Select --"</option>
                {move || {
                    let current = draft.with(get);
                    options
                        .get()
                        .into_iter()
                        .map(|(value, text)| {
                            view! {
                                <option value=value.to_string() selected=current == Some(value)>
                                    {text}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            {field_errors(errors, field)}
        </div>
    }
    .into_any()
}
