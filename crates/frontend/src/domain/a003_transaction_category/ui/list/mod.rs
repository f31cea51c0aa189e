use contracts::domain::a003_transaction_category::{TransactionCategory, TransactionKind};
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form_fields::{checkbox_field, text_field, textarea_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("type", "Type"),
        Column::new("description", "Description"),
        Column::new("status", "Status"),
    ])
}

pub fn kind_badge(kind: TransactionKind) -> AnyView {
    let color = match kind {
        TransactionKind::Income => BadgeColor::Success,
        TransactionKind::Expense => BadgeColor::Warning,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{kind.label()}</Badge> }.into_any()
}

fn cell(category: &TransactionCategory, key: &'static str) -> AnyView {
    match key {
        "name" => category.name.clone().into_any(),
        "type" => kind_badge(category.kind),
        "description" => category.description.clone().into_any(),
        "status" => status_badge(category.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<TransactionCategory>, errors: RwSignal<ValidationErrors>) -> AnyView {
    view! {
        {text_field(draft, errors, "name", "Name", |c| c.name.clone(), |c, v| c.name = v)}
        <div class="form-group">
            <label for="field-type">"Type"</label>
            <select
                id="field-type"
                on:change=move |ev| {
                    if let Some(kind) = TransactionKind::parse(&event_target_value(&ev)) {
                        draft.update(|c| c.kind = kind);
                    }
                }
            >
                {[TransactionKind::Income, TransactionKind::Expense]
                    .into_iter()
                    .map(|kind| view! {
                        <option
                            value=kind.as_str()
                            selected=move || draft.with(|c| c.kind == kind)
                        >
                            {kind.label()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
        {textarea_field(draft, errors, "description", "Description", |c| c.description.clone(), |c, v| c.description = v)}
        {checkbox_field(draft, "Active", |c| c.status, |c, v| c.status = v)}
    }
    .into_any()
}

#[component]
pub fn TransactionCategoryList() -> impl IntoView {
    let controller =
        ListController::new(RestService::<TransactionCategory>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
