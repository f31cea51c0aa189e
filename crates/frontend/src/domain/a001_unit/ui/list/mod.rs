use contracts::domain::a001_unit::Unit;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::components::form_fields::{checkbox_field, text_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("short_name", "Short name"),
        Column::new("status", "Status"),
    ])
}

fn cell(unit: &Unit, key: &'static str) -> AnyView {
    match key {
        "name" => unit.name.clone().into_any(),
        "short_name" => unit.short_name.clone().into_any(),
        "status" => status_badge(unit.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<Unit>, errors: RwSignal<ValidationErrors>) -> AnyView {
    view! {
        {text_field(draft, errors, "name", "Name", |u| u.name.clone(), |u, v| u.name = v)}
        {text_field(draft, errors, "short_name", "Short name", |u| u.short_name.clone(), |u, v| u.short_name = v)}
        {checkbox_field(draft, "Active", |u| u.status, |u, v| u.status = v)}
    }
    .into_any()
}

#[component]
pub fn UnitList() -> impl IntoView {
    let controller = ListController::new(RestService::<Unit>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
