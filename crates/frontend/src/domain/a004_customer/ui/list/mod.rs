use contracts::domain::a004_customer::Customer;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::components::form_fields::{checkbox_field, number_field, text_field, textarea_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::format_money;
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("phone", "Phone"),
        Column::hidden("email", "Email"),
        Column::hidden("address", "Address"),
        Column::new("total_due", "Due"),
        Column::new("status", "Status"),
    ])
}

fn cell(customer: &Customer, key: &'static str) -> AnyView {
    match key {
        "name" => customer.name.clone().into_any(),
        "phone" => customer.phone.clone().into_any(),
        "email" => customer.email.clone().into_any(),
        "address" => customer.address.clone().into_any(),
        "total_due" => format_money(customer.total_due.unwrap_or(customer.opening_due)).into_any(),
        "status" => status_badge(customer.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<Customer>, errors: RwSignal<ValidationErrors>) -> AnyView {
    view! {
        {text_field(draft, errors, "name", "Name", |c| c.name.clone(), |c, v| c.name = v)}
        {text_field(draft, errors, "phone", "Phone", |c| c.phone.clone(), |c, v| c.phone = v)}
        {text_field(draft, errors, "email", "Email", |c| c.email.clone(), |c, v| c.email = v)}
        {textarea_field(draft, errors, "address", "Address", |c| c.address.clone(), |c, v| c.address = v)}
        {number_field(draft, errors, "opening_due", "Opening due", |c| c.opening_due, |c, v| c.opening_due = v)}
        {checkbox_field(draft, "Active", |c| c.status, |c, v| c.status = v)}
    }
    .into_any()
}

#[component]
pub fn CustomerList() -> impl IntoView {
    let controller = ListController::new(RestService::<Customer>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
