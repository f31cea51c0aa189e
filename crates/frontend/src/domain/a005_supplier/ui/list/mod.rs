use contracts::domain::a005_supplier::Supplier;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::components::form_fields::{checkbox_field, text_field, textarea_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::format_money;
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("company_name", "Company"),
        Column::new("phone", "Phone"),
        Column::hidden("email", "Email"),
        Column::hidden("address", "Address"),
        Column::new("total_due", "Payable"),
        Column::new("status", "Status"),
    ])
}

fn cell(supplier: &Supplier, key: &'static str) -> AnyView {
    match key {
        "name" => supplier.name.clone().into_any(),
        "company_name" => supplier.company_name.clone().into_any(),
        "phone" => supplier.phone.clone().into_any(),
        "email" => supplier.email.clone().into_any(),
        "address" => supplier.address.clone().into_any(),
        "total_due" => format_money(supplier.total_due.unwrap_or(0.0)).into_any(),
        "status" => status_badge(supplier.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<Supplier>, errors: RwSignal<ValidationErrors>) -> AnyView {
    view! {
        {text_field(draft, errors, "name", "Name", |s| s.name.clone(), |s, v| s.name = v)}
        {text_field(draft, errors, "company_name", "Company", |s| s.company_name.clone(), |s, v| s.company_name = v)}
        {text_field(draft, errors, "phone", "Phone", |s| s.phone.clone(), |s, v| s.phone = v)}
        {text_field(draft, errors, "email", "Email", |s| s.email.clone(), |s, v| s.email = v)}
        {textarea_field(draft, errors, "address", "Address", |s| s.address.clone(), |s, v| s.address = v)}
        {checkbox_field(draft, "Active", |s| s.status, |s, v| s.status = v)}
    }
    .into_any()
}

#[component]
pub fn SupplierList() -> impl IntoView {
    let controller = ListController::new(RestService::<Supplier>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
