use contracts::domain::a002_payment_method::PaymentMethod;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::components::form_fields::{checkbox_field, number_field, text_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::format_money;
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("account_number", "Account number"),
        Column::hidden("opening_balance", "Opening balance"),
        Column::new("current_balance", "Balance"),
        Column::new("status", "Status"),
    ])
}

fn cell(method: &PaymentMethod, key: &'static str) -> AnyView {
    match key {
        "name" => method.name.clone().into_any(),
        "account_number" => method.account_number.clone().into_any(),
        "opening_balance" => format_money(method.opening_balance).into_any(),
        "current_balance" => method
            .current_balance
            .map(format_money)
            .unwrap_or_else(|| "-".to_string())
            .into_any(),
        "status" => status_badge(method.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<PaymentMethod>, errors: RwSignal<ValidationErrors>) -> AnyView {
    view! {
        {text_field(draft, errors, "name", "Name", |m| m.name.clone(), |m, v| m.name = v)}
        {text_field(draft, errors, "account_number", "Account number", |m| m.account_number.clone(), |m, v| m.account_number = v)}
        {number_field(draft, errors, "opening_balance", "Opening balance", |m| m.opening_balance, |m, v| m.opening_balance = v)}
        {checkbox_field(draft, "Active", |m| m.status, |m, v| m.status = v)}
    }
    .into_any()
}

#[component]
pub fn PaymentMethodList() -> impl IntoView {
    let controller = ListController::new(RestService::<PaymentMethod>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
