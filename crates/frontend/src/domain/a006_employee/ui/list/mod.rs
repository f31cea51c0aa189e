use contracts::domain::a006_employee::Employee;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::components::form_fields::{checkbox_field, date_field, number_field, text_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::{format_date, format_money};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("designation", "Designation"),
        Column::new("phone", "Phone"),
        Column::hidden("email", "Email"),
        Column::new("salary", "Salary"),
        Column::hidden("joining_date", "Joined"),
        Column::new("status", "Status"),
    ])
}

fn cell(employee: &Employee, key: &'static str) -> AnyView {
    match key {
        "name" => employee.name.clone().into_any(),
        "designation" => employee.designation.clone().into_any(),
        "phone" => employee.phone.clone().into_any(),
        "email" => employee.email.clone().into_any(),
        "salary" => format_money(employee.salary).into_any(),
        "joining_date" => format_date(&employee.joining_date).into_any(),
        "status" => status_badge(employee.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<Employee>, errors: RwSignal<ValidationErrors>) -> AnyView {
    view! {
        {text_field(draft, errors, "name", "Name", |e| e.name.clone(), |e, v| e.name = v)}
        {text_field(draft, errors, "designation", "Designation", |e| e.designation.clone(), |e, v| e.designation = v)}
        {text_field(draft, errors, "phone", "Phone", |e| e.phone.clone(), |e, v| e.phone = v)}
        {text_field(draft, errors, "email", "Email", |e| e.email.clone(), |e, v| e.email = v)}
        {number_field(draft, errors, "salary", "Salary", |e| e.salary, |e, v| e.salary = v)}
        {date_field(draft, errors, "joining_date", "Joining date", |e| e.joining_date.clone(), |e, v| e.joining_date = v)}
        {checkbox_field(draft, "Active", |e| e.status, |e, v| e.status = v)}
    }
    .into_any()
}

#[component]
pub fn EmployeeList() -> impl IntoView {
    let controller = ListController::new(RestService::<Employee>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
