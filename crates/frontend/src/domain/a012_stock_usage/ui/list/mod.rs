use contracts::domain::a007_product::Product;
use contracts::domain::a012_stock_usage::StockUsage;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::shared::components::form_fields::{date_field, number_field, select_field, textarea_field};
use crate::shared::crud::{Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::{format_date, format_quantity};
use crate::shared::lookup::{options_signal, use_lookup};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("usage_date", "Date"),
        Column::new("product", "Product"),
        Column::new("quantity", "Quantity"),
        Column::new("reason", "Reason"),
    ])
}

fn cell(usage: &StockUsage, key: &'static str) -> AnyView {
    match key {
        "usage_date" => format_date(&usage.usage_date).into_any(),
        "product" => usage.product_name.clone().into_any(),
        "quantity" => format_quantity(usage.quantity).into_any(),
        "reason" => usage.reason.clone().into_any(),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<StockUsage>, errors: RwSignal<ValidationErrors>) -> AnyView {
    let products = use_lookup::<Product>();
    view! {
        {select_field(draft, errors, "product_id", "Product", options_signal(products), |u| u.product_id, |u, v| u.product_id = v)}
        <div class="form-group form-group--summary">
            {move || {
                let id = draft.with(|u| u.product_id);
                products.with(|list| {
                    list.iter()
                        .find(|p| p.id == id && id.is_some())
                        .map(|p| format!("In stock: {}", format_quantity(p.stock_quantity)))
                })
            }}
        </div>
        {number_field(draft, errors, "quantity", "Quantity", |u| u.quantity, |u, v| u.quantity = v)}
        {date_field(draft, errors, "usage_date", "Date", |u| u.usage_date.clone(), |u, v| u.usage_date = v)}
        {textarea_field(draft, errors, "reason", "Reason", |u| u.reason.clone(), |u, v| u.reason = v)}
    }
    .into_any()
}

/// Stock consumed outside of sales.
#[component]
pub fn StockUsageList() -> impl IntoView {
    let controller = ListController::new(RestService::<StockUsage>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
