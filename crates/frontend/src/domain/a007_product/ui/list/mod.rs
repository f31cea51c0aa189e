use contracts::domain::a001_unit::Unit;
use contracts::domain::a007_product::Product;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form_fields::{checkbox_field, number_field, select_field, text_field};
use crate::shared::crud::{status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::{format_money, format_quantity};
use crate::shared::lookup::{options_signal, use_lookup};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("sku", "SKU"),
        Column::new("unit", "Unit"),
        Column::new("purchase_price", "Purchase price"),
        Column::new("sale_price", "Sale price"),
        Column::hidden("margin", "Margin"),
        Column::new("stock_quantity", "Stock"),
        Column::hidden("stock_value", "Stock value"),
        Column::hidden("sort_sequence", "Order"),
        Column::new("status", "Status"),
    ])
}

fn stock_cell(product: &Product) -> AnyView {
    let quantity = format_quantity(product.stock_quantity);
    if product.needs_reorder() {
        view! {
            <span class="stock stock--low" title="At or below reorder level">
                {quantity}
                " "
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>"Reorder"</Badge>
            </span>
        }
        .into_any()
    } else {
        view! { <span class="stock">{quantity}</span> }.into_any()
    }
}

fn cell(product: &Product, key: &'static str) -> AnyView {
    match key {
        "name" => product.name.clone().into_any(),
        "sku" => product.sku.clone().into_any(),
        "unit" => product.unit_name.clone().unwrap_or_default().into_any(),
        "purchase_price" => format_money(product.purchase_price).into_any(),
        "sale_price" => format_money(product.sale_price).into_any(),
        "margin" => format_money(product.margin()).into_any(),
        "stock_quantity" => stock_cell(product),
        "stock_value" => format_money(product.stock_value()).into_any(),
        "sort_sequence" => product
            .sort_sequence
            .map(|s| s.to_string())
            .unwrap_or_default()
            .into_any(),
        "status" => status_badge(product.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<Product>, errors: RwSignal<ValidationErrors>) -> AnyView {
    let units = use_lookup::<Unit>();
    view! {
        {text_field(draft, errors, "name", "Name", |p| p.name.clone(), |p, v| p.name = v)}
        {text_field(draft, errors, "sku", "SKU", |p| p.sku.clone(), |p, v| p.sku = v)}
        {select_field(draft, errors, "unit_id", "Unit", options_signal(units), |p| p.unit_id, |p, v| p.unit_id = v)}
        {number_field(draft, errors, "purchase_price", "Purchase price", |p| p.purchase_price, |p, v| p.purchase_price = v)}
        {number_field(draft, errors, "sale_price", "Sale price", |p| p.sale_price, |p, v| p.sale_price = v)}
        {number_field(draft, errors, "stock_quantity", "Opening stock", |p| p.stock_quantity, |p, v| p.stock_quantity = v)}
        {number_field(draft, errors, "reorder_level", "Reorder level", |p| p.reorder_level, |p, v| p.reorder_level = v)}
        {text_field(
            draft,
            errors,
            "sort_sequence",
            "Display order",
            |p| p.sort_sequence.map(|s| s.to_string()).unwrap_or_default(),
            |p, v| p.sort_sequence = v.trim().parse().ok(),
        )}
        <div class="form-group form-group--summary">
            "Margin per unit: "
            {move || format_money(draft.with(|p| p.margin()))}
        </div>
        {checkbox_field(draft, "Active", |p| p.status, |p, v| p.status = v)}
    }
    .into_any()
}

#[component]
pub fn ProductList() -> impl IntoView {
    let controller = ListController::new(RestService::<Product>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
