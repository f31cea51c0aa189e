use contracts::domain::a007_product::Product;
use contracts::domain::a011_bom::{Bom, BomComponent, BomCost};
use contracts::domain::common::EntityId;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form_fields::{checkbox_field, number_field, select_field, text_field};
use crate::shared::crud::{field_errors, status_badge, Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::{format_money, format_quantity, parse_amount};
use crate::shared::icons::icon;
use crate::shared::lookup::{options_signal, use_lookup};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("name", "Name"),
        Column::new("product", "Product"),
        Column::new("output_quantity", "Output"),
        Column::new("materials", "Materials"),
        Column::hidden("extra_cost", "Extra cost"),
        Column::new("total_cost", "Total cost"),
        Column::new("unit_cost", "Unit cost"),
        Column::new("status", "Status"),
    ])
}

fn cell(bom: &Bom, key: &'static str) -> AnyView {
    match key {
        "name" => bom.name.clone().into_any(),
        "product" => bom.product_name.clone().into_any(),
        "output_quantity" => format_quantity(bom.output_quantity).into_any(),
        "materials" => bom.components.len().to_string().into_any(),
        "extra_cost" => format_money(bom.extra_cost).into_any(),
        "total_cost" => format_money(bom.cost().total_cost).into_any(),
        "unit_cost" => format_money(bom.cost().unit_cost).into_any(),
        "status" => status_badge(bom.status),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<Bom>, errors: RwSignal<ValidationErrors>) -> AnyView {
    let products = use_lookup::<Product>();
    let product_options = options_signal(products);
    let cost = Memo::new(move |_| draft.with(Bom::cost));

    view! {
        {text_field(draft, errors, "name", "Name", |b| b.name.clone(), |b, v| b.name = v)}
        {select_field(
            draft,
            errors,
            "product_id",
            "Finished product",
            product_options,
            |b| b.product_id,
            |b, v| b.product_id = v,
        )}
        {number_field(draft, errors, "output_quantity", "Output quantity", |b| b.output_quantity, |b, v| b.output_quantity = v)}

        <div class="form-group">
            <label>"Materials"</label>
            <table class="table__data bom-components">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">"Material"</th>
                        <th class="table__header-cell">"Qty"</th>
                        <th class="table__header-cell">"Unit cost"</th>
                        <th class="table__header-cell">"Cost"</th>
                        <th class="table__header-cell table__header-cell--actions"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || 0..draft.with(|b| b.components.len())
                        key=|index| *index
                        children=move |index| component_row(draft, index, products, product_options)
                    />
                </tbody>
            </table>
            {field_errors(errors, "components")}
            <Button
                size=ButtonSize::Small
                on_click=move |_| draft.update(|b| b.components.push(BomComponent::blank()))
            >
                {icon("plus")}
                "Add material"
            </Button>
        </div>

        {number_field(draft, errors, "extra_cost", "Extra cost", |b| b.extra_cost, |b, v| b.extra_cost = v)}
        {cost_summary(cost)}
        {checkbox_field(draft, "Active", |b| b.status, |b, v| b.status = v)}
    }
    .into_any()
}

fn component_row(
    draft: RwSignal<Bom>,
    index: usize,
    products: RwSignal<Vec<Product>>,
    product_options: Signal<Vec<(EntityId, String)>>,
) -> impl IntoView {
    let current = move || draft.with(|b| b.components.get(index).and_then(|c| c.product_id));
    let value_of = move |f: fn(&BomComponent) -> f64| {
        draft.with(|b| b.components.get(index).map(f).unwrap_or_default())
    };
    let edit = move |f: fn(&mut BomComponent, f64), value: f64| {
        draft.update(|b| {
            if let Some(component) = b.components.get_mut(index) {
                f(component, value);
            }
        });
    };

    let on_material = move |value: String| {
        let product = value
            .parse::<EntityId>()
            .ok()
            .and_then(|id| products.with(|list| list.iter().find(|p| p.id == Some(id)).cloned()));
        draft.update(|b| {
            if let Some(component) = b.components.get_mut(index) {
                match product {
                    Some(product) => {
                        component.product_id = product.id;
                        component.product_name = product.name;
                        component.unit_cost = product.purchase_price;
                    }
                    None => {
                        component.product_id = None;
                        component.product_name.clear();
                    }
                }
            }
        });
    };

    view! {
        <tr class="table__row">
            <td class="table__cell">
                <select class="table__input" on:change=move |ev| on_material(event_target_value(&ev))>
                    <option value="" selected=move || current().is_none()>"-- Material --"</option>
                    {move || {
                        let selected = current();
                        product_options
                            .get()
                            .into_iter()
                            .map(|(value, text)| view! {
                                <option value=value.to_string() selected=selected == Some(value)>{text}</option>
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td class="table__cell">
                <input
                    type="number"
                    step="any"
                    class="table__input"
                    prop:value=move || value_of(|c| c.quantity).to_string()
                    on:change=move |ev| edit(|c, v| c.quantity = v, parse_amount(&event_target_value(&ev)))
                />
            </td>
            <td class="table__cell">
                <input
                    type="number"
                    step="any"
                    class="table__input"
                    prop:value=move || value_of(|c| c.unit_cost).to_string()
                    on:change=move |ev| edit(|c, v| c.unit_cost = v, parse_amount(&event_target_value(&ev)))
                />
            </td>
            <td class="table__cell table__cell--number">
                {move || format_money(value_of(BomComponent::cost))}
            </td>
            <td class="table__cell table__cell--actions">
                <button
                    class="button button--ghost button--danger"
                    title="Remove material"
                    on:click=move |_| draft.update(|b| {
                        if index < b.components.len() {
                            b.components.remove(index);
                        }
                    })
                >
                    {icon("delete")}
                </button>
            </td>
        </tr>
    }
}

fn cost_summary(cost: Memo<BomCost>) -> impl IntoView {
    let row = move |label: &'static str, value: fn(&BomCost) -> f64| {
        view! {
            <div class="totals__row">
                <span class="totals__label">{label}</span>
                <span class="totals__value">{move || format_money(cost.with(value))}</span>
            </div>
        }
    };
    view! {
        <div class="totals">
            {row("Materials", |c| c.material_cost)}
            {row("Extra", |c| c.extra_cost)}
            {row("Total", |c| c.total_cost)}
            {row("Per unit", |c| c.unit_cost)}
        </div>
    }
}

#[component]
pub fn BomList() -> impl IntoView {
    let controller = ListController::new(RestService::<Bom>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
