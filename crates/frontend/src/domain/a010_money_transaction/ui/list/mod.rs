use contracts::domain::a002_payment_method::PaymentMethod;
use contracts::domain::a003_transaction_category::{TransactionCategory, TransactionKind};
use contracts::domain::a010_money_transaction::MoneyTransaction;
use contracts::shared::validation::ValidationErrors;
use leptos::prelude::*;

use crate::domain::a003_transaction_category::ui::list::kind_badge;
use crate::shared::components::form_fields::{date_field, number_field, select_field, textarea_field};
use crate::shared::crud::{Column, Columns, CrudPage, ListController, RestService};
use crate::shared::format::{format_date, format_money};
use crate::shared::lookup::{options_signal, to_options, use_lookup};
use crate::system::auth::use_api;

fn columns() -> Columns {
    Columns::new(vec![
        Column::new("transaction_date", "Date"),
        Column::new("type", "Type"),
        Column::new("category", "Category"),
        Column::new("payment_method", "Payment method"),
        Column::new("amount", "Amount"),
        Column::hidden("note", "Note"),
    ])
}

fn cell(tx: &MoneyTransaction, key: &'static str) -> AnyView {
    match key {
        "transaction_date" => format_date(&tx.transaction_date).into_any(),
        "type" => kind_badge(tx.kind),
        "category" => tx.category_name.clone().into_any(),
        "payment_method" => tx.payment_method_name.clone().into_any(),
        "amount" => {
            let class = match tx.kind {
                TransactionKind::Income => "amount amount--positive",
                TransactionKind::Expense => "amount amount--negative",
            };
            view! { <span class=class>{format_money(tx.signed_amount())}</span> }.into_any()
        }
        "note" => tx.note.clone().into_any(),
        _ => ().into_any(),
    }
}

fn form(draft: RwSignal<MoneyTransaction>, errors: RwSignal<ValidationErrors>) -> AnyView {
    let categories = use_lookup::<TransactionCategory>();
    let methods = use_lookup::<PaymentMethod>();
    // Only categories of the selected kind
    let category_options = Signal::derive(move || {
        let kind = draft.with(|t| t.kind);
        categories.with(|all| {
            let matching: Vec<TransactionCategory> =
                all.iter().filter(|c| c.kind == kind).cloned().collect();
            to_options(&matching)
        })
    });

    let set_kind = move |kind: TransactionKind| {
        draft.update(|t| {
            if t.kind != kind {
                t.kind = kind;
                t.category_id = None;
            }
        });
    };

    view! {
        <div class="form-group">
            <label>"Type"</label>
            <div class="segmented">
                {[TransactionKind::Income, TransactionKind::Expense]
                    .into_iter()
                    .map(|kind| view! {
                        <button
                            type="button"
                            class="segmented__item"
                            class:segmented__item--active=move || draft.with(|t| t.kind == kind)
                            on:click=move |_| set_kind(kind)
                        >
                            {kind.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
        </div>
        {select_field(draft, errors, "category_id", "Category", category_options, |t| t.category_id, |t, v| t.category_id = v)}
        {select_field(draft, errors, "payment_method_id", "Payment method", options_signal(methods), |t| t.payment_method_id, |t, v| t.payment_method_id = v)}
        {number_field(draft, errors, "amount", "Amount", |t| t.amount, |t, v| t.amount = v)}
        {date_field(draft, errors, "transaction_date", "Date", |t| t.transaction_date.clone(), |t, v| t.transaction_date = v)}
        {textarea_field(draft, errors, "note", "Note", |t| t.note.clone(), |t, v| t.note = v)}
    }
    .into_any()
}

/// Income and expense entries.
#[component]
pub fn MoneyTransactionList() -> impl IntoView {
    let controller =
        ListController::new(RestService::<MoneyTransaction>::new(use_api()), columns());
    view! { <CrudPage controller=controller cell=cell form=form /> }
}
