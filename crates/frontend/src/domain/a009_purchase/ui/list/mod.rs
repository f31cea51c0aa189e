use contracts::domain::a009_purchase::Purchase;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::layout::global_context::use_tabs;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::crud::{CrudPage, ListController, RestService};
use crate::shared::invoice::{invoice_cell, invoice_columns, pdf_action};
use crate::system::auth::use_api;

pub fn detail_tab_key(id: Option<EntityId>) -> String {
    match id {
        Some(id) => format!("a009_purchase_detail_{}", id),
        None => "a009_purchase_new".to_string(),
    }
}

#[component]
pub fn PurchaseList() -> impl IntoView {
    let tabs = use_tabs();
    let controller = ListController::new(RestService::<Purchase>::new(use_api()), invoice_columns("Supplier"));
    let on_open = Callback::new(move |id: Option<EntityId>| {
        let key = detail_tab_key(id);
        let title = tab_label_for_key(&key).unwrap_or_else(|| key.clone());
        tabs.open_tab(&key, &title);
    });

    view! {
        <CrudPage
            controller=controller
            cell={invoice_cell::<Purchase>}
            on_open=on_open
            row_actions={pdf_action::<Purchase>}
        />
    }
}
