use contracts::domain::a009_purchase::Purchase;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::invoice::InvoiceEditor;

#[component]
pub fn PurchaseDetails(id: Option<EntityId>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    view! { <InvoiceEditor<Purchase> id=id on_close=on_close /> }
}
