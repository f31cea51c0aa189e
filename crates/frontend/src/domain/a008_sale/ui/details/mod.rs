use contracts::domain::a008_sale::Sale;
use contracts::domain::common::EntityId;
use leptos::prelude::*;

use crate::shared::invoice::InvoiceEditor;

#[component]
pub fn SaleDetails(id: Option<EntityId>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    view! { <InvoiceEditor<Sale> id=id on_close=on_close /> }
}
