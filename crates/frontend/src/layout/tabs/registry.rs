//! Tab key → view. Every screen reachable from a tab is listed here.

use contracts::system::auth::ROLE_ADMIN;
use leptos::prelude::*;

use super::tab_labels::{detail_id, PROFIT_AND_LOSS};
use crate::dashboards::ProfitAndLossReport;
use crate::domain::a001_unit::ui::list::UnitList;
use crate::domain::a002_payment_method::ui::list::PaymentMethodList;
use crate::domain::a003_transaction_category::ui::list::TransactionCategoryList;
use crate::domain::a004_customer::ui::list::CustomerList;
use crate::domain::a005_supplier::ui::list::SupplierList;
use crate::domain::a006_employee::ui::list::EmployeeList;
use crate::domain::a007_product::ui::list::ProductList;
use crate::domain::a008_sale::ui::details::SaleDetails;
use crate::domain::a008_sale::ui::list::SaleList;
use crate::domain::a009_purchase::ui::details::PurchaseDetails;
use crate::domain::a009_purchase::ui::list::PurchaseList;
use crate::domain::a010_money_transaction::ui::list::MoneyTransactionList;
use crate::domain::a011_bom::ui::list::BomList;
use crate::domain::a012_stock_usage::ui::list::StockUsageList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::auth::RequireRole;

/// Content of the tab with the given key.
///
/// Detail views get an `on_close` that closes their own tab.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));

    match key {
        "a001_unit" => view! { <UnitList /> }.into_any(),
        "a002_payment_method" => view! { <PaymentMethodList /> }.into_any(),
        "a003_transaction_category" => view! { <TransactionCategoryList /> }.into_any(),
        "a004_customer" => view! { <CustomerList /> }.into_any(),
        "a005_supplier" => view! { <SupplierList /> }.into_any(),
        "a006_employee" => view! {
            <RequireRole roles=vec![ROLE_ADMIN]>
                <EmployeeList />
            </RequireRole>
        }
        .into_any(),
        "a007_product" => view! { <ProductList /> }.into_any(),

        "a008_sale" => view! { <SaleList /> }.into_any(),
        "a008_sale_new" => view! { <SaleDetails id=None on_close=on_close /> }.into_any(),
        k if k.starts_with("a008_sale_detail_") => match detail_id(k, "a008_sale_detail_") {
            Some(id) => view! { <SaleDetails id=Some(id) on_close=on_close /> }.into_any(),
            None => unknown(k),
        },

        "a009_purchase" => view! { <PurchaseList /> }.into_any(),
        "a009_purchase_new" => view! { <PurchaseDetails id=None on_close=on_close /> }.into_any(),
        k if k.starts_with("a009_purchase_detail_") => match detail_id(k, "a009_purchase_detail_") {
            Some(id) => view! { <PurchaseDetails id=Some(id) on_close=on_close /> }.into_any(),
            None => unknown(k),
        },

        "a010_money_transaction" => view! { <MoneyTransactionList /> }.into_any(),
        "a011_bom" => view! { <BomList /> }.into_any(),
        "a012_stock_usage" => view! { <StockUsageList /> }.into_any(),

        PROFIT_AND_LOSS => view! { <ProfitAndLossReport /> }.into_any(),

        k => unknown(k),
    }
}

fn unknown(key: &str) -> AnyView {
    log::warn!("Unknown tab key: {}", key);
    view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
}
