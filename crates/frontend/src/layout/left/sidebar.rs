//! Navigation menu. Each item opens (or focuses) its tab.

use contracts::system::auth::ROLE_ADMIN;
use leptos::prelude::*;

use crate::layout::global_context::use_tabs;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::PROFIT_AND_LOSS;
use crate::shared::icons::icon;
use crate::system::auth::use_auth;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
    admin_only: bool,
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "documents",
            label: "Documents",
            icon: "sales",
            items: vec![
                ("a008_sale", "sales"),
                ("a009_purchase", "purchases"),
                ("a010_money_transaction", "transactions"),
                ("a012_stock_usage", "stock-usage"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "catalog",
            label: "Catalog",
            icon: "products",
            items: vec![
                ("a007_product", "products"),
                ("a001_unit", "units"),
                ("a011_bom", "bom"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "contacts",
            label: "Contacts",
            icon: "customers",
            items: vec![("a004_customer", "customers"), ("a005_supplier", "suppliers")],
            admin_only: false,
        },
        MenuGroup {
            id: "finance",
            label: "Finance",
            icon: "transactions",
            items: vec![
                ("a002_payment_method", "payment-methods"),
                ("a003_transaction_category", "categories"),
                (PROFIT_AND_LOSS, "report"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "staff",
            label: "Staff",
            icon: "employees",
            items: vec![("a006_employee", "employees")],
            admin_only: true,
        },
    ]
}

fn visible_groups(is_admin: bool) -> Vec<MenuGroup> {
    menu_groups()
        .into_iter()
        .filter(|group| is_admin || !group.admin_only)
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_tabs();
    let (auth_state, _) = use_auth();
    let expanded_groups = RwSignal::new(vec!["documents"]);

    let groups = move || visible_groups(auth_state.with(|s| s.has_role(ROLE_ADMIN)));

    view! {
        <div class="app-sidebar__content">
            {move || groups().into_iter().map(|group| {
                let group_id = group.id;
                let is_expanded = move || expanded_groups.with(|g| g.contains(&group_id));
                let toggle = move |_| {
                    expanded_groups.update(|items| {
                        if let Some(pos) = items.iter().position(|x| *x == group_id) {
                            items.remove(pos);
                        } else {
                            items.push(group_id);
                        }
                    });
                };

                let children = group.items.iter().map(|&(key, icon_name)| {
                    let label = tab_label_for_key(key).unwrap_or_else(|| key.to_string());
                    let title = label.clone();
                    view! {
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.tabs.with(|t| t.is_active(key))
                            style:padding-left="10px"
                            on:click=move |_| ctx.open_tab(key, &title)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(icon_name)}
                                <span>{label}</span>
                            </div>
                        </div>
                    }
                }).collect_view();

                view! {
                    <div>
                        <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle>
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=is_expanded
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <div class="app-sidebar__children" class:hidden=move || !is_expanded()>
                            {children}
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_groups_hidden_for_staff() {
        let ids = |admin| visible_groups(admin).iter().map(|g| g.id).collect::<Vec<_>>();
        assert!(!ids(false).contains(&"staff"));
        assert!(ids(true).contains(&"staff"));
    }

    #[test]
    fn test_every_item_has_a_label() {
        for group in menu_groups() {
            for (key, _) in group.items {
                assert!(tab_label_for_key(key).is_some(), "no label for {}", key);
            }
        }
    }
}
