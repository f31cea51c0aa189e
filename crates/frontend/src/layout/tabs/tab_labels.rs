//! Titles of tabs, derived from the entity names where one exists.

use contracts::domain::a001_unit::Unit;
use contracts::domain::a002_payment_method::PaymentMethod;
use contracts::domain::a003_transaction_category::TransactionCategory;
use contracts::domain::a004_customer::Customer;
use contracts::domain::a005_supplier::Supplier;
use contracts::domain::a006_employee::Employee;
use contracts::domain::a007_product::Product;
use contracts::domain::a008_sale::Sale;
use contracts::domain::a009_purchase::Purchase;
use contracts::domain::a010_money_transaction::MoneyTransaction;
use contracts::domain::a011_bom::Bom;
use contracts::domain::a012_stock_usage::StockUsage;
use contracts::domain::common::{CrudEntity, EntityId};

pub const PROFIT_AND_LOSS: &str = "d400_profit_and_loss";

/// `a008_sale_detail_5` → `Some(5)` for the given prefix.
pub fn detail_id(key: &str, prefix: &str) -> Option<EntityId> {
    key.strip_prefix(prefix)?.parse().ok()
}

fn document_label<E: CrudEntity>(key: &str, base: &str) -> Option<String> {
    if key == base {
        return Some(E::list_name().to_string());
    }
    if key.strip_prefix(base) == Some("_new") {
        return Some(format!("New {}", E::element_name().to_lowercase()));
    }
    detail_id(key, &format!("{}_detail_", base)).map(|id| format!("{} #{}", E::element_name(), id))
}

/// Title for a tab key, `None` for keys no screen answers to.
pub fn tab_label_for_key(key: &str) -> Option<String> {
    let label = match key {
        "a001_unit" => Unit::list_name(),
        "a002_payment_method" => PaymentMethod::list_name(),
        "a003_transaction_category" => TransactionCategory::list_name(),
        "a004_customer" => Customer::list_name(),
        "a005_supplier" => Supplier::list_name(),
        "a006_employee" => Employee::list_name(),
        "a007_product" => Product::list_name(),
        "a010_money_transaction" => MoneyTransaction::list_name(),
        "a011_bom" => Bom::list_name(),
        "a012_stock_usage" => StockUsage::list_name(),
        PROFIT_AND_LOSS => "Profit and loss",
        k => {
            return document_label::<Sale>(k, "a008_sale")
                .or_else(|| document_label::<Purchase>(k, "a009_purchase"))
        }
    };
    Some(label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keys() {
        assert_eq!(tab_label_for_key("a001_unit").as_deref(), Some(Unit::list_name()));
        assert_eq!(tab_label_for_key("a008_sale").as_deref(), Some("Sales"));
        assert_eq!(tab_label_for_key(PROFIT_AND_LOSS).as_deref(), Some("Profit and loss"));
    }

    #[test]
    fn test_document_keys() {
        assert_eq!(tab_label_for_key("a008_sale_new").as_deref(), Some("New sale"));
        assert_eq!(tab_label_for_key("a009_purchase_detail_12").as_deref(), Some("Purchase #12"));
        assert_eq!(tab_label_for_key("a008_sale_detail_x"), None);
        assert_eq!(tab_label_for_key("a008_sale_newer"), None);
        assert_eq!(tab_label_for_key("nope"), None);
    }

    #[test]
    fn test_detail_id() {
        assert_eq!(detail_id("a008_sale_detail_42", "a008_sale_detail_"), Some(42));
        assert_eq!(detail_id("a008_sale", "a008_sale_detail_"), None);
    }
}
