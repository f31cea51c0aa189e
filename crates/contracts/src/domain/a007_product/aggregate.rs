use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId};
use crate::shared::money::round2;
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub unit_id: Option<EntityId>,
    /// Joined from the unit, read-only
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default)]
    pub sale_price: f64,
    /// Maintained by the server from purchases, sales and usage
    #[serde(default)]
    pub stock_quantity: f64,
    #[serde(default)]
    pub reorder_level: f64,
    #[serde(default)]
    pub sort_sequence: Option<i32>,
    #[serde(default = "default_true")]
    pub status: bool,
}

impl Product {
    pub fn margin(&self) -> f64 {
        round2(self.sale_price - self.purchase_price)
    }

    pub fn needs_reorder(&self) -> bool {
        self.reorder_level > 0.0 && self.stock_quantity <= self.reorder_level
    }

    pub fn stock_value(&self) -> f64 {
        round2(self.stock_quantity * self.purchase_price)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub name: String,
    pub sku: String,
    pub unit_id: Option<EntityId>,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub reorder_level: f64,
    pub sort_sequence: Option<i32>,
    pub status: bool,
}

impl CrudEntity for Product {
    type Dto = ProductDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        if self.sku.is_empty() {
            self.name.clone()
        } else {
            format!("{} [{}]", self.name, self.sku)
        }
    }

    fn status(&self) -> Option<bool> {
        Some(self.status)
    }

    fn set_status(&mut self, active: bool) {
        self.status = active;
    }

    fn sort_sequence(&self) -> Option<i32> {
        self.sort_sequence
    }

    fn create_new() -> Self {
        Self {
            id: None,
            name: String::new(),
            sku: String::new(),
            unit_id: None,
            unit_name: None,
            purchase_price: 0.0,
            sale_price: 0.0,
            stock_quantity: 0.0,
            reorder_level: 0.0,
            sort_sequence: None,
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_some("unit_id", "Unit", &self.unit_id);
        errors.require_non_negative("purchase_price", "Purchase price", self.purchase_price);
        errors.require_positive("sale_price", "Sale price", self.sale_price);
        errors.require_non_negative("reorder_level", "Reorder level", self.reorder_level);
        if self.sale_price > 0.0 && self.sale_price < self.purchase_price {
            errors.add("sale_price", "Sale price is below the purchase price");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> ProductDto {
        ProductDto {
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            unit_id: self.unit_id,
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            reorder_level: self.reorder_level,
            sort_sequence: self.sort_sequence,
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn resource() -> &'static str {
        "/api/products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        let mut p = Product::create_new();
        p.name = "Rice 5kg".into();
        p.unit_id = Some(1);
        p.purchase_price = 400.0;
        p.sale_price = 450.0;
        p
    }

    #[test]
    fn test_valid_product() {
        assert!(product().validate().is_ok());
        assert_eq!(product().margin(), 50.0);
    }

    #[test]
    fn test_sale_below_purchase_is_rejected() {
        let mut p = product();
        p.sale_price = 350.0;
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.field("sale_price").len(), 1);
    }

    #[test]
    fn test_reorder_flag() {
        let mut p = product();
        p.reorder_level = 5.0;
        p.stock_quantity = 5.0;
        assert!(p.needs_reorder());
        p.stock_quantity = 6.0;
        assert!(!p.needs_reorder());
        assert_eq!(p.stock_value(), 2400.0);
    }
}
