use crate::domain::common::{Capabilities, CrudEntity, EntityId};
use crate::shared::validation::ValidationErrors;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Stock consumed outside of a sale (damage, internal use, production).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUsage {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub product_name: String,
    pub quantity: f64,
    /// YYYY-MM-DD
    pub usage_date: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUsageDto {
    pub product_id: Option<EntityId>,
    pub quantity: f64,
    pub usage_date: String,
    pub reason: String,
}

impl StockUsage {
    pub fn new_dated(date: NaiveDate) -> Self {
        Self {
            id: None,
            product_id: None,
            product_name: String::new(),
            quantity: 1.0,
            usage_date: date.format("%Y-%m-%d").to_string(),
            reason: String::new(),
        }
    }
}

impl CrudEntity for StockUsage {
    type Dto = StockUsageDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} x {}", self.product_name, self.quantity)
    }

    fn create_new() -> Self {
        Self::new_dated(Local::now().date_naive())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_some("product_id", "Product", &self.product_id);
        errors.require_positive("quantity", "Quantity", self.quantity);
        errors.require_text("reason", "Reason", &self.reason);
        if NaiveDate::parse_from_str(self.usage_date.trim(), "%Y-%m-%d").is_err() {
            errors.add("usage_date", "Date is required");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> StockUsageDto {
        StockUsageDto {
            product_id: self.product_id,
            quantity: self.quantity,
            usage_date: self.usage_date.trim().to_string(),
            reason: self.reason.trim().to_string(),
        }
    }

    fn aggregate_index() -> &'static str {
        "a012"
    }

    fn resource() -> &'static str {
        "/api/stock-usages"
    }

    fn element_name() -> &'static str {
        "Stock usage"
    }

    fn list_name() -> &'static str {
        "Stock usage"
    }

    fn capabilities() -> Capabilities {
        Capabilities::DELETE_ONLY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_usage() -> StockUsage {
        let mut usage = StockUsage::new_dated(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        usage.product_id = Some(4);
        usage.product_name = "Flour".into();
        usage.quantity = 2.5;
        usage.reason = " Damaged in storage ".into();
        usage
    }

    #[test]
    fn test_new_usage_is_dated() {
        let usage = StockUsage::new_dated(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(usage.usage_date, "2024-03-05");
        assert_eq!(usage.quantity, 1.0);
        assert!(!StockUsage::create_new().usage_date.is_empty());
    }

    #[test]
    fn test_valid_usage_and_dto() {
        let usage = valid_usage();
        assert!(usage.validate().is_ok());
        let dto = usage.to_dto();
        assert_eq!(dto.reason, "Damaged in storage");
        assert_eq!(dto.usage_date, "2024-03-05");
        assert_eq!(dto.product_id, Some(4));
    }

    #[test]
    fn test_product_quantity_and_reason_required() {
        let mut usage = valid_usage();
        usage.product_id = None;
        usage.quantity = 0.0;
        usage.reason = "   ".into();
        let errors = usage.validate().unwrap_err();
        assert!(!errors.field("product_id").is_empty());
        assert!(!errors.field("quantity").is_empty());
        assert!(!errors.field("reason").is_empty());
        assert!(errors.field("usage_date").is_empty());
    }

    #[test]
    fn test_date_must_be_a_calendar_day() {
        for bad in ["", "2024-02-30", "05/03/2024"] {
            let mut usage = valid_usage();
            usage.usage_date = bad.into();
            let errors = usage.validate().unwrap_err();
            assert_eq!(errors.field("usage_date"), ["Date is required"], "{:?}", bad);
            assert_eq!(errors.len(), 1);
        }
    }
}
