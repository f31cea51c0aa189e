use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId};
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Cash drawer, bank account or mobile wallet money is received into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub opening_balance: f64,
    /// Computed by the server from the ledger
    #[serde(default)]
    pub current_balance: Option<f64>,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodDto {
    pub name: String,
    pub account_number: String,
    pub opening_balance: f64,
    pub status: bool,
}

impl CrudEntity for PaymentMethod {
    type Dto = PaymentMethodDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn status(&self) -> Option<bool> {
        Some(self.status)
    }

    fn set_status(&mut self, active: bool) {
        self.status = active;
    }

    fn create_new() -> Self {
        Self {
            id: None,
            name: String::new(),
            account_number: String::new(),
            opening_balance: 0.0,
            current_balance: None,
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_non_negative("opening_balance", "Opening balance", self.opening_balance);
        errors.into_result()
    }

    fn to_dto(&self) -> PaymentMethodDto {
        PaymentMethodDto {
            name: self.name.trim().to_string(),
            account_number: self.account_number.trim().to_string(),
            opening_balance: self.opening_balance,
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn resource() -> &'static str {
        "/api/payment-methods"
    }

    fn element_name() -> &'static str {
        "Payment method"
    }

    fn list_name() -> &'static str {
        "Payment methods"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_method_needs_name() {
        let errors = PaymentMethod::create_new().validate().unwrap_err();
        assert_eq!(errors.field("name"), ["Name is required"]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_opening_balance_cannot_be_negative() {
        let mut method = PaymentMethod::create_new();
        method.name = "Cash drawer".into();
        method.opening_balance = -0.01;
        let errors = method.validate().unwrap_err();
        assert_eq!(errors.field("opening_balance"), ["Opening balance cannot be negative"]);

        method.opening_balance = f64::NAN;
        assert!(method.validate().is_err());

        method.opening_balance = 0.0;
        assert!(method.validate().is_ok());
    }

    #[test]
    fn test_dto_trims_and_drops_server_balance() {
        let method: PaymentMethod = serde_json::from_str(
            r#"{"id": 2, "name": " bKash ", "account_number": " 01711 ",
                "opening_balance": 500, "current_balance": 1250.5}"#,
        )
        .unwrap();
        assert!(method.status);
        assert_eq!(method.current_balance, Some(1250.5));

        let json = serde_json::to_value(method.to_dto()).unwrap();
        assert_eq!(json["name"], "bKash");
        assert_eq!(json["account_number"], "01711");
        assert!(json.get("current_balance").is_none());
        assert!(json.get("id").is_none());
    }
}
