use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId, InvoiceParty};
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub opening_due: f64,
    /// Outstanding balance, computed by the server
    #[serde(default)]
    pub total_due: Option<f64>,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDto {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub opening_due: f64,
    pub status: bool,
}

impl CrudEntity for Customer {
    type Dto = CustomerDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        if self.phone.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.phone)
        }
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
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            opening_due: 0.0,
            total_due: None,
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.optional_phone("phone", &self.phone);
        errors.optional_email("email", &self.email);
        errors.require_non_negative("opening_due", "Opening due", self.opening_due);
        errors.into_result()
    }

    fn to_dto(&self) -> CustomerDto {
        CustomerDto {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            opening_due: self.opening_due,
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn resource() -> &'static str {
        "/api/customers"
    }

    fn element_name() -> &'static str {
        "Customer"
    }

    fn list_name() -> &'static str {
        "Customers"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

impl InvoiceParty for Customer {
    fn name(&self) -> &str {
        &self.name
    }

    fn phone(&self) -> &str {
        &self.phone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_reports_each_field() {
        let mut customer = Customer::create_new();
        customer.phone = "12".into();
        customer.email = "nope".into();
        let errors = customer.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(!errors.field("name").is_empty());
    }

    #[test]
    fn test_dto_drops_server_fields() {
        let mut customer = Customer::create_new();
        customer.id = Some(9);
        customer.name = "Rahim".into();
        customer.total_due = Some(120.0);
        let json = serde_json::to_value(customer.to_dto()).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("total_due").is_none());
        assert_eq!(json["name"], "Rahim");
    }
}
