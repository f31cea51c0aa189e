use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId, InvoiceParty};
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Amount owed to the supplier, computed by the server
    #[serde(default)]
    pub total_due: Option<f64>,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierDto {
    pub name: String,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: bool,
}

impl CrudEntity for Supplier {
    type Dto = SupplierDto;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn display_name(&self) -> String {
        if self.company_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} / {}", self.name, self.company_name)
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
            company_name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            total_due: None,
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        // Purchases look suppliers up by phone, so it is mandatory here
        errors.require_text("phone", "Phone", &self.phone);
        errors.optional_phone("phone", &self.phone);
        errors.optional_email("email", &self.email);
        errors.into_result()
    }

    fn to_dto(&self) -> SupplierDto {
        SupplierDto {
            name: self.name.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn resource() -> &'static str {
        "/api/suppliers"
    }

    fn element_name() -> &'static str {
        "Supplier"
    }

    fn list_name() -> &'static str {
        "Suppliers"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

impl InvoiceParty for Supplier {
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

    fn supplier() -> Supplier {
        let mut s = Supplier::create_new();
        s.name = "Karim".into();
        s.phone = "+880 1711-000000".into();
        s
    }

    #[test]
    fn test_name_and_phone_required() {
        let errors = Supplier::create_new().validate().unwrap_err();
        assert_eq!(errors.field("name"), ["Name is required"]);
        assert_eq!(errors.field("phone"), ["Phone is required"]);
        assert!(supplier().validate().is_ok());
    }

    #[test]
    fn test_phone_and_email_format() {
        let mut s = supplier();
        s.phone = "12-34".into();
        s.email = "not-an-email".into();
        let errors = s.validate().unwrap_err();
        assert_eq!(errors.field("phone"), ["Enter a valid phone number"]);
        assert_eq!(errors.field("email"), ["Enter a valid email address"]);

        let mut s = supplier();
        s.email = "sales@karim.example".into();
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_display_name_and_dto() {
        let mut s = supplier();
        assert_eq!(s.display_name(), "Karim");
        s.company_name = " Karim Traders ".into();
        s.address = " Dhaka ".into();
        let dto = s.to_dto();
        assert_eq!(dto.company_name, "Karim Traders");
        assert_eq!(dto.address, "Dhaka");
        s.company_name = "Karim Traders".into();
        assert_eq!(s.display_name(), "Karim / Karim Traders");
    }
}
