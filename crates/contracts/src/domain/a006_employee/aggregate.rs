use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId};
use crate::shared::validation::ValidationErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub salary: f64,
    /// YYYY-MM-DD
    #[serde(default)]
    pub joining_date: String,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub name: String,
    pub designation: String,
    pub phone: String,
    pub email: String,
    pub salary: f64,
    pub joining_date: Option<String>,
    pub status: bool,
}

impl CrudEntity for Employee {
    type Dto = EmployeeDto;

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
            designation: String::new(),
            phone: String::new(),
            email: String::new(),
            salary: 0.0,
            joining_date: String::new(),
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_text("designation", "Designation", &self.designation);
        errors.optional_phone("phone", &self.phone);
        errors.optional_email("email", &self.email);
        errors.require_non_negative("salary", "Salary", self.salary);
        let date = self.joining_date.trim();
        if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            errors.add("joining_date", "Joining date must be YYYY-MM-DD");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> EmployeeDto {
        let date = self.joining_date.trim();
        EmployeeDto {
            name: self.name.trim().to_string(),
            designation: self.designation.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            salary: self.salary,
            joining_date: (!date.is_empty()).then(|| date.to_string()),
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn resource() -> &'static str {
        "/api/employees"
    }

    fn element_name() -> &'static str {
        "Employee"
    }

    fn list_name() -> &'static str {
        "Employees"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joining_date_format() {
        let mut employee = Employee::create_new();
        employee.name = "Karim".into();
        employee.designation = "Cashier".into();
        employee.joining_date = "01/02/2024".into();
        assert!(employee.validate().is_err());
        employee.joining_date = "2024-02-01".into();
        assert!(employee.validate().is_ok());
        assert_eq!(employee.to_dto().joining_date.as_deref(), Some("2024-02-01"));
    }
}
