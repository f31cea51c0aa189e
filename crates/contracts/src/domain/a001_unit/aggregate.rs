use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId};
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Unit of measure (pcs, kg, box...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDto {
    pub name: String,
    pub short_name: String,
    pub status: bool,
}

impl CrudEntity for Unit {
    type Dto = UnitDto;

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
            short_name: String::new(),
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        if self.short_name.chars().count() > 10 {
            errors.add("short_name", "Short name must be at most 10 characters");
        }
        errors.into_result()
    }

    fn to_dto(&self) -> UnitDto {
        UnitDto {
            name: self.name.trim().to_string(),
            short_name: self.short_name.trim().to_string(),
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn resource() -> &'static str {
        "/api/units"
    }

    fn element_name() -> &'static str {
        "Unit"
    }

    fn list_name() -> &'static str {
        "Units"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unit_is_invalid_until_named() {
        let mut unit = Unit::create_new();
        assert!(unit.status);
        assert!(unit.validate().is_err());
        unit.name = " Kilogram ".into();
        unit.short_name = "kg".into();
        assert!(unit.validate().is_ok());
        assert_eq!(unit.to_dto().name, "Kilogram");
    }

    #[test]
    fn test_status_defaults_to_active() {
        let unit: Unit = serde_json::from_str(r#"{"id": 3, "name": "Box"}"#).unwrap();
        assert_eq!(unit.id, Some(3));
        assert_eq!(unit.status(), Some(true));
    }
}
