use crate::domain::common::{default_true, Capabilities, CrudEntity, EntityId};
use crate::shared::money::round2;
use crate::shared::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// Raw material consumed by a bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomComponent {
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub product_name: String,
    pub quantity: f64,
    /// Purchase price of the material at the time of costing
    pub unit_cost: f64,
}

impl BomComponent {
    pub fn blank() -> Self {
        Self {
            product_id: None,
            product_name: String::new(),
            quantity: 1.0,
            unit_cost: 0.0,
        }
    }

    pub fn cost(&self) -> f64 {
        round2(self.quantity * self.unit_cost)
    }
}

/// Bill of materials: `output_quantity` units of `product_id` are made from `components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    pub product_id: Option<EntityId>,
    #[serde(default)]
    pub product_name: String,
    pub output_quantity: f64,
    #[serde(default)]
    pub components: Vec<BomComponent>,
    /// Labour, packaging, overhead added on top of materials
    #[serde(default)]
    pub extra_cost: f64,
    #[serde(default = "default_true")]
    pub status: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BomCost {
    pub material_cost: f64,
    pub extra_cost: f64,
    pub total_cost: f64,
    /// Zero when the output quantity is not positive
    pub unit_cost: f64,
}

impl BomCost {
    pub fn compute(components: &[BomComponent], extra_cost: f64, output_quantity: f64) -> Self {
        let material_cost = round2(components.iter().map(BomComponent::cost).sum());
        let extra_cost = round2(extra_cost.max(0.0));
        let total_cost = round2(material_cost + extra_cost);
        let unit_cost = if output_quantity > 0.0 {
            round2(total_cost / output_quantity)
        } else {
            0.0
        };
        Self {
            material_cost,
            extra_cost,
            total_cost,
            unit_cost,
        }
    }
}

impl Bom {
    pub fn cost(&self) -> BomCost {
        BomCost::compute(&self.components, self.extra_cost, self.output_quantity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomDto {
    pub name: String,
    pub product_id: Option<EntityId>,
    pub output_quantity: f64,
    pub components: Vec<BomComponent>,
    pub extra_cost: f64,
    pub status: bool,
}

impl CrudEntity for Bom {
    type Dto = BomDto;

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
            product_id: None,
            product_name: String::new(),
            output_quantity: 1.0,
            components: vec![BomComponent::blank()],
            extra_cost: 0.0,
            status: true,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("name", "Name", &self.name);
        errors.require_some("product_id", "Finished product", &self.product_id);
        errors.require_positive("output_quantity", "Output quantity", self.output_quantity);
        errors.require_non_negative("extra_cost", "Extra cost", self.extra_cost);
        if self.components.is_empty() {
            errors.add("components", "Add at least one material");
        }
        for (idx, component) in self.components.iter().enumerate() {
            if component.product_id.is_none() {
                errors.add("components", format!("Row {}: select a material", idx + 1));
            } else if component.product_id == self.product_id {
                errors.add("components", format!("Row {}: a product cannot consume itself", idx + 1));
            }
            if component.quantity.is_nan() || component.quantity <= 0.0 {
                errors.add("components", format!("Row {}: quantity must be greater than zero", idx + 1));
            }
        }
        errors.into_result()
    }

    fn to_dto(&self) -> BomDto {
        BomDto {
            name: self.name.trim().to_string(),
            product_id: self.product_id,
            output_quantity: self.output_quantity,
            components: self.components.clone(),
            extra_cost: self.extra_cost,
            status: self.status,
        }
    }

    fn aggregate_index() -> &'static str {
        "a011"
    }

    fn resource() -> &'static str {
        "/api/boms"
    }

    fn element_name() -> &'static str {
        "Bill of materials"
    }

    fn list_name() -> &'static str {
        "Bills of materials"
    }

    fn capabilities() -> Capabilities {
        Capabilities::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: EntityId, qty: f64, cost: f64) -> BomComponent {
        BomComponent {
            product_id: Some(id),
            product_name: format!("M{}", id),
            quantity: qty,
            unit_cost: cost,
        }
    }

    #[test]
    fn test_costing() {
        let cost = BomCost::compute(&[component(2, 3.0, 10.0), component(3, 0.5, 7.0)], 6.5, 4.0);
        assert_eq!(cost.material_cost, 33.5);
        assert_eq!(cost.total_cost, 40.0);
        assert_eq!(cost.unit_cost, 10.0);
    }

    #[test]
    fn test_zero_output_has_no_unit_cost() {
        let cost = BomCost::compute(&[component(2, 1.0, 5.0)], 0.0, 0.0);
        assert_eq!(cost.total_cost, 5.0);
        assert_eq!(cost.unit_cost, 0.0);
    }

    #[test]
    fn test_self_consumption_rejected() {
        let mut bom = Bom::create_new();
        bom.name = "Cake".into();
        bom.product_id = Some(1);
        bom.components = vec![component(1, 1.0, 1.0)];
        let errors = bom.validate().unwrap_err();
        assert_eq!(errors.field("components").len(), 1);
    }
}
