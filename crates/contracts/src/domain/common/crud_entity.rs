use crate::shared::validation::ValidationErrors;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Server-assigned numeric identifier.
pub type EntityId = i64;

/// Optional operations an entity's endpoint supports.
///
/// Resolved at compile time per entity, the list screens only render the
/// actions that are present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub delete: bool,
    pub toggle_status: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        delete: false,
        toggle_status: false,
    };

    pub const FULL: Capabilities = Capabilities {
        delete: true,
        toggle_status: true,
    };

    pub const DELETE_ONLY: Capabilities = Capabilities {
        delete: true,
        toggle_status: false,
    };
}

/// Everything a generic list/edit screen needs to know about a record.
pub trait CrudEntity: Clone + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Write shape sent on create/update (server-owned fields dropped)
    type Dto: Serialize + Clone + Send + Sync + 'static;

    // ============================================================================
    // Instance data
    // ============================================================================

    /// `None` until the server has created the record
    fn id(&self) -> Option<EntityId>;

    /// Human readable label used in confirmations and toasts
    fn display_name(&self) -> String;

    /// Active/inactive flag for entities that carry one
    fn status(&self) -> Option<bool> {
        None
    }

    fn set_status(&mut self, _active: bool) {}

    fn sort_sequence(&self) -> Option<i32> {
        None
    }

    // ============================================================================
    // Extension points
    // ============================================================================

    /// Blank record with defaults for the "create" dialog
    fn create_new() -> Self;

    /// Pre-submit validation, runs before any network call
    fn validate(&self) -> Result<(), ValidationErrors>;

    fn to_dto(&self) -> Self::Dto;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Index of the entity in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// REST collection path, e.g. "/api/units"
    fn resource() -> &'static str;

    /// Singular UI name, e.g. "Unit"
    fn element_name() -> &'static str;

    /// Plural UI name, e.g. "Units"
    fn list_name() -> &'static str;

    fn capabilities() -> Capabilities;
}

/// Serde default for status flags: records are active unless stated otherwise.
pub(crate) fn default_true() -> bool {
    true
}
