pub mod api;
pub mod invoice;
pub mod money;
pub mod validation;
