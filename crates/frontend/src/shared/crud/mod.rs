//! Generic paged-list behavior shared by every entity screen.
//!
//! A screen supplies an entity type (`CrudEntity`), a service and its
//! columns; `ListController` and `CrudPage` do the rest.

pub mod columns;
pub mod controller;
pub mod flows;
pub mod page;
pub mod service;
pub mod state;

pub use columns::{Column, Columns};
pub use controller::{confirm, ListController};
pub use page::{field_errors, status_badge, CrudPage};
pub use service::{CrudService, RestService};
pub use state::ListState;
